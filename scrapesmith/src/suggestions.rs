//! Structural acceptance of AI suggestion responses.
//!
//! Suggestions are advisory. A response is classified by shape only and its
//! content is never trusted for correctness; anything unrecognised is kept as
//! plain text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

use crate::config::BackendKind;
use crate::links::LinkCandidate;
use crate::selector::FieldDescriptor;

#[allow(clippy::expect_used)]
fn fence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("fence pattern compiles")
    })
}

/// Advice on which acquisition method to use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodAdvice {
    /// Recommended method, free text.
    pub recommendation: String,
    /// Explanation for the recommendation.
    #[serde(default)]
    pub reason: String,
}

impl MethodAdvice {
    /// Maps the recommendation onto a backend family when it names exactly one.
    #[must_use]
    pub fn backend_hint(&self) -> Option<BackendKind> {
        const INTERACTIVE: [&str; 4] = ["selenium", "playwright", "browser", "interactive"];
        const STATIC: [&str; 4] = ["requests", "static", "beautifulsoup", "http"];

        let text = self.recommendation.to_lowercase();
        let interactive = INTERACTIVE.iter().any(|k| text.contains(k));
        let fetch = STATIC.iter().any(|k| text.contains(k));
        match (interactive, fetch) {
            (true, false) => Some(BackendKind::InteractiveBrowser),
            (false, true) => Some(BackendKind::StaticFetch),
            _ => None,
        }
    }
}

/// A suggested named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSuggestion {
    /// Suggested name, possibly unsafe as an identifier.
    pub name: String,
    /// Suggested tag.
    pub tag: String,
    /// Suggested attrs.
    #[serde(default)]
    pub attrs: String,
}

impl FieldSuggestion {
    /// Converts into a field descriptor with an identifier-safe name.
    #[must_use]
    pub fn into_descriptor(self) -> FieldDescriptor {
        FieldDescriptor::sanitized(&self.name, self.tag.trim(), self.attrs.trim())
    }
}

/// A classified suggestion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Suggestion {
    /// Unstructured text.
    Text(String),
    /// `{recommendation, reason}`.
    MethodAdvice(MethodAdvice),
    /// `[{name, tag, attrs}, ...]`.
    Fields(Vec<FieldSuggestion>),
    /// `["href", ...]`, the links to keep.
    AcceptedLinks(Vec<String>),
}

/// Strips a Markdown code fence around the payload, if there is one.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    fence_pattern()
        .captures(raw)
        .and_then(|c| c.get(1))
        .map_or(raw, |m| m.as_str())
        .trim()
}

/// Classifies a raw response by its JSON shape. Never fails.
///
/// An empty JSON array is read as an empty accepted-links list.
#[must_use]
pub fn parse_suggestion(raw: &str) -> Suggestion {
    let payload = strip_code_fence(raw);
    let suggestion = match serde_json::from_str::<Value>(payload) {
        Ok(value) => classify(value).unwrap_or_else(|| Suggestion::Text(raw.trim().to_string())),
        Err(_) => Suggestion::Text(raw.trim().to_string()),
    };
    debug!(kind = suggestion.kind(), "suggestion classified");
    suggestion
}

fn classify(value: Value) -> Option<Suggestion> {
    match value {
        Value::Object(ref map) if map.get("recommendation").is_some_and(Value::is_string) => {
            serde_json::from_value(value).ok().map(Suggestion::MethodAdvice)
        }
        Value::Array(items) if items.iter().all(Value::is_string) => Some(Suggestion::AcceptedLinks(
            items
                .into_iter()
                .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
                .collect(),
        )),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            serde_json::from_value(Value::Array(items)).ok().map(Suggestion::Fields)
        }
        _ => None,
    }
}

impl Suggestion {
    /// Short name of the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::MethodAdvice(_) => "method_advice",
            Self::Fields(_) => "fields",
            Self::AcceptedLinks(_) => "accepted_links",
        }
    }

    /// Field descriptors for a fields suggestion; empty otherwise.
    #[must_use]
    pub fn into_descriptors(self) -> Vec<FieldDescriptor> {
        match self {
            Self::Fields(fields) => fields.into_iter().map(FieldSuggestion::into_descriptor).collect(),
            _ => Vec::new(),
        }
    }
}

/// Marks each link selected iff its href is in `accepted`.
///
/// Returns how many links stay selected.
pub fn apply_link_filter(links: &mut [LinkCandidate], accepted: &[String]) -> usize {
    let accepted: HashSet<&str> = accepted.iter().map(|h| h.trim()).collect();
    let mut kept = 0;
    for link in links.iter_mut() {
        link.selected = accepted.contains(link.href.as_str());
        if link.selected {
            kept += 1;
        }
    }
    debug!(kept, total = links.len(), "link filter applied");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_advice_in_fence() {
        let raw = "Here you go:\n```json\n{\"recommendation\": \"Use Selenium\", \"reason\": \"JS rendered\"}\n```";
        let Suggestion::MethodAdvice(advice) = parse_suggestion(raw) else {
            panic!("expected method advice");
        };
        assert_eq!(advice.reason, "JS rendered");
        assert_eq!(advice.backend_hint(), Some(BackendKind::InteractiveBrowser));
    }

    #[test]
    fn test_backend_hint_needs_one_family() {
        let advice = |r: &str| MethodAdvice {
            recommendation: r.to_string(),
            reason: String::new(),
        };
        assert_eq!(advice("requests + BeautifulSoup").backend_hint(), Some(BackendKind::StaticFetch));
        assert_eq!(advice("Playwright or requests").backend_hint(), None);
        assert_eq!(advice("no idea").backend_hint(), None);
    }

    #[test]
    fn test_field_list_is_sanitized() {
        let raw = r#"[{"name": "Product Title!", "tag": "h2", "attrs": "class=title"}, {"name": "price", "tag": "span"}]"#;
        let suggestion = parse_suggestion(raw);
        assert_eq!(suggestion.kind(), "fields");
        let fields = suggestion.into_descriptors();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "Product_Title");
        assert_eq!(fields[0].selector(), "h2.title");
        assert_eq!(fields[1].attrs, "");
    }

    #[test]
    fn test_accepted_links() {
        let raw = "```\n[\"https://a.test/1\", \" https://a.test/2 \"]\n```";
        assert_eq!(
            parse_suggestion(raw),
            Suggestion::AcceptedLinks(vec!["https://a.test/1".into(), "https://a.test/2".into()])
        );
        assert_eq!(parse_suggestion("[]"), Suggestion::AcceptedLinks(Vec::new()));
    }

    #[test]
    fn test_unrecognised_shapes_fall_back_to_text() {
        assert_eq!(parse_suggestion("  just prose  "), Suggestion::Text("just prose".into()));
        assert_eq!(parse_suggestion("{\"other\": 1}").kind(), "text");
        assert_eq!(parse_suggestion("[1, 2]").kind(), "text");
        assert_eq!(parse_suggestion("[{\"name\": \"x\"}]").kind(), "text");
        assert!(parse_suggestion("not json").into_descriptors().is_empty());
    }

    #[test]
    fn test_apply_link_filter() {
        let mut links = vec![
            LinkCandidate {
                text: "One".into(),
                href: "https://a.test/1".into(),
                selected: true,
            },
            LinkCandidate {
                text: "Two".into(),
                href: "https://a.test/2".into(),
                selected: true,
            },
        ];
        let kept = apply_link_filter(&mut links, &["https://a.test/2".to_string()]);
        assert_eq!(kept, 1);
        assert!(!links[0].selected);
        assert!(links[1].selected);
    }

    #[test]
    fn test_link_filter_over_harvested_page() {
        use crate::links::harvest_all_links;
        use crate::selector::SampleDocument;
        use crate::testing::fixtures;

        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let mut report = harvest_all_links(&doc, Some("https://news.test/"));
        assert_eq!(report.selected_count(), report.links.len());

        let Suggestion::AcceptedLinks(accepted) =
            parse_suggestion("[\"https://news.test/story/1\", \"https://elsewhere.test/\"]")
        else {
            panic!("expected accepted links");
        };
        let kept = apply_link_filter(&mut report.links, &accepted);
        assert_eq!(kept, 1);
        assert_eq!(report.selected_count(), kept);
    }
}
