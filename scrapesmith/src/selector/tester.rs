//! Interactive selector feedback against a sample document.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use super::compiler::{compile, INVALID_SELECTOR};
use super::descriptor::ElementDescriptor;
use super::document::{element_text, parse_selector, SampleDocument};

/// Number of matches shown in an unscoped field preview.
pub const PREVIEW_MATCHES: usize = 3;

/// Characters kept from each previewed text before the ellipsis.
pub const PREVIEW_TEXT_CHARS: usize = 20;

/// Separator between previewed texts.
pub const PREVIEW_SEPARATOR: &str = " | ";

/// Preview shown when every previewed match has empty text.
pub const NO_TEXT_NOTICE: &str = "(no text content)";

/// What a descriptor is being tested as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    /// The repeating record container.
    Container,
    /// The container scoping link harvesting.
    LinkContainer,
    /// A named field.
    Field,
    /// The anchor looked up inside each link container.
    LinkField,
}

impl TestKind {
    /// Whether the kind is evaluated against the whole document.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container | Self::LinkContainer)
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::LinkContainer => write!(f, "link_container"),
            Self::Field => write!(f, "field"),
            Self::LinkField => write!(f, "link_field"),
        }
    }
}

/// Where a field or link-field test is evaluated.
#[derive(Debug, Clone, Copy)]
pub enum TestScope<'a> {
    /// No container: count matches over the whole document.
    Document,
    /// Count the containers matched by this descriptor that hold a match.
    Within(&'a ElementDescriptor),
}

/// Outcome classification of a selector test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum TestStatus {
    /// At least one match.
    Matched,
    /// The selector ran and matched nothing.
    NoMatches,
    /// The descriptor has no tag.
    EmptyTag,
    /// The selector could not be compiled or was rejected by the engine.
    SelectorInvalid(String),
    /// A scoped test ran before any usable container descriptor existed.
    ContainerUnresolved,
    /// The container selector matched no element, so there is nothing to test within.
    NoContainers,
}

impl TestStatus {
    /// Whether the status should be shown as an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Matched)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matched => write!(f, "matched"),
            Self::NoMatches => write!(f, "no_matches"),
            Self::EmptyTag => write!(f, "empty_tag"),
            Self::SelectorInvalid(_) => write!(f, "selector_invalid"),
            Self::ContainerUnresolved => write!(f, "container_unresolved"),
            Self::NoContainers => write!(f, "no_containers"),
        }
    }
}

/// Result of testing one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorTestResult {
    /// Matches (unscoped) or containers holding a match (scoped).
    pub count: usize,
    /// Number of containers considered, for scoped tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    /// Human-readable summary or text preview.
    pub preview: String,
    /// Outcome classification.
    pub status: TestStatus,
}

impl SelectorTestResult {
    fn failure(status: TestStatus, preview: impl Into<String>) -> Self {
        Self {
            count: 0,
            total: None,
            preview: preview.into(),
            status,
        }
    }

    fn empty_tag() -> Self {
        Self::failure(TestStatus::EmptyTag, "Enter a tag to test this selector.")
    }

    fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::failure(
            TestStatus::SelectorInvalid(message.clone()),
            format!("Invalid selector: {message}"),
        )
    }

    fn container_unresolved() -> Self {
        Self::failure(
            TestStatus::ContainerUnresolved,
            "Define and test the container before testing this selector.",
        )
    }

    fn no_containers() -> Self {
        Self::failure(
            TestStatus::NoContainers,
            "No containers to test within. Check the container selector.",
        )
    }

    /// Whether the result should be shown as an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status.is_error()
    }
}

fn status_for(count: usize) -> TestStatus {
    if count == 0 {
        TestStatus::NoMatches
    } else {
        TestStatus::Matched
    }
}

fn compiled(descriptor: &ElementDescriptor) -> Result<String, String> {
    let selector = compile(&descriptor.tag, &descriptor.attrs);
    if selector == INVALID_SELECTOR {
        Err(format!("could not read attrs '{}'", descriptor.attrs.trim()))
    } else {
        Ok(selector)
    }
}

/// Tests a descriptor against the sample document.
///
/// Never fails: malformed descriptors and rejected selectors come back as
/// error-flagged results.
#[must_use]
pub fn test_selector(
    document: &SampleDocument,
    kind: TestKind,
    descriptor: &ElementDescriptor,
    scope: TestScope<'_>,
) -> SelectorTestResult {
    if !descriptor.has_tag() {
        return SelectorTestResult::empty_tag();
    }

    let result = match (kind, scope) {
        (TestKind::Container | TestKind::LinkContainer, _) => test_container(document, descriptor),
        (TestKind::Field, TestScope::Document) => test_unscoped_field(document, descriptor),
        (TestKind::Field, TestScope::Within(container)) => {
            test_scoped(document, container, descriptor, "containers have a match")
        }
        (TestKind::LinkField, TestScope::Within(container)) => {
            test_scoped(document, container, descriptor, "containers have a matching link")
        }
        (TestKind::LinkField, TestScope::Document) => SelectorTestResult::container_unresolved(),
    };

    debug!(
        %kind,
        descriptor = %descriptor,
        count = result.count,
        status = %result.status,
        "selector tested"
    );
    result
}

fn test_container(document: &SampleDocument, descriptor: &ElementDescriptor) -> SelectorTestResult {
    let selector = match compiled(descriptor) {
        Ok(s) => s,
        Err(message) => return SelectorTestResult::invalid(message),
    };
    match document.count(&selector) {
        Ok(count) => SelectorTestResult {
            count,
            total: None,
            preview: if count == 0 {
                "No elements match this selector.".to_string()
            } else {
                format!("Found {count} matching element(s).")
            },
            status: status_for(count),
        },
        Err(err) => {
            warn!(selector = %selector, error = %err.message, "container selector rejected");
            SelectorTestResult::invalid(err.message)
        }
    }
}

fn test_unscoped_field(
    document: &SampleDocument,
    descriptor: &ElementDescriptor,
) -> SelectorTestResult {
    let selector = match compiled(descriptor) {
        Ok(s) => s,
        Err(message) => return SelectorTestResult::invalid(message),
    };
    let matches = match document.select(&selector) {
        Ok(m) => m,
        Err(err) => return SelectorTestResult::invalid(err.message),
    };

    let count = matches.len();
    let preview = if count == 0 {
        "No elements match this selector.".to_string()
    } else {
        let texts: Vec<String> = matches
            .iter()
            .take(PREVIEW_MATCHES)
            .map(element_text)
            .filter(|t| !t.is_empty())
            .map(|t| truncate_preview(&t))
            .collect();
        if texts.is_empty() {
            NO_TEXT_NOTICE.to_string()
        } else {
            texts.join(PREVIEW_SEPARATOR)
        }
    };

    SelectorTestResult {
        count,
        total: None,
        preview,
        status: status_for(count),
    }
}

fn test_scoped(
    document: &SampleDocument,
    container: &ElementDescriptor,
    descriptor: &ElementDescriptor,
    summary: &str,
) -> SelectorTestResult {
    if !container.has_tag() {
        return SelectorTestResult::container_unresolved();
    }
    let Ok(container_selector) = compiled(container) else {
        return SelectorTestResult::container_unresolved();
    };
    let containers = match document.select(&container_selector) {
        Ok(c) => c,
        Err(err) => {
            debug!(selector = %container_selector, error = %err.message, "container unusable for scoped test");
            return SelectorTestResult::container_unresolved();
        }
    };
    if containers.is_empty() {
        return SelectorTestResult::no_containers();
    }

    let parsed = compiled(descriptor).and_then(|s| parse_selector(&s).map_err(|e| e.message));
    let field_selector = match parsed {
        Ok(s) => s,
        Err(message) => return SelectorTestResult::invalid(message),
    };

    let total = containers.len();
    let count = containers
        .iter()
        .filter(|c| c.select(&field_selector).next().is_some())
        .count();

    SelectorTestResult {
        count,
        total: Some(total),
        preview: format!("{count} of {total} {summary}"),
        status: status_for(count),
    }
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_TEXT_CHARS {
        let head: String = text.chars().take(PREVIEW_TEXT_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_tag_short_circuits() {
        let doc = SampleDocument::parse(&fixtures::item_listing(3));
        let result = test_selector(
            &doc,
            TestKind::Container,
            &ElementDescriptor::new(" ", "class=item"),
            TestScope::Document,
        );
        assert_eq!(result.status, TestStatus::EmptyTag);
        assert_eq!(result.count, 0);
        assert!(result.is_error());
    }

    #[test]
    fn test_container_counts_whole_document() {
        let doc = SampleDocument::parse(&fixtures::item_listing(3));
        let result = test_selector(
            &doc,
            TestKind::Container,
            &ElementDescriptor::new("div", "class=\"item\""),
            TestScope::Document,
        );
        assert_eq!(result.count, 3);
        assert!(!result.is_error());

        let none = test_selector(
            &doc,
            TestKind::LinkContainer,
            &ElementDescriptor::new("div", "class=\"missing\""),
            TestScope::Document,
        );
        assert_eq!(none.count, 0);
        assert_eq!(none.status, TestStatus::NoMatches);
    }

    #[test]
    fn test_scoped_field_reports_container_ratio() {
        let doc = SampleDocument::parse(&fixtures::item_listing(3));
        let container = ElementDescriptor::new("div", "class=\"item\"");
        let result = test_selector(
            &doc,
            TestKind::Field,
            &ElementDescriptor::tag("h2"),
            TestScope::Within(&container),
        );
        assert_eq!(result.count, 3);
        assert_eq!(result.total, Some(3));
        assert_eq!(result.preview, "3 of 3 containers have a match");
        assert!(!result.is_error());
    }

    #[test]
    fn test_scoped_field_partial_match_stays_within_bound() {
        let doc = SampleDocument::parse(fixtures::MIXED_CARDS);
        let container = ElementDescriptor::new("article", "class=card");
        let result = test_selector(
            &doc,
            TestKind::Field,
            &ElementDescriptor::new("span", "class=price"),
            TestScope::Within(&container),
        );
        assert_eq!(result.total, Some(3));
        assert_eq!(result.count, 2);
        assert!(result.count <= result.total.unwrap_or(0));
    }

    #[test]
    fn test_unresolved_and_empty_containers_are_distinct() {
        let doc = SampleDocument::parse(&fixtures::item_listing(2));
        let field = ElementDescriptor::tag("h2");

        let unresolved = ElementDescriptor::default();
        let result = test_selector(&doc, TestKind::Field, &field, TestScope::Within(&unresolved));
        assert_eq!(result.status, TestStatus::ContainerUnresolved);

        let absent = ElementDescriptor::new("section", "class=nothing");
        let result = test_selector(&doc, TestKind::Field, &field, TestScope::Within(&absent));
        assert_eq!(result.status, TestStatus::NoContainers);

        let present = ElementDescriptor::new("div", "class=item");
        let result = test_selector(
            &doc,
            TestKind::Field,
            &ElementDescriptor::tag("table"),
            TestScope::Within(&present),
        );
        assert_eq!(result.status, TestStatus::NoMatches);
        assert_eq!(result.preview, "0 of 2 containers have a match");
    }

    #[test]
    fn test_unscoped_field_preview() {
        let doc = SampleDocument::parse(fixtures::MIXED_CARDS);
        let result = test_selector(
            &doc,
            TestKind::Field,
            &ElementDescriptor::tag("h3"),
            TestScope::Document,
        );
        assert_eq!(result.count, 4);
        assert_eq!(
            result.preview,
            "Compact Widget | An Extraordinarily L... | Gadget"
        );
    }

    #[test]
    fn test_unscoped_field_without_text() {
        let doc = SampleDocument::parse(fixtures::MIXED_CARDS);
        let result = test_selector(
            &doc,
            TestKind::Field,
            &ElementDescriptor::tag("img"),
            TestScope::Document,
        );
        assert_eq!(result.count, 2);
        assert_eq!(result.preview, NO_TEXT_NOTICE);
    }

    #[test]
    fn test_link_field_requires_container() {
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let anchor = ElementDescriptor::tag("a");
        let result = test_selector(&doc, TestKind::LinkField, &anchor, TestScope::Document);
        assert_eq!(result.status, TestStatus::ContainerUnresolved);

        let rows = ElementDescriptor::new("li", "class=result");
        let result = test_selector(&doc, TestKind::LinkField, &anchor, TestScope::Within(&rows));
        assert_eq!(result.preview, "2 of 3 containers have a matching link");
    }

    #[test]
    fn test_malformed_selectors_are_reported() {
        let doc = SampleDocument::parse(&fixtures::item_listing(1));
        let bad_attrs = test_selector(
            &doc,
            TestKind::Container,
            &ElementDescriptor::new("div", "class=\"item"),
            TestScope::Document,
        );
        assert!(matches!(bad_attrs.status, TestStatus::SelectorInvalid(_)));

        let bad_css = test_selector(
            &doc,
            TestKind::Container,
            &ElementDescriptor::tag("div[["),
            TestScope::Document,
        );
        assert!(matches!(bad_css.status, TestStatus::SelectorInvalid(_)));
        assert!(bad_css.preview.starts_with("Invalid selector:"));
    }

    #[test]
    fn test_retest_is_idempotent() {
        let doc = SampleDocument::parse(&fixtures::item_listing(3));
        let container = ElementDescriptor::new("div", "class=item");
        let field = ElementDescriptor::tag("h2");
        let first = test_selector(&doc, TestKind::Field, &field, TestScope::Within(&container));
        let second = test_selector(&doc, TestKind::Field, &field, TestScope::Within(&container));
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let result = SelectorTestResult::no_containers();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"]["kind"], "no_containers");
        assert_eq!(json["count"], 0);
    }
}
