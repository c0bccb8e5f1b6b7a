//! Hyperlink candidate harvesting.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::errors::SelectorError;
use crate::selector::{element_text, parse_selector, SampleDocument};

/// Selector for anchors that carry an href.
pub const ANCHOR_SELECTOR: &str = "a[href]";

/// A harvested link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    /// Anchor text with whitespace collapsed.
    pub text: String,
    /// Absolute URL, or the raw href when it could not be resolved.
    pub href: String,
    /// Whether the link is kept; callers may toggle this.
    pub selected: bool,
}

/// An href that could not be resolved against the base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkWarning {
    /// The raw href, kept as-is in the candidate.
    pub href: String,
    /// Why resolution failed.
    pub reason: String,
}

/// Full result of one harvesting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestReport {
    /// Harvested links, in document order.
    pub links: Vec<LinkCandidate>,
    /// Non-fatal resolution failures.
    #[serde(default)]
    pub warnings: Vec<LinkWarning>,
    /// Set when a selector was rejected; `links` is then empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector_error: Option<String>,
}

impl HarvestReport {
    fn rejected(err: &SelectorError) -> Self {
        warn!(selector = %err.selector, error = %err.message, "harvest selector rejected");
        Self {
            selector_error: Some(err.to_string()),
            ..Default::default()
        }
    }

    /// Number of links currently selected.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.links.iter().filter(|l| l.selected).count()
    }
}

/// Resolves an href against an optional base.
///
/// Without a base the href is returned unchanged.
pub fn resolve_href(base: Option<&Url>, href: &str) -> Result<String, url::ParseError> {
    match base {
        Some(base) => base.join(href).map(String::from),
        None => Ok(href.to_string()),
    }
}

struct Resolver {
    base: Option<Url>,
    base_error: Option<String>,
}

impl Resolver {
    fn new(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim).filter(|b| !b.is_empty()) {
            None => Self {
                base: None,
                base_error: None,
            },
            Some(raw) => match Url::parse(raw) {
                Ok(base) => Self {
                    base: Some(base),
                    base_error: None,
                },
                Err(e) => {
                    warn!(base_url = raw, error = %e, "base URL invalid, links left unresolved");
                    Self {
                        base: None,
                        base_error: Some(format!("base URL '{raw}' is invalid: {e}")),
                    }
                }
            },
        }
    }

    fn push(&self, report: &mut HarvestReport, text: String, href: &str) {
        let href = match (&self.base_error, resolve_href(self.base.as_ref(), href)) {
            (Some(reason), _) => {
                report.warnings.push(LinkWarning {
                    href: href.to_string(),
                    reason: reason.clone(),
                });
                href.to_string()
            }
            (None, Ok(resolved)) => resolved,
            (None, Err(e)) => {
                warn!(href, error = %e, "link left unresolved");
                report.warnings.push(LinkWarning {
                    href: href.to_string(),
                    reason: e.to_string(),
                });
                href.to_string()
            }
        };
        report.links.push(LinkCandidate {
            text,
            href,
            selected: true,
        });
    }
}

/// Harvests every anchor with a non-empty href.
#[must_use]
pub fn harvest_all_links(document: &SampleDocument, base_url: Option<&str>) -> HarvestReport {
    let resolver = Resolver::new(base_url);
    let mut report = HarvestReport::default();

    let anchors = match document.select(ANCHOR_SELECTOR) {
        Ok(a) => a,
        Err(err) => return HarvestReport::rejected(&err),
    };
    for anchor in anchors {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        resolver.push(&mut report, element_text(&anchor), href);
    }

    debug!(
        links = report.links.len(),
        warnings = report.warnings.len(),
        "harvested all links"
    );
    report
}

/// Harvests the first `link_selector` match inside each `container_selector` match.
///
/// Containers without a matching element, or whose match has no href, are
/// skipped.
#[must_use]
pub fn harvest_container_links(
    document: &SampleDocument,
    container_selector: &str,
    link_selector: &str,
    base_url: Option<&str>,
) -> HarvestReport {
    let resolver = Resolver::new(base_url);
    let mut report = HarvestReport::default();

    let containers = match document.select(container_selector) {
        Ok(c) => c,
        Err(err) => return HarvestReport::rejected(&err),
    };
    let link = match parse_selector(link_selector) {
        Ok(s) => s,
        Err(err) => return HarvestReport::rejected(&err),
    };

    for container in &containers {
        let Some(anchor) = container.select(&link).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if href.is_empty() {
            continue;
        }
        resolver.push(&mut report, element_text(&anchor), href);
    }

    debug!(
        containers = containers.len(),
        links = report.links.len(),
        "harvested container links"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_all_links_resolve_against_base() {
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let report = harvest_all_links(&doc, Some("https://news.test/search?q=rust"));
        let hrefs: Vec<&str> = report.links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "https://news.test/",
                "https://news.test/story/1",
                "https://other.test/story/2",
                "https://news.test/search?page=2",
            ]
        );
        assert!(report.links.iter().all(|l| l.selected));
        assert!(report.warnings.is_empty());
        assert_eq!(report.links[1].text, "First story");
    }

    #[test]
    fn test_every_harvested_href_is_non_empty() {
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let all = harvest_all_links(&doc, None);
        let scoped = harvest_container_links(&doc, "li.result", "a", None);
        assert!(all.links.iter().chain(scoped.links.iter()).all(|l| !l.href.is_empty()));
    }

    #[test]
    fn test_no_base_keeps_raw_hrefs() {
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let report = harvest_all_links(&doc, None);
        assert_eq!(report.links[1].href, "/story/1");
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_invalid_base_keeps_raw_href_with_warning() {
        crate::testing::init_test_tracing();
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let report = harvest_all_links(&doc, Some("not a url"));
        assert_eq!(report.links.len(), 4);
        assert_eq!(report.links[1].href, "/story/1");
        assert_eq!(report.warnings.len(), 4);
    }

    #[test]
    fn test_unresolvable_href_is_kept() {
        let doc = SampleDocument::parse(r#"<a href="http://[broken">bad</a><a href="/ok">ok</a>"#);
        let report = harvest_all_links(&doc, Some("https://site.test/"));
        assert_eq!(report.links.len(), 2);
        assert_eq!(report.links[0].href, "http://[broken");
        assert_eq!(report.links[1].href, "https://site.test/ok");
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_container_links_skip_empty_containers() {
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let report = harvest_container_links(&doc, "li.result", "a", Some("https://news.test/"));
        assert_eq!(report.links.len(), 2);
        assert_eq!(report.links[0].href, "https://news.test/story/1");
        assert_eq!(report.links[1].href, "https://other.test/story/2");
    }

    #[test]
    fn test_container_links_take_first_match_only() {
        let doc = SampleDocument::parse(
            r#"<div class="row"><a href="/a">A</a><a href="/b">B</a></div>"#,
        );
        let report = harvest_container_links(&doc, "div.row", "a", None);
        assert_eq!(report.links.len(), 1);
        assert_eq!(report.links[0].href, "/a");
    }

    #[test]
    fn test_rejected_selector_is_reported() {
        let doc = SampleDocument::parse(fixtures::LINK_PAGE);
        let report = harvest_container_links(&doc, "li[", "a", None);
        assert!(report.links.is_empty());
        assert!(report.selector_error.is_some());
    }
}
