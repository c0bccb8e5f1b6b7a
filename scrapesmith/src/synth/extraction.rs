//! The shared `extract_page(soup, page_url)` function.
//!
//! Every static acquisition loop calls this one function, so the extraction
//! logic exists once per script whatever the backend or origin.

use super::literals::{comment_safe, py_str};
use super::writer::ScriptWriter;
use crate::config::{ExtractionConfig, LinkStrategy, ScrapingMode};
use crate::selector::FieldDescriptor;

/// Comment emitted when hrefs cannot be resolved in the script.
pub const UNRESOLVED_LINKS_NOTICE: &str =
    "Relative hrefs are left unresolved: no base URL is known for these pages.";

/// Whether the emitted extraction needs `urljoin`.
pub(crate) fn needs_urljoin(extraction: &ExtractionConfig, base_known: bool) -> bool {
    extraction.mode == ScrapingMode::Links && base_known
}

/// Writes the `extract_page` definition.
pub(crate) fn write_extract_page(w: &mut ScriptWriter, extraction: &ExtractionConfig, base_known: bool) {
    w.block("def extract_page(soup, page_url):", |w| match extraction.mode {
        ScrapingMode::Structured => write_structured(w, extraction),
        ScrapingMode::Simple => write_simple(w, &extraction.simple_field),
        ScrapingMode::Links => write_links(w, extraction, base_known),
    });
}

fn write_structured(w: &mut ScriptWriter, extraction: &ExtractionConfig) {
    let container = extraction.container.selector();
    w.line("records = []");
    w.line(format!("containers = soup.select({})", py_str(&container)));
    w.block("for container in containers:", |w| {
        w.line("record = {}");
        if extraction.fields.is_empty() {
            w.comment("No fields configured; the container text is recorded.");
            w.line("record[\"text\"] = container.get_text(\" \", strip=True)");
        }
        for field in &extraction.fields {
            write_field(w, field);
        }
        w.line("records.append(record)");
    });
    w.line("return records");
}

fn write_field(w: &mut ScriptWriter, field: &FieldDescriptor) {
    let key = py_str(&field.name);
    if !field.has_tag() {
        w.comment(&format!(
            "Field {} has no tag configured.",
            comment_safe(&field.name)
        ));
        w.line(format!("record[{key}] = None"));
        return;
    }
    w.line(format!(
        "element = container.select_one({})",
        py_str(&field.selector())
    ));
    w.line(format!(
        "record[{key}] = element.get_text(strip=True) if element else None"
    ));
}

fn write_simple(w: &mut ScriptWriter, field: &FieldDescriptor) {
    w.line(format!(
        "return [element.get_text(strip=True) for element in soup.select({})]",
        py_str(&field.selector())
    ));
}

fn write_links(w: &mut ScriptWriter, extraction: &ExtractionConfig, base_known: bool) {
    w.line("records = []");
    if !base_known {
        w.comment(UNRESOLVED_LINKS_NOTICE);
    }
    match extraction.link_strategy {
        LinkStrategy::AllLinks => {
            w.block("for anchor in soup.select(\"a[href]\"):", |w| {
                write_link_record(w, base_known);
            });
        }
        LinkStrategy::LinksFromContainer => {
            let container = extraction.link_container.selector();
            let link = extraction.link_selector.selector();
            w.block(
                format!("for container in soup.select({}):", py_str(&container)),
                |w| {
                    w.line(format!("anchor = container.select_one({})", py_str(&link)));
                    w.block("if anchor is None:", |w| w.line("continue"));
                    write_link_record(w, base_known);
                },
            );
        }
    }
    w.line("return records");
}

fn write_link_record(w: &mut ScriptWriter, base_known: bool) {
    w.line("href = (anchor.get(\"href\") or \"\").strip()");
    w.block("if not href:", |w| w.line("continue"));
    if base_known {
        w.line("href = urljoin(page_url, href)");
    }
    w.line("records.append({\"text\": anchor.get_text(strip=True), \"href\": href})");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::ElementDescriptor;
    use pretty_assertions::assert_eq;

    fn render(extraction: &ExtractionConfig, base_known: bool) -> String {
        let mut w = ScriptWriter::new();
        write_extract_page(&mut w, extraction, base_known);
        w.finish()
    }

    #[test]
    fn test_structured_resolves_fields_per_container() {
        let extraction = ExtractionConfig::structured(ElementDescriptor::new("div", "class=\"item\""))
            .with_field(FieldDescriptor::new("title", "h2", ""))
            .with_field(FieldDescriptor::new("price", "span", "class=price"));
        let script = render(&extraction, true);
        assert_eq!(
            script,
            "def extract_page(soup, page_url):\n\
             \x20   records = []\n\
             \x20   containers = soup.select(\"div.item\")\n\
             \x20   for container in containers:\n\
             \x20       record = {}\n\
             \x20       element = container.select_one(\"h2\")\n\
             \x20       record[\"title\"] = element.get_text(strip=True) if element else None\n\
             \x20       element = container.select_one(\"span.price\")\n\
             \x20       record[\"price\"] = element.get_text(strip=True) if element else None\n\
             \x20       records.append(record)\n\
             \x20   return records\n"
        );
    }

    #[test]
    fn test_untagged_field_defaults_to_none() {
        let extraction = ExtractionConfig::structured(ElementDescriptor::tag("li"))
            .with_field(FieldDescriptor::new("note", "", ""));
        let script = render(&extraction, true);
        assert!(script.contains("record[\"note\"] = None"));
        assert!(!script.contains("select_one"));
    }

    #[test]
    fn test_simple_is_one_flat_query() {
        let extraction = ExtractionConfig::simple(FieldDescriptor::new("price", "span", "class=price"));
        let script = render(&extraction, false);
        assert!(script.contains("soup.select(\"span.price\")"));
        assert!(!script.contains("for container"));
    }

    #[test]
    fn test_links_resolve_only_with_known_base() {
        let extraction = ExtractionConfig::all_links();
        let resolved = render(&extraction, true);
        assert!(resolved.contains("urljoin(page_url, href)"));
        assert!(!resolved.contains(UNRESOLVED_LINKS_NOTICE));

        let unresolved = render(&extraction, false);
        assert!(!unresolved.contains("urljoin"));
        assert!(unresolved.contains(UNRESOLVED_LINKS_NOTICE));
    }

    #[test]
    fn test_container_links_take_first_anchor() {
        let extraction = ExtractionConfig::links_from_container(
            ElementDescriptor::new("li", "class=result"),
            ElementDescriptor::tag("a"),
        );
        let script = render(&extraction, true);
        assert!(script.contains("for container in soup.select(\"li.result\"):"));
        assert!(script.contains("anchor = container.select_one(\"a\")"));
        assert!(script.contains("if anchor is None:"));
    }

    #[test]
    fn test_needs_urljoin() {
        assert!(needs_urljoin(&ExtractionConfig::all_links(), true));
        assert!(!needs_urljoin(&ExtractionConfig::all_links(), false));
        assert!(!needs_urljoin(
            &ExtractionConfig::structured(ElementDescriptor::tag("li")),
            true
        ));
    }
}
