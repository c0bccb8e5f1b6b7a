//! Sample documents and request builders.

use crate::config::{
    BackendTarget, ExtractionConfig, OutputFormat, OutputSpec, ProjectConfig, ScriptRequest,
    SourceOrigin,
};
use crate::selector::{ElementDescriptor, FieldDescriptor};

/// Product cards: three `article.card`, two with a `span.price`, four `h3`
/// headings in total and two text-less images.
pub const MIXED_CARDS: &str = r#"<!DOCTYPE html>
<html>
<body>
  <main>
    <article class="card featured">
      <h3>Compact Widget</h3>
      <img src="/img/widget.png" alt="widget">
      <span class="price">$9.99</span>
    </article>
    <article class="card">
      <h3>  An Extraordinarily Long Product Name That Keeps Going  </h3>
      <span class="price">$24.50</span>
    </article>
    <article class="card">
      <h3>Gadget</h3>
      <img src="/img/gadget.png" alt="gadget">
    </article>
  </main>
  <aside>
    <h3>Related</h3>
  </aside>
</body>
</html>"#;

/// Search results: three `li.result`, two holding a link, plus navigation
/// and pager anchors.
pub const LINK_PAGE: &str = r##"<!DOCTYPE html>
<html>
<body>
  <nav><a href="/">Home</a><a name="top">Top</a></nav>
  <ol>
    <li class="result"><a href=" /story/1 ">First story</a></li>
    <li class="result"><a href="https://other.test/story/2">Second   story</a></li>
    <li class="result"><span>Sponsored</span></li>
  </ol>
  <footer>
    <a href="">Empty</a>
    <a href="?page=2">Next page</a>
  </footer>
</body>
</html>"##;

/// A listing of `count` `div.item` elements, each with one `h2` title.
#[must_use]
pub fn item_listing(count: usize) -> String {
    let items: String = (1..=count)
        .map(|n| {
            format!(
                "    <div class=\"item\"><h2>Item {n}</h2><p class=\"blurb\">Blurb {n}</p></div>\n"
            )
        })
        .collect();
    format!("<!DOCTYPE html>\n<html>\n<body>\n  <div id=\"listing\">\n{items}  </div>\n</body>\n</html>")
}

/// Structured extraction of `div.item` containers with an `h2` title field.
#[must_use]
pub fn item_extraction() -> ExtractionConfig {
    ExtractionConfig::structured(ElementDescriptor::new("div", "class=\"item\""))
        .with_field(FieldDescriptor::new("title", "h2", ""))
}

/// A request with a live start URL, for the given backend, origin and format.
#[must_use]
pub fn request_for(
    target: BackendTarget,
    origin: SourceOrigin,
    extraction: ExtractionConfig,
    format: OutputFormat,
) -> ScriptRequest {
    ScriptRequest::new(target, origin, extraction)
        .with_project(ProjectConfig::new("shop_scrape").with_start_url("https://shop.test/catalog"))
        .with_output(OutputSpec::new(format))
}
