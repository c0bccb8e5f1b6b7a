//! # Scrapesmith
//!
//! Extraction-rule compilation and scraping-script synthesis.
//!
//! Scrapesmith turns element descriptors into CSS selectors, checks them
//! against a sample page, and writes a runnable Python script for the chosen
//! backend:
//!
//! - **Selector compilation**: `(tag, attrs)` descriptors become CSS selectors
//! - **Selector testing**: match counts and previews against a sample document
//! - **Link harvesting**: anchors with hrefs resolved against a base URL
//! - **Script synthesis**: Selenium, Playwright or requests + BeautifulSoup
//! - **Suggestion acceptance**: structural checks on AI-suggested fields and links
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scrapesmith::prelude::*;
//!
//! let extraction = ExtractionConfig::structured(ElementDescriptor::new("div", "class=item"))
//!     .with_field(FieldDescriptor::new("title", "h2", ""));
//! let request = ScriptRequest::new(BackendTarget::StaticFetch, SourceOrigin::LocalFiles, extraction);
//!
//! let script = synthesize(&request);
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod links;
pub mod selector;
pub mod suggestions;
pub mod synth;
pub mod testing;
pub mod utils;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        BackendKind, BackendTarget, BrowserEngine, BrowserProfile, ExtractionConfig,
        LinkStrategy, NetworkConfig, OutputFormat, OutputSpec, PageScope, PaginationConfig,
        PaginationMode, ProjectConfig, ScrapingMode, ScriptRequest, SourceOrigin,
    };
    pub use crate::errors::{AttrsSyntaxError, ConfigError, ScrapesmithError, SelectorError};
    pub use crate::links::{harvest_all_links, harvest_container_links, HarvestReport, LinkCandidate};
    pub use crate::selector::{
        compile, test_selector, ElementDescriptor, FieldDescriptor, FieldId, SampleDocument,
        SelectorTestResult, SlotKey, TestKind, TestResultStore, TestScope, TestStatus,
    };
    pub use crate::suggestions::{apply_link_filter, parse_suggestion, Suggestion};
    pub use crate::synth::{synthesize, ScriptPlan};
}
