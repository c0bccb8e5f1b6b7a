//! Script synthesis.
//!
//! [`synthesize`] turns a [`ScriptRequest`] into the source of a runnable
//! Python script. Backends differ only in how pages are acquired; every
//! static script shares one `extract_page` function and one output block.
//!
//! Synthesis never fails. A request that cannot produce a working script
//! yields a short guidance comment instead.

mod acquisition;
mod extraction;
mod literals;
mod output;
mod writer;


use std::fmt;
use tracing::debug;

use crate::config::{BackendTarget, BrowserEngine, ScriptRequest, SourceOrigin};
use writer::ScriptWriter;

pub use acquisition::STATIC_CLICK_NOTICE;
pub use extraction::UNRESOLVED_LINKS_NOTICE;
pub use literals::{py_list, py_str};
pub use output::NO_DATA_NOTICE;

/// Marker that starts every guidance-only script.
pub const GUIDANCE_NOTICE: &str = "SCRIPT NOT GENERATED";

/// What kind of script a request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPlan {
    /// Guidance comment only, with the reason.
    Guidance(&'static str),
    /// Browser capture that saves page markup.
    Browser(BrowserEngine),
    /// HTTP fetch of live pages followed by extraction.
    FetchLive,
    /// Extraction over previously saved pages.
    ReadSaved,
}

impl ScriptPlan {
    /// Picks the plan for `request`.
    #[must_use]
    pub fn for_request(request: &ScriptRequest) -> Self {
        if let Some(reason) = missing_input(request) {
            return Self::Guidance(reason);
        }
        match (request.target, request.origin) {
            (BackendTarget::InteractiveBrowser { engine }, _) => Self::Browser(engine),
            (BackendTarget::StaticFetch, SourceOrigin::LiveUrl) => Self::FetchLive,
            (BackendTarget::StaticFetch, SourceOrigin::LocalFiles) => Self::ReadSaved,
        }
    }
}

impl fmt::Display for ScriptPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guidance(_) => write!(f, "guidance"),
            Self::Browser(BrowserEngine::Classic) => write!(f, "selenium_capture"),
            Self::Browser(BrowserEngine::Modern) => write!(f, "playwright_capture"),
            Self::FetchLive => write!(f, "fetch_live"),
            Self::ReadSaved => write!(f, "read_saved"),
        }
    }
}

/// Describes the first input a script cannot be generated without.
///
/// Browser capture does not extract, so extraction completeness only matters
/// for static scripts.
#[must_use]
pub fn missing_input(request: &ScriptRequest) -> Option<&'static str> {
    let interactive = matches!(request.target, BackendTarget::InteractiveBrowser { .. });
    if !interactive {
        if let Some(reason) = request.extraction.missing_requirement() {
            return Some(reason);
        }
    }
    if request.needs_start_url() && request.project.start_url().is_none() {
        return Some("a start URL is required to load the first page");
    }
    if interactive
        && request.pagination.uses_next_button()
        && request.pagination.next_selector.trim().is_empty()
    {
        return Some("a next-button selector is required for click pagination");
    }
    let reads_files = request.target == BackendTarget::StaticFetch
        && request.origin == SourceOrigin::LocalFiles;
    if !reads_files
        && request.pagination.uses_url_pattern()
        && request.pagination.url_prefix.trim().is_empty()
    {
        return Some("a URL prefix is required for pattern pagination");
    }
    None
}

/// Generates the script for `request`.
///
/// Identical requests produce identical text.
#[must_use]
pub fn synthesize(request: &ScriptRequest) -> String {
    let plan = ScriptPlan::for_request(request);
    debug!(
        backend = %request.target,
        origin = %request.origin,
        mode = %request.extraction.mode,
        output = %request.output.format,
        plan = %plan,
        "synthesizing script"
    );

    let mut w = ScriptWriter::new();
    write_header(&mut w, request);
    match plan {
        ScriptPlan::Guidance(reason) => write_guidance(&mut w, reason),
        ScriptPlan::Browser(engine) => acquisition::write_browser_script(&mut w, request, engine),
        ScriptPlan::FetchLive => acquisition::write_fetch_script(&mut w, request),
        ScriptPlan::ReadSaved => acquisition::write_saved_pages_script(&mut w, request),
    }
    w.finish()
}

fn write_header(w: &mut ScriptWriter, request: &ScriptRequest) {
    w.comment("Scraping script generated by scrapesmith.");
    w.comment(&format!(
        "Backend: {} | Origin: {} | Mode: {}",
        request.target, request.origin, request.extraction.mode
    ));
    w.blank();
}

fn write_guidance(w: &mut ScriptWriter, reason: &str) {
    w.comment(&format!("{GUIDANCE_NOTICE}: {reason}."));
    w.comment("Complete the configuration and generate the script again.");
}
