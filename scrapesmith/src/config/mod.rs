//! Configuration types for extraction and script synthesis.

mod extraction;
mod network;
mod pagination;
mod request;
mod target;

pub use extraction::{ExtractionConfig, LinkStrategy, ScrapingMode};
pub use network::{BrowserProfile, NetworkConfig};
pub use pagination::{PageScope, PaginationConfig, PaginationMode};
pub use request::{ProjectConfig, ScriptRequest};
pub use target::{
    BackendKind, BackendTarget, BrowserEngine, OutputFormat, OutputSpec, SourceOrigin,
};
