//! Testing utilities for scrapesmith.
//!
//! This module provides:
//! - Sample HTML documents and request builders
//! - Assertions over generated scripts
//! - A tracing subscriber for test output

pub mod assertions;
pub mod fixtures;

pub use assertions::{
    assert_guidance_only, assert_script_contains, assert_script_lacks, assert_well_formed,
};
pub use fixtures::{item_extraction, item_listing, request_for, LINK_PAGE, MIXED_CARDS};

/// Installs a fmt subscriber honouring `RUST_LOG` that writes through the
/// test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
