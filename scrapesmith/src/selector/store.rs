//! Caller-owned cache of selector test results.
//!
//! Results are keyed by the descriptor they belong to. Editing a descriptor
//! discards its slot together with anything that depended on it; re-running
//! an unchanged descriptor only overwrites the slot.

use std::collections::HashMap;
use tracing::debug;

use super::descriptor::{ElementDescriptor, FieldId};
use super::document::SampleDocument;
use super::tester::{test_selector, SelectorTestResult, TestKind, TestScope, TestStatus};
use crate::config::SourceOrigin;

/// Identifies a cached result slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    /// The record container.
    Container,
    /// The link-harvesting container.
    LinkContainer,
    /// The anchor inside each link container.
    LinkField,
    /// A named field.
    Field(FieldId),
}

impl SlotKey {
    /// The test kind this slot is evaluated as.
    #[must_use]
    pub fn kind(&self) -> TestKind {
        match self {
            Self::Container => TestKind::Container,
            Self::LinkContainer => TestKind::LinkContainer,
            Self::LinkField => TestKind::LinkField,
            Self::Field(_) => TestKind::Field,
        }
    }
}

/// Cached results plus the readiness flags derived from them.
#[derive(Debug, Clone, Default)]
pub struct TestResultStore {
    results: HashMap<SlotKey, SelectorTestResult>,
    container_ready: bool,
    link_container_ready: bool,
    origin_choice: Option<SourceOrigin>,
}

impl TestResultStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests `descriptor` for `key` and records the result.
    pub fn run(
        &mut self,
        document: &SampleDocument,
        key: SlotKey,
        descriptor: &ElementDescriptor,
        scope: TestScope<'_>,
    ) -> &SelectorTestResult {
        let result = test_selector(document, key.kind(), descriptor, scope);
        self.record(key, result)
    }

    /// Records an externally computed result.
    pub fn record(&mut self, key: SlotKey, result: SelectorTestResult) -> &SelectorTestResult {
        match key {
            SlotKey::Container => {
                self.container_ready = !result.is_error();
                if matches!(result.status, TestStatus::SelectorInvalid(_)) {
                    self.origin_choice = None;
                }
            }
            SlotKey::LinkContainer => {
                self.link_container_ready = !result.is_error();
                if matches!(result.status, TestStatus::SelectorInvalid(_)) {
                    self.origin_choice = None;
                }
            }
            SlotKey::LinkField | SlotKey::Field(_) => {}
        }
        self.results.insert(key, result);
        &self.results[&key]
    }

    /// The cached result for `key`.
    #[must_use]
    pub fn get(&self, key: SlotKey) -> Option<&SelectorTestResult> {
        self.results.get(&key)
    }

    /// Discards the slot of an edited descriptor and everything downstream of it.
    pub fn descriptor_edited(&mut self, key: SlotKey) {
        self.results.remove(&key);
        match key {
            SlotKey::Container => {
                self.container_ready = false;
                self.origin_choice = None;
                self.results.retain(|k, _| !matches!(k, SlotKey::Field(_)));
            }
            SlotKey::LinkContainer => {
                self.link_container_ready = false;
                self.origin_choice = None;
                self.results.remove(&SlotKey::LinkField);
            }
            SlotKey::LinkField | SlotKey::Field(_) => {}
        }
        debug!(?key, "descriptor edited, cached results discarded");
    }

    /// Drops the slot of a removed field.
    pub fn remove_field(&mut self, id: FieldId) {
        self.results.remove(&SlotKey::Field(id));
    }

    /// Drops every field slot, as on a scraping-mode switch.
    pub fn clear_fields(&mut self) {
        self.results.retain(|k, _| !matches!(k, SlotKey::Field(_)));
    }

    /// Whether the record container has a passing test.
    #[must_use]
    pub fn container_ready(&self) -> bool {
        self.container_ready
    }

    /// Whether the link container has a passing test.
    #[must_use]
    pub fn link_container_ready(&self) -> bool {
        self.link_container_ready
    }

    /// The chosen acquisition origin, if still valid.
    #[must_use]
    pub fn origin_choice(&self) -> Option<SourceOrigin> {
        self.origin_choice
    }

    /// Records the operator's acquisition origin.
    pub fn choose_origin(&mut self, origin: SourceOrigin) {
        self.origin_choice = Some(origin);
    }

    /// Number of cached results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no result is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
