//! Selector compilation and interactive testing.
//!
//! This module provides:
//! - The attrs tokenizer and descriptor compiler
//! - Element and field descriptors
//! - A read-only sample document wrapper
//! - The selector tester and its caller-owned result store

mod compiler;
mod descriptor;
mod document;
mod store;
mod tester;

pub use compiler::{compile, tokenize_attrs, try_compile, AttrPair, INVALID_SELECTOR};
pub use descriptor::{ElementDescriptor, FieldDescriptor, FieldId};
pub use document::{element_text, parse_selector, SampleDocument};
pub use store::{SlotKey, TestResultStore};
pub use tester::{
    test_selector, SelectorTestResult, TestKind, TestScope, TestStatus, NO_TEXT_NOTICE,
    PREVIEW_MATCHES, PREVIEW_SEPARATOR, PREVIEW_TEXT_CHARS,
};
