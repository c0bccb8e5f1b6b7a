//! Pagination settings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;

/// Whether one page or several are acquired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageScope {
    /// Only the start page.
    #[default]
    Single,
    /// Several pages.
    Multi,
}

/// How successive pages are reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Click a "next" control in a live browser.
    #[default]
    NextButtonClick,
    /// Build each URL as prefix + page number + suffix.
    UrlPattern,
}

impl fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextButtonClick => write!(f, "next_button_click"),
            Self::UrlPattern => write!(f, "url_pattern"),
        }
    }
}

/// Pagination configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Single or multi page.
    #[serde(default)]
    pub scope: PageScope,
    /// Multi-page strategy.
    #[serde(default)]
    pub mode: PaginationMode,
    /// First page number for URL patterns.
    #[serde(default = "default_page")]
    pub start_page: u32,
    /// Number of pages to acquire.
    #[serde(default = "default_page")]
    pub page_count: u32,
    /// CSS selector of the "next" control.
    #[serde(default)]
    pub next_selector: String,
    /// URL text before the page number.
    #[serde(default)]
    pub url_prefix: String,
    /// URL text after the page number.
    #[serde(default)]
    pub url_suffix: String,
}

fn default_page() -> u32 {
    1
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            scope: PageScope::Single,
            mode: PaginationMode::default(),
            start_page: default_page(),
            page_count: default_page(),
            next_selector: String::new(),
            url_prefix: String::new(),
            url_suffix: String::new(),
        }
    }
}

impl PaginationConfig {
    /// Single-page acquisition.
    #[must_use]
    pub fn single() -> Self {
        Self::default()
    }

    /// Click-through pagination over `page_count` pages.
    #[must_use]
    pub fn next_button(next_selector: impl Into<String>, page_count: u32) -> Self {
        Self {
            scope: PageScope::Multi,
            mode: PaginationMode::NextButtonClick,
            page_count,
            next_selector: next_selector.into(),
            ..Default::default()
        }
    }

    /// URL-pattern pagination over `page_count` pages starting at `start_page`.
    #[must_use]
    pub fn url_pattern(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        start_page: u32,
        page_count: u32,
    ) -> Self {
        Self {
            scope: PageScope::Multi,
            mode: PaginationMode::UrlPattern,
            start_page,
            page_count,
            url_prefix: prefix.into(),
            url_suffix: suffix.into(),
            ..Default::default()
        }
    }

    /// Whether several pages are acquired.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        self.scope == PageScope::Multi
    }

    /// Whether pages are built from the URL pattern.
    #[must_use]
    pub fn uses_url_pattern(&self) -> bool {
        self.is_multi() && self.mode == PaginationMode::UrlPattern
    }

    /// Whether pages are reached by clicking.
    #[must_use]
    pub fn uses_next_button(&self) -> bool {
        self.is_multi() && self.mode == PaginationMode::NextButtonClick
    }

    /// Start page, clamped to at least 1.
    #[must_use]
    pub fn first_page(&self) -> u32 {
        self.start_page.max(1)
    }

    /// Page count, clamped to at least 1.
    #[must_use]
    pub fn pages(&self) -> u32 {
        self.page_count.max(1)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_multi() {
            return Ok(());
        }
        if self.start_page == 0 {
            return Err(ConfigError::new("start_page must be at least 1")
                .with_field("pagination.start_page"));
        }
        if self.page_count == 0 {
            return Err(ConfigError::new("page_count must be at least 1")
                .with_field("pagination.page_count"));
        }
        match self.mode {
            PaginationMode::NextButtonClick if self.next_selector.trim().is_empty() => {
                Err(ConfigError::new("a next-button selector is required for click pagination")
                    .with_field("pagination.next_selector"))
            }
            PaginationMode::UrlPattern if self.url_prefix.trim().is_empty() => {
                Err(ConfigError::new("a URL prefix is required for pattern pagination")
                    .with_field("pagination.url_prefix"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_are_clamped_for_rendering() {
        let config = PaginationConfig::url_pattern("p", "", 0, 0);
        assert_eq!((config.first_page(), config.pages()), (1, 1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_mode_requirements() {
        assert!(PaginationConfig::single().validate().is_ok());
        assert!(PaginationConfig::next_button("a.next", 3).validate().is_ok());
        let err = PaginationConfig::next_button("  ", 3).validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("pagination.next_selector"));
        let err = PaginationConfig::url_pattern("", "", 1, 2).validate().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("pagination.url_prefix"));
    }

    #[test]
    fn test_mode_predicates() {
        let single = PaginationConfig {
            mode: PaginationMode::UrlPattern,
            ..PaginationConfig::single()
        };
        assert!(!single.uses_url_pattern());
        assert!(PaginationConfig::next_button("a", 2).uses_next_button());
    }
}
