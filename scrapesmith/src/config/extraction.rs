//! What to extract from each page.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;
use crate::selector::{ElementDescriptor, FieldDescriptor};
use crate::utils::{validate_field_name, validate_field_names};

/// The three extraction modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapingMode {
    /// A repeating container with named fields inside it.
    #[default]
    Structured,
    /// One unscoped field over the whole page.
    Simple,
    /// Anchor harvesting.
    Links,
}

impl fmt::Display for ScrapingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::Simple => write!(f, "simple"),
            Self::Links => write!(f, "links"),
        }
    }
}

/// How links are harvested in [`ScrapingMode::Links`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStrategy {
    /// Every anchor with an href in the document.
    #[default]
    AllLinks,
    /// The first matching anchor inside each container.
    LinksFromContainer,
}

impl fmt::Display for LinkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllLinks => write!(f, "all_links"),
            Self::LinksFromContainer => write!(f, "links_from_container"),
        }
    }
}

/// Configuration for content extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Active extraction mode.
    #[serde(default)]
    pub mode: ScrapingMode,
    /// Record container for structured mode.
    #[serde(default)]
    pub container: ElementDescriptor,
    /// Named fields resolved inside each container.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// The single field used in simple mode.
    #[serde(default = "default_simple_field")]
    pub simple_field: FieldDescriptor,
    /// Link harvesting strategy.
    #[serde(default)]
    pub link_strategy: LinkStrategy,
    /// Container scoping link harvesting.
    #[serde(default)]
    pub link_container: ElementDescriptor,
    /// Anchor looked up inside each link container.
    #[serde(default = "default_link_selector")]
    pub link_selector: ElementDescriptor,
}

fn default_simple_field() -> FieldDescriptor {
    FieldDescriptor::new("value", "", "")
}

fn default_link_selector() -> ElementDescriptor {
    ElementDescriptor::tag("a")
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mode: ScrapingMode::default(),
            container: ElementDescriptor::default(),
            fields: Vec::new(),
            simple_field: default_simple_field(),
            link_strategy: LinkStrategy::default(),
            link_container: ElementDescriptor::default(),
            link_selector: default_link_selector(),
        }
    }
}

impl ExtractionConfig {
    /// Structured extraction over `container`.
    #[must_use]
    pub fn structured(container: ElementDescriptor) -> Self {
        Self {
            mode: ScrapingMode::Structured,
            container,
            ..Default::default()
        }
    }

    /// Simple extraction of a single field.
    #[must_use]
    pub fn simple(field: FieldDescriptor) -> Self {
        Self {
            mode: ScrapingMode::Simple,
            simple_field: field,
            ..Default::default()
        }
    }

    /// Whole-document link harvesting.
    #[must_use]
    pub fn all_links() -> Self {
        Self {
            mode: ScrapingMode::Links,
            link_strategy: LinkStrategy::AllLinks,
            ..Default::default()
        }
    }

    /// Container-scoped link harvesting.
    #[must_use]
    pub fn links_from_container(container: ElementDescriptor, link: ElementDescriptor) -> Self {
        Self {
            mode: ScrapingMode::Links,
            link_strategy: LinkStrategy::LinksFromContainer,
            link_container: container,
            link_selector: link,
            ..Default::default()
        }
    }

    /// Adds a named field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Switches mode, dropping the structured fields.
    pub fn switch_mode(&mut self, mode: ScrapingMode) {
        if self.mode != mode {
            self.fields.clear();
            self.mode = mode;
        }
    }

    /// Describes what is missing before an extraction loop can be emitted.
    #[must_use]
    pub fn missing_requirement(&self) -> Option<&'static str> {
        match (self.mode, self.link_strategy) {
            (ScrapingMode::Structured, _) if !self.container.has_tag() => {
                Some("a container tag is required for structured extraction")
            }
            (ScrapingMode::Simple, _) if !self.simple_field.has_tag() => {
                Some("a field tag is required for simple extraction")
            }
            (ScrapingMode::Links, LinkStrategy::LinksFromContainer)
                if !self.link_container.has_tag() =>
            {
                Some("a link container tag is required to harvest links from containers")
            }
            (ScrapingMode::Links, LinkStrategy::LinksFromContainer)
                if !self.link_selector.has_tag() =>
            {
                Some("a link tag is required to pick the link inside each container")
            }
            _ => None,
        }
    }

    /// Validates field names for the active mode.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.mode {
            ScrapingMode::Structured => {
                let names: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
                validate_field_names(&names)
                    .map_err(|e| ConfigError::new(e.to_string()).with_field("extraction.fields"))?;
            }
            ScrapingMode::Simple => {
                validate_field_name(&self.simple_field.name).map_err(|e| {
                    ConfigError::new(e.to_string()).with_field("extraction.simple_field.name")
                })?;
            }
            ScrapingMode::Links => {}
        }
        Ok(())
    }
}
