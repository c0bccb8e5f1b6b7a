//! The complete input of a script synthesis.

use serde::{Deserialize, Serialize};
use url::Url;

use super::extraction::ExtractionConfig;
use super::network::NetworkConfig;
use super::pagination::PaginationConfig;
use super::target::{BackendTarget, OutputSpec, SourceOrigin};
use crate::errors::{ConfigError, ScrapesmithError};

/// Project-level values the generated script embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Folder holding saved pages and output files.
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Page loaded first by live acquisition.
    #[serde(default)]
    pub start_url: Option<String>,
    /// Base used to resolve links when reading saved pages.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_folder() -> String {
    "scrape_project".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            start_url: None,
            base_url: None,
        }
    }
}

impl ProjectConfig {
    /// Creates a project rooted at `folder`.
    #[must_use]
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            ..Default::default()
        }
    }

    /// Sets the start URL.
    #[must_use]
    pub fn with_start_url(mut self, url: impl Into<String>) -> Self {
        self.start_url = Some(url.into());
        self
    }

    /// Sets the base URL for saved pages.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// The start URL, if set and non-blank.
    #[must_use]
    pub fn start_url(&self) -> Option<&str> {
        self.start_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// The saved-page base URL, if set and non-blank.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}

/// Everything `synthesize` needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRequest {
    /// Project values.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Backend the script targets.
    #[serde(default)]
    pub target: BackendTarget,
    /// Content origin.
    #[serde(default)]
    pub origin: SourceOrigin,
    /// What to extract.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Which pages to visit.
    #[serde(default)]
    pub pagination: PaginationConfig,
    /// Proxy, delay and identity.
    #[serde(default)]
    pub network: NetworkConfig,
    /// Result format.
    #[serde(default)]
    pub output: OutputSpec,
}

impl ScriptRequest {
    /// Creates a request with defaults for everything but the extraction.
    #[must_use]
    pub fn new(target: BackendTarget, origin: SourceOrigin, extraction: ExtractionConfig) -> Self {
        Self {
            target,
            origin,
            extraction,
            ..Default::default()
        }
    }

    /// Loads a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, ScrapesmithError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the request as pretty JSON.
    pub fn to_json(&self) -> Result<String, ScrapesmithError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the project.
    #[must_use]
    pub fn with_project(mut self, project: ProjectConfig) -> Self {
        self.project = project;
        self
    }

    /// Sets the pagination.
    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Sets the network configuration.
    #[must_use]
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Sets the output.
    #[must_use]
    pub fn with_output(mut self, output: OutputSpec) -> Self {
        self.output = output;
        self
    }

    /// Whether the acquisition loads the start URL.
    ///
    /// Saved-page scripts never do; URL-pattern pagination builds every URL
    /// from the pattern instead.
    #[must_use]
    pub fn needs_start_url(&self) -> bool {
        let reads_files =
            self.target == BackendTarget::StaticFetch && self.origin == SourceOrigin::LocalFiles;
        !reads_files && !self.pagination.uses_url_pattern()
    }

    /// Checks the request for values a generated script could not use.
    ///
    /// `synthesize` accepts invalid requests too; this is for callers that
    /// want to block on bad input first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project.folder.trim().is_empty() {
            return Err(ConfigError::new("project folder cannot be empty").with_field("project.folder"));
        }
        if self.needs_start_url() {
            let Some(start) = self.project.start_url() else {
                return Err(ConfigError::new("a start URL is required for live acquisition")
                    .with_field("project.start_url"));
            };
            Url::parse(start).map_err(|e| {
                ConfigError::new(format!("start URL is not absolute: {e}"))
                    .with_field("project.start_url")
            })?;
        }
        if let Some(base) = self.project.base_url() {
            Url::parse(base).map_err(|e| {
                ConfigError::new(format!("base URL is not absolute: {e}")).with_field("project.base_url")
            })?;
        }
        self.pagination.validate()?;
        self.extraction.validate()?;
        Ok(())
    }
}
