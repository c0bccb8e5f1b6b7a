//! Backend, origin and output selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser automation engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserEngine {
    /// Selenium WebDriver.
    #[default]
    Classic,
    /// Playwright.
    Modern,
}

/// Execution technology of a generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "backend")]
pub enum BackendTarget {
    /// Drive a real browser and save page markup.
    InteractiveBrowser {
        /// Automation engine.
        #[serde(default)]
        engine: BrowserEngine,
    },
    /// Fetch or read pages and parse them directly.
    StaticFetch,
}

impl Default for BackendTarget {
    fn default() -> Self {
        Self::StaticFetch
    }
}

impl BackendTarget {
    /// Selenium-driven browser backend.
    #[must_use]
    pub fn selenium() -> Self {
        Self::InteractiveBrowser {
            engine: BrowserEngine::Classic,
        }
    }

    /// Playwright-driven browser backend.
    #[must_use]
    pub fn playwright() -> Self {
        Self::InteractiveBrowser {
            engine: BrowserEngine::Modern,
        }
    }

    /// The backend family, without engine detail.
    #[must_use]
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::InteractiveBrowser { .. } => BackendKind::InteractiveBrowser,
            Self::StaticFetch => BackendKind::StaticFetch,
        }
    }
}

impl fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InteractiveBrowser {
                engine: BrowserEngine::Classic,
            } => write!(f, "selenium"),
            Self::InteractiveBrowser {
                engine: BrowserEngine::Modern,
            } => write!(f, "playwright"),
            Self::StaticFetch => write!(f, "static_fetch"),
        }
    }
}

/// Backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Browser automation.
    InteractiveBrowser,
    /// Direct HTTP fetch or saved files.
    StaticFetch,
}

/// Where page content comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    /// The live network.
    #[default]
    LiveUrl,
    /// Previously saved page files.
    LocalFiles,
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LiveUrl => write!(f, "live_url"),
            Self::LocalFiles => write!(f, "local_files"),
        }
    }
}

/// Result serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// A CSV file.
    #[default]
    Csv,
    /// An indented JSON file.
    Json,
    /// Console output only.
    Print,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Print => write!(f, "print"),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Serialization format.
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputSpec {
    /// Creates an output spec for `format`.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Output file name, if the format writes one.
    #[must_use]
    pub fn file_name(&self) -> Option<&'static str> {
        match self.format {
            OutputFormat::Csv => Some("output.csv"),
            OutputFormat::Json => Some("output.json"),
            OutputFormat::Print => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_serde_shape() {
        let json = serde_json::to_value(BackendTarget::playwright()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"backend": "interactive_browser", "engine": "modern"})
        );
        let parsed: BackendTarget =
            serde_json::from_str(r#"{"backend": "static_fetch"}"#).unwrap();
        assert_eq!(parsed, BackendTarget::StaticFetch);
    }

    #[test]
    fn test_backend_display_and_kind() {
        assert_eq!(BackendTarget::selenium().to_string(), "selenium");
        assert_eq!(BackendTarget::selenium().kind(), BackendKind::InteractiveBrowser);
        assert_eq!(BackendTarget::StaticFetch.kind(), BackendKind::StaticFetch);
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(OutputSpec::new(OutputFormat::Json).file_name(), Some("output.json"));
        assert_eq!(OutputSpec::new(OutputFormat::Print).file_name(), None);
    }
}
