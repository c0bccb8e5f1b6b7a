//! Network behaviour of generated scripts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Browser identity a generated script presents.
///
/// Selects the user-agent header and, for browser automation, the driver
/// binary family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowserProfile {
    /// Google Chrome.
    #[default]
    Chrome,
    /// Mozilla Firefox.
    Firefox,
    /// Microsoft Edge.
    Edge,
    /// Apple Safari.
    Safari,
}

impl BrowserProfile {
    /// User-agent string sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &'static str {
        match self {
            Self::Chrome => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
            Self::Firefox => "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
            Self::Edge => "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0",
            Self::Safari => "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        }
    }

    /// Selenium driver class name.
    #[must_use]
    pub fn selenium_driver(&self) -> &'static str {
        match self {
            Self::Chrome => "Chrome",
            Self::Firefox => "Firefox",
            Self::Edge => "Edge",
            Self::Safari => "Safari",
        }
    }

    /// Selenium options class name.
    #[must_use]
    pub fn selenium_options(&self) -> &'static str {
        match self {
            Self::Chrome => "ChromeOptions",
            Self::Firefox => "FirefoxOptions",
            Self::Edge => "EdgeOptions",
            Self::Safari => "SafariOptions",
        }
    }

    /// Playwright browser type.
    #[must_use]
    pub fn playwright_family(&self) -> &'static str {
        match self {
            Self::Chrome | Self::Edge => "chromium",
            Self::Firefox => "firefox",
            Self::Safari => "webkit",
        }
    }

    /// Playwright release channel, when the family alone is not enough.
    #[must_use]
    pub fn playwright_channel(&self) -> Option<&'static str> {
        match self {
            Self::Edge => Some("msedge"),
            _ => None,
        }
    }
}

impl fmt::Display for BrowserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chrome => write!(f, "chrome"),
            Self::Firefox => write!(f, "firefox"),
            Self::Edge => write!(f, "edge"),
            Self::Safari => write!(f, "safari"),
        }
    }
}

/// Proxy, delay and identity settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Candidate proxies; one is picked at random by the generated script.
    #[serde(default)]
    pub proxies: Vec<String>,
    /// Pause between page loads or requests.
    #[serde(default)]
    pub request_delay_ms: u64,
    /// Browser identity.
    #[serde(default)]
    pub browser_profile: BrowserProfile,
}

impl NetworkConfig {
    /// Creates a new network configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the proxy list from multi-line text, keeping non-empty lines.
    #[must_use]
    pub fn with_proxy_text(mut self, text: &str) -> Self {
        self.proxies = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        self
    }

    /// Adds a single proxy.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxies.push(proxy.into());
        self
    }

    /// Sets the delay.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.request_delay_ms = delay_ms;
        self
    }

    /// Sets the browser profile.
    #[must_use]
    pub fn with_profile(mut self, profile: BrowserProfile) -> Self {
        self.browser_profile = profile;
        self
    }

    /// Whether any usable proxy is configured.
    #[must_use]
    pub fn has_proxies(&self) -> bool {
        self.proxies.iter().any(|p| !p.trim().is_empty())
    }

    /// Non-empty proxies, trimmed.
    #[must_use]
    pub fn proxy_list(&self) -> Vec<&str> {
        self.proxies
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect()
    }

    /// Delay formatted as seconds for the generated script.
    #[must_use]
    pub fn delay_seconds_literal(&self) -> String {
        format!(
            "{}.{:03}",
            self.request_delay_ms / 1000,
            self.request_delay_ms % 1000
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_text_keeps_non_empty_lines() {
        let config = NetworkConfig::new().with_proxy_text("  http://a:8080 \n\n   \nhttp://b:3128\n");
        assert_eq!(config.proxies, vec!["http://a:8080", "http://b:3128"]);
        assert!(config.has_proxies());
        assert!(!NetworkConfig::new().has_proxies());
    }

    #[test]
    fn test_delay_literal() {
        assert_eq!(NetworkConfig::new().delay_seconds_literal(), "0.000");
        assert_eq!(NetworkConfig::new().with_delay_ms(1500).delay_seconds_literal(), "1.500");
        assert_eq!(NetworkConfig::new().with_delay_ms(42).delay_seconds_literal(), "0.042");
    }

    #[test]
    fn test_profile_mappings() {
        assert_eq!(BrowserProfile::Edge.playwright_family(), "chromium");
        assert_eq!(BrowserProfile::Edge.playwright_channel(), Some("msedge"));
        assert_eq!(BrowserProfile::Safari.playwright_family(), "webkit");
        assert_eq!(BrowserProfile::Firefox.selenium_driver(), "Firefox");
        assert!(BrowserProfile::Firefox.user_agent().contains("Firefox"));
    }
}
