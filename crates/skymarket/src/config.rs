//! Configuration management for skymarket.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::chrome::{BoundaryMode, ChromeRules};
use crate::error::{Error, Result};
use crate::linkify::LinkAnnotator;
use crate::seed::{DEFAULT_CREATED_BY, DEFAULT_PRICE_EXTENSION_LABELS};
use crate::service::http::parse_base_url;
use crate::service::youtube::DEFAULT_OEMBED_URL;
use crate::taxonomy::Taxonomy;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "skymarket";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SKYMARKET_`)
/// 2. TOML config file at `~/.config/skymarket/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote service endpoints.
    pub services: ServicesConfig,
    /// Header/footer suppression rules.
    pub chrome: ChromeConfig,
    /// Link detection.
    pub linkify: LinkifyConfig,
    /// Price-extension seeding.
    pub seed: SeedConfig,
    /// Category and aircraft tables. Replaces the built-in tables when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<Taxonomy>,
}

/// Remote service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    /// Base URL of the listing service.
    pub listing_base_url: String,
    /// Base URL of the price-extension registry.
    pub price_extension_base_url: String,
    /// oEmbed endpoint for video metadata.
    pub oembed_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

/// Chrome rules configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Path prefixes under which the header is hidden.
    pub hide_header: Vec<String>,
    /// Path prefixes under which the footer is hidden.
    pub hide_footer: Vec<String>,
    /// How prefixes line up with path segments.
    pub boundary: BoundaryMode,
}

/// Link detection configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkifyConfig {
    /// Custom link regex. The built-in `https?://\S+` is used when unset.
    pub pattern: Option<String>,
}

/// Seed configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Labels to register, in order.
    pub labels: Vec<String>,
    /// Attribution recorded with each label.
    pub created_by: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            listing_base_url: "http://localhost:8080/api".to_string(),
            price_extension_base_url: "http://localhost:8080/api".to_string(),
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            hide_header: vec!["/messages".to_string()],
            hide_footer: vec!["/admin".to_string(), "/messages".to_string()],
            boundary: BoundaryMode::Raw,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_PRICE_EXTENSION_LABELS
                .iter()
                .map(ToString::to_string)
                .collect(),
            created_by: DEFAULT_CREATED_BY.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file at the default location is fine; a missing file that
    /// was asked for explicitly is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = &config_path {
            if !path.exists() {
                return Err(Error::ConfigNotFound { path: path.clone() });
            }
        }
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("SKYMARKET_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.services.request_timeout_secs == 0 {
            return Err(Error::validation(
                "request_timeout_secs must be greater than 0",
            ));
        }

        for (name, url) in [
            ("listing_base_url", &self.services.listing_base_url),
            ("price_extension_base_url", &self.services.price_extension_base_url),
            ("oembed_url", &self.services.oembed_url),
        ] {
            parse_base_url(url).map_err(|e| Error::validation(format!("{name}: {e}")))?;
        }

        ChromeRules::from_config(&self.chrome)?;
        LinkAnnotator::from_pattern(self.linkify.pattern.as_deref())?;

        if self.seed.created_by.trim().is_empty() {
            return Err(Error::validation("seed.created_by must not be empty"));
        }
        if let Some(label) = self.seed.labels.iter().find(|l| l.trim().is_empty()) {
            return Err(Error::validation(format!(
                "seed.labels contains an empty label ({label:?})"
            )));
        }

        if let Some(taxonomy) = &self.taxonomy {
            taxonomy.validate()?;
        }
        Ok(())
    }

    /// The per-request timeout as a Duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.services.request_timeout_secs)
    }

    /// Chrome rules built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a prefix is not an absolute path.
    pub fn chrome_rules(&self) -> Result<ChromeRules> {
        ChromeRules::from_config(&self.chrome)
    }

    /// Link annotator built from this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern is invalid.
    pub fn link_annotator(&self) -> Result<LinkAnnotator> {
        LinkAnnotator::from_pattern(self.linkify.pattern.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_services_config() {
        let services = ServicesConfig::default();
        assert_eq!(services.oembed_url, "https://www.youtube.com/oembed");
        assert_eq!(services.request_timeout_secs, 10);
    }

    #[test]
    fn test_default_chrome_config_matches_rules() {
        let rules = Config::default().chrome_rules().unwrap();
        assert_eq!(rules, ChromeRules::default());
    }

    #[test]
    fn test_default_seed_config() {
        let seed = SeedConfig::default();
        assert_eq!(seed.labels.len(), 5);
        assert_eq!(seed.labels[0], "OBO");
        assert_eq!(seed.created_by, "system");
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.services.request_timeout_secs = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("request_timeout_secs"));
    }

    #[test]
    fn test_validate_bad_url() {
        let mut config = Config::default();
        config.services.listing_base_url = "localhost:8080".to_string();
        // "localhost:8080" parses as scheme "localhost" and cannot be a base.
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("listing_base_url"));
    }

    #[test]
    fn test_validate_relative_chrome_prefix() {
        let mut config = Config::default();
        config.chrome.hide_footer.push("admin".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_link_pattern() {
        let mut config = Config::default();
        config.linkify.pattern = Some("[invalid".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_validate_empty_seed_label() {
        let mut config = Config::default();
        config.seed.labels.push(" ".to_string());
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("empty label"));
    }

    #[test]
    fn test_validate_empty_created_by() {
        let mut config = Config::default();
        config.seed.created_by = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout() {
        assert_eq!(Config::default().request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("skymarket"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load_from(Some(PathBuf::from("/nonexistent/skymarket.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[services]
listing_base_url = "https://api.example.com"
request_timeout_secs = 3

[chrome]
hide_header = ["/messages", "/checkout"]
boundary = "segment"

[seed]
labels = ["OBO", "Firm"]
created_by = "ops"

[taxonomy]
aircraft_types = ["Jet", {{ name = "Helicopter", target_route = "/listings/rotorcraft" }}]
"#
        )
        .unwrap();

        let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.services.listing_base_url, "https://api.example.com");
        assert_eq!(config.services.request_timeout_secs, 3);
        assert_eq!(
            config.services.oembed_url,
            ServicesConfig::default().oembed_url
        );
        assert_eq!(config.chrome.boundary, BoundaryMode::Segment);
        assert_eq!(config.chrome.hide_header, vec!["/messages", "/checkout"]);
        assert_eq!(config.chrome.hide_footer, ChromeConfig::default().hide_footer);
        assert_eq!(config.seed.labels, vec!["OBO", "Firm"]);
        let taxonomy = config.taxonomy.expect("taxonomy section present");
        assert_eq!(taxonomy.aircraft_types.len(), 2);
        assert_eq!(
            taxonomy.aircraft_types[1].target_route(),
            Some("/listings/rotorcraft")
        );
        assert_eq!(taxonomy.categories, Taxonomy::builtin().categories);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[services]\nrequest_timeout_secs = 0").unwrap();
        let err = Config::load_from(Some(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_default_config_uses_builtin_taxonomy() {
        let config = Config::default();
        assert!(config.taxonomy.is_none());
        assert_eq!(Taxonomy::from_config(&config).unwrap(), Taxonomy::builtin());
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("listing_base_url"));
        assert!(json.contains("hide_footer"));
    }
}
