//! Configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before use.
//!
//! ```bash
//! export GEO_COUNTRY_HEADERS="cf-ipcountry"
//! export DEFAULT_LANGUAGE="es"
//! export LOG_FORMAT="json"
//! ```
//!
//! ## Optional Variables
//!
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `GEO_COUNTRY_HEADERS` - Comma-separated country headers
//!   (default: `x-vercel-ip-country,cf-ipcountry`)
//! - `GEO_REGION_HEADERS` - Comma-separated region headers
//!   (default: `x-vercel-ip-country-region`)
//! - `GEO_CITY_HEADERS` - Comma-separated city headers (default: `x-vercel-ip-city`)
//! - `DEFAULT_LANGUAGE` - Language used without `Accept-Language` (default: `en`)
//! - `ROUTING_WEIGHTED_FALLBACK_TO_PLAIN` - Let a tier fall back to its plain matches
//!   when weighted selection picks nothing (default: `false`)

use anyhow::Result;
use axum::http::HeaderName;
use std::env;

use crate::domain::context::{ContextBuilder, ContextSettings};
use crate::domain::routing::RoutingEngine;

/// Routing configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: String,
    pub geo_country_headers: Vec<String>,
    pub geo_region_headers: Vec<String>,
    pub geo_city_headers: Vec<String>,
    pub default_language: String,
    /// When true, a tier whose weighted selection picks nothing falls back to its
    /// first plain match instead of yielding no result.
    pub weighted_fallback_to_plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        let context = ContextSettings::default();
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            geo_country_headers: context.country_headers,
            geo_region_headers: context.region_headers,
            geo_city_headers: context.city_headers,
            default_language: context.default_language,
            weighted_fallback_to_plain: false,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Every variable is optional; unset variables take their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let log_level = env::var("RUST_LOG").unwrap_or(defaults.log_level);
        let log_format = env::var("LOG_FORMAT").unwrap_or(defaults.log_format);

        let geo_country_headers =
            Self::load_header_list("GEO_COUNTRY_HEADERS").unwrap_or(defaults.geo_country_headers);
        let geo_region_headers =
            Self::load_header_list("GEO_REGION_HEADERS").unwrap_or(defaults.geo_region_headers);
        let geo_city_headers =
            Self::load_header_list("GEO_CITY_HEADERS").unwrap_or(defaults.geo_city_headers);

        let default_language = env::var("DEFAULT_LANGUAGE")
            .map(|v| v.trim().to_lowercase())
            .unwrap_or(defaults.default_language);

        let weighted_fallback_to_plain = env::var("ROUTING_WEIGHTED_FALLBACK_TO_PLAIN")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Self {
            log_level,
            log_format,
            geo_country_headers,
            geo_region_headers,
            geo_city_headers,
            default_language,
            weighted_fallback_to_plain,
        })
    }

    /// Reads a comma-separated header list, lower-cased, blanks dropped.
    ///
    /// Returns `None` if the variable is unset.
    fn load_header_list(var: &str) -> Option<Vec<String>> {
        let raw = env::var(var).ok()?;
        Some(
            raw.split(',')
                .map(|name| name.trim().to_ascii_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - a geo header list is empty or holds an invalid header name
    /// - `default_language` is empty or not ASCII alphabetic
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        for (var, headers) in [
            ("GEO_COUNTRY_HEADERS", &self.geo_country_headers),
            ("GEO_REGION_HEADERS", &self.geo_region_headers),
            ("GEO_CITY_HEADERS", &self.geo_city_headers),
        ] {
            if headers.is_empty() {
                anyhow::bail!("{} must list at least one header name", var);
            }
            if let Some(bad) = headers
                .iter()
                .find(|name| HeaderName::from_bytes(name.as_bytes()).is_err())
            {
                anyhow::bail!("{} contains an invalid header name '{}'", var, bad);
            }
        }

        if self.default_language.is_empty()
            || !self
                .default_language
                .chars()
                .all(|c| c.is_ascii_alphabetic())
        {
            anyhow::bail!(
                "DEFAULT_LANGUAGE must be a primary language tag like 'en', got '{}'",
                self.default_language
            );
        }

        Ok(())
    }

    pub fn context_settings(&self) -> ContextSettings {
        ContextSettings {
            country_headers: self.geo_country_headers.clone(),
            region_headers: self.geo_region_headers.clone(),
            city_headers: self.geo_city_headers.clone(),
            default_language: self.default_language.clone(),
        }
    }

    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::new(self.context_settings())
    }

    pub fn routing_engine(&self) -> RoutingEngine {
        RoutingEngine::new().with_plain_fallback(self.weighted_fallback_to_plain)
    }

    /// Logs a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Country headers: {}", self.geo_country_headers.join(", "));
        tracing::info!("  Region headers: {}", self.geo_region_headers.join(", "));
        tracing::info!("  City headers: {}", self.geo_city_headers.join(", "));
        tracing::info!("  Default language: {}", self.default_language);
        tracing::info!(
            "  Weighted tiers fall back to plain rules: {}",
            self.weighted_fallback_to_plain
        );
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in a binary's `main`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
