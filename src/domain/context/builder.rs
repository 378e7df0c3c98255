//! Builds a [`RequestContext`] from raw request signals.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use rand::Rng;
use std::collections::HashMap;

use super::request_context::{
    DeviceInfo, GeoInfo, HttpInfo, RandomSample, RequestContext, TimeInfo,
};
use crate::utils::user_agent;

/// Which headers carry geolocation, and the fallback language.
///
/// Each geo field lists candidate header names; the first present, non-empty one wins.
/// Defaults cover Vercel's edge headers with Cloudflare's country header as fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSettings {
    pub country_headers: Vec<String>,
    pub region_headers: Vec<String>,
    pub city_headers: Vec<String>,
    pub default_language: String,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            country_headers: vec![
                "x-vercel-ip-country".to_string(),
                "cf-ipcountry".to_string(),
            ],
            region_headers: vec!["x-vercel-ip-country-region".to_string()],
            city_headers: vec!["x-vercel-ip-city".to_string()],
            default_language: "en".to_string(),
        }
    }
}

/// Derives request contexts. Building never fails; missing signals become
/// defaults or `None`.
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    settings: ContextSettings,
}

impl ContextBuilder {
    pub fn new(settings: ContextSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ContextSettings {
        &self.settings
    }

    /// Builds a context for a request arriving now.
    ///
    /// Draws the request's single random sample from the thread-local generator and
    /// reads the local wall clock.
    pub fn build(
        &self,
        user_agent: &str,
        headers: &HeaderMap,
        query: &HashMap<String, String>,
    ) -> RequestContext {
        let percent = rand::rng().random_range(0.0..100.0);
        self.build_at(user_agent, headers, query, &Local::now(), percent)
    }

    /// Builds a context for an explicit instant and random sample.
    ///
    /// `percent` is used as given and is expected to lie in `[0, 100)`.
    pub fn build_at<Tz: TimeZone>(
        &self,
        user_agent: &str,
        headers: &HeaderMap,
        query: &HashMap<String, String>,
        now: &DateTime<Tz>,
        percent: f64,
    ) -> RequestContext {
        RequestContext {
            device: DeviceInfo {
                device_type: user_agent::device_type(user_agent).to_string(),
                os: user_agent::operating_system(user_agent).to_string(),
                browser: user_agent::browser(user_agent).to_string(),
            },
            geo: GeoInfo {
                country: first_header(headers, &self.settings.country_headers),
                region: first_header(headers, &self.settings.region_headers),
                city: first_header(headers, &self.settings.city_headers),
            },
            time: TimeInfo {
                hour: now.hour(),
                day: now.weekday().number_from_monday(),
                month: now.month(),
            },
            http: HttpInfo {
                language: primary_language(
                    header_str(headers, header::ACCEPT_LANGUAGE.as_str()),
                    &self.settings.default_language,
                ),
                referrer: header_str(headers, header::REFERER.as_str()).map(str::to_string),
                query: query.clone(),
            },
            random: RandomSample { percent },
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn first_header(headers: &HeaderMap, names: &[String]) -> Option<String> {
    names
        .iter()
        .find_map(|name| header_str(headers, name))
        .map(str::to_string)
}

/// `es-ES,es;q=0.9,en;q=0.8` -> `es`.
fn primary_language(accept_language: Option<&str>, default: &str) -> String {
    accept_language
        .and_then(|raw| raw.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .and_then(|tag| tag.split('-').next())
        .map(str::trim)
        .filter(|lang| !lang.is_empty() && *lang != "*")
        .map(str::to_lowercase)
        .unwrap_or_else(|| default.to_string())
}
