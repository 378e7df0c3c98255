//! The normalized request signals conditions are evaluated against.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request-derived signals for one redirect.
///
/// Built once per request by [`super::ContextBuilder`] and only borrowed afterwards.
/// `random.percent` is drawn once at build time and shared by every weighted tier
/// evaluated for the request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RequestContext {
    pub device: DeviceInfo,
    pub geo: GeoInfo,
    pub time: TimeInfo,
    pub http: HttpInfo,
    pub random: RandomSample,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// `mobile`, `tablet` or `desktop`.
    #[serde(rename = "type")]
    pub device_type: String,
    pub os: String,
    pub browser: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            device_type: "desktop".to_string(),
            os: "Other".to_string(),
            browser: "Other".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeoInfo {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

/// Wall-clock components of the evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInfo {
    /// 0-23.
    pub hour: u32,
    /// 1 = Monday .. 7 = Sunday.
    pub day: u32,
    /// 1-12.
    pub month: u32,
}

impl Default for TimeInfo {
    fn default() -> Self {
        Self {
            hour: 0,
            day: 1,
            month: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpInfo {
    pub language: String,
    pub referrer: Option<String>,
    #[serde(default)]
    pub query: HashMap<String, String>,
}

impl Default for HttpInfo {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            referrer: None,
            query: HashMap::new(),
        }
    }
}

/// The single random draw of a request, in `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RandomSample {
    pub percent: f64,
}
