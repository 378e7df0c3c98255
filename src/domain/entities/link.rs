//! Short link entity as seen by the routing layer.

use serde::{Deserialize, Serialize};

/// A short link with its stored default destination.
///
/// The routing layer only needs the identifier (to fetch rules), the default
/// destination and the link's own UTM decoration for the no-match fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLink {
    pub id: String,
    pub code: String,
    pub destination_url: String,
    #[serde(default)]
    pub utm: UtmParams,
}

impl ShortLink {
    /// Creates a link without UTM decoration.
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        destination_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            destination_url: destination_url.into(),
            utm: UtmParams::default(),
        }
    }

    pub fn with_utm(mut self, utm: UtmParams) -> Self {
        self.utm = utm;
        self
    }
}

/// UTM parameters appended to a link's default destination.
///
/// `None` fields are not appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
    pub term: Option<String>,
    pub content: Option<String>,
}

impl UtmParams {
    /// Query pairs in canonical order, skipping unset and blank values.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", &self.source),
            ("utm_medium", &self.medium),
            ("utm_campaign", &self.campaign),
            ("utm_term", &self.term),
            ("utm_content", &self.content),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}
