//! Redirect destination resolution for short links.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::context::RequestContext;
use crate::domain::entities::{EvaluationResult, ShortLink};
use crate::domain::repositories::RoutingRuleRepository;
use crate::domain::routing::RoutingEngine;
use crate::utils::utm::append_utm_params;

/// Where a redirect is sent and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectTarget {
    pub url: String,
    pub source: RedirectSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RedirectSource {
    /// A routing rule matched; its destination is used verbatim.
    Rule { id: String, name: String },
    /// No rule matched; the link's default destination with its UTM parameters.
    Default,
    /// Rules could not be fetched; the link's default destination.
    Degraded,
}

impl RedirectSource {
    fn outcome(&self) -> &'static str {
        match self {
            Self::Rule { .. } => "rule",
            Self::Default => "default",
            Self::Degraded => "degraded",
        }
    }
}

/// Service deciding redirect destinations.
///
/// Fetches a link's enabled rules, runs them through the [`RoutingEngine`] and falls
/// back to the link's stored default destination.
pub struct RoutingService<R: RoutingRuleRepository> {
    repository: Arc<R>,
    engine: RoutingEngine,
}

impl<R: RoutingRuleRepository> RoutingService<R> {
    /// Creates a routing service with the default engine.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_engine(repository, RoutingEngine::default())
    }

    pub fn with_engine(repository: Arc<R>, engine: RoutingEngine) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &RoutingEngine {
        &self.engine
    }

    /// Resolves the redirect target for one request.
    ///
    /// # Request Flow
    ///
    /// 1. Fetch the link's enabled rules
    /// 2. Evaluate them against `context`
    /// 3. On a match, redirect to the rule's destination verbatim
    /// 4. Otherwise redirect to the default destination with the link's UTM
    ///    parameters appended
    ///
    /// A failing repository is logged and degrades to the default destination, so
    /// the redirect itself never fails.
    pub async fn resolve(&self, link: &ShortLink, context: &RequestContext) -> RedirectTarget {
        let target = match self.repository.find_enabled_by_link(&link.id).await {
            Ok(rules) => {
                match self.engine.evaluate(&rules, context) {
                    EvaluationResult {
                        matched: true,
                        destination_url: Some(url),
                        rule_id: Some(id),
                        rule_name: Some(name),
                    } => RedirectTarget {
                        url,
                        source: RedirectSource::Rule { id, name },
                    },
                    _ => RedirectTarget {
                        url: append_utm_params(&link.destination_url, &link.utm),
                        source: RedirectSource::Default,
                    },
                }
            }
            Err(e) => {
                warn!(link_id = %link.id, "Failed to fetch routing rules: {}", e);
                RedirectTarget {
                    url: link.destination_url.clone(),
                    source: RedirectSource::Degraded,
                }
            }
        };

        debug!(
            link_id = %link.id,
            outcome = target.source.outcome(),
            url = %target.url,
            "Redirect resolved"
        );
        metrics::counter!("routing_decisions_total", "outcome" => target.source.outcome())
            .increment(1);

        target
    }
}
