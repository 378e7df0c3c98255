//! The routing decision returned by the engine.

use serde::Serialize;

use super::RoutingRule;

/// Outcome of evaluating a link's rules against one request.
///
/// `matched == false` tells the caller to use the link's stored default destination.
/// When `matched` is true, `destination_url` is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl EvaluationResult {
    pub fn no_match() -> Self {
        Self::default()
    }

    pub fn from_rule(rule: &RoutingRule) -> Self {
        Self {
            matched: true,
            destination_url: Some(rule.destination_url.clone()),
            rule_name: Some(rule.name.clone()),
            rule_id: Some(rule.id.clone()),
        }
    }
}
