//! Routing rule entities: rules, their conditions and the condition operators.

use serde::{Deserialize, Serialize};

/// A prioritized, conditionally-matched alternate destination for a short link.
///
/// Lower `priority` values win. Rules sharing a priority form a tier; within a tier,
/// rules carrying a positive `weight` are A/B variants split by traffic share.
///
/// The engine only ever reads rules; they are authored and stored elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingRule {
    pub id: String,
    pub link_id: String,
    pub name: String,
    pub destination_url: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub conditions: Vec<RuleCondition>,
}

fn default_enabled() -> bool {
    true
}

impl RoutingRule {
    /// Creates an enabled, unweighted rule with no conditions.
    pub fn new(
        id: impl Into<String>,
        link_id: impl Into<String>,
        name: impl Into<String>,
        destination_url: impl Into<String>,
        priority: i32,
    ) -> Self {
        Self {
            id: id.into(),
            link_id: link_id.into(),
            name: name.into(),
            destination_url: destination_url.into(),
            priority,
            weight: None,
            enabled: true,
            conditions: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_condition(mut self, condition: RuleCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Weight used for A/B selection. Absent, zero and negative weights mark a plain rule.
    pub fn effective_weight(&self) -> Option<u32> {
        self.weight
            .filter(|w| *w > 0)
            .and_then(|w| u32::try_from(w).ok())
    }

    pub fn is_weighted(&self) -> bool {
        self.effective_weight().is_some()
    }
}

/// One comparison evaluated against the request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCondition {
    /// Dotted path into the context, e.g. `geo.country`.
    pub variable: String,
    pub operator: ConditionOperator,
    pub value: String,
}

impl RuleCondition {
    pub fn new(
        variable: impl Into<String>,
        operator: ConditionOperator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Comparison operators available to rule conditions.
///
/// Operator names outside the known set deserialize to [`ConditionOperator::Unsupported`],
/// which never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    In,
    NotIn,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    #[serde(other)]
    Unsupported,
}

impl ConditionOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "not_equals",
            Self::Contains => "contains",
            Self::NotContains => "not_contains",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Between => "between",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Gt | Self::Gte | Self::Lt | Self::Lte | Self::Between
        )
    }
}
