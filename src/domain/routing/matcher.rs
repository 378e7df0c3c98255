//! Whole-rule matching.

use super::condition::evaluate_condition;
use crate::domain::context::RequestContext;
use crate::domain::entities::RoutingRule;

/// Returns true when every condition of an enabled rule holds.
///
/// Disabled rules and rules without conditions never match.
pub fn rule_matches(rule: &RoutingRule, context: &RequestContext) -> bool {
    if !rule.enabled || rule.conditions.is_empty() {
        return false;
    }

    rule.conditions
        .iter()
        .all(|condition| evaluate_condition(condition, context))
}
