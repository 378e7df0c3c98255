//! Priority-tier evaluation of a link's rule set.

use tracing::debug;

use super::matcher::rule_matches;
use super::weighted::select_weighted;
use crate::domain::context::RequestContext;
use crate::domain::entities::{EvaluationResult, RoutingRule};

/// When a tier has weighted matches, only they may resolve it.
///
/// If the weighted selection picks nothing (the sample lands outside every segment),
/// the tier yields no result even when plain rules of the same tier matched.
pub const WEIGHTED_SUPPRESSES_PLAIN: bool = true;

/// Rules sharing one priority, in declaration order.
pub type PriorityTier<'a> = (i32, Vec<&'a RoutingRule>);

/// Stable-sorts rules by ascending priority and groups equal priorities.
pub fn priority_tiers(rules: &[RoutingRule]) -> Vec<PriorityTier<'_>> {
    let mut sorted: Vec<&RoutingRule> = rules.iter().collect();
    sorted.sort_by_key(|rule| rule.priority);

    sorted
        .chunk_by(|a, b| a.priority == b.priority)
        .map(|tier| (tier[0].priority, tier.to_vec()))
        .collect()
}

/// Evaluates rule sets against request contexts.
///
/// Stateless and `Copy`; one engine can serve every request concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutingEngine {
    weighted_suppresses_plain: bool,
}

impl Default for RoutingEngine {
    fn default() -> Self {
        Self {
            weighted_suppresses_plain: WEIGHTED_SUPPRESSES_PLAIN,
        }
    }
}

impl RoutingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets a tier fall back to its first plain match when weighted selection
    /// picks nothing.
    pub fn with_plain_fallback(mut self, enabled: bool) -> Self {
        self.weighted_suppresses_plain = !enabled;
        self
    }

    pub fn weighted_suppresses_plain(&self) -> bool {
        self.weighted_suppresses_plain
    }

    /// Decides the destination for one request.
    ///
    /// Tiers are walked in ascending priority; the first tier producing a rule wins.
    pub fn evaluate(&self, rules: &[RoutingRule], context: &RequestContext) -> EvaluationResult {
        for (priority, tier) in priority_tiers(rules) {
            if let Some(rule) = self.resolve_tier(&tier, context) {
                debug!(
                    priority,
                    rule_id = %rule.id,
                    rule_name = %rule.name,
                    "Routing rule selected"
                );
                return EvaluationResult::from_rule(rule);
            }
        }

        debug!(rules = rules.len(), "No routing rule matched");
        EvaluationResult::no_match()
    }

    fn resolve_tier<'a>(
        &self,
        tier: &[&'a RoutingRule],
        context: &RequestContext,
    ) -> Option<&'a RoutingRule> {
        let (weighted, plain): (Vec<&RoutingRule>, Vec<&RoutingRule>) = tier
            .iter()
            .copied()
            .filter(|rule| rule_matches(rule, context))
            .partition(|rule| rule.is_weighted());

        if weighted.is_empty() {
            return plain.first().copied();
        }

        let selected = select_weighted(&weighted, context.random.percent);
        if selected.is_none() && !self.weighted_suppresses_plain {
            return plain.first().copied();
        }
        selected
    }
}

/// Evaluates with the default engine.
pub fn evaluate(rules: &[RoutingRule], context: &RequestContext) -> EvaluationResult {
    RoutingEngine::default().evaluate(rules, context)
}
