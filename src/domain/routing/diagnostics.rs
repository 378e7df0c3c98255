//! Static checks over a rule set, for operator tooling.
//!
//! None of these findings change evaluation; they point at rules and tiers whose
//! runtime behavior is likely surprising.

use serde::Serialize;
use std::fmt;

use super::condition::{parse_number, parse_range, resolve_variable};
use super::engine::priority_tiers;
use crate::domain::context::RequestContext;
use crate::domain::entities::{ConditionOperator, RoutingRule};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleIssue {
    /// Disabled rules are skipped at evaluation.
    Disabled { rule_id: String },
    /// Rules without conditions never match.
    NoConditions { rule_id: String },
    UnsupportedVariable { rule_id: String, variable: String },
    UnsupportedOperator { rule_id: String, variable: String },
    /// Numeric operator whose expected value does not parse.
    NonNumericValue { rule_id: String, variable: String, value: String },
    MalformedRange { rule_id: String, value: String },
    /// Weight outside 1-100.
    WeightOutOfRange { rule_id: String, weight: i32 },
    /// Weighted rules of a tier not summing to 100. Weights are scaled onto their
    /// total, so the authored numbers are not the real traffic percentages.
    TierWeightTotal { priority: i32, total: u64 },
}

impl fmt::Display for RuleIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled { rule_id } => write!(f, "rule {rule_id} is disabled"),
            Self::NoConditions { rule_id } => {
                write!(f, "rule {rule_id} has no conditions and can never match")
            }
            Self::UnsupportedVariable { rule_id, variable } => {
                write!(f, "rule {rule_id}: unsupported variable '{variable}'")
            }
            Self::UnsupportedOperator { rule_id, variable } => {
                write!(f, "rule {rule_id}: unsupported operator on '{variable}'")
            }
            Self::NonNumericValue {
                rule_id,
                variable,
                value,
            } => write!(
                f,
                "rule {rule_id}: numeric comparison on '{variable}' with non-numeric value '{value}'"
            ),
            Self::MalformedRange { rule_id, value } => {
                write!(f, "rule {rule_id}: malformed range '{value}', expected 'min-max'")
            }
            Self::WeightOutOfRange { rule_id, weight } => {
                write!(f, "rule {rule_id}: weight {weight} outside 1-100")
            }
            Self::TierWeightTotal { priority, total } => write!(
                f,
                "priority {priority}: weighted rules sum to {total}, not 100"
            ),
        }
    }
}

/// Known variable paths, checked against an empty context.
fn is_supported_variable(variable: &str) -> bool {
    if let Some(("query", name)) = variable.split_once('.') {
        return !name.is_empty();
    }
    // Optional fields resolve to None on an empty context; populate them.
    let mut probe = RequestContext::default();
    probe.geo.country = Some(String::new());
    probe.geo.region = Some(String::new());
    probe.geo.city = Some(String::new());
    probe.http.referrer = Some(String::new());
    resolve_variable(variable, &probe).is_some()
}

pub fn analyze_rules(rules: &[RoutingRule]) -> Vec<RuleIssue> {
    let mut issues = Vec::new();

    for rule in rules {
        if !rule.enabled {
            issues.push(RuleIssue::Disabled {
                rule_id: rule.id.clone(),
            });
        }
        if rule.conditions.is_empty() {
            issues.push(RuleIssue::NoConditions {
                rule_id: rule.id.clone(),
            });
        }
        if let Some(weight) = rule.weight
            && !(1..=100).contains(&weight)
        {
            issues.push(RuleIssue::WeightOutOfRange {
                rule_id: rule.id.clone(),
                weight,
            });
        }

        for condition in &rule.conditions {
            if !is_supported_variable(&condition.variable) {
                issues.push(RuleIssue::UnsupportedVariable {
                    rule_id: rule.id.clone(),
                    variable: condition.variable.clone(),
                });
            }
            match condition.operator {
                ConditionOperator::Unsupported => issues.push(RuleIssue::UnsupportedOperator {
                    rule_id: rule.id.clone(),
                    variable: condition.variable.clone(),
                }),
                ConditionOperator::Between => {
                    let (min, max) = parse_range(&condition.value);
                    if min.is_nan() || max.is_nan() || min > max {
                        issues.push(RuleIssue::MalformedRange {
                            rule_id: rule.id.clone(),
                            value: condition.value.clone(),
                        });
                    }
                }
                op if op.is_numeric() && parse_number(&condition.value).is_nan() => {
                    issues.push(RuleIssue::NonNumericValue {
                        rule_id: rule.id.clone(),
                        variable: condition.variable.clone(),
                        value: condition.value.clone(),
                    });
                }
                _ => {}
            }
        }
    }

    for (priority, tier) in priority_tiers(rules) {
        let weights: Vec<u64> = tier
            .iter()
            .filter(|rule| rule.enabled)
            .filter_map(|rule| rule.effective_weight())
            .map(u64::from)
            .collect();
        if weights.is_empty() {
            continue;
        }
        // Each weight is at most i32::MAX.
        let total: u64 = weights.iter().sum();
        if total != 100 {
            issues.push(RuleIssue::TierWeightTotal { priority, total });
        }
    }

    issues
}
