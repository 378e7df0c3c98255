//! The smart-routing decision engine.
//!
//! Leaves first:
//!
//! - [`condition`] - evaluates one `(variable, operator, value)` condition
//! - [`matcher`] - AND-combines a rule's conditions
//! - [`weighted`] - A/B selection over a tier's weighted matches
//! - [`engine`] - priority-tier walk producing an [`EvaluationResult`]
//! - [`diagnostics`] - static checks over a rule set
//!
//! Everything here is synchronous and pure over borrowed inputs. The only random
//! ingredient, `random.percent`, is drawn by [`crate::domain::context::ContextBuilder`]
//! and read from the context.
//!
//! [`EvaluationResult`]: crate::domain::entities::EvaluationResult

pub mod condition;
pub mod diagnostics;
pub mod engine;
pub mod matcher;
pub mod weighted;

pub use condition::{ContextValue, evaluate_condition, resolve_variable};
pub use diagnostics::{RuleIssue, analyze_rules};
pub use engine::{
    PriorityTier, RoutingEngine, WEIGHTED_SUPPRESSES_PLAIN, evaluate, priority_tiers,
};
pub use matcher::rule_matches;
pub use weighted::select_weighted;
