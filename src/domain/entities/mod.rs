//! Core domain entities of the routing layer.
//!
//! Entities are plain data structures; the behavior operating on them lives in
//! [`crate::domain::routing`] and [`crate::domain::context`].
//!
//! # Entity Types
//!
//! - [`RoutingRule`] / [`RuleCondition`] - Conditional alternate destinations
//! - [`ShortLink`] - A short link and its default destination
//! - [`EvaluationResult`] - The decision handed back to the redirect path
//!
//! All entities serialize with camelCase field names so rule sets can be exchanged
//! as JSON.

pub mod evaluation;
pub mod link;
pub mod routing_rule;

pub use evaluation::EvaluationResult;
pub use link::{ShortLink, UtmParams};
pub use routing_rule::{ConditionOperator, RoutingRule, RuleCondition};
