//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; implementations live in
//! `crate::infrastructure`. Mock implementations are generated via `mockall` for
//! unit tests.
//!
//! - [`RoutingRuleRepository`] - Enabled rules of a short link

pub mod routing_rule_repository;

pub use routing_rule_repository::RoutingRuleRepository;

#[cfg(test)]
pub use routing_rule_repository::MockRoutingRuleRepository;
