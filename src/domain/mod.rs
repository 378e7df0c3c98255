//! Domain layer: routing entities, request context and the decision engine.
//!
//! # Architecture
//!
//! - [`entities`] - Rules, conditions, short links and evaluation results
//! - [`context`] - Request context and its builder
//! - [`routing`] - Condition evaluation, rule matching, A/B selection, tier walk
//! - [`repositories`] - Rule retrieval trait implemented by infrastructure
//!
//! # Design Principles
//!
//! - The domain layer has no dependencies on infrastructure or presentation layers
//! - Evaluation is pure; rule retrieval completes before it starts
//!
//! # Redirect Flow
//!
//! 1. The redirect handler extracts [`crate::api::RequestSignals`]
//! 2. [`context::ContextBuilder`] turns them into a [`context::RequestContext`]
//! 3. [`crate::application::services::RoutingService`] fetches the link's enabled rules
//! 4. [`routing::RoutingEngine`] picks a destination or reports no match

pub mod context;
pub mod entities;
pub mod repositories;
pub mod routing;
