//! # Link Router
//!
//! The smart-routing decision engine behind short-link redirects: given a request
//! and a short link's prioritized, conditional routing rules, decide which
//! destination the visitor is sent to, including weighted A/B traffic splitting.
//!
//! ## Architecture
//!
//! This crate follows the same layer separation as the rest of the service:
//!
//! - **Domain Layer** ([`domain`]) - Entities, request context, the routing engine
//!   and the rule repository trait
//! - **Application Layer** ([`application`]) - Redirect target resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory rule repository
//! - **API Layer** ([`api`]) - axum extractor for raw request signals
//!
//! ## Evaluation
//!
//! 1. Build a [`domain::context::RequestContext`] (device, geo, time, http, random)
//! 2. Fetch the link's enabled rules
//! 3. Walk priority tiers in ascending order; in each tier, weighted matches are
//!    resolved by A/B selection, otherwise the first plain match wins
//! 4. No tier matched: redirect to the link's default destination
//!
//! Evaluation is synchronous and pure; every malformed input degrades to
//! "does not match" rather than an error.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin routectl -- evaluate --rules rules.json --link lnk_1 \
//!     --user-agent "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2)" \
//!     --header "x-vercel-ip-country: ES" --percent 42
//! ```
//!
//! ## Configuration
//!
//! Loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod telemetry;
pub mod utils;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::RequestSignals;
    pub use crate::application::services::{RedirectSource, RedirectTarget, RoutingService};
    pub use crate::domain::context::{ContextBuilder, ContextSettings, RequestContext};
    pub use crate::domain::entities::{
        ConditionOperator, EvaluationResult, RoutingRule, RuleCondition, ShortLink, UtmParams,
    };
    pub use crate::domain::repositories::RoutingRuleRepository;
    pub use crate::domain::routing::{RoutingEngine, evaluate};
    pub use crate::error::AppError;
    pub use crate::infrastructure::memory::InMemoryRuleRepository;
}
