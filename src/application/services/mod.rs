//! Application services orchestrating the domain for the redirect path.
//!
//! - [`RoutingService`] - Resolves a short link's redirect target for one request

pub mod routing_service;

pub use routing_service::{RedirectSource, RedirectTarget, RoutingService};
