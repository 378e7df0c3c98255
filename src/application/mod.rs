//! Application layer services.
//!
//! Services coordinate repository calls and the pure routing engine, and give the
//! redirect handler a single entry point.
//!
//! # Available Services
//!
//! - [`services::routing_service::RoutingService`] - Redirect target resolution

pub mod services;
