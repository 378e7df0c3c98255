//! Integration surface for the caller's HTTP layer.
//!
//! The redirect handler itself lives in the surrounding product; this module only
//! supplies the axum extractor collecting the raw signals the context is built from.

pub mod signals;

pub use signals::RequestSignals;
