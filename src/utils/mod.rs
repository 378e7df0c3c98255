//! Helper functions used across the crate.
//!
//! - [`user_agent`] - Device, OS and browser classification
//! - [`utm`] - UTM decoration of default destinations

pub mod user_agent;
pub mod utm;
