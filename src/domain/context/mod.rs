//! Request context: the normalized signals routing conditions are evaluated against.
//!
//! - [`RequestContext`] - device, geo, time, http and random signals of one request
//! - [`ContextBuilder`] - derives a context from user agent, headers and query

mod builder;
mod request_context;

pub use builder::{ContextBuilder, ContextSettings};
pub use request_context::{DeviceInfo, GeoInfo, HttpInfo, RandomSample, RequestContext, TimeInfo};
