//! External Services
//!
//! - api: background worker that owns the HTTP client and runs requests

pub mod api;

pub use api::{ApiRequest, ApiResponse, DeleteMode, PopulateTrigger, Priority};
