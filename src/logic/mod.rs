//! Business Logic
//!
//! Pure functions that can be unit tested without a terminal or server:
//! - errors: error classification for logs and alerts
//! - feedback: failure visibility per operation, dialog copy
//! - formatting: sizes, timestamps, summaries
//! - navigation: list selection movement
//! - ui: UI timing rules

pub mod errors;
pub mod feedback;
pub mod formatting;
pub mod navigation;
pub mod ui;
