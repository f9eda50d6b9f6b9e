//! Folder Manager TUI Library
//!
//! Terminal front end for a folder/file REST service. Exposes modules for
//! the binary and for testing.

pub mod api;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod logic;
pub mod messages;
pub mod model;
pub mod services;
pub mod ui;
pub mod update;
pub mod utils;
