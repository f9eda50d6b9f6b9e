//! Event Handlers
//!
//! - keyboard: translate key presses into `Msg`s for the update loop
//!
//! API responses need no handler of their own; they arrive as
//! `Msg::Api` and go through `update::update` like everything else.

pub mod keyboard;

pub use keyboard::key_to_msg;
