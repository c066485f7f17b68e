//! Plain-text views for each command
//!
//! Views return strings so they can be tested without a terminal.

pub mod inspect;
pub mod install;
pub mod render;
pub mod submit;
