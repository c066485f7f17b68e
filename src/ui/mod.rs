//! Terminal and JSON output
//!
//! - `terminal` / `context` - What the terminal can show and what the user asked for
//! - `primitives` / `blocks` - Icons, colored text and headers
//! - `views` - One module per command
//! - `json` - NDJSON events for `--json`

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
