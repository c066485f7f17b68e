//! husk-submit - USD render farm submitter
//!
//! Reads render passes, settings and products out of USD scenes with
//! `usdcat`, resolves the outputs each job will write, and submits one
//! Deadline job per scene that renders with Houdini's `husk`.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::{Config, ConfigWarning};
pub use domain::entities::SceneDescription;
pub use domain::services::{extract_scene, DerivationResolver, Resolution, ResolveRequest};
pub use domain::value_objects::{FrameRange, FrameTemplate};
pub use error::{HuskError, HuskResult};
