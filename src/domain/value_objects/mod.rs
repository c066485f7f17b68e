//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod frame_range;
mod frame_template;
mod path_mapping;
mod prim_pattern;

pub use frame_range::{FrameRange, MAX_FRAME, MIN_FRAME};
pub use frame_template::FrameTemplate;
pub use path_mapping::{PathMapping, PathMappingRule};
pub use prim_pattern::PrimPattern;
