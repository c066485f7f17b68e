//! SceneReader port - abstraction for recovering render prims from a USD file
//!
//! Resolution only ever sees a `SceneDescription`; how it was produced
//! (dump text scanning today) stays behind this trait.

use std::path::Path;

use crate::domain::entities::SceneDescription;
use crate::error::HuskResult;

pub trait SceneReader {
    /// Read layer metadata and the render prims of one file.
    fn read_scene(&self, path: &Path) -> HuskResult<SceneDescription>;
}
