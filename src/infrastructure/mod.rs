//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `scene/` - Scene readers (`usdcat` text dumps)
//! - `farm/` - Job submitters (`deadlinecommand`, dry-run preview)
//! - `executable` - husk / usdcat lookup
//! - `husk` - Worker-side renderer process

pub mod executable;
pub mod farm;
pub mod husk;
pub mod scene;

// Re-export for convenience
pub use executable::{locate_renderer, locate_usdcat, search_file_list, substitute_version, usdcat_for};
pub use farm::{DeadlineCommand, PreviewSubmitter};
pub use husk::{HuskRunner, RenderEvent};
pub use scene::UsdcatSceneReader;
