//! Scene readers

mod usdcat;

pub use usdcat::UsdcatSceneReader;
