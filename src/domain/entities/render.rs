//! Render prim entities - passes, settings, products and resolved outputs

use serde::Serialize;

use crate::domain::value_objects::FrameTemplate;

use super::scene::PrimRecord;

fn prim_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A render pass prim and the settings prim it drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPass {
    pub path: String,
    pub render_source: Option<String>,
}

impl RenderPass {
    pub fn from_record(record: &PrimRecord) -> Self {
        Self {
            path: record.path.clone(),
            render_source: record.first_target("renderSource").map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        prim_name(&self.path)
    }
}

/// A render settings prim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    pub path: String,
    /// Product prim paths in authored order
    pub products: Vec<String>,
    pub camera: Option<String>,
    pub resolution: Option<(u32, u32)>,
    /// The pass that selected this settings prim, if any
    pub pass: Option<String>,
}

impl RenderSettings {
    pub fn from_record(record: &PrimRecord, pass: Option<&str>) -> Self {
        Self {
            path: record.path.clone(),
            products: record.targets("products").to_vec(),
            camera: record.first_target("camera").map(str::to_string),
            resolution: record.resolution,
            pass: pass.map(str::to_string),
        }
    }

    pub fn name(&self) -> &str {
        prim_name(&self.path)
    }
}

/// A render product prim, owned by the settings prim that listed it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderProduct {
    pub path: String,
    pub settings: String,
    pub pass: Option<String>,
    pub product_name: Option<FrameTemplate>,
    pub ordered_vars: Vec<String>,
}

impl RenderProduct {
    pub fn from_record(record: &PrimRecord, settings: &RenderSettings) -> Self {
        Self {
            path: record.path.clone(),
            settings: settings.path.clone(),
            pass: settings.pass.clone(),
            product_name: record.product_name.clone(),
            ordered_vars: record.targets("orderedVars").to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        prim_name(&self.path)
    }
}

/// The output path template of one product after override and path mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutput {
    pub product: String,
    pub settings: String,
    pub pass: Option<String>,
    pub template: FrameTemplate,
}

/// One output file for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOutput {
    pub pass: Option<String>,
    pub settings: String,
    pub product: String,
    pub frame: i64,
    pub path: String,
}
