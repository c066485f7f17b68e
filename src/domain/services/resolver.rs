//! Derivation resolver
//!
//! Walks passes → settings → products → output paths for one scene. Each
//! stage only reads the result of the stage before it, so a caller can keep
//! an earlier stage's result and re-run the later ones with new overrides.
//! Problems along the chain are collected as warnings; resolution itself
//! never fails.

use std::collections::HashSet;

use crate::domain::entities::{
    PrimKind, ProductOutput, RenderPass, RenderProduct, RenderSettings, ResolvedOutput,
    SceneDescription,
};
use crate::domain::value_objects::{FrameRange, FrameTemplate, PathMapping, PrimPattern};

/// Settings prim used when the stage declares none.
pub const DEFAULT_SETTINGS_PATH: &str = "/Render/rendersettings";

/// User overrides for one resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveRequest {
    pub passes: Vec<PrimPattern>,
    pub settings: Vec<PrimPattern>,
    /// Replaces every product's `productName`
    pub output: Option<String>,
    /// Replaces the scene's frame range
    pub frames: Option<FrameRange>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub passes: Vec<RenderPass>,
    pub settings: Vec<RenderSettings>,
    pub products: Vec<RenderProduct>,
    pub product_outputs: Vec<ProductOutput>,
    pub frames: Option<FrameRange>,
    pub outputs: Vec<ResolvedOutput>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DerivationResolver<'a> {
    scene: &'a SceneDescription,
    path_mapping: PathMapping,
    default_settings: String,
}

impl<'a> DerivationResolver<'a> {
    pub fn new(scene: &'a SceneDescription) -> Self {
        Self {
            scene,
            path_mapping: PathMapping::default(),
            default_settings: DEFAULT_SETTINGS_PATH.to_string(),
        }
    }

    pub fn with_path_mapping(mut self, path_mapping: PathMapping) -> Self {
        self.path_mapping = path_mapping;
        self
    }

    pub fn with_default_settings(mut self, path: impl Into<String>) -> Self {
        self.default_settings = path.into();
        self
    }

    /// Run every stage in order.
    pub fn resolve(&self, request: &ResolveRequest) -> Resolution {
        let mut warnings = Vec::new();

        let passes = self.resolve_passes(&request.passes, &mut warnings);
        // The settings fallback chain only applies when no pass was asked for.
        let settings = if !request.passes.is_empty() && passes.is_empty() {
            Vec::new()
        } else {
            self.resolve_settings(&passes, &request.settings, &mut warnings)
        };
        let products = self.resolve_products(&settings, &mut warnings);
        let product_outputs =
            self.resolve_product_outputs(&products, request.output.as_deref(), &mut warnings);

        let frames = request.frames.or_else(|| self.scene.frame_range());
        let outputs = match frames {
            Some(frames) => self.resolve_outputs(&product_outputs, &frames),
            None => {
                warnings.push("No frame range in scene metadata and none given".to_string());
                Vec::new()
            }
        };

        Resolution {
            passes,
            settings,
            products,
            product_outputs,
            frames,
            outputs,
            warnings,
        }
    }

    /// Expand pass patterns against the declared passes, in declaration
    /// order without duplicates.
    pub fn resolve_passes(
        &self,
        patterns: &[PrimPattern],
        warnings: &mut Vec<String>,
    ) -> Vec<RenderPass> {
        let declared: Vec<_> = self.scene.prims_of(&PrimKind::RenderPass).collect();
        let mut matched = HashSet::new();

        for pattern in patterns {
            let hits: Vec<_> = declared
                .iter()
                .filter(|p| pattern.matches(&p.path))
                .map(|p| p.path.as_str())
                .collect();
            if hits.is_empty() {
                warnings.push(format!("Pass pattern '{}' matched no render pass", pattern));
            }
            matched.extend(hits);
        }

        let passes: Vec<_> = declared
            .into_iter()
            .filter(|p| matched.contains(p.path.as_str()))
            .map(RenderPass::from_record)
            .collect();
        log::debug!("resolved {} pass(es)", passes.len());
        passes
    }

    /// Settings prims for the resolved passes, or the scene's fallback chain
    /// when `passes` is empty. `resolve` skips this stage when pass patterns
    /// were given and none matched.
    pub fn resolve_settings(
        &self,
        passes: &[RenderPass],
        explicit: &[PrimPattern],
        warnings: &mut Vec<String>,
    ) -> Vec<RenderSettings> {
        let explicit_paths = self.match_settings(explicit, warnings);
        let mut seen = HashSet::new();
        let mut settings = Vec::new();

        let mut push = |path: &str, pass: Option<&str>, settings: &mut Vec<RenderSettings>| {
            if !seen.insert(path.to_string()) {
                return;
            }
            if let Some(record) = self.scene.prim(path) {
                settings.push(RenderSettings::from_record(record, pass));
            }
        };

        if passes.is_empty() {
            if !explicit_paths.is_empty() {
                for path in &explicit_paths {
                    push(path, None, &mut settings);
                }
            } else if let Some(path) = self.fallback_settings() {
                push(path, None, &mut settings);
            } else {
                warnings.push("No render settings prim found".to_string());
            }
        }

        for pass in passes {
            let source = pass
                .render_source
                .as_deref()
                .filter(|s| self.is_settings(s));

            match source {
                Some(path) => push(path, Some(pass.path.as_str()), &mut settings),
                None if !explicit_paths.is_empty() => {
                    if let Some(missing) = &pass.render_source {
                        warnings.push(format!(
                            "Pass {} renderSource {} is not a render settings prim, using the given settings",
                            pass.path, missing
                        ));
                    }
                    for path in &explicit_paths {
                        push(path, Some(pass.path.as_str()), &mut settings);
                    }
                }
                None => {
                    let reason = match &pass.render_source {
                        Some(missing) => format!("renderSource {} not found", missing),
                        None => "no renderSource".to_string(),
                    };
                    warnings.push(format!(
                        "Pass {} has {} and no settings were given",
                        pass.path, reason
                    ));
                }
            }
        }

        log::debug!("resolved {} settings prim(s)", settings.len());
        settings
    }

    /// Products listed by each settings prim, first owner wins.
    pub fn resolve_products(
        &self,
        settings: &[RenderSettings],
        warnings: &mut Vec<String>,
    ) -> Vec<RenderProduct> {
        let mut seen = HashSet::new();
        let mut products = Vec::new();

        for owner in settings {
            if owner.products.is_empty() {
                warnings.push(format!("Settings {} has no products", owner.path));
                continue;
            }
            for path in &owner.products {
                if !seen.insert(path.as_str()) {
                    continue;
                }
                match self.scene.prim(path) {
                    Some(record) => products.push(RenderProduct::from_record(record, owner)),
                    None => warnings.push(format!(
                        "Product {} listed by {} was not found",
                        path, owner.path
                    )),
                }
            }
        }

        log::debug!("resolved {} product(s)", products.len());
        products
    }

    /// Output templates per product after the override and path mapping.
    pub fn resolve_product_outputs(
        &self,
        products: &[RenderProduct],
        output_override: Option<&str>,
        warnings: &mut Vec<String>,
    ) -> Vec<ProductOutput> {
        let output_override = output_override
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(FrameTemplate::parse);

        products
            .iter()
            .filter_map(|product| {
                let template = match (&output_override, &product.product_name) {
                    (Some(template), _) => template.clone(),
                    (None, Some(template)) => template.clone(),
                    (None, None) => {
                        warnings.push(format!("Product {} has no productName", product.path));
                        return None;
                    }
                };
                Some(ProductOutput {
                    product: product.path.clone(),
                    settings: product.settings.clone(),
                    pass: product.pass.clone(),
                    template: template.map_path(|p| self.path_mapping.apply(p)),
                })
            })
            .collect()
    }

    /// One output per product per frame, duplicate paths dropped.
    pub fn resolve_outputs(
        &self,
        product_outputs: &[ProductOutput],
        frames: &FrameRange,
    ) -> Vec<ResolvedOutput> {
        let mut seen = HashSet::new();
        let mut outputs = Vec::new();

        for product in product_outputs {
            for frame in frames.frames() {
                let path = product.template.expand(frame);
                if !seen.insert(path.clone()) {
                    continue;
                }
                outputs.push(ResolvedOutput {
                    pass: product.pass.clone(),
                    settings: product.settings.clone(),
                    product: product.product.clone(),
                    frame,
                    path,
                });
            }
        }

        outputs
    }

    fn match_settings(&self, patterns: &[PrimPattern], warnings: &mut Vec<String>) -> Vec<String> {
        let declared: Vec<_> = self.scene.settings_paths();
        let mut paths: Vec<String> = Vec::new();

        for pattern in patterns {
            let hits: Vec<_> = declared
                .iter()
                .filter(|path| pattern.matches(path))
                .collect();
            if hits.is_empty() {
                warnings.push(format!(
                    "Settings pattern '{}' matched no render settings prim",
                    pattern
                ));
            }
            for hit in hits {
                if !paths.iter().any(|p| p == *hit) {
                    paths.push(hit.to_string());
                }
            }
        }

        paths
    }

    fn fallback_settings(&self) -> Option<&str> {
        if let Some(path) = self.scene.default_settings_path() {
            if self.is_settings(path) {
                return Some(path);
            }
        }
        if self.is_settings(&self.default_settings) {
            return Some(self.default_settings.as_str());
        }
        let declared = self.scene.settings_paths();
        match declared.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    fn is_settings(&self, path: &str) -> bool {
        self.scene
            .prim(path)
            .is_some_and(|p| p.kind == PrimKind::RenderSettings)
    }
}
