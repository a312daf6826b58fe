use serde::Deserialize;

/// Which triangle winding gets rejected before rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    Back,
    Front,
    None,
}

/// What the pixel shader accumulates before the ambient term is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingMode {
    ObservedArea,
    Diffuse,
    Specular,
    Combined,
}

/// Per-frame pipeline configuration. Passed explicitly into every draw,
/// rasterize and shade call; the pipeline itself holds no mode state.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    pub use_normal_map: bool,
    /// Diagnostic overlay: grayscale view of the depth band near the far
    /// plane instead of shaded color.
    pub show_depth_buffer: bool,
    /// Diagnostic overlay: paints every candidate pixel of each triangle's
    /// bounding box solid white. Takes precedence over depth visualization.
    pub show_bounding_boxes: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            shading_mode: ShadingMode::Combined,
            use_normal_map: true,
            show_depth_buffer: false,
            show_bounding_boxes: false,
        }
    }
}
