use crate::io::render_settings::{CullMode, RenderSettings, ShadingMode};
use log::info;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fs;

/// Top-level TOML configuration. Every section and field is defaulted, so a
/// partial (or absent) file still renders.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub cull_mode: CullMode,
    pub shading_mode: ShadingMode,
    pub normal_map: bool,
    pub depth_visualization: bool,
    pub bounding_box_visualization: bool,
    /// Clears to a uniform dark gray instead of the default background.
    pub uniform_clear_color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            cull_mode: CullMode::Back,
            shading_mode: ShadingMode::Combined,
            normal_map: true,
            depth_visualization: false,
            bounding_box_visualization: false,
            uniform_clear_color: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub origin: [f32; 3],
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub frames: u32,
    pub rotation_degrees_per_second: f32,
    pub frame_time: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: 1,
            rotation_degrees_per_second: 45.0,
            frame_time: 1.0 / 60.0,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self, String> {
        let text =
            fs::read_to_string(path).map_err(|e| format!("failed to read config '{path}': {e}"))?;
        let config =
            toml::from_str(&text).map_err(|e| format!("failed to parse config '{path}': {e}"))?;
        info!("Loaded configuration from {path}");
        Ok(config)
    }

    /// The per-frame pipeline settings described by this configuration.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            cull_mode: self.render.cull_mode,
            shading_mode: self.render.shading_mode,
            use_normal_map: self.render.normal_map,
            show_depth_buffer: self.render.depth_visualization,
            show_bounding_boxes: self.render.bounding_box_visualization,
        }
    }

    /// Background color for the clear step.
    pub fn background(&self) -> Vector3<f32> {
        if self.render.uniform_clear_color {
            Vector3::repeat(26.0 / 255.0)
        } else {
            Vector3::repeat(100.0 / 255.0)
        }
    }
}
