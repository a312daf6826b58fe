use nalgebra::{Vector2, Vector3};
use std::sync::Arc;

/// Opaque texture-sampling capability: UV in, RGB out. The pipeline never
/// owns or decodes texture storage; it only samples through this trait.
pub trait TextureSample: Send + Sync {
    fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32>;
}

/// Constant-color sampler.
pub struct FlatColor(pub Vector3<f32>);

impl TextureSample for FlatColor {
    fn sample(&self, _uv: &Vector2<f32>) -> Vector3<f32> {
        self.0
    }
}

/// Procedural checkerboard, used by the demo scene.
pub struct Checkerboard {
    /// Cells per UV unit along each axis.
    pub cells: f32,
    pub even: Vector3<f32>,
    pub odd: Vector3<f32>,
}

impl TextureSample for Checkerboard {
    fn sample(&self, uv: &Vector2<f32>) -> Vector3<f32> {
        let u = (uv.x * self.cells).floor() as i64;
        let v = (uv.y * self.cells).floor() as i64;
        if (u + v).rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

/// The four sampling slots the pixel shader consumes, attached to a mesh at
/// construction.
#[derive(Clone)]
pub struct Material {
    pub diffuse: Arc<dyn TextureSample>,
    /// Tangent-space normal map; (0.5, 0.5, 1.0) is the flat default.
    pub normal: Arc<dyn TextureSample>,
    pub specular: Arc<dyn TextureSample>,
    /// Red channel scales the base specular exponent.
    pub glossiness: Arc<dyn TextureSample>,
}

impl Material {
    /// Untextured material with a flat tangent-space normal.
    pub fn flat(diffuse: Vector3<f32>) -> Self {
        Self {
            diffuse: Arc::new(FlatColor(diffuse)),
            normal: Arc::new(FlatColor(Vector3::new(0.5, 0.5, 1.0))),
            specular: Arc::new(FlatColor(Vector3::new(1.0, 1.0, 1.0))),
            glossiness: Arc::new(FlatColor(Vector3::new(1.0, 1.0, 1.0))),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::flat(Vector3::new(0.8, 0.8, 0.8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_color_ignores_uv() {
        let sampler = FlatColor(Vector3::new(0.2, 0.4, 0.6));
        assert_eq!(
            sampler.sample(&Vector2::new(0.1, 0.9)),
            sampler.sample(&Vector2::new(7.0, -3.0)),
        );
    }

    #[test]
    fn checkerboard_alternates_between_cells() {
        let board = Checkerboard {
            cells: 2.0,
            even: Vector3::new(1.0, 1.0, 1.0),
            odd: Vector3::zeros(),
        };
        let a = board.sample(&Vector2::new(0.1, 0.1));
        let b = board.sample(&Vector2::new(0.6, 0.1));
        let c = board.sample(&Vector2::new(0.6, 0.6));
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn checkerboard_handles_negative_uv() {
        let board = Checkerboard {
            cells: 2.0,
            even: Vector3::new(1.0, 1.0, 1.0),
            odd: Vector3::zeros(),
        };
        // One cell to the left of the origin is an odd cell.
        let a = board.sample(&Vector2::new(0.1, 0.1));
        let b = board.sample(&Vector2::new(-0.1, 0.1));
        assert_ne!(a, b);
    }

    #[test]
    fn default_material_has_a_flat_normal() {
        let material = Material::default();
        assert_eq!(
            material.normal.sample(&Vector2::zeros()),
            Vector3::new(0.5, 0.5, 1.0),
        );
    }
}
