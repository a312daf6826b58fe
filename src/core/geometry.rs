use nalgebra::{Point3, Vector2, Vector3, Vector4};

/// Represents a single vertex in 3D space.
/// Owned by the mesh and never mutated after construction.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in local object space.
    pub position: Point3<f32>,
    /// Vertex color (defaults to white).
    pub color: Vector3<f32>,
    /// Texture coordinates (UV).
    pub uv: Vector2<f32>,
    /// Normal vector for lighting calculations.
    pub normal: Vector3<f32>,
    /// Tangent vector for normal mapping.
    pub tangent: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            color: Vector3::new(1.0, 1.0, 1.0),
            uv,
            normal,
            tangent: Vector3::zeros(),
        }
    }

    /// Same vertex with an explicit tangent, for normal-mapped meshes.
    pub fn with_tangent(mut self, tangent: Vector3<f32>) -> Self {
        self.tangent = tangent;
        self
    }
}

/// A vertex after the transform stage. Fully recomputed every frame.
#[derive(Debug, Clone, Copy)]
pub struct VertexOut {
    /// x, y, z hold post-divide NDC coordinates; w keeps the undivided
    /// clip-space w for perspective-correct interpolation.
    pub position: Vector4<f32>,
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
    /// Normal in world space.
    pub normal: Vector3<f32>,
    /// Tangent in world space.
    pub tangent: Vector3<f32>,
    /// Direction from the camera toward the vertex, captured before the
    /// perspective divide.
    pub view_direction: Vector3<f32>,
}
