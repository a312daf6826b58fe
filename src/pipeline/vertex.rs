use crate::core::geometry::{Vertex, VertexOut};
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};
use rayon::prelude::*;

const W_EPSILON: f32 = 1e-6;

/// Maps every mesh vertex from object space to NDC, carrying the shading
/// attributes forward. A pure per-vertex map, parallel across vertices.
pub fn transform_vertices(mesh: &Mesh, camera: &Camera) -> Vec<VertexOut> {
    let world = mesh.world();
    let world_view_projection = camera.projection_matrix() * camera.view_matrix() * world;
    // Vector transform only: no translation. Assumes uniform scaling, like
    // the rest of the pipeline.
    let normal_matrix = world.fixed_view::<3, 3>(0, 0).into_owned();

    mesh.vertices()
        .par_iter()
        .map(|vertex| transform_vertex(vertex, &world_view_projection, &normal_matrix))
        .collect()
}

fn transform_vertex(
    vertex: &Vertex,
    world_view_projection: &Matrix4<f32>,
    normal_matrix: &Matrix3<f32>,
) -> VertexOut {
    let clip = world_view_projection * vertex.position.to_homogeneous();

    // Captured before the divide: the quasi-view-space direction the shading
    // model expects.
    let view_direction = clip.xyz().normalize();

    let position = if clip.w.abs() > W_EPSILON {
        // x, y, z are divided; w is deliberately retained for
        // perspective-correct interpolation later.
        Vector4::new(clip.x / clip.w, clip.y / clip.w, clip.z / clip.w, clip.w)
    } else {
        // Degenerate w: push the vertex outside the frustum instead of dividing.
        Vector4::new(f32::MAX, f32::MAX, f32::MAX, clip.w)
    };

    VertexOut {
        position,
        color: vertex.color,
        uv: vertex.uv,
        normal: (normal_matrix * vertex.normal).normalize(),
        tangent: (normal_matrix * vertex.tangent)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros),
        view_direction,
    }
}

/// Whole-triangle reject test against the canonical view volume:
/// NDC x,y in [-1, 1] and z in [0, 1]. Straddling triangles are dropped
/// whole by the caller; there is no clipping stage.
pub fn is_in_frustum(vertex: &VertexOut) -> bool {
    let p = &vertex.position;
    (-1.0..=1.0).contains(&p.x) && (-1.0..=1.0).contains(&p.y) && (0.0..=1.0).contains(&p.z)
}
