use crate::core::geometry::Vertex;
use crate::scene::material::Material;
use nalgebra::{Matrix4, Point3, Vector2, Vector3};

/// A triangle list with its world transform and the material sampling
/// capabilities attached at construction. Vertices and indices are immutable
/// after construction; the world matrix may change between frames.
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    world: Matrix4<f32>,
    pub material: Material,
}

impl Mesh {
    /// Validates the triangle list up front so malformed data never reaches
    /// the per-frame path.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: Material) -> Result<Self, String> {
        if indices.len() % 3 != 0 {
            return Err(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            ));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            ));
        }

        Ok(Self {
            vertices,
            indices,
            world: Matrix4::identity(),
            material,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn world(&self) -> Matrix4<f32> {
        self.world
    }

    /// World matrices change between frames only, never during a draw.
    pub fn set_world(&mut self, world: Matrix4<f32>) {
        self.world = world;
    }

    /// A unit triangle in the z = 0 plane, facing -Z (toward a camera
    /// looking down +Z) and wound clockwise on screen.
    pub fn test_triangle(material: Material) -> Self {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        let tangent = Vector3::new(1.0, 0.0, 0.0);
        let vertices = vec![
            Vertex::new(
                Point3::new(0.0, 0.5, 0.0),
                normal,
                Vector2::new(0.5, 0.0),
            )
            .with_tangent(tangent),
            Vertex::new(
                Point3::new(0.5, -0.5, 0.0),
                normal,
                Vector2::new(1.0, 1.0),
            )
            .with_tangent(tangent),
            Vertex::new(
                Point3::new(-0.5, -0.5, 0.0),
                normal,
                Vector2::new(0.0, 1.0),
            )
            .with_tangent(tangent),
        ];

        Self {
            vertices,
            indices: vec![0, 1, 2],
            world: Matrix4::identity(),
            material,
        }
    }

    /// An axis-aligned cube centered on the origin. Each face carries its
    /// own four vertices so normals, tangents and UVs stay per-face; faces
    /// are wound clockwise seen from outside.
    pub fn cube(size: f32, material: Material) -> Self {
        let half = size * 0.5;
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        let faces = [
            // (outward normal, tangent along +U)
            (Vector3::new(0.0, 0.0, -1.0), Vector3::new(1.0, 0.0, 0.0)),
            (Vector3::new(0.0, 0.0, 1.0), Vector3::new(-1.0, 0.0, 0.0)),
            (Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
            (Vector3::new(-1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0)),
            (Vector3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
            (Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
        ];
        for (normal, tangent) in faces {
            push_face(&mut vertices, &mut indices, normal, tangent, half);
        }

        Self {
            vertices,
            indices,
            world: Matrix4::identity(),
            material,
        }
    }
}

/// Appends one quad lying `half` along its normal, spanning `half` along the
/// tangent (+U) and the binormal (+V, screen-down for a viewer the normal
/// points at).
fn push_face(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    normal: Vector3<f32>,
    tangent: Vector3<f32>,
    half: f32,
) {
    let binormal = normal.cross(&tangent);
    let base = vertices.len() as u32;

    let corners = [
        (-1.0, -1.0, Vector2::new(0.0, 0.0)),
        (1.0, -1.0, Vector2::new(1.0, 0.0)),
        (1.0, 1.0, Vector2::new(1.0, 1.0)),
        (-1.0, 1.0, Vector2::new(0.0, 1.0)),
    ];
    for (u, v, uv) in corners {
        let position = Point3::from(normal * half + tangent * (u * half) + binormal * (v * half));
        vertices.push(Vertex::new(position, normal, uv).with_tangent(tangent));
    }

    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vertex> {
        let normal = Vector3::new(0.0, 0.0, -1.0);
        (0..4)
            .map(|i| {
                Vertex::new(
                    Point3::new(i as f32, 0.0, 0.0),
                    normal,
                    Vector2::zeros(),
                )
            })
            .collect()
    }

    #[test]
    fn construction_rejects_a_partial_triangle() {
        let result = Mesh::new(quad_vertices(), vec![0, 1], Material::default());
        assert!(result.is_err());
    }

    #[test]
    fn construction_rejects_out_of_range_indices() {
        let result = Mesh::new(quad_vertices(), vec![0, 1, 7], Material::default());
        let message = result.err().unwrap();
        assert!(message.contains("out of range"));
    }

    #[test]
    fn construction_accepts_a_valid_triangle_list() {
        let mesh = Mesh::new(quad_vertices(), vec![0, 1, 2, 0, 2, 3], Material::default());
        assert!(mesh.is_ok());
    }

    #[test]
    fn cube_has_a_full_set_of_faces() {
        let cube = Mesh::cube(2.0, Material::default());
        assert_eq!(cube.vertices().len(), 24);
        assert_eq!(cube.indices().len(), 36);

        // Every vertex sits on the surface of the cube.
        for vertex in cube.vertices() {
            let p = vertex.position;
            assert!((p.x.abs().max(p.y.abs()).max(p.z.abs()) - 1.0).abs() < 1e-6);
            // Tangent is perpendicular to the face normal.
            assert!(vertex.normal.dot(&vertex.tangent).abs() < 1e-6);
        }
    }

    #[test]
    fn world_matrix_is_mutable_between_frames() {
        let mut mesh = Mesh::test_triangle(Material::default());
        assert_eq!(mesh.world(), Matrix4::identity());

        let moved = crate::core::math::transform::TransformFactory::translation(&Vector3::new(
            0.0, 0.0, 50.0,
        ));
        mesh.set_world(moved);
        assert_eq!(mesh.world(), moved);
    }
}
