use crate::core::framebuffer::FrameBuffer;
use crate::core::rasterizer::rasterize_triangle;
use crate::io::render_settings::RenderSettings;
use crate::pipeline::vertex::{is_in_frustum, transform_vertices};
use crate::scene::camera::Camera;
use crate::scene::mesh::Mesh;
use nalgebra::Vector3;

/// The high-level renderer that orchestrates the pipeline stages.
pub struct Renderer {
    pub framebuffer: FrameBuffer,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            framebuffer: FrameBuffer::new(width, height),
        }
    }

    /// Resets both planes to the background color and the far sentinel.
    /// Must run before the first draw of each frame.
    pub fn clear(&mut self, background: Vector3<f32>) {
        self.framebuffer.clear(background);
    }

    /// Transforms, frustum-tests and rasterizes every triangle of the mesh,
    /// in submission order.
    pub fn draw_mesh(&mut self, mesh: &Mesh, camera: &Camera, settings: &RenderSettings) {
        let transformed = transform_vertices(mesh, camera);

        for triangle in mesh.indices().chunks(3) {
            let v0 = transformed[triangle[0] as usize];
            let v1 = transformed[triangle[1] as usize];
            let v2 = transformed[triangle[2] as usize];

            // Triangles straddling the frustum are dropped whole.
            if !is_in_frustum(&v0) || !is_in_frustum(&v1) || !is_in_frustum(&v2) {
                continue;
            }

            rasterize_triangle(&self.framebuffer, &[v0, v1, v2], &mesh.material, settings);
        }
    }
}
