use crate::core::color::{clamp_unit, remap};
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::VertexOut;
use crate::core::math::interpolation::{edge_function, hyperbolic_interpolate, perspective_correct};
use crate::core::math::transform::ndc_to_raster;
use crate::io::render_settings::{CullMode, RenderSettings};
use crate::pipeline::shading::{self, Fragment};
use crate::scene::material::Material;
use nalgebra::{Point2, Vector3};
use rayon::prelude::*;

/// Signed areas below this are treated as degenerate triangles.
const AREA_EPSILON: f32 = 1e-6;

/// Depth-visualization band: stored depths are remapped from this narrow
/// near-far-plane range onto full grayscale.
const DEPTH_VIS_MIN: f32 = 0.995;
const DEPTH_VIS_MAX: f32 = 1.0;

/// Rasterizes one frustum-tested triangle into the framebuffer: bounding-box
/// scan, edge-function coverage, hyperbolic depth test, perspective-correct
/// attribute interpolation, then shading (or a diagnostic overlay).
///
/// Vertices carry post-divide NDC x,y,z with the clip-space w retained (see
/// `VertexOut`). Rows of the candidate box run in parallel; the depth
/// read-modify-write is atomic per pixel.
pub fn rasterize_triangle(
    framebuffer: &FrameBuffer,
    triangle: &[VertexOut; 3],
    material: &Material,
    settings: &RenderSettings,
) {
    let width = framebuffer.width as f32;
    let height = framebuffer.height as f32;

    let v0 = ndc_to_raster(triangle[0].position.x, triangle[0].position.y, width, height);
    let v1 = ndc_to_raster(triangle[1].position.x, triangle[1].position.y, width, height);
    let v2 = ndc_to_raster(triangle[2].position.x, triangle[2].position.y, width, height);

    let edge01 = v1 - v0;
    let edge12 = v2 - v1;
    let edge20 = v0 - v2;

    // The signed area doubles as the barycentric denominator; its sign
    // encodes the winding (positive = clockwise on screen = front-facing).
    let area = edge01.x * edge12.y - edge01.y * edge12.x;

    // Bounding box over the raster positions, widened by one pixel so that
    // boundary pixels are not missed.
    let min_x = v0.x.min(v1.x).min(v2.x).floor() as i32 - 1;
    let min_y = v0.y.min(v1.y).min(v2.y).floor() as i32 - 1;
    let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i32 + 1;
    let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i32 + 1;

    // Reject only when the box is entirely off one screen edge; partially
    // visible triangles keep their on-screen side.
    if max_x < 0
        || max_y < 0
        || min_x >= framebuffer.width as i32
        || min_y >= framebuffer.height as i32
    {
        return;
    }

    let start_x = min_x.max(0) as usize;
    let end_x = max_x.min(framebuffer.width as i32 - 1) as usize;
    let start_y = min_y.max(0) as usize;
    let end_y = max_y.min(framebuffer.height as i32 - 1) as usize;

    // The box overlay applies to every candidate pixel, before any coverage,
    // cull or degeneracy decision.
    if settings.show_bounding_boxes {
        (start_y..=end_y).into_par_iter().for_each(|y| {
            for x in start_x..=end_x {
                framebuffer.set_pixel_safe(x, y, Vector3::new(1.0, 1.0, 1.0));
            }
        });
        return;
    }

    if area.abs() < AREA_EPSILON {
        return;
    }

    match settings.cull_mode {
        CullMode::Back if area < 0.0 => return,
        CullMode::Front if area > 0.0 => return,
        _ => {}
    }

    let ndc_z = [
        triangle[0].position.z,
        triangle[1].position.z,
        triangle[2].position.z,
    ];
    let clip_w = [
        triangle[0].position.w,
        triangle[1].position.w,
        triangle[2].position.w,
    ];

    (start_y..=end_y).into_par_iter().for_each(|y| {
        for x in start_x..=end_x {
            let pixel = Point2::new(x as f32, y as f32);

            // Each edge value is the unnormalized weight of the opposite vertex.
            let w0 = edge_function(&v1, &edge12, &pixel);
            let w1 = edge_function(&v2, &edge20, &pixel);
            let w2 = edge_function(&v0, &edge01, &pixel);

            // Covered when every edge value matches the triangle's winding.
            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if !inside {
                continue;
            }

            let weights = Vector3::new(w0 / area, w1 / area, w2 / area);

            let depth = hyperbolic_interpolate(&ndc_z, &weights);
            if !(0.0..=1.0).contains(&depth) {
                continue;
            }
            if !framebuffer.depth_test_and_update(x, y, depth) {
                continue;
            }

            if settings.show_depth_buffer {
                let value = remap(depth, DEPTH_VIS_MIN, DEPTH_VIS_MAX);
                framebuffer.set_pixel_safe(x, y, Vector3::new(value, value, value));
                continue;
            }

            let interpolated_w = hyperbolic_interpolate(&clip_w, &weights);

            let fragment = Fragment {
                uv: perspective_correct(
                    &[triangle[0].uv, triangle[1].uv, triangle[2].uv],
                    &clip_w,
                    &weights,
                    interpolated_w,
                ),
                normal: perspective_correct(
                    &[triangle[0].normal, triangle[1].normal, triangle[2].normal],
                    &clip_w,
                    &weights,
                    interpolated_w,
                ),
                tangent: perspective_correct(
                    &[triangle[0].tangent, triangle[1].tangent, triangle[2].tangent],
                    &clip_w,
                    &weights,
                    interpolated_w,
                ),
                view_direction: perspective_correct(
                    &[
                        triangle[0].view_direction,
                        triangle[1].view_direction,
                        triangle[2].view_direction,
                    ],
                    &clip_w,
                    &weights,
                    interpolated_w,
                ),
            };

            let color = shading::shade(&fragment, material, settings);
            framebuffer.set_pixel_safe(x, y, clamp_unit(color));
        }
    });
}
