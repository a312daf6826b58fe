use nalgebra::{Point2, Vector2, Vector3};
use std::ops::{Add, Mul};

/// Edge-function value: the 2D cross product of `edge` with the vector from
/// `origin` to `p`. Its sign tells which side of the edge the point lies on,
/// and its magnitude is twice the area of the spanned triangle. For a pixel
/// tested against one triangle edge it becomes the unnormalized barycentric
/// weight of the vertex *opposite* that edge.
#[inline]
pub fn edge_function(origin: &Point2<f32>, edge: &Vector2<f32>, p: &Point2<f32>) -> f32 {
    let d = p - origin;
    edge.x * d.y - edge.y * d.x
}

/// Interpolates a quantity whose reciprocal is linear in screen space
/// (depth, clip w): 1 / sum(weight_i / value_i).
#[inline]
pub fn hyperbolic_interpolate(values: &[f32; 3], weights: &Vector3<f32>) -> f32 {
    1.0 / (weights.x / values[0] + weights.y / values[1] + weights.z / values[2])
}

/// Perspective-correct attribute interpolation: each attribute is divided by
/// its vertex's clip w, combined with the barycentric weights, and scaled
/// back by the hyperbolically interpolated w.
#[inline]
pub fn perspective_correct<T>(
    attributes: &[T; 3],
    clip_w: &[f32; 3],
    weights: &Vector3<f32>,
    interpolated_w: f32,
) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    (attributes[0] * (weights.x / clip_w[0])
        + attributes[1] * (weights.y / clip_w[1])
        + attributes[2] * (weights.z / clip_w[2]))
        * interpolated_w
}
