use nalgebra::{Matrix4, Point2, Point3, Vector3};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating transformation matrices.
/// Manually implemented to keep full control over the coordinate system:
/// left-handed view space looking down +Z, NDC depth in [0, 1].
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix around the X-axis.
    pub fn rotation_x(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,  -s,   0.0,
            0.0, s,   c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a rotation matrix around the Y-axis.
    pub fn rotation_y(angle_rad: f32) -> Matrix4<f32> {
        let c = angle_rad.cos();
        let s = angle_rad.sin();
        Matrix4::new(
            c,   0.0, s,   0.0,
            0.0, 1.0, 0.0, 0.0,
           -s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Creates a View matrix (world -> view) from an orthonormal camera basis.
    /// The rotation rows are the basis vectors; translation re-expresses the
    /// camera origin in that basis.
    pub fn view_from_basis(
        origin: &Point3<f32>,
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Matrix4::new(
            right.x,   right.y,   right.z,   -right.dot(&origin.coords),
            up.x,      up.y,      up.z,      -up.dot(&origin.coords),
            forward.x, forward.y, forward.z, -forward.dot(&origin.coords),
            0.0,       0.0,       0.0,       1.0,
        )
    }

    /// Creates the inverse View matrix (view -> world): basis vectors as
    /// columns, camera origin as translation.
    pub fn inverse_view_from_basis(
        origin: &Point3<f32>,
        right: &Vector3<f32>,
        up: &Vector3<f32>,
        forward: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Matrix4::new(
            right.x, up.x, forward.x, origin.x,
            right.y, up.y, forward.y, origin.y,
            right.z, up.z, forward.z, origin.z,
            0.0,     0.0,  0.0,       1.0,
        )
    }

    /// Creates a Perspective Projection matrix mapping view-space z in
    /// [near, far] to NDC depth [0, 1], with clip w equal to view-space z.
    /// `fov_tan` is tan(vertical field of view / 2).
    pub fn perspective(aspect_ratio: f32, fov_tan: f32, near: f32, far: f32) -> Matrix4<f32> {
        let a = far / (far - near);
        let b = -(far * near) / (far - near);

        Matrix4::new(
            1.0 / (fov_tan * aspect_ratio), 0.0,           0.0, 0.0,
            0.0,                            1.0 / fov_tan, 0.0, 0.0,
            0.0,                            0.0,           a,   b,
            0.0,                            0.0,           1.0, 0.0,
        )
    }
}

//=================================
// Viewport Mapping
//=================================

/// Converts NDC x,y to raster (pixel) coordinates.
/// Note: Y-axis is flipped (NDC +Y is up, raster +Y is down).
#[inline]
pub fn ndc_to_raster(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - ndc_y) * 0.5 * height,
    )
}

/// Inverse of `ndc_to_raster`.
#[inline]
pub fn raster_to_ndc(raster_x: f32, raster_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        raster_x / (0.5 * width) - 1.0,
        1.0 - raster_y / (0.5 * height),
    )
}
