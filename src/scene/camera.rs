use crate::core::math::transform::TransformFactory;
use nalgebra::{Matrix4, Point3, Vector3};

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;
const MOVE_SPEED: f32 = 10.0;
const ROTATION_SPEED: f32 = std::f32::consts::FRAC_PI_2;

/// One frame's worth of camera input deltas, externally sourced (e.g. from
/// input polling). Movement is along the world axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    pub movement: Vector3<f32>,
    /// Positive turns right.
    pub yaw: f32,
    /// Positive looks up.
    pub pitch: f32,
}

/// First-person camera: a position plus accumulated yaw and pitch, from
/// which an orthonormal basis and the view matrices are derived each update.
#[derive(Debug, Clone)]
pub struct Camera {
    pub origin: Point3<f32>,

    fov_angle: f32,
    /// tan(fov_angle / 2); the projection's field-of-view factor.
    fov: f32,
    aspect_ratio: f32,

    total_yaw: f32,
    total_pitch: f32,

    forward: Vector3<f32>,
    right: Vector3<f32>,
    up: Vector3<f32>,

    view_matrix: Matrix4<f32>,
    inv_view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new(origin: Point3<f32>, fov_angle_degrees: f32, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            origin,
            fov_angle: fov_angle_degrees,
            fov: (fov_angle_degrees.to_radians() / 2.0).tan(),
            aspect_ratio,
            total_yaw: 0.0,
            total_pitch: 0.0,
            forward: Vector3::z(),
            right: Vector3::x(),
            up: Vector3::y(),
            view_matrix: Matrix4::identity(),
            inv_view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        camera.calculate_projection_matrix();
        camera.calculate_view_matrix();
        camera
    }

    /// Applies one frame of movement and rotation, then rebuilds the basis
    /// and the view matrices. The projection matrix is untouched here: it
    /// only depends on FOV and aspect ratio.
    ///
    /// Pitch is not clamped; past +-90 degrees the derived basis flips.
    pub fn update(&mut self, delta_time: f32, input: &CameraInput) {
        self.origin += input.movement * MOVE_SPEED * delta_time;
        self.total_yaw += input.yaw * ROTATION_SPEED * delta_time;
        self.total_pitch += input.pitch * ROTATION_SPEED * delta_time;

        let rotation = TransformFactory::rotation_y(self.total_yaw)
            * TransformFactory::rotation_x(self.total_pitch);
        self.forward = rotation.transform_vector(&Vector3::z());

        self.calculate_view_matrix();
    }

    fn calculate_view_matrix(&mut self) {
        self.right = Vector3::y().cross(&self.forward).normalize();
        self.up = self.forward.cross(&self.right);

        self.view_matrix =
            TransformFactory::view_from_basis(&self.origin, &self.right, &self.up, &self.forward);
        self.inv_view_matrix = TransformFactory::inverse_view_from_basis(
            &self.origin,
            &self.right,
            &self.up,
            &self.forward,
        );
    }

    fn calculate_projection_matrix(&mut self) {
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov, NEAR_PLANE, FAR_PLANE);
    }

    pub fn set_fov(&mut self, fov_angle_degrees: f32) {
        self.fov_angle = fov_angle_degrees;
        self.fov = (fov_angle_degrees.to_radians() / 2.0).tan();
        self.calculate_projection_matrix();
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.calculate_projection_matrix();
    }

    pub fn fov_angle(&self) -> f32 {
        self.fov_angle
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn inv_view_matrix(&self) -> Matrix4<f32> {
        self.inv_view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}
