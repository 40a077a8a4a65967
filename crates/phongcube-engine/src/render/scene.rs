//! Camera, light and material parameters, packed into the shader's uniform block.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Perspective camera looking at a target point (right-handed, depth 0..1).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_radians: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -3.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_radians: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection for the given `width / height` ratio.
    ///
    /// A non-positive or non-finite aspect (minimized window) falls back to 1.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y_radians, aspect, self.z_near, self.z_far)
    }
}

/// Single point light.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -1.0),
            color: Vec3::splat(0.5),
        }
    }
}

/// Phong reflection coefficients.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    /// Ambient coefficient.
    pub ka: f32,
    /// Diffuse coefficient.
    pub kd: f32,
    /// Specular coefficient.
    pub ks: f32,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ka: 1.0,
            kd: 1.0,
            ks: 1.0,
            shininess: 128.0,
        }
    }
}

/// Uniform block consumed by `shaders/mesh.wgsl` (binding 0, group 0).
///
/// Every `vec3` is followed by a scalar so the Rust layout matches WGSL's
/// 16-byte `vec3` alignment without explicit padding fields in between.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub light_color: [f32; 3],
    pub ka: f32,
    pub light_pos: [f32; 3],
    pub kd: f32,
    pub view_pos: [f32; 3],
    pub ks: f32,
    pub shininess: f32,
    pub _pad: [f32; 3],
}

impl SceneUniforms {
    pub fn new(model: Mat4, camera: &Camera, light: &Light, material: &Material, aspect: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            view: camera.view().to_cols_array_2d(),
            projection: camera.projection(aspect).to_cols_array_2d(),
            normal_matrix: normal_matrix(model).to_cols_array_2d(),
            light_color: light.color.to_array(),
            ka: material.ka,
            light_pos: light.position.to_array(),
            kd: material.kd,
            view_pos: camera.eye.to_array(),
            ks: material.ks,
            shininess: material.shininess,
            _pad: [0.0; 3],
        }
    }
}

/// `transpose(inverse(model))` with the translation dropped.
pub fn normal_matrix(model: Mat4) -> Mat4 {
    Mat4::from_mat3(glam::Mat3::from_mat4(model).inverse().transpose())
}

/// Rotation of `angle` radians about `axis` (normalized here).
///
/// A zero axis yields the identity.
pub fn spin(axis: Vec3, angle: f32) -> Mat4 {
    match axis.try_normalize() {
        Some(axis) => Mat4::from_axis_angle(axis, angle),
        None => Mat4::IDENTITY,
    }
}
