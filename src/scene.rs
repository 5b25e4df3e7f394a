//! Scene and camera value types
//!
//! A renderer consuming the simulation only needs an active camera: its
//! transform and projection. These types carry that, nothing more.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::Vector;

/// Transform of anything placed in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub position: Vec3,
    /// Facing direction (need not be normalized)
    pub direction: Vec3,
    /// Accumulated rotation per axis (radians)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::NEG_Z,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Actor {
    pub fn translate(&mut self, translation: Vec3) -> &mut Self {
        self.position += translation;
        self
    }

    /// Rotate by `angle` radians around a normalized `axis`
    pub fn rotate(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.rotation += axis * angle;
        self
    }

    /// Move to a simulation position
    pub fn place_at(&mut self, position: Vector) -> &mut Self {
        self.position = position.as_vec3();
        self
    }

    /// Model matrix: scale, then rotation (XYZ euler), then translation
    pub fn model(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// Perspective projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub projection: Mat4,
}

impl Viewport {
    /// `fov` in degrees
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Mat4::perspective_rh_gl(fov.to_radians(), aspect, near, far),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(45.0, 1.0, 0.1, 100.0)
    }
}

/// A viewpoint into the scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub actor: Actor,
    pub viewport: Viewport,
}

impl Camera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            actor: Actor::default(),
            viewport,
        }
    }

    /// Point the camera at a world position
    pub fn look_at(&mut self, target: Vec3) -> &mut Self {
        let direction = target - self.actor.position;
        if direction.length_squared() > 0.0 {
            self.actor.direction = direction;
        }
        self
    }

    pub fn view(&self) -> Mat4 {
        let direction = self.actor.direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        Mat4::look_to_rh(self.actor.position, direction, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.viewport.projection * self.view()
    }

    /// World position to normalized device coordinates
    pub fn project(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }
}

/// Scene-wide state shared with a renderer
#[derive(Debug, Clone, Default)]
pub struct SceneState {
    active_camera: Camera,
}

impl SceneState {
    pub fn set_active_camera(&mut self, camera: Camera) {
        self.active_camera = camera;
    }

    pub fn active_camera(&self) -> &Camera {
        &self.active_camera
    }

    pub fn active_camera_mut(&mut self) -> &mut Camera {
        &mut self.active_camera
    }
}
