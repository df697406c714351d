//! Orbit camera controller: pan/zoom/rotate around the origin, constrained
//! to the scene's camera distance limits.

use glam::{Quat, Vec2, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use helios_render::Camera;
use helios_scene::CameraLimits;

/// Radians of yaw/pitch per pixel of pointer drag.
const ROTATE_SPEED: f32 = 0.005;

/// Distance multiplier per scroll line (zoom out per line scrolled down).
const ZOOM_STEP: f64 = 1.1;

/// Pitch limit keeping the camera off the poles, in radians.
const MAX_PITCH: f32 = 1.54;

/// Spherical-coordinate orbit controller around the scene origin.
///
/// Left-drag rotates, scroll zooms. Distance is clamped into the scene's
/// [`CameraLimits`] at every mutation, and [`update`](Self::update) must be
/// invoked once per animation tick before drawing.
pub struct OrbitController {
    limits: CameraLimits,
    yaw: f32,
    pitch: f32,
    distance: f64,
    dragging: bool,
    cursor: Option<Vec2>,
}

impl OrbitController {
    /// Create a controller at the given starting distance (clamped).
    pub fn new(limits: CameraLimits, start_distance: f64) -> Self {
        Self {
            limits,
            yaw: 0.0,
            pitch: 0.0,
            distance: limits.clamp(start_distance),
            dragging: false,
            cursor: None,
        }
    }

    /// Current distance from the origin.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Set the distance directly; clamped into the limits.
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = self.limits.clamp(distance);
    }

    /// Process a mouse button press/release.
    pub fn on_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.dragging = state.is_pressed();
        }
    }

    /// Process a cursor move; rotates while the left button is held.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if self.dragging
            && let Some(previous) = self.cursor
        {
            let delta = position - previous;
            self.yaw -= delta.x * ROTATE_SPEED;
            self.pitch = (self.pitch - delta.y * ROTATE_SPEED).clamp(-MAX_PITCH, MAX_PITCH);
        }
        self.cursor = Some(position);
    }

    /// Process a scroll-wheel event; zooms toward/away from the origin.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y as f64,
            MouseScrollDelta::PixelDelta(pos) => pos.y / 40.0,
        };
        self.set_distance(self.distance * ZOOM_STEP.powf(-lines));
    }

    /// Place the camera on its orbit sphere, looking at the origin.
    pub fn update(&self, camera: &mut Camera) {
        let rotation = Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        camera.rotation = rotation;
        camera.position = rotation * Vec3::new(0.0, 0.0, self.distance as f32);
    }
}
