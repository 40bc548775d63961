use glam::*;

use crate::PerspectiveCamera;

/// A controller navigating the camera, advanced once per frame.
pub trait InputController {
    /// Advance the controller.
    fn update(&mut self, camera: &mut PerspectiveCamera, delta_time: f32);

    /// Release the controller, further input is ignored.
    fn destroy(&mut self);
}

/// A navigation key of [`FlyControls`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlyKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct MoveState {
    forward: f32,
    back: f32,
    left: f32,
    right: f32,
    up: f32,
    down: f32,
    pitch_up: f32,
    pitch_down: f32,
    yaw_left: f32,
    yaw_right: f32,
    roll_left: f32,
    roll_right: f32,
}

impl MoveState {
    fn key_mut(&mut self, key: FlyKey) -> &mut f32 {
        match key {
            FlyKey::Forward => &mut self.forward,
            FlyKey::Back => &mut self.back,
            FlyKey::Left => &mut self.left,
            FlyKey::Right => &mut self.right,
            FlyKey::Up => &mut self.up,
            FlyKey::Down => &mut self.down,
            FlyKey::PitchUp => &mut self.pitch_up,
            FlyKey::PitchDown => &mut self.pitch_down,
            FlyKey::YawLeft => &mut self.yaw_left,
            FlyKey::YawRight => &mut self.yaw_right,
            FlyKey::RollLeft => &mut self.roll_left,
            FlyKey::RollRight => &mut self.roll_right,
        }
    }

    fn move_vector(&self) -> Vec3 {
        vec3(
            self.right - self.left,
            self.up - self.down,
            self.back - self.forward,
        )
    }

    fn rotation_vector(&self) -> Vec3 {
        vec3(
            self.pitch_up - self.pitch_down,
            self.yaw_left - self.yaw_right,
            self.roll_left - self.roll_right,
        )
    }
}

/// Free-flight camera navigation.
///
/// Keys translate and roll the camera, the pointer offset from the viewport center
/// steers yaw and pitch.
#[derive(Debug, Clone)]
pub struct FlyControls {
    /// Units travelled per unit of time.
    pub movement_speed: f32,
    /// Radians rotated per unit of time.
    pub roll_speed: f32,
    /// Only steer while the pointer button is held.
    pub drag_to_look: bool,

    keys: MoveState,
    look: Vec2,
    pointer_down: bool,
    destroyed: bool,
}

impl FlyControls {
    /// Create new controls.
    pub fn new(movement_speed: f32, roll_speed: f32) -> Self {
        Self {
            movement_speed,
            roll_speed,
            drag_to_look: false,
            keys: MoveState::default(),
            look: Vec2::ZERO,
            pointer_down: false,
            destroyed: false,
        }
    }

    /// Handle a key press or release.
    pub fn key(&mut self, key: FlyKey, pressed: bool) {
        if self.destroyed {
            return;
        }
        *self.keys.key_mut(key) = if pressed { 1.0 } else { 0.0 };
    }

    /// Handle a pointer button press or release.
    pub fn pointer_button(&mut self, pressed: bool) {
        if self.destroyed {
            return;
        }
        self.pointer_down = pressed;
        if !pressed && self.drag_to_look {
            self.look = Vec2::ZERO;
        }
    }

    /// Handle the pointer moving to `pos` within a viewport of `viewport` pixels.
    pub fn pointer_moved(&mut self, pos: Vec2, viewport: UVec2) {
        if self.destroyed || (self.drag_to_look && !self.pointer_down) {
            return;
        }

        let half = viewport.max(UVec2::ONE).as_vec2() / 2.0;
        self.look = ((pos - half) / half).clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Handle the pointer leaving the viewport.
    pub fn pointer_left(&mut self) {
        self.look = Vec2::ZERO;
    }

    /// Check if the controls were destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn rotation_vector(&self) -> Vec3 {
        self.keys.rotation_vector() + vec3(-self.look.y, -self.look.x, 0.0)
    }
}

impl Default for FlyControls {
    fn default() -> Self {
        Self::new(200.0, 0.2)
    }
}

impl InputController for FlyControls {
    fn update(&mut self, camera: &mut PerspectiveCamera, delta_time: f32) {
        if self.destroyed {
            return;
        }

        let move_mult = delta_time * self.movement_speed;
        let rot_mult = delta_time * self.roll_speed;

        let movement = self.keys.move_vector() * move_mult;
        if movement != Vec3::ZERO {
            camera.translate_local(movement);
        }

        let rotation = self.rotation_vector() * rot_mult;
        if rotation != Vec3::ZERO {
            camera.rotate_local(Quat::from_xyzw(rotation.x, rotation.y, rotation.z, 1.0).normalize());
        }
    }

    fn destroy(&mut self) {
        self.keys = MoveState::default();
        self.look = Vec2::ZERO;
        self.pointer_down = false;
        self.destroyed = true;
        log::debug!("Fly controls destroyed");
    }
}
