use std::ops::Range;

use crate::{Color, ColorValue, Error, normalize_color};

/// The camera options.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraOptions {
    /// The vertical FOV in radians.
    pub vertical_fov: f32,
    /// The z range.
    pub z: Range<f32>,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            vertical_fov: 45f32.to_radians(),
            z: 1.0..20000.0,
        }
    }
}

/// The session options.
///
/// Start from [`Options::default`] and override with the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// The clear color of the render surface.
    pub clear_color: Color,
    /// The camera options.
    pub camera: CameraOptions,
    /// The movement speed of the input controller.
    pub movement_speed: f32,
    /// The roll speed of the input controller.
    pub roll_speed: f32,
    /// Only look around while the pointer button is held.
    pub drag_to_look: bool,
    /// The time step the input controller advances by on every frame.
    ///
    /// This is not the real elapsed time, navigation speed scales with the frame rate.
    pub input_time_step: f32,
    /// The color of points that are not highlighted.
    pub particle_color: Color,
    /// The size of points in pixels.
    pub particle_size: f32,
    /// The pick radius of the hit tester in pixels.
    pub hit_radius: f32,
}

impl Options {
    /// The default input time step.
    pub const DEFAULT_INPUT_TIME_STEP: f32 = 0.1;

    /// Set the clear color.
    ///
    /// An invalid color keeps the current one.
    pub fn with_clear_color(mut self, color: impl Into<ColorValue>) -> Self {
        let value = color.into();
        match normalize_color(value.clone()) {
            Some(color) => self.clear_color = color,
            None => log::warn!("Ignoring invalid clear color {value:?}"),
        }
        self
    }

    /// Set the camera options.
    pub fn with_camera(mut self, camera: CameraOptions) -> Self {
        self.camera = camera;
        self
    }

    /// Set the movement speed.
    pub fn with_movement_speed(mut self, speed: f32) -> Self {
        self.movement_speed = speed;
        self
    }

    /// Set the roll speed.
    pub fn with_roll_speed(mut self, speed: f32) -> Self {
        self.roll_speed = speed;
        self
    }

    /// Set whether looking around requires holding the pointer button.
    pub fn with_drag_to_look(mut self, drag_to_look: bool) -> Self {
        self.drag_to_look = drag_to_look;
        self
    }

    /// Set the input time step.
    pub fn with_input_time_step(mut self, step: f32) -> Self {
        self.input_time_step = step;
        self
    }

    /// Set the particle color.
    ///
    /// An invalid color keeps the current one.
    pub fn with_particle_color(mut self, color: impl Into<ColorValue>) -> Self {
        let value = color.into();
        match normalize_color(value.clone()) {
            Some(color) => self.particle_color = color,
            None => log::warn!("Ignoring invalid particle color {value:?}"),
        }
        self
    }

    /// Set the particle size.
    pub fn with_particle_size(mut self, size: f32) -> Self {
        self.particle_size = size;
        self
    }

    /// Set the hit radius.
    pub fn with_hit_radius(mut self, radius: f32) -> Self {
        self.hit_radius = radius;
        self
    }

    /// Validate the options.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |name: &'static str, reason: &str| -> Result<(), Error> {
            Err(Error::InvalidOption {
                name,
                reason: reason.to_owned(),
            })
        };

        let fov = self.camera.vertical_fov;
        if !(fov.is_finite() && fov > 0.0 && fov < std::f32::consts::PI) {
            return invalid("camera.vertical_fov", "must be in (0, π)");
        }

        let z = &self.camera.z;
        if !(z.start.is_finite() && z.end.is_finite() && z.start > 0.0 && z.start < z.end) {
            return invalid("camera.z", "must satisfy 0 < near < far");
        }

        if !(self.input_time_step.is_finite() && self.input_time_step >= 0.0) {
            return invalid("input_time_step", "must be finite and non-negative");
        }

        for (name, speed) in [
            ("movement_speed", self.movement_speed),
            ("roll_speed", self.roll_speed),
        ] {
            if !speed.is_finite() {
                return invalid(name, "must be finite");
            }
        }

        if !(self.particle_size.is_finite() && self.particle_size > 0.0) {
            return invalid("particle_size", "must be finite and positive");
        }

        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return invalid("hit_radius", "must be finite and non-negative");
        }

        Ok(())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            clear_color: Color::BLACK,
            camera: CameraOptions::default(),
            movement_speed: 200.0,
            roll_speed: 0.2,
            drag_to_look: false,
            input_time_step: Self::DEFAULT_INPUT_TIME_STEP,
            particle_color: Color::WHITE,
            particle_size: 15.0,
            hit_radius: 10.0,
        }
    }
}
