use glam::*;

use crate::{CameraTrait, Color, Error, PerspectiveCamera, Scene, SceneObject, SurfaceId};

/// A renderer drawing a [`Scene`] onto a render surface.
pub trait Renderer {
    /// The surface inserted into the host container.
    fn surface(&self) -> SurfaceId;

    /// The size of the surface in pixels.
    fn size(&self) -> UVec2;

    /// Resize the surface.
    fn set_size(&mut self, size: UVec2);

    /// The clear color.
    fn clear_color(&self) -> Color;

    /// Set the clear color and alpha.
    fn set_clear_color(&mut self, color: Color, alpha: f32);

    /// Render the scene through the camera.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), Error>;
}

/// Statistics of the last frame rendered by [`HeadlessRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// The number of points drawn.
    pub points: usize,
    /// The number of line segments drawn.
    pub lines: usize,
    /// The view projection matrix used.
    pub view_projection: Mat4,
}

/// A renderer without a GPU.
///
/// Records what would have been drawn.
#[derive(Debug)]
pub struct HeadlessRenderer {
    surface: SurfaceId,
    size: UVec2,
    clear_color: Color,
    clear_alpha: f32,
    frames: u64,
    last_frame: Option<FrameStats>,
}

impl HeadlessRenderer {
    /// Create a new headless renderer.
    pub fn new(size: UVec2) -> Self {
        Self {
            surface: SurfaceId::next(),
            size: size.max(UVec2::ONE),
            clear_color: Color::BLACK,
            clear_alpha: 1.0,
            frames: 0,
            last_frame: None,
        }
    }

    /// Get the clear alpha.
    pub fn clear_alpha(&self) -> f32 {
        self.clear_alpha
    }

    /// Get the number of frames rendered.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Get the statistics of the last frame.
    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last_frame.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn surface(&self) -> SurfaceId {
        self.surface
    }

    fn size(&self) -> UVec2 {
        self.size
    }

    fn set_size(&mut self, size: UVec2) {
        self.size = size.max(UVec2::ONE);
    }

    fn clear_color(&self) -> Color {
        self.clear_color
    }

    fn set_clear_color(&mut self, color: Color, alpha: f32) {
        self.clear_color = color;
        self.clear_alpha = alpha;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), Error> {
        let mut stats = FrameStats {
            view_projection: camera.projection_matrix() * camera.view(),
            ..Default::default()
        };

        for (_, object) in scene.iter() {
            match object {
                SceneObject::Points(points) => stats.points += points.len(),
                SceneObject::Lines(lines) => stats.lines += lines.lines.len(),
                SceneObject::Camera => {}
            }
        }

        log::trace!(
            "Headless frame {}: {} points, {} lines",
            self.frames,
            stats.points,
            stats.lines
        );

        self.frames += 1;
        self.last_frame = Some(stats);
        Ok(())
    }
}
