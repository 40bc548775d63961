use glam::*;

use crate::{Color, ObjectId, PointCloud, Scene, SceneObject};

/// A view rendering coordinates as points into a [`Scene`].
pub trait PointView {
    /// Replace the rendered points.
    fn render(&mut self, scene: &mut Scene, coordinates: Vec<Vec3>);

    /// Get the rendered coordinates.
    fn coordinates<'a>(&self, scene: &'a Scene) -> &'a [Vec3];

    /// Highlight points by index.
    fn highlight(&mut self, scene: &mut Scene, indexes: &[usize], color: Color, scale: f32);
}

/// The default [`PointView`], backed by a [`PointCloud`] in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleView {
    id: ObjectId,
}

impl ParticleView {
    /// Create a new particle view, adding an empty point cloud to the scene.
    pub fn new(scene: &mut Scene, color: Color, size: f32) -> Self {
        let id = scene.add(SceneObject::Points(PointCloud::new(color, size)));
        Self { id }
    }

    /// Get the ID of the point cloud in the scene.
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl PointView for ParticleView {
    fn render(&mut self, scene: &mut Scene, coordinates: Vec<Vec3>) {
        let Some(points) = scene.points_mut(self.id) else {
            log::error!("Point cloud {:?} not found in scene", self.id);
            return;
        };

        let count = coordinates.len();
        points.positions = coordinates;
        points.colors = vec![points.base_color; count];
        points.sizes = vec![points.base_size; count];
        points.version += 1;

        log::debug!("Rendered {count} particles");
    }

    fn coordinates<'a>(&self, scene: &'a Scene) -> &'a [Vec3] {
        scene
            .points(self.id)
            .map(|points| points.positions.as_slice())
            .unwrap_or_default()
    }

    fn highlight(&mut self, scene: &mut Scene, indexes: &[usize], color: Color, scale: f32) {
        let Some(points) = scene.points_mut(self.id) else {
            log::error!("Point cloud {:?} not found in scene", self.id);
            return;
        };

        let size = points.base_size * scale;
        let mut skipped = 0;
        for &index in indexes {
            match (points.colors.get_mut(index), points.sizes.get_mut(index)) {
                (Some(c), Some(s)) => {
                    *c = color;
                    *s = size;
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            log::warn!(
                "Skipped {skipped} highlight indexes out of range, {} particles rendered",
                points.len()
            );
        }

        points.version += 1;
    }
}
