use crate::{Line, LineSegments, ObjectId, Scene, SceneObject};

/// A view drawing line segments into a [`Scene`].
pub trait LineView {
    /// Draw the lines, replacing previously drawn ones.
    fn draw(&mut self, scene: &mut Scene, lines: &[Line]);
}

/// The default [`LineView`], backed by [`LineSegments`] in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegmentsView {
    id: ObjectId,
}

impl LineSegmentsView {
    /// Create a new line view, adding an empty batch of segments to the scene.
    pub fn new(scene: &mut Scene) -> Self {
        let id = scene.add(SceneObject::Lines(LineSegments::default()));
        Self { id }
    }

    /// Get the ID of the segments in the scene.
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl LineView for LineSegmentsView {
    fn draw(&mut self, scene: &mut Scene, lines: &[Line]) {
        let Some(segments) = scene.lines_mut(self.id) else {
            log::error!("Line segments {:?} not found in scene", self.id);
            return;
        };

        segments.lines = lines.to_vec();
        segments.version += 1;

        log::debug!("Drew {} lines", lines.len());
    }
}
