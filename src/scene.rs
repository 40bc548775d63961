use glam::*;

use crate::Color;

/// The ID of an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

/// A point cloud in a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    /// The positions.
    pub positions: Vec<Vec3>,
    /// The color of each point.
    pub colors: Vec<Color>,
    /// The size of each point, in pixels.
    pub sizes: Vec<f32>,
    /// The color of points that are not highlighted.
    pub base_color: Color,
    /// The size of points that are not highlighted.
    pub base_size: f32,
    /// Incremented on every modification.
    pub version: u64,
}

impl PointCloud {
    /// Create a new empty point cloud.
    pub fn new(base_color: Color, base_size: f32) -> Self {
        Self {
            positions: Vec::new(),
            colors: Vec::new(),
            sizes: Vec::new(),
            base_color,
            base_size,
            version: 0,
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check if there is no point.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

impl Line {
    /// Create a new white line.
    pub fn new(from: impl Into<Vec3>, to: impl Into<Vec3>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            color: Color::WHITE,
        }
    }

    /// Set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A batch of line segments in a [`Scene`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSegments {
    /// The segments.
    pub lines: Vec<Line>,
    /// Incremented on every modification.
    pub version: u64,
}

/// An object in a [`Scene`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    /// Marks that the camera is part of the scene.
    Camera,
    /// A point cloud.
    Points(PointCloud),
    /// A batch of line segments.
    Lines(LineSegments),
}

/// The scene graph.
///
/// Objects are kept in insertion order.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Whether objects should be sorted before rendering.
    pub sort_objects: bool,
    objects: Vec<(ObjectId, SceneObject)>,
    next_id: u32,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            sort_objects: false,
            objects: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an object.
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.push((id, object));
        id
    }

    /// Remove an object.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.objects.iter().position(|(i, _)| *i == id)?;
        Some(self.objects.remove(index).1)
    }

    /// Get an object.
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find_map(|(i, object)| (*i == id).then_some(object))
    }

    /// Get an object mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find_map(|(i, object)| (*i == id).then_some(object))
    }

    /// Get a point cloud.
    pub fn points(&self, id: ObjectId) -> Option<&PointCloud> {
        match self.get(id)? {
            SceneObject::Points(points) => Some(points),
            _ => None,
        }
    }

    /// Get a point cloud mutably.
    pub fn points_mut(&mut self, id: ObjectId) -> Option<&mut PointCloud> {
        match self.get_mut(id)? {
            SceneObject::Points(points) => Some(points),
            _ => None,
        }
    }

    /// Get a batch of line segments.
    pub fn lines(&self, id: ObjectId) -> Option<&LineSegments> {
        match self.get(id)? {
            SceneObject::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// Get a batch of line segments mutably.
    pub fn lines_mut(&mut self, id: ObjectId) -> Option<&mut LineSegments> {
        match self.get_mut(id)? {
            SceneObject::Lines(lines) => Some(lines),
            _ => None,
        }
    }

    /// Check if the camera has been added.
    pub fn contains_camera(&self) -> bool {
        self.objects
            .iter()
            .any(|(_, object)| matches!(object, SceneObject::Camera))
    }

    /// Iterate over the objects.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no object.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
