mod camera;
mod geometry;

pub use camera::*;
pub use geometry::*;
