//! WGSL shader sources of the `wgpu-particle-viewer` renderer.
//!
//! See the documentation of each module for details.

pub mod points {
    #[doc = concat!("```wgsl\n", include_str!("shader/points.wgsl"), "\n```")]
    pub const SOURCE: &str = include_str!("shader/points.wgsl");
}

pub mod lines {
    #[doc = concat!("```wgsl\n", include_str!("shader/lines.wgsl"), "\n```")]
    pub const SOURCE: &str = include_str!("shader/lines.wgsl");
}
