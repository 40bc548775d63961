use wgpu::util::DeviceExt;

use crate::{Line, PointCloud};

/// The POD representation of a point instance.
///
/// Fields are stored as arrays because using glam types would add padding
/// according to C alignment rules.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstancePod {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl PointInstancePod {
    /// The vertex attributes.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4];

    /// The vertex buffer layout, stepped per instance.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &Self::ATTRIBUTES,
    };

    /// Collect the instances of a point cloud.
    pub fn from_points(points: &PointCloud) -> Vec<Self> {
        points
            .positions
            .iter()
            .zip(&points.colors)
            .zip(&points.sizes)
            .map(|((pos, color), size)| Self {
                pos: pos.to_array(),
                size: *size,
                color: color.to_vec4(1.0).to_array(),
            })
            .collect()
    }
}

/// The POD representation of a line vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertexPod {
    pub pos: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertexPod {
    /// The vertex attributes.
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    /// The vertex buffer layout.
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &Self::ATTRIBUTES,
    };

    /// Collect the two vertices of every line.
    pub fn from_lines(lines: &[Line]) -> Vec<Self> {
        lines
            .iter()
            .flat_map(|line| {
                let color = line.color.to_vec4(1.0).to_array();
                [
                    Self {
                        pos: line.from.to_array(),
                        color,
                    },
                    Self {
                        pos: line.to.to_array(),
                        color,
                    },
                ]
            })
            .collect()
    }
}

/// A vertex buffer uploaded from versioned scene geometry.
///
/// Re-uploaded only when the version changes.
#[derive(Debug, Default)]
pub struct GeometryBuffer {
    buffer: Option<wgpu::Buffer>,
    count: u32,
    version: Option<u64>,
}

impl GeometryBuffer {
    /// Create a new empty geometry buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the buffer, `None` if nothing has been uploaded.
    pub fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }

    /// Get the number of elements uploaded.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Get the version uploaded.
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    /// Upload the elements if the version differs from the uploaded one.
    pub fn sync<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        version: u64,
        elements: impl FnOnce() -> Vec<T>,
    ) {
        if self.version == Some(version) {
            return;
        }

        let elements = elements();
        log::trace!("Uploading {} elements to {label}", elements.len());

        self.count = elements.len() as u32;
        self.version = Some(version);
        self.buffer = (!elements.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&elements),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
        });
    }
}
