use std::collections::HashMap;

use glam::*;

use crate::{
    CameraBuffer, Color, Error, GeometryBuffer, LineVertexPod, ObjectId,
    PerspectiveCamera, PointInstancePod, Renderer, Scene, SceneObject, SurfaceId, shader,
};

/// The offscreen texture a [`WgpuRenderer`] renders into.
#[derive(Debug)]
pub struct RenderTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl RenderTarget {
    /// The usages of the texture.
    pub const USAGES: wgpu::TextureUsages = wgpu::TextureUsages::RENDER_ATTACHMENT
        .union(wgpu::TextureUsages::TEXTURE_BINDING)
        .union(wgpu::TextureUsages::COPY_SRC);

    /// Create a new render target.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, size: UVec2) -> Self {
        let size = size.max(UVec2::ONE);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Render Target Texture"),
            size: wgpu::Extent3d {
                width: size.x,
                height: size.y,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            view_formats: &[],
            format,
            usage: Self::USAGES,
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self { texture, view }
    }

    /// Get the texture.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Get the view of the texture.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

/// A renderer drawing points and lines with wgpu into an offscreen [`RenderTarget`].
#[derive(Debug)]
pub struct WgpuRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: SurfaceId,
    format: wgpu::TextureFormat,
    size: UVec2,
    target: RenderTarget,
    clear_color: Color,
    clear_alpha: f32,

    camera_buffer: CameraBuffer,
    /// The bind group layout.
    #[allow(dead_code)]
    bind_group_layout: wgpu::BindGroupLayout,
    /// The bind group.
    bind_group: wgpu::BindGroup,
    points_pipeline: wgpu::RenderPipeline,
    lines_pipeline: wgpu::RenderPipeline,

    point_buffers: HashMap<ObjectId, GeometryBuffer>,
    line_buffers: HashMap<ObjectId, GeometryBuffer>,
}

impl WgpuRenderer {
    /// The bind group layout descriptor.
    pub const BIND_GROUP_LAYOUT_DESCRIPTOR: wgpu::BindGroupLayoutDescriptor<'static> =
        wgpu::BindGroupLayoutDescriptor {
            label: Some("Renderer Bind Group Layout"),
            entries: &[
                // Camera uniform buffer
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        };

    /// Create a new renderer.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        size: UVec2,
    ) -> Self {
        let size = size.max(UVec2::ONE);

        log::debug!("Creating renderer target");
        let target = RenderTarget::new(device, format, size);

        log::debug!("Creating camera buffer");
        let camera_buffer = CameraBuffer::new(device);

        log::debug!("Creating renderer bind group layout");
        let bind_group_layout =
            device.create_bind_group_layout(&Self::BIND_GROUP_LAYOUT_DESCRIPTOR);

        log::debug!("Creating renderer bind group");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Renderer Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                // Camera uniform buffer
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.buffer().as_entire_binding(),
                },
            ],
        });

        log::debug!("Creating renderer pipeline layout");
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Renderer Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            ..Default::default()
        });

        log::debug!("Creating points pipeline");
        let points_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            format,
            "Points",
            shader::points::SOURCE,
            PointInstancePod::LAYOUT,
            wgpu::PrimitiveTopology::TriangleList,
        );

        log::debug!("Creating lines pipeline");
        let lines_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            format,
            "Lines",
            shader::lines::SOURCE,
            LineVertexPod::LAYOUT,
            wgpu::PrimitiveTopology::LineList,
        );

        log::info!("Renderer created");

        Self {
            device: device.clone(),
            queue: queue.clone(),
            surface: SurfaceId::next(),
            format,
            size,
            target,
            clear_color: Color::BLACK,
            clear_alpha: 1.0,

            camera_buffer,
            bind_group_layout,
            bind_group,
            points_pipeline,
            lines_pipeline,

            point_buffers: HashMap::new(),
            line_buffers: HashMap::new(),
        }
    }

    /// Get the render target.
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Get the texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        name: &str,
        source: &str,
        buffer: wgpu::VertexBufferLayout<'static>,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{name} Shader")),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{name} Pipeline")),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vert_main"),
                buffers: &[buffer],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("frag_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    /// Upload changed scene geometry and drop buffers of removed objects.
    fn sync_geometry(&mut self, scene: &Scene) {
        for (id, object) in scene.iter() {
            match object {
                SceneObject::Points(points) => {
                    self.point_buffers.entry(id).or_default().sync(
                        &self.device,
                        "Point Instances Buffer",
                        points.version,
                        || PointInstancePod::from_points(points),
                    );
                }
                SceneObject::Lines(lines) => {
                    self.line_buffers.entry(id).or_default().sync(
                        &self.device,
                        "Line Vertices Buffer",
                        lines.version,
                        || LineVertexPod::from_lines(&lines.lines),
                    );
                }
                SceneObject::Camera => {}
            }
        }

        self.point_buffers.retain(|id, _| scene.get(*id).is_some());
        self.line_buffers.retain(|id, _| scene.get(*id).is_some());
    }
}

impl Renderer for WgpuRenderer {
    fn surface(&self) -> SurfaceId {
        self.surface
    }

    fn size(&self) -> UVec2 {
        self.size
    }

    fn set_size(&mut self, size: UVec2) {
        let size = size.max(UVec2::ONE);
        if size == self.size {
            return;
        }

        log::debug!("Resizing render target to {size}");
        self.size = size;
        self.target = RenderTarget::new(&self.device, self.format, size);
    }

    fn clear_color(&self) -> Color {
        self.clear_color
    }

    fn set_clear_color(&mut self, color: Color, alpha: f32) {
        self.clear_color = color;
        self.clear_alpha = alpha;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), Error> {
        self.camera_buffer.update(&self.queue, camera, self.size);

        self.sync_geometry(scene);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Renderer Command Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Renderer Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.target.view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color.to_wgpu(self.clear_alpha)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            pass.set_bind_group(0, &self.bind_group, &[]);

            pass.set_pipeline(&self.lines_pipeline);
            for lines in self.line_buffers.values() {
                if let Some(buffer) = lines.buffer() {
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..lines.count(), 0..1);
                }
            }

            pass.set_pipeline(&self.points_pipeline);
            for points in self.point_buffers.values() {
                if let Some(buffer) = points.buffer() {
                    pass.set_vertex_buffer(0, buffer.slice(..));
                    pass.draw(0..6, 0..points.count());
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }
}
