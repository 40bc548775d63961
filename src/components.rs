use glam::*;

use crate::{
    Error, FlyControls, HeadlessRenderer, HitTester, InputController, LineSegmentsView, LineView,
    Options, ParticleView, PointHitTester, PointView, Renderer, Scene, WgpuRenderer,
};

/// The factory of the collaborators composed by a [`Session`](crate::Session).
///
/// Every constructor may fail, failures propagate out of session construction unchanged.
pub trait Components {
    type Renderer: Renderer;
    type PointView: PointView;
    type LineView: LineView;
    type Input: InputController;
    type HitTester: HitTester;

    /// Create the renderer with a surface of the given size.
    fn create_renderer(&mut self, options: &Options, size: UVec2) -> Result<Self::Renderer, Error>;

    /// Create the point view.
    fn create_point_view(
        &mut self,
        options: &Options,
        scene: &mut Scene,
    ) -> Result<Self::PointView, Error>;

    /// Create the line view.
    fn create_line_view(
        &mut self,
        options: &Options,
        scene: &mut Scene,
    ) -> Result<Self::LineView, Error>;

    /// Create the input controller.
    fn create_input(&mut self, options: &Options) -> Result<Self::Input, Error>;

    /// Create a hit tester bound to the given coordinates.
    fn create_hit_tester(
        &mut self,
        options: &Options,
        coordinates: &[Vec3],
        container_size: UVec2,
    ) -> Result<Self::HitTester, Error>;
}

fn fly_controls(options: &Options) -> FlyControls {
    let mut controls = FlyControls::new(options.movement_speed, options.roll_speed);
    controls.drag_to_look = options.drag_to_look;
    controls
}

/// The default components, rendering with [`HeadlessRenderer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessComponents;

impl Components for HeadlessComponents {
    type Renderer = HeadlessRenderer;
    type PointView = ParticleView;
    type LineView = LineSegmentsView;
    type Input = FlyControls;
    type HitTester = PointHitTester;

    fn create_renderer(
        &mut self,
        _options: &Options,
        size: UVec2,
    ) -> Result<Self::Renderer, Error> {
        Ok(HeadlessRenderer::new(size))
    }

    fn create_point_view(
        &mut self,
        options: &Options,
        scene: &mut Scene,
    ) -> Result<Self::PointView, Error> {
        Ok(ParticleView::new(
            scene,
            options.particle_color,
            options.particle_size,
        ))
    }

    fn create_line_view(
        &mut self,
        _options: &Options,
        scene: &mut Scene,
    ) -> Result<Self::LineView, Error> {
        Ok(LineSegmentsView::new(scene))
    }

    fn create_input(&mut self, options: &Options) -> Result<Self::Input, Error> {
        Ok(fly_controls(options))
    }

    fn create_hit_tester(
        &mut self,
        options: &Options,
        coordinates: &[Vec3],
        container_size: UVec2,
    ) -> Result<Self::HitTester, Error> {
        Ok(PointHitTester::new(
            coordinates,
            container_size,
            options.hit_radius,
        ))
    }
}

/// The components rendering with [`WgpuRenderer`].
#[derive(Debug, Clone)]
pub struct WgpuComponents {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub format: wgpu::TextureFormat,
}

impl WgpuComponents {
    /// Create new wgpu components.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            queue,
            format,
        }
    }
}

impl Components for WgpuComponents {
    type Renderer = WgpuRenderer;
    type PointView = ParticleView;
    type LineView = LineSegmentsView;
    type Input = FlyControls;
    type HitTester = PointHitTester;

    fn create_renderer(
        &mut self,
        _options: &Options,
        size: UVec2,
    ) -> Result<Self::Renderer, Error> {
        Ok(WgpuRenderer::new(
            &self.device,
            &self.queue,
            self.format,
            size,
        ))
    }

    fn create_point_view(
        &mut self,
        options: &Options,
        scene: &mut Scene,
    ) -> Result<Self::PointView, Error> {
        HeadlessComponents.create_point_view(options, scene)
    }

    fn create_line_view(
        &mut self,
        options: &Options,
        scene: &mut Scene,
    ) -> Result<Self::LineView, Error> {
        HeadlessComponents.create_line_view(options, scene)
    }

    fn create_input(&mut self, options: &Options) -> Result<Self::Input, Error> {
        Ok(fly_controls(options))
    }

    fn create_hit_tester(
        &mut self,
        options: &Options,
        coordinates: &[Vec3],
        container_size: UVec2,
    ) -> Result<Self::HitTester, Error> {
        HeadlessComponents.create_hit_tester(options, coordinates, container_size)
    }
}
