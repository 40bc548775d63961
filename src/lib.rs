mod buffer;
mod camera;
mod color;
mod components;
mod error;
mod gpu_renderer;
mod headless;
mod host;
mod input;
mod line_view;
mod options;
mod particle_view;
mod renderer;
mod scene;

pub mod shader;

use glam::*;

pub use buffer::*;
pub use camera::*;
pub use color::*;
pub use components::*;
pub use error::*;
pub use gpu_renderer::*;
pub use headless::*;
pub use hit_test::*;
pub use host::*;
pub use input::*;
pub use line_view::*;
pub use options::*;
pub use particle_view::*;
pub use renderer::*;
pub use scene::*;

pub use glam;
pub use wgpu;

use host::Subscriptions;

/// Create a session with the default [`HeadlessComponents`].
pub fn create<H: Host>(host: H, options: Options) -> Result<Session<H>, Error> {
    Session::new(host, options)
}

/// The state of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameLoopState {
    /// A frame is scheduled.
    Scheduled,
    /// The session is destroyed.
    Stopped,
}

/// An interactive point cloud and line viewing session.
///
/// The session renders into a surface inserted into the host container and drives its frame
/// loop from [`HostEvent`]s delivered to [`Session::handle_event`].
pub struct Session<H: Host, C: Components = HeadlessComponents> {
    host: H,
    components: C,
    options: Options,

    scene: Scene,
    camera: PerspectiveCamera,
    renderer: C::Renderer,
    particle_view: C::PointView,
    line_view: C::LineView,
    input: C::Input,
    hit_test: C::HitTester,

    subscriptions: Subscriptions,
    state: FrameLoopState,
}

impl<H: Host> Session<H> {
    /// Create a new session with the default [`HeadlessComponents`].
    pub fn new(host: H, options: Options) -> Result<Self, Error> {
        Self::with_components(host, options, HeadlessComponents)
    }
}

impl<H: Host, C: Components> Session<H, C> {
    /// The fallback color of [`Session::highlight`].
    pub const DEFAULT_HIGHLIGHT_COLOR: Color = Color::RED;

    /// The fallback scale of [`Session::highlight`].
    pub const DEFAULT_HIGHLIGHT_SCALE: f32 = 1.0;

    /// Create a new session.
    ///
    /// Inserts the render surface into the container, registers the resize listener and
    /// schedules the first frame.
    pub fn with_components(
        mut host: H,
        options: Options,
        mut components: C,
    ) -> Result<Self, Error> {
        options.validate()?;

        let size = host.client_size().max(UVec2::ONE);

        log::debug!("Creating scene");
        let mut scene = Scene::new();

        log::debug!("Creating camera");
        let camera = PerspectiveCamera::new(
            options.camera.vertical_fov,
            size.x as f32 / size.y as f32,
            options.camera.z.clone(),
        );
        scene.add(SceneObject::Camera);

        log::debug!("Creating renderer");
        let mut renderer = components.create_renderer(&options, size)?;
        renderer.set_clear_color(options.clear_color, 1.0);
        renderer.set_size(size);

        log::debug!("Creating particle view");
        let particle_view = components.create_point_view(&options, &mut scene)?;

        log::debug!("Creating line view");
        let line_view = components.create_line_view(&options, &mut scene)?;

        log::debug!("Creating input controller");
        let input = components.create_input(&options)?;

        log::debug!("Creating hit tester");
        let hit_test = components.create_hit_tester(
            &options,
            particle_view.coordinates(&scene),
            host.client_size(),
        )?;

        host.append_child(renderer.surface());
        let subscriptions = Subscriptions::acquire(&mut host);

        log::info!("Session created");

        Ok(Self {
            host,
            components,
            options,

            scene,
            camera,
            renderer,
            particle_view,
            line_view,
            input,
            hit_test,

            subscriptions,
            state: FrameLoopState::Scheduled,
        })
    }

    /// Check if a host signal is addressed to this session's live subscriptions.
    pub fn accepts(&self, event: &HostEvent) -> bool {
        self.is_alive()
            && match *event {
                HostEvent::Frame(handle) => self.subscriptions.owns_frame(handle),
                HostEvent::Resize(id) => self.subscriptions.owns_listener(id),
            }
    }

    /// Deliver a host signal.
    ///
    /// Signals not addressed to this session's live subscriptions are ignored.
    pub fn handle_event(&mut self, event: HostEvent) -> Result<(), Error> {
        match event {
            HostEvent::Frame(handle) => {
                if !self.is_alive() || !self.subscriptions.take_frame(handle) {
                    log::trace!("Ignoring stale frame {handle:?}");
                    return Ok(());
                }
                self.frame()
            }
            HostEvent::Resize(id) => {
                if !self.is_alive() || !self.subscriptions.owns_listener(id) {
                    log::trace!("Ignoring resize for listener {id:?}");
                    return Ok(());
                }
                self.resize();
                Ok(())
            }
        }
    }

    /// Run one frame.
    ///
    /// The next frame is scheduled even if rendering fails.
    fn frame(&mut self) -> Result<(), Error> {
        let rendered = self.renderer.render(&self.scene, &self.camera);

        if rendered.is_ok() {
            self.hit_test
                .update(&self.scene, &self.camera, self.renderer.size());
            self.input
                .update(&mut self.camera, self.options.input_time_step);
        }

        self.subscriptions.schedule_frame(&mut self.host);
        rendered
    }

    /// Synchronize the camera and renderer with the container size.
    fn resize(&mut self) {
        let size = self.host.client_size();
        if size.x == 0 || size.y == 0 {
            log::warn!("Ignoring resize to zero-sized container {size}");
            return;
        }

        self.camera.aspect = size.x as f32 / size.y as f32;
        self.camera.update_projection_matrix();
        self.renderer.set_size(size);

        log::debug!("Resized to {size}");
    }

    /// Replace the rendered particles and recreate the hit tester.
    pub fn set_particles<P: Into<Vec3>>(
        &mut self,
        coordinates: impl IntoIterator<Item = P>,
    ) -> Result<&mut Self, Error> {
        self.ensure_alive()?;

        let coordinates = coordinates.into_iter().map(Into::into).collect();
        self.particle_view.render(&mut self.scene, coordinates);

        self.hit_test.destroy();
        self.hit_test = self.components.create_hit_tester(
            &self.options,
            self.particle_view.coordinates(&self.scene),
            self.host.client_size(),
        )?;

        Ok(self)
    }

    /// Get the rendered particles.
    pub fn particles(&self) -> &[Vec3] {
        self.particle_view.coordinates(&self.scene)
    }

    /// Highlight particles by index.
    ///
    /// An invalid `color` falls back to [`Session::DEFAULT_HIGHLIGHT_COLOR`], a missing or
    /// non-finite `scale` falls back to [`Session::DEFAULT_HIGHLIGHT_SCALE`].
    pub fn highlight(
        &mut self,
        indexes: &[usize],
        color: impl Into<ColorValue>,
        scale: impl Into<Option<f32>>,
    ) -> Result<(), Error> {
        self.ensure_alive()?;

        let color = normalize_color(color).unwrap_or(Self::DEFAULT_HIGHLIGHT_COLOR);
        let scale = scale
            .into()
            .filter(|s| s.is_finite())
            .unwrap_or(Self::DEFAULT_HIGHLIGHT_SCALE);

        self.particle_view
            .highlight(&mut self.scene, indexes, color, scale);
        Ok(())
    }

    /// Draw line segments.
    pub fn lines(&mut self, lines: &[Line]) -> Result<(), Error> {
        self.ensure_alive()?;

        self.line_view.draw(&mut self.scene, lines);
        Ok(())
    }

    /// Tear down the session.
    ///
    /// Destroys the hit tester and the input controller, unregisters the resize listener,
    /// cancels the scheduled frame and removes the render surface from the container.
    pub fn destroy(&mut self) -> Result<(), Error> {
        self.ensure_alive()?;
        self.state = FrameLoopState::Stopped;

        self.hit_test.destroy();
        self.input.destroy();
        self.subscriptions.release(&mut self.host);

        let surface = self.renderer.surface();
        if !self.host.remove_child(surface) {
            log::warn!("Render surface {surface:?} was not attached to the container");
        }

        log::info!("Session destroyed");
        Ok(())
    }

    /// Check if the session is not destroyed.
    pub fn is_alive(&self) -> bool {
        self.state == FrameLoopState::Scheduled && !self.subscriptions.is_released()
    }

    /// Get the state of the frame loop.
    pub fn state(&self) -> FrameLoopState {
        self.state
    }

    /// Get the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Get the camera.
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Get the camera mutably.
    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    /// Get the renderer.
    pub fn renderer(&self) -> &C::Renderer {
        &self.renderer
    }

    /// Get the input controller.
    pub fn input(&self) -> &C::Input {
        &self.input
    }

    /// Get the input controller mutably, e.g. to route keyboard and pointer input.
    pub fn input_mut(&mut self) -> &mut C::Input {
        &mut self.input
    }

    /// Get the current hit tester.
    pub fn hit_test(&self) -> &C::HitTester {
        &self.hit_test
    }

    /// Get the current hit tester mutably, e.g. to route pointer input.
    pub fn hit_test_mut(&mut self) -> &mut C::HitTester {
        &mut self.hit_test
    }

    /// Get the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn ensure_alive(&self) -> Result<(), Error> {
        if self.is_alive() {
            Ok(())
        } else {
            Err(Error::SessionDestroyed)
        }
    }
}

impl<H: Host, C: Components> Drop for Session<H, C> {
    fn drop(&mut self) {
        if self.is_alive() {
            log::debug!("Destroying session on drop");
            let _ = self.destroy();
        }
    }
}

impl<H: Host + std::fmt::Debug, C: Components> std::fmt::Debug for Session<H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("host", &self.host)
            .field("options", &self.options)
            .field("scene", &self.scene)
            .field("camera", &self.camera)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
