use std::sync::atomic::{AtomicU64, Ordering};

use glam::*;

/// The ID of a render surface inserted into a [`Container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Allocate a new unique surface ID.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The handle of a scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// The ID of a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A signal delivered by the host to [`Session::handle_event`](crate::Session::handle_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A scheduled frame is due.
    Frame(FrameHandle),
    /// The window was resized.
    Resize(ListenerId),
}

/// The display region a session renders into.
pub trait Container {
    /// The current client size in pixels.
    fn client_size(&self) -> UVec2;

    /// Insert a render surface.
    fn append_child(&mut self, surface: SurfaceId);

    /// Remove a render surface, returns whether it was present.
    fn remove_child(&mut self, surface: SurfaceId) -> bool;
}

/// The "next visual frame" scheduling primitive.
pub trait FrameScheduler {
    /// Request a frame, the host later delivers [`HostEvent::Frame`] with the returned handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a requested frame.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// The source of window resize signals.
pub trait ResizeSignals {
    /// Register a listener, the host later delivers [`HostEvent::Resize`] with the returned ID.
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Unregister a listener.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// The host environment of a session.
pub trait Host: Container + FrameScheduler + ResizeSignals {}

impl<T: Container + FrameScheduler + ResizeSignals> Host for T {}

/// The host subscriptions of a session.
///
/// Acquired once and released at most once.
#[derive(Debug)]
pub(crate) struct Subscriptions {
    resize: Option<ListenerId>,
    frame: Option<FrameHandle>,
    released: bool,
}

impl Subscriptions {
    /// Register the resize listener and schedule the first frame.
    pub fn acquire(host: &mut impl Host) -> Self {
        let resize = host.add_resize_listener();
        let frame = host.request_frame();
        log::debug!("Subscribed resize listener {resize:?}, first frame {frame:?}");

        Self {
            resize: Some(resize),
            frame: Some(frame),
            released: false,
        }
    }

    /// Consume the pending frame if it matches the handle.
    pub fn take_frame(&mut self, handle: FrameHandle) -> bool {
        if self.frame == Some(handle) {
            self.frame = None;
            true
        } else {
            false
        }
    }

    /// Schedule the next frame.
    pub fn schedule_frame(&mut self, host: &mut impl Host) {
        if self.released {
            return;
        }
        if let Some(stale) = self.frame.take() {
            host.cancel_frame(stale);
        }
        self.frame = Some(host.request_frame());
    }

    /// Check if the frame handle is the pending frame.
    pub fn owns_frame(&self, handle: FrameHandle) -> bool {
        self.frame == Some(handle)
    }

    /// Check if the resize listener is ours and still registered.
    pub fn owns_listener(&self, id: ListenerId) -> bool {
        self.resize == Some(id)
    }

    /// Check if released.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Unregister the resize listener and cancel the pending frame.
    ///
    /// Returns `false` if already released.
    pub fn release(&mut self, host: &mut impl Host) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        if let Some(id) = self.resize.take() {
            host.remove_resize_listener(id);
        }
        if let Some(handle) = self.frame.take() {
            host.cancel_frame(handle);
        }
        true
    }
}
