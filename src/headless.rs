use std::{
    cell::RefCell,
    collections::{BTreeSet, VecDeque},
    rc::Rc,
};

use glam::*;

use crate::{
    Components, Container, Error, FrameHandle, FrameScheduler, HostEvent, ListenerId,
    ResizeSignals, Session, SurfaceId,
};

#[derive(Debug, Default)]
struct HeadlessState {
    size: UVec2,
    children: Vec<SurfaceId>,
    pending_frames: BTreeSet<FrameHandle>,
    next_frame: u64,
    listeners: BTreeSet<ListenerId>,
    next_listener: u64,
    queued: VecDeque<HostEvent>,
}

/// An in-memory host environment.
///
/// Cloning yields another handle to the same host.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost(Rc<RefCell<HeadlessState>>);

impl HeadlessHost {
    /// Create a new host with a container of the given client size.
    pub fn new(size: UVec2) -> Self {
        Self(Rc::new(RefCell::new(HeadlessState {
            size,
            ..Default::default()
        })))
    }

    /// Get the container client size.
    pub fn size(&self) -> UVec2 {
        self.0.borrow().size
    }

    /// Resize the container and signal every registered resize listener.
    pub fn resize(&self, size: UVec2) {
        let mut state = self.0.borrow_mut();
        state.size = size;

        let listeners = state.listeners.iter().copied().collect::<Vec<_>>();
        state
            .queued
            .extend(listeners.into_iter().map(HostEvent::Resize));
    }

    /// Get the surfaces inserted into the container.
    pub fn children(&self) -> Vec<SurfaceId> {
        self.0.borrow().children.clone()
    }

    /// Check if a surface is inserted into the container.
    pub fn contains_child(&self, surface: SurfaceId) -> bool {
        self.0.borrow().children.contains(&surface)
    }

    /// Get the number of requested frames not yet delivered.
    pub fn pending_frames(&self) -> usize {
        self.0.borrow().pending_frames.len()
    }

    /// Get the number of registered resize listeners.
    pub fn resize_listeners(&self) -> usize {
        self.0.borrow().listeners.len()
    }

    /// Drain the due signals.
    ///
    /// Queued resize signals come first, followed by one frame signal per pending frame.
    pub fn poll_events(&self) -> Vec<HostEvent> {
        let mut state = self.0.borrow_mut();
        let mut events = state.queued.drain(..).collect::<Vec<_>>();
        events.extend(
            std::mem::take(&mut state.pending_frames)
                .into_iter()
                .map(HostEvent::Frame),
        );
        events
    }

    /// Deliver the due signals addressed to a session.
    ///
    /// Signals of other sessions stay queued. If the session fails to handle a signal, the
    /// signals not yet delivered are queued again and the error is returned.
    ///
    /// Returns the number of signals delivered.
    pub fn dispatch<C: Components>(&self, session: &mut Session<Self, C>) -> Result<usize, Error> {
        let mut events = self.take_events(|event| session.accepts(event));
        let mut count = 0;

        while let Some(event) = events.pop_front() {
            if let Err(e) = session.handle_event(event) {
                self.requeue(events);
                return Err(e);
            }
            count += 1;
        }

        Ok(count)
    }

    /// Remove the due signals matching the filter, resize signals first.
    fn take_events(&self, mut filter: impl FnMut(&HostEvent) -> bool) -> VecDeque<HostEvent> {
        let mut state = self.0.borrow_mut();

        let (mut taken, kept): (VecDeque<_>, VecDeque<_>) =
            state.queued.drain(..).partition(|event| filter(event));
        state.queued = kept;

        let frames = state
            .pending_frames
            .iter()
            .copied()
            .filter(|handle| filter(&HostEvent::Frame(*handle)))
            .collect::<Vec<_>>();
        for handle in frames {
            state.pending_frames.remove(&handle);
            taken.push_back(HostEvent::Frame(handle));
        }

        taken
    }

    /// Put undelivered signals back, ahead of signals queued since.
    fn requeue(&self, events: VecDeque<HostEvent>) {
        let mut state = self.0.borrow_mut();
        log::debug!("Requeuing {} undelivered signals", events.len());

        for event in events.into_iter().rev() {
            match event {
                HostEvent::Resize(id) if state.listeners.contains(&id) => {
                    state.queued.push_front(event)
                }
                HostEvent::Resize(_) => {}
                HostEvent::Frame(handle) => {
                    state.pending_frames.insert(handle);
                }
            }
        }
    }
}

impl Container for HeadlessHost {
    fn client_size(&self) -> UVec2 {
        self.size()
    }

    fn append_child(&mut self, surface: SurfaceId) {
        self.0.borrow_mut().children.push(surface);
    }

    fn remove_child(&mut self, surface: SurfaceId) -> bool {
        let mut state = self.0.borrow_mut();
        match state.children.iter().position(|s| *s == surface) {
            Some(index) => {
                state.children.remove(index);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for HeadlessHost {
    fn request_frame(&mut self) -> FrameHandle {
        let mut state = self.0.borrow_mut();
        let handle = FrameHandle(state.next_frame);
        state.next_frame += 1;
        state.pending_frames.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.0.borrow_mut().pending_frames.remove(&handle);
    }
}

impl ResizeSignals for HeadlessHost {
    fn add_resize_listener(&mut self) -> ListenerId {
        let mut state = self.0.borrow_mut();
        let id = ListenerId(state.next_listener);
        state.next_listener += 1;
        state.listeners.insert(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        let mut state = self.0.borrow_mut();
        state.listeners.remove(&id);
        state.queued.retain(|event| *event != HostEvent::Resize(id));
    }
}
