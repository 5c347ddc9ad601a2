use crate::viewport::listeners::{ListenerId, ListenerKind, ListenerRegistry, ScopeId};

/// Coalesces work requests into at most one animation-frame callback.
///
/// Any number of scroll or pointer events between two frames result in a single pending
/// callback, so bounding-box reads and coordinate translation happen once per frame.
#[derive(Debug)]
pub struct FrameScheduler {
    supported: bool,
    pending: Option<ListenerId>,
    frames_run: u64,
}

impl FrameScheduler {
    /// New scheduler. When `supported` is false, requests are refused and callers must fall
    /// back to static presentation.
    pub fn new(supported: bool) -> Self {
        Self {
            supported,
            pending: None,
            frames_run: 0,
        }
    }

    /// Whether the environment provides animation frames.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Whether a callback is queued.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of frame callbacks that have run.
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Queue a callback unless one is already pending. Returns `true` if a new one was queued.
    pub fn request(&mut self, listeners: &mut ListenerRegistry) -> bool {
        if !self.supported || self.pending.is_some() {
            return false;
        }
        self.pending = Some(listeners.add(ListenerKind::AnimationFrame, ScopeId::PAGE));
        true
    }

    /// Consume the pending callback at frame time. Returns `false` when nothing was queued.
    pub fn take(&mut self, listeners: &mut ListenerRegistry) -> bool {
        let Some(id) = self.pending.take() else {
            return false;
        };
        listeners.remove(id);
        self.frames_run += 1;
        true
    }

    /// Drop the pending callback without running it.
    pub fn cancel(&mut self, listeners: &mut ListenerRegistry) {
        if let Some(id) = self.pending.take() {
            listeners.remove(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/frame.rs"]
mod tests;
