use crate::foundation::core::{Point, Viewport};

/// Raw browser-level input delivered to the page runtime.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Document scrolled to vertical offset `y` (CSS px).
    Scroll {
        /// New `scrollY`.
        y: f64,
    },
    /// Pointer moved to viewport coordinates `(x, y)`.
    PointerMove {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer left the document window.
    PointerLeave,
    /// Window resized.
    Resize {
        /// New viewport width.
        width: f64,
        /// New viewport height.
        height: f64,
    },
    /// Content reflowed without a resize (fonts/images loaded, sections expanded).
    LayoutChanged,
}

/// Process-wide pointer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct PointerState {
    /// Last known client position; `None` until the first pointer move.
    pub position: Option<Point>,
    /// Whether the pointer is currently inside the window.
    pub inside: bool,
}

/// Everything consumers may read about the viewport during a frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewportSnapshot {
    /// Current vertical scroll offset.
    pub scroll_y: f64,
    /// Current viewport size.
    pub viewport: Viewport,
    /// Current pointer state.
    pub pointer: PointerState,
}

/// What an applied event changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    /// Scroll offset changed.
    pub scroll: bool,
    /// Pointer state changed.
    pub pointer: bool,
    /// Geometry must be re-measured.
    pub layout: bool,
}

impl Changes {
    /// Return `true` when nothing changed.
    pub fn is_empty(self) -> bool {
        !(self.scroll || self.pointer || self.layout)
    }
}

/// Single owner of raw scroll/pointer/resize input.
///
/// The tracker is the only writer of [`ViewportSnapshot`]; every effect reads the snapshot it
/// is handed for the frame and never mutates it.
#[derive(Debug)]
pub struct ViewportTracker {
    snapshot: ViewportSnapshot,
}

impl ViewportTracker {
    /// Start tracking with an initial viewport, scroll at the top and no pointer.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            snapshot: ViewportSnapshot {
                scroll_y: 0.0,
                viewport,
                pointer: PointerState::default(),
            },
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.snapshot
    }

    /// Apply one raw event. Non-finite values are dropped.
    pub fn apply(&mut self, ev: InputEvent) -> Changes {
        let mut changes = Changes::default();
        let snap = &mut self.snapshot;
        match ev {
            InputEvent::Scroll { y } => {
                if !y.is_finite() {
                    return changes;
                }
                // Overscroll bounce reports negative offsets.
                let y = y.max(0.0);
                if y != snap.scroll_y {
                    snap.scroll_y = y;
                    changes.scroll = true;
                }
            }
            InputEvent::PointerMove { x, y } => {
                if !(x.is_finite() && y.is_finite()) {
                    return changes;
                }
                let next = PointerState {
                    position: Some(Point::new(x, y)),
                    inside: true,
                };
                if next != snap.pointer {
                    snap.pointer = next;
                    changes.pointer = true;
                }
            }
            InputEvent::PointerLeave => {
                if snap.pointer.inside {
                    snap.pointer.inside = false;
                    changes.pointer = true;
                }
            }
            InputEvent::Resize { width, height } => {
                let Ok(vp) = Viewport::new(width, height) else {
                    tracing::debug!(width, height, "ignoring degenerate resize");
                    return changes;
                };
                snap.viewport = vp;
                changes.layout = true;
            }
            InputEvent::LayoutChanged => changes.layout = true,
        }
        changes
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/tracker.rs"]
mod tests;
