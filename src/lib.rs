//! Scrollwork is the scroll and pointer animation engine behind a single-page studio site.
//!
//! One [`Page`] per page view owns every raw input (scroll, resize, pointer, frames) and
//! derives everything else from it:
//!
//! - the active section (band intersection on `/`, a route mapping elsewhere)
//! - scrubbed and pinned scroll timelines
//! - pointer glows, tilt and magnetic effects
//! - the navigation bar's accent and scrolled state
//!
//! Pages are described by a [`PageSpec`] (JSON or the built-in [`site`] catalog) and rendered
//! frame by frame against a [`Geometry`] source.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Navigation bar presentation.
pub mod nav;
/// Page specs and the page runtime.
pub mod page;
/// Pointer-driven effects.
pub mod pointer;
/// Sections, routes and active-section resolution.
pub mod section;
/// The studio's pages.
pub mod site;
/// Scroll timelines.
pub mod timeline;
/// Route transition overlay.
pub mod transition;
/// Input ownership and geometry.
pub mod viewport;

pub use crate::foundation::core::{AccentColor, Point, Rect, Rgba, Vec2, Viewport};
pub use crate::foundation::error::{ScrollworkError, ScrollworkResult};

pub use crate::nav::{NavPresentation, NavSpec};
pub use crate::page::{Capabilities, FrameOutput, Page, PageOptions, PageSpec, ViewSpec};
pub use crate::section::registry::{Section, SectionId};
pub use crate::section::route::Route;
pub use crate::viewport::geometry::{ElementBox, Geometry, StaticLayout};
pub use crate::viewport::tracker::InputEvent;
