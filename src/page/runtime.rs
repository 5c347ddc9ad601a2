use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::nav::{NavPresentation, NavSpec};
use crate::page::output::FrameOutput;
use crate::page::spec::{PageOptions, PageSpec, ViewSpec};
use crate::pointer::effects::PointerEffect;
use crate::pointer::glow::GlowTracker;
use crate::section::registry::{SectionId, SectionRegistry};
use crate::section::resolver::{ActiveSectionResolver, ResolveMode};
use crate::section::route::Route;
use crate::timeline::pin::{ResolvedPin, SpacedGeometry, resolve_pins};
use crate::timeline::scroll::ScrollTimeline;
use crate::transition::PageTransition;
use crate::viewport::frame::FrameScheduler;
use crate::viewport::geometry::Geometry;
use crate::viewport::listeners::{ListenerKind, ListenerRegistry, ScopeId};
use crate::viewport::tracker::{Changes, InputEvent, ViewportSnapshot, ViewportTracker};
use std::time::Duration;

/// Runtime state of one mounted view.
#[derive(Debug)]
struct MountedView {
    name: String,
    scope: ScopeId,
    timelines: Vec<ScrollTimeline>,
    glows: Vec<GlowTracker>,
    effects: Vec<PointerEffect>,
}

impl MountedView {
    fn build(spec: &ViewSpec, scope: ScopeId) -> ScrollworkResult<Self> {
        Ok(Self {
            name: spec.name.clone(),
            scope,
            timelines: spec
                .timelines
                .iter()
                .cloned()
                .map(ScrollTimeline::new)
                .collect::<ScrollworkResult<_>>()?,
            glows: spec
                .glows
                .iter()
                .cloned()
                .map(GlowTracker::new)
                .collect::<ScrollworkResult<_>>()?,
            effects: spec
                .effects
                .iter()
                .cloned()
                .map(PointerEffect::new)
                .collect::<ScrollworkResult<_>>()?,
        })
    }
}

/// A live page: the single owner of viewport input, the section registry and every mounted
/// effect.
///
/// Input events never touch geometry. They update the viewport snapshot, mark what is stale
/// and request one animation frame. [`Page::frame`] then runs a read phase (pins, trigger
/// windows, glow boxes, section observation) followed by a compute phase that produces the
/// [`FrameOutput`].
#[derive(Debug)]
pub struct Page {
    route: Route,
    options: PageOptions,
    nav: NavSpec,
    tracker: ViewportTracker,
    listeners: ListenerRegistry,
    scheduler: FrameScheduler,
    registry: SectionRegistry,
    resolver: ActiveSectionResolver,
    views: Vec<MountedView>,
    next_scope: u32,
    pins: Vec<ResolvedPin>,
    layout_dirty: bool,
    needs_render: bool,
    transition: Option<PageTransition>,
    rendered: u64,
    closed: bool,
}

impl Page {
    /// Validate `spec`, create the page and mount its views in document order.
    pub fn from_spec(spec: &PageSpec) -> ScrollworkResult<Self> {
        spec.validate()?;
        let mut page = Self::new(
            spec.route.clone(),
            spec.viewport,
            spec.options.clone(),
            spec.nav.clone(),
        )?;
        for view in &spec.views {
            page.mount(view)?;
        }
        Ok(page)
    }

    /// Empty page at `route`.
    pub fn new(
        route: Route,
        viewport: Viewport,
        options: PageOptions,
        nav: NavSpec,
    ) -> ScrollworkResult<Self> {
        let viewport = Viewport::new(viewport.width, viewport.height)?;
        options.band.validate()?;
        let caps = options.capabilities;

        let mut resolver =
            ActiveSectionResolver::for_route(&route, options.band, nav.fallback.clone());
        if resolver.mode() == ResolveMode::Scroll && !caps.intersection_observer {
            tracing::warn!("intersection observers unavailable, active section frozen");
            resolver.freeze();
        }
        let transition = options
            .transition
            .map(PageTransition::new)
            .transpose()?;

        let mut listeners = ListenerRegistry::new();
        for kind in [
            ListenerKind::Scroll,
            ListenerKind::Resize,
            ListenerKind::PointerMove,
        ] {
            listeners.add(kind, ScopeId::PAGE);
        }
        if resolver.mode() == ResolveMode::Scroll {
            listeners.add(ListenerKind::Intersection, ScopeId::PAGE);
        }

        let mut page = Self {
            route,
            options,
            nav,
            tracker: ViewportTracker::new(viewport),
            listeners,
            scheduler: FrameScheduler::new(caps.animation_frames),
            registry: SectionRegistry::new(),
            resolver,
            views: Vec::new(),
            next_scope: 1,
            pins: Vec::new(),
            layout_dirty: true,
            needs_render: false,
            transition,
            rendered: 0,
            closed: false,
        };
        page.schedule();
        tracing::debug!(route = %page.route, "page created");
        Ok(page)
    }

    /// Route the page serves.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Runtime options.
    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    /// Current viewport snapshot.
    pub fn snapshot(&self) -> ViewportSnapshot {
        self.tracker.snapshot()
    }

    /// Registered sections.
    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    /// Active section as of the last frame.
    pub fn active_section(&self) -> &SectionId {
        self.resolver.active()
    }

    /// How the active section is resolved.
    pub fn resolve_mode(&self) -> ResolveMode {
        self.resolver.mode()
    }

    /// Subscriptions currently held.
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Whether an animation frame is queued.
    pub fn frame_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Whether [`Page::frame`] would produce output.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    /// Names of mounted views, in mount order.
    pub fn mounted_views(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|v| v.name.as_str())
    }

    /// Pins placed by the last layout pass.
    pub fn pins(&self) -> &[ResolvedPin] {
        &self.pins
    }

    /// Whether the page has been torn down.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Mount a view: register its sections and instantiate its effects under a fresh scope.
    ///
    /// Nothing is registered when the view is rejected.
    pub fn mount(&mut self, spec: &ViewSpec) -> ScrollworkResult<ScopeId> {
        if self.closed {
            return Err(ScrollworkError::validation("page has been torn down"));
        }
        if self.views.iter().any(|v| v.name == spec.name) {
            return Err(ScrollworkError::validation(format!(
                "view '{}' is already mounted",
                spec.name
            )));
        }
        self.check_unique_ids(spec)?;

        let scope = ScopeId(self.next_scope);
        let view = MountedView::build(spec, scope)?;
        for section in &spec.sections {
            if let Err(e) = self.registry.register(section.clone(), scope) {
                self.registry.deregister_scope(scope);
                return Err(e);
            }
        }
        self.next_scope += 1;

        if self.resolver.mode() == ResolveMode::Scroll {
            for _ in &spec.sections {
                self.listeners.add(ListenerKind::Intersection, scope);
            }
        }
        for _ in &view.timelines {
            self.listeners.add(ListenerKind::Scroll, scope);
        }
        for _ in 0..view.glows.len() + view.effects.len() {
            self.listeners.add(ListenerKind::PointerMove, scope);
        }

        tracing::debug!(view = %spec.name, ?scope, sections = spec.sections.len(), "view mounted");
        self.views.push(view);
        self.layout_dirty = true;
        self.schedule();
        Ok(scope)
    }

    fn check_unique_ids(&self, spec: &ViewSpec) -> ScrollworkResult<()> {
        let taken = |kind: &str, id: &str| {
            ScrollworkError::validation(format!(
                "{kind} '{id}' of view '{}' is already mounted",
                spec.name
            ))
        };
        for t in &spec.timelines {
            if self.views.iter().flat_map(|v| &v.timelines).any(|m| m.id() == t.id) {
                return Err(taken("timeline", &t.id));
            }
        }
        for g in &spec.glows {
            if self.views.iter().flat_map(|v| &v.glows).any(|m| m.spec().id == g.id) {
                return Err(taken("glow", &g.id));
            }
        }
        for e in &spec.effects {
            if self.views.iter().flat_map(|v| &v.effects).any(|m| m.spec().id() == e.id()) {
                return Err(taken("effect", e.id()));
            }
        }
        Ok(())
    }

    /// Unmount a view, releasing its listeners and sections. Returns `false` if no view with
    /// that name is mounted.
    pub fn unmount(&mut self, name: &str) -> bool {
        let Some(idx) = self.views.iter().position(|v| v.name == name) else {
            return false;
        };
        let view = self.views.remove(idx);
        self.listeners.release_scope(view.scope);
        let sections = self.registry.deregister_scope(view.scope);
        tracing::debug!(view = %name, sections, "view unmounted");
        self.layout_dirty = true;
        self.schedule();
        true
    }

    /// Release every listener and pending frame. The page ignores input afterwards.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.scheduler.cancel(&mut self.listeners);
        for view in self.views.drain(..) {
            self.listeners.release_scope(view.scope);
            self.registry.deregister_scope(view.scope);
        }
        self.listeners.release_scope(ScopeId::PAGE);
        self.needs_render = false;
        self.closed = true;
        tracing::debug!(route = %self.route, remaining = self.listeners.count(), "page torn down");
    }

    /// Feed one raw input event.
    ///
    /// Only the snapshot is updated here; all geometry reads happen in the next frame.
    pub fn handle(&mut self, ev: InputEvent) -> Changes {
        if self.closed {
            return Changes::default();
        }
        let changes = self.tracker.apply(ev);
        if changes.pointer {
            for view in &mut self.views {
                view.glows.iter_mut().for_each(GlowTracker::pointer_changed);
                view.effects.iter_mut().for_each(PointerEffect::pointer_changed);
            }
        }
        if changes.layout {
            self.layout_dirty = true;
        }
        if !changes.is_empty() {
            self.schedule();
        }
        changes
    }

    fn schedule(&mut self) {
        self.needs_render = true;
        self.scheduler.request(&mut self.listeners);
    }

    /// Place pins against raw geometry and drop every trigger measurement.
    fn relayout(&mut self, geometry: &dyn Geometry, viewport: Viewport) {
        let specs = self
            .views
            .iter()
            .flat_map(|v| &v.timelines)
            .filter_map(|t| Some((t.spec().trigger.as_str(), t.spec().pin.as_ref()?)));
        let wanted = specs.clone().count();
        self.pins = resolve_pins(specs, geometry, viewport);

        for timeline in self.views.iter_mut().flat_map(|v| &mut v.timelines) {
            timeline.invalidate();
            let pin = self
                .pins
                .iter()
                .find(|p| p.anchor == timeline.spec().trigger)
                .cloned();
            timeline.set_pin(pin);
        }
        for glow in self.views.iter_mut().flat_map(|v| &mut v.glows) {
            glow.layout_changed();
        }
        // Unrendered pins are retried on the next frame.
        self.layout_dirty = self.pins.len() < wanted;
        tracing::debug!(pins = self.pins.len(), wanted, "layout pass");
    }

    /// Render the pending frame at time `now` against `geometry`.
    ///
    /// Returns `None` when nothing changed since the last frame or the page is closed. Hosts
    /// without animation frames call this directly after each event.
    #[tracing::instrument(skip(self, geometry), fields(route = %self.route))]
    pub fn frame(&mut self, geometry: &dyn Geometry, now: Duration) -> Option<FrameOutput> {
        if self.closed || !self.needs_render {
            return None;
        }
        self.scheduler.take(&mut self.listeners);
        self.needs_render = false;
        self.rendered += 1;

        let snap = self.tracker.snapshot();
        let animated = self.scheduler.is_supported();

        // Read phase.
        if self.layout_dirty {
            self.relayout(geometry, snap.viewport);
        }
        let spaced = SpacedGeometry::new(geometry, &self.pins);
        for view in &mut self.views {
            for timeline in &mut view.timelines {
                timeline.measure(&spaced, snap.viewport);
            }
            for glow in &mut view.glows {
                glow.measure(&spaced, snap.scroll_y);
            }
            for effect in &mut view.effects {
                effect.measure(&spaced, snap.scroll_y);
            }
        }
        let section_change = match self.resolver.mode() {
            ResolveMode::Scroll => {
                self.resolver
                    .observe(&self.registry, &spaced, snap.scroll_y, snap.viewport)
            }
            ResolveMode::Static => self.resolver.settle(&self.registry),
        };

        // Compute phase.
        let active = self.resolver.active().clone();
        let nav = NavPresentation::compute(
            &self.nav,
            &active,
            &self.registry,
            &self.route,
            snap.scroll_y,
        );
        let mut needs_frame = false;
        let mut timelines = Vec::new();
        let mut glows = Vec::new();
        let mut effects = Vec::new();
        for view in &mut self.views {
            for timeline in &mut view.timelines {
                let sample = if animated {
                    timeline.sample(snap.scroll_y, snap.viewport, now)
                } else {
                    timeline.sample_settled(snap.viewport)
                };
                if let Some(sample) = sample {
                    needs_frame |= sample.is_settling();
                    timelines.push(sample);
                }
            }
            for glow in &mut view.glows {
                if animated {
                    glow.compute(snap.pointer, now);
                    needs_frame |= !glow.is_dirty() && glow.needs_frame(now);
                    glows.push(glow.frame(nav.accent, now));
                } else {
                    glows.push(glow.frame_disabled(nav.accent));
                }
            }
            for effect in &mut view.effects {
                effect.compute(snap.pointer, snap.viewport);
                effects.push(effect.frame());
            }
        }

        let transition = match &mut self.transition {
            Some(t) if !animated => {
                t.finish();
                None
            }
            Some(t) => {
                let frame = t.sample(now);
                needs_frame |= frame.as_ref().is_some_and(|f| !f.done);
                frame
            }
            None => None,
        };

        if needs_frame {
            self.schedule();
        }
        tracing::trace!(
            frame = self.rendered,
            active = %active,
            timelines = timelines.len(),
            needs_frame,
            "frame rendered"
        );
        Some(FrameOutput {
            frame: self.rendered,
            scroll_y: snap.scroll_y,
            viewport: snap.viewport,
            active_section: active,
            section_change,
            nav,
            timelines,
            glows,
            effects,
            transition,
            needs_frame,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/runtime.rs"]
mod tests;
