use crate::foundation::core::Viewport;
use crate::nav::NavPresentation;
use crate::pointer::effects::EffectFrame;
use crate::pointer::glow::GlowFrame;
use crate::section::registry::SectionId;
use crate::section::resolver::Transition;
use crate::timeline::scroll::TimelineSample;
use crate::transition::TransitionFrame;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the page presents for one rendered frame.
pub struct FrameOutput {
    /// Rendered frame counter, starting at 1.
    pub frame: u64,
    /// Scroll offset the frame was computed at.
    pub scroll_y: f64,
    /// Viewport the frame was computed for.
    pub viewport: Viewport,
    /// Active section after this frame's observation.
    pub active_section: SectionId,
    /// Set when the active section changed during this frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_change: Option<Transition>,
    /// Navigation bar state.
    pub nav: NavPresentation,
    /// Samples of attached timelines, in mount order.
    pub timelines: Vec<TimelineSample>,
    /// Glow layers, in mount order.
    pub glows: Vec<GlowFrame>,
    /// Tilt and magnetic transforms, in mount order.
    pub effects: Vec<EffectFrame>,
    /// Route transition, while it runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionFrame>,
    /// Whether another frame was requested to continue an animation.
    pub needs_frame: bool,
}

impl FrameOutput {
    /// Timeline sample by id.
    pub fn timeline(&self, id: &str) -> Option<&TimelineSample> {
        self.timelines.iter().find(|t| t.id == id)
    }

    /// Glow layer by id.
    pub fn glow(&self, id: &str) -> Option<&GlowFrame> {
        self.glows.iter().find(|g| g.id == id)
    }

    /// Effect transform by id.
    pub fn effect(&self, id: &str) -> Option<&EffectFrame> {
        self.effects.iter().find(|e| e.id == id)
    }
}
