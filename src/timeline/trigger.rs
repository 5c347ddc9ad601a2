use crate::foundation::core::{Rect, Viewport};
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use std::fmt;
use std::str::FromStr;

/// A reference line on the trigger element or on the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    /// Top edge.
    Top,
    /// Vertical center.
    Center,
    /// Bottom edge.
    Bottom,
    /// Percentage of the height, from the top.
    Percent(f64),
    /// Pixels from the top.
    Px(f64),
}

impl Edge {
    /// Offset of this line from the top of a box `height` tall.
    pub fn offset(self, height: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => height / 2.0,
            Self::Bottom => height,
            Self::Percent(p) => height * p / 100.0,
            Self::Px(px) => px,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}

impl FromStr for Edge {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = |v: &str| -> ScrollworkResult<f64> {
            let n = v
                .parse::<f64>()
                .map_err(|e| ScrollworkError::parse(format!("edge '{s}': {e}")))?;
            if !n.is_finite() {
                return Err(ScrollworkError::parse(format!("edge '{s}' is not finite")));
            }
            Ok(n)
        };
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                if let Some(p) = s.strip_suffix('%') {
                    Ok(Self::Percent(num(p)?))
                } else if let Some(px) = s.strip_suffix("px") {
                    Ok(Self::Px(num(px)?))
                } else {
                    Ok(Self::Px(num(s)?))
                }
            }
        }
    }
}

/// Scroll position at which a line on the element meets a line on the viewport, written
/// `"<element edge> <viewport edge>"`, e.g. `"top 80%"` or `"top top"`.
///
/// A single edge (`"center"`) means the same line on both.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TriggerPos {
    /// Line on the trigger element.
    pub element: Edge,
    /// Line on the viewport.
    pub viewport: Edge,
}

impl TriggerPos {
    /// Build from two edges.
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the two lines coincide, for an element at `element_doc`
    /// (document coordinates).
    pub fn scroll_offset(&self, element_doc: Rect, viewport: Viewport) -> f64 {
        element_doc.y0 + self.element.offset(element_doc.height())
            - self.viewport.offset(viewport.height)
    }
}

impl fmt::Display for TriggerPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

impl FromStr for TriggerPos {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(first), second, None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScrollworkError::parse(format!(
                "trigger position '{s}' must be '<element edge> <viewport edge>'"
            )));
        };
        let element: Edge = first.parse()?;
        let viewport = match second {
            Some(v) => v.parse()?,
            None => element,
        };
        Ok(Self { element, viewport })
    }
}

impl TryFrom<String> for TriggerPos {
    type Error = ScrollworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerPos> for String {
    fn from(value: TriggerPos) -> Self {
        value.to_string()
    }
}

/// End of a scroll window: an absolute trigger position or a distance past the start
/// (`"+=3000"`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TriggerEnd {
    /// Element/viewport line pair, like the start.
    At(TriggerPos),
    /// Scroll distance after the start, in px.
    Distance(f64),
}

impl fmt::Display for TriggerEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(pos) => pos.fmt(f),
            Self::Distance(d) => write!(f, "+={d}"),
        }
    }
}

impl FromStr for TriggerEnd {
    type Err = ScrollworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(rest) = s.strip_prefix("+=") else {
            return Ok(Self::At(s.parse()?));
        };
        let d = rest
            .trim()
            .trim_end_matches("px")
            .parse::<f64>()
            .map_err(|e| ScrollworkError::parse(format!("trigger end '{s}': {e}")))?;
        if !d.is_finite() || d < 0.0 {
            return Err(ScrollworkError::parse(format!(
                "trigger end distance '{s}' must be finite and >= 0"
            )));
        }
        Ok(Self::Distance(d))
    }
}

impl TryFrom<String> for TriggerEnd {
    type Error = ScrollworkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TriggerEnd> for String {
    fn from(value: TriggerEnd) -> Self {
        value.to_string()
    }
}

/// Resolved scroll window `[start, end]` in scroll-offset space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollRange {
    /// Scroll offset where progress is 0.
    pub start: f64,
    /// Scroll offset where progress is 1.
    pub end: f64,
}

impl ScrollRange {
    /// Resolve `start`/`end` against current geometry.
    ///
    /// An end before the start collapses the window to a step at `start`.
    pub fn resolve(
        start: TriggerPos,
        end: TriggerEnd,
        element_doc: Rect,
        viewport: Viewport,
    ) -> Self {
        let s = start.scroll_offset(element_doc, viewport);
        let e = match end {
            TriggerEnd::At(pos) => pos.scroll_offset(element_doc, viewport),
            TriggerEnd::Distance(d) => s + d,
        };
        Self {
            start: s,
            end: e.max(s),
        }
    }

    /// Scroll distance covered by the window.
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the window has zero length.
    pub fn is_empty(&self) -> bool {
        self.len() <= 0.0
    }

    /// Whether `scroll_y` lies inside the window (inclusive).
    pub fn contains(&self, scroll_y: f64) -> bool {
        self.start <= scroll_y && scroll_y <= self.end
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/trigger.rs"]
mod tests;
