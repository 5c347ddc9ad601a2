use crate::foundation::core::Rect;
use std::collections::BTreeMap;

/// How an element is positioned relative to scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Positioning {
    /// Scrolls with the document; the rect is in document coordinates.
    #[default]
    Flow,
    /// Fixed to the viewport; the rect is in viewport coordinates.
    Fixed,
}

/// Measured box of a rendered element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBox {
    /// Rect in document coordinates (flow) or viewport coordinates (fixed).
    pub rect: Rect,
    /// Positioning scheme of the element.
    #[serde(default)]
    pub positioning: Positioning,
}

impl ElementBox {
    /// A flow element.
    pub fn flow(rect: Rect) -> Self {
        Self {
            rect,
            positioning: Positioning::Flow,
        }
    }

    /// A fixed element.
    pub fn fixed(rect: Rect) -> Self {
        Self {
            rect,
            positioning: Positioning::Fixed,
        }
    }

    /// Equivalent of `getBoundingClientRect()` at scroll offset `scroll_y`.
    pub fn viewport_rect(&self, scroll_y: f64) -> Rect {
        match self.positioning {
            Positioning::Flow => self.rect.with_origin((self.rect.x0, self.rect.y0 - scroll_y)),
            Positioning::Fixed => self.rect,
        }
    }

    /// Document-space rect at scroll offset `scroll_y`.
    pub fn document_rect(&self, scroll_y: f64) -> Rect {
        match self.positioning {
            Positioning::Flow => self.rect,
            Positioning::Fixed => self.rect.with_origin((self.rect.x0, self.rect.y0 + scroll_y)),
        }
    }
}

/// Source of rendered element geometry, keyed by DOM id.
///
/// `None` means the element is not mounted (or not laid out yet); callers must treat that as
/// "try again later", never as an error.
pub trait Geometry {
    /// Box of the element with DOM id `anchor`.
    fn element_box(&self, anchor: &str) -> Option<ElementBox>;
}

impl<G: Geometry + ?Sized> Geometry for &G {
    fn element_box(&self, anchor: &str) -> Option<ElementBox> {
        (**self).element_box(anchor)
    }
}

/// Geometry backed by a fixed table, used by tests, the CLI and JSON page specs.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StaticLayout {
    elements: BTreeMap<String, ElementBox>,
}

impl StaticLayout {
    /// Empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a flow element.
    pub fn with_flow(mut self, anchor: impl Into<String>, rect: Rect) -> Self {
        self.insert(anchor, ElementBox::flow(rect));
        self
    }

    /// Builder: add a fixed element.
    pub fn with_fixed(mut self, anchor: impl Into<String>, rect: Rect) -> Self {
        self.insert(anchor, ElementBox::fixed(rect));
        self
    }

    /// Insert or replace an element, e.g. after a reflow.
    pub fn insert(&mut self, anchor: impl Into<String>, element: ElementBox) {
        self.elements.insert(anchor.into(), element);
    }

    /// Remove an element, e.g. when its view unmounts.
    pub fn remove(&mut self, anchor: &str) -> Option<ElementBox> {
        self.elements.remove(anchor)
    }

    /// Number of known elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no element is known.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate elements in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementBox)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Stack flow sections vertically from `y = 0`, each `height` tall and `width` wide.
    pub fn stacked(ids: &[(&str, f64)], width: f64) -> Self {
        let mut layout = Self::new();
        let mut y = 0.0;
        for (id, height) in ids {
            layout.insert(*id, ElementBox::flow(Rect::new(0.0, y, width, y + height)));
            y += height;
        }
        layout
    }
}

impl Geometry for StaticLayout {
    fn element_box(&self, anchor: &str) -> Option<ElementBox> {
        self.elements.get(anchor).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/geometry.rs"]
mod tests;
