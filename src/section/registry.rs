use crate::foundation::core::AccentColor;
use crate::foundation::error::{ScrollworkError, ScrollworkResult};
use crate::viewport::listeners::ScopeId;
use std::fmt;

/// Stable section identifier, also the default DOM anchor id.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Wrap an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A named, anchored region of the page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Section {
    /// Unique id.
    pub id: SectionId,
    /// Human-readable label.
    pub label: String,
    /// Accent used by navigation glow while this section is active.
    pub accent: AccentColor,
    /// DOM id of the rendered region; defaults to `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

impl Section {
    /// Section anchored at its own id.
    pub fn new(id: impl Into<String>, label: impl Into<String>, accent: AccentColor) -> Self {
        Self {
            id: SectionId::new(id),
            label: label.into(),
            accent,
            anchor: None,
        }
    }

    /// Builder: anchor at a different DOM id.
    pub fn anchored_at(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// DOM id this section is measured from.
    pub fn anchor(&self) -> &str {
        self.anchor.as_deref().unwrap_or(self.id.as_str())
    }
}

#[derive(Clone, Debug)]
struct Entry {
    section: Section,
    scope: ScopeId,
}

/// Ordered set of currently mounted sections.
///
/// Order is registration order, which is document order when views mount top to bottom.
#[derive(Clone, Debug, Default)]
pub struct SectionRegistry {
    entries: Vec<Entry>,
    revision: u64,
}

impl SectionRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a section owned by `scope`. Ids and anchors must be unique.
    pub fn register(&mut self, section: Section, scope: ScopeId) -> ScrollworkResult<()> {
        if self.contains(&section.id) {
            return Err(ScrollworkError::validation(format!(
                "section '{}' is already registered",
                section.id
            )));
        }
        if let Some(other) = self
            .entries
            .iter()
            .find(|e| e.section.anchor() == section.anchor())
        {
            return Err(ScrollworkError::validation(format!(
                "sections '{}' and '{}' share anchor '{}'",
                other.section.id,
                section.id,
                section.anchor()
            )));
        }
        tracing::debug!(id = %section.id, ?scope, "section registered");
        self.entries.push(Entry { section, scope });
        self.revision += 1;
        Ok(())
    }

    /// Remove one section.
    pub fn deregister(&mut self, id: &SectionId) -> Option<Section> {
        let idx = self.entries.iter().position(|e| &e.section.id == id)?;
        self.revision += 1;
        Some(self.entries.remove(idx).section)
    }

    /// Remove every section owned by `scope`.
    pub fn deregister_scope(&mut self, scope: ScopeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.scope != scope);
        let removed = before - self.entries.len();
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    /// Look up a section.
    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.entries
            .iter()
            .map(|e| &e.section)
            .find(|s| &s.id == id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: &SectionId) -> bool {
        self.get(id).is_some()
    }

    /// First registered section (the resolver's initial state).
    pub fn first(&self) -> Option<&Section> {
        self.entries.first().map(|e| &e.section)
    }

    /// Sections in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter().map(|e| &e.section)
    }

    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no section is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Incremented on every membership change.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
#[path = "../../tests/unit/section/registry.rs"]
mod tests;
