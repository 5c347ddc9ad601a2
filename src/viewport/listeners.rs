use std::collections::BTreeMap;

/// Kind of browser subscription a live effect holds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    /// `scroll` event listener.
    Scroll,
    /// `resize` event listener.
    Resize,
    /// `pointermove` event listener.
    PointerMove,
    /// Intersection observer.
    Intersection,
    /// Pending animation-frame callback.
    AnimationFrame,
}

/// Handle of one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Owner of a group of listeners, released together (one per mounted view, plus the page).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// Scope of page-level effects (navigation, resolver, frame scheduler).
    pub const PAGE: ScopeId = ScopeId(0);
}

/// Bookkeeping for every subscription a page holds.
///
/// Nothing is ever dispatched through the registry; it exists so teardown can be verified: a
/// released scope must leave the count exactly where it was before the scope was created.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next: u64,
    live: BTreeMap<ListenerId, (ListenerKind, ScopeId)>,
}

impl ListenerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener of `kind` owned by `scope`.
    pub fn add(&mut self, kind: ListenerKind, scope: ScopeId) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.live.insert(id, (kind, scope));
        tracing::trace!(?kind, ?scope, id = id.0, "listener added");
        id
    }

    /// Release one listener. Returns `false` if it was already released.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Release every listener owned by `scope`, returning how many were released.
    pub fn release_scope(&mut self, scope: ScopeId) -> usize {
        let before = self.live.len();
        self.live.retain(|_, (_, owner)| *owner != scope);
        let released = before - self.live.len();
        tracing::debug!(?scope, released, "scope released");
        released
    }

    /// Whether `id` is still registered.
    pub fn is_live(&self, id: ListenerId) -> bool {
        self.live.contains_key(&id)
    }

    /// Total live listeners.
    pub fn count(&self) -> usize {
        self.live.len()
    }

    /// Live listeners of one kind.
    pub fn count_of(&self, kind: ListenerKind) -> usize {
        self.live.values().filter(|(k, _)| *k == kind).count()
    }

    /// Live listeners owned by one scope.
    pub fn count_in(&self, scope: ScopeId) -> usize {
        self.live.values().filter(|(_, s)| *s == scope).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/listeners.rs"]
mod tests;
