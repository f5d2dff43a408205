//! The original → clone registry.
//!
//! Node IDs are dense within one graph, so the registry is a table indexed by
//! the original's [`NodeId::index()`] rather than a hash map. A fresh table is
//! built for every cloning operation and grows only as far as the highest
//! original it has seen.

use rustc_hash::FxHashSet;

use hgraph::NodeId;

/// Mapping from original nodes to their clones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CloneMap {
    clones: Vec<Option<NodeId>>,
    len: usize,
    allow_overwrite: bool,
    /// Originals whose association was supplied by the caller rather than by
    /// the cloner. Diagnostics only.
    manual: FxHashSet<NodeId>,
}

impl CloneMap {
    pub fn new(allow_overwrite: bool) -> Self {
        Self {
            allow_overwrite,
            ..Self::default()
        }
    }

    /// Returns `true` if a later registration may replace an earlier one.
    pub fn allows_overwrite(&self) -> bool {
        self.allow_overwrite
    }

    /// Register `clone` as the clone of `original`.
    ///
    /// The entry counts as automatic until [`CloneMap::mark_manual`] is
    /// called for it. Each original is cloned at most once unless the map was created with
    /// overwrite allowed.
    ///
    /// # Panics
    ///
    /// Debug-panics if `original` is already registered and overwrite is not
    /// allowed.
    pub fn put(&mut self, original: NodeId, clone: NodeId) {
        let previous = self.get(original);
        debug_assert!(
            self.allow_overwrite || previous.is_none(),
            "{original} registered twice (already cloned as {previous:?}, now {clone})",
        );
        self.insert(original, clone);
    }

    /// Register `clone` as the clone of `original`, replacing any earlier
    /// association regardless of the overwrite setting.
    pub fn overwrite(&mut self, original: NodeId, clone: NodeId) {
        self.insert(original, clone);
    }

    /// The clone of `original`, if it has one.
    #[inline]
    pub fn get(&self, original: NodeId) -> Option<NodeId> {
        self.clones.get(original.index()).copied().flatten()
    }

    /// Returns `true` if `original` has a clone.
    #[inline]
    pub fn contains(&self, original: NodeId) -> bool {
        self.get(original).is_some()
    }

    /// Record that the current association of `original` came from the
    /// caller. A later `put` or `overwrite` clears the mark.
    pub fn mark_manual(&mut self, original: NodeId) {
        self.manual.insert(original);
    }

    /// Returns `true` if the association of `original` was supplied by the
    /// caller.
    pub fn is_manual(&self, original: NodeId) -> bool {
        self.manual.contains(&original)
    }

    /// Number of caller-supplied associations.
    pub fn manual_count(&self) -> usize {
        self.manual.len()
    }

    /// Number of originals with a clone.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `(original, clone)` pairs in original-ID order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.clones.iter().enumerate().filter_map(|(idx, slot)| {
            let original = NodeId::new(u32::try_from(idx).ok()?);
            slot.map(|clone| (original, clone))
        })
    }

    fn insert(&mut self, original: NodeId, clone: NodeId) {
        let idx = original.index();
        if idx >= self.clones.len() {
            self.clones.resize(idx + 1, None);
        }
        if self.clones[idx].replace(clone).is_none() {
            self.len += 1;
        }
        self.manual.remove(&original);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn n(raw: u32) -> NodeId {
        NodeId::new(raw)
    }

    #[test]
    fn empty_map_has_no_clones() {
        let map = CloneMap::new(false);
        assert!(map.is_empty());
        assert_eq!(map.get(n(0)), None);
        assert_eq!(map.get(n(1000)), None);
    }

    #[test]
    fn put_then_get() {
        let mut map = CloneMap::new(false);
        map.put(n(3), n(10));
        map.put(n(0), n(11));
        assert_eq!(map.get(n(3)), Some(n(10)));
        assert_eq!(map.get(n(0)), Some(n(11)));
        assert_eq!(map.get(n(1)), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(n(0), n(11)), (n(3), n(10))]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "registered twice")]
    fn put_twice_without_overwrite_panics() {
        let mut map = CloneMap::new(false);
        map.put(n(2), n(5));
        map.put(n(2), n(6));
    }

    #[test]
    fn put_twice_with_overwrite_replaces() {
        let mut map = CloneMap::new(true);
        map.put(n(2), n(5));
        map.put(n(2), n(6));
        assert_eq!(map.get(n(2)), Some(n(6)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn overwrite_ignores_mode() {
        let mut map = CloneMap::new(false);
        map.put(n(2), n(5));
        map.overwrite(n(2), n(7));
        assert_eq!(map.get(n(2)), Some(n(7)));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn manual_entries_are_tracked_separately() {
        let mut map = CloneMap::new(false);
        map.put(n(1), n(4));
        map.put(n(2), n(5));
        map.mark_manual(n(2));
        assert!(!map.is_manual(n(1)));
        assert!(map.is_manual(n(2)));
        assert_eq!(map.manual_count(), 1);
    }

    #[test]
    fn replacing_a_seed_clears_the_manual_mark() {
        let mut map = CloneMap::new(true);
        map.put(n(2), n(5));
        map.mark_manual(n(2));
        map.put(n(2), n(6));
        assert!(!map.is_manual(n(2)));
        assert_eq!(map.manual_count(), 0);

        map.overwrite(n(2), n(7));
        map.mark_manual(n(2));
        assert!(map.is_manual(n(2)));
        assert_eq!(map.get(n(2)), Some(n(7)));
    }
}
