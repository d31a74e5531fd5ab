//! Lazy chain: empty until first mutation.

use tracing::trace;

use crate::chain::eager::EagerChain;
use crate::error::{ChainError, ChainResult};
use crate::segment::Segment;

/// A chain that defers allocating its backing storage until first mutation.
///
/// This is a two-state machine: no backing store yet, or a real
/// [`EagerChain`]. Before materialization every read behaves exactly like
/// an empty eager chain: zero length, empty
/// rendering, false containment, out-of-bounds index access. Mutating
/// operations materialize an empty backing store exactly once and delegate
/// to it from then on.
///
/// # Thread safety
///
/// Materialization only happens behind `&mut self`; exclusive borrows make
/// it impossible for two callers to race the one-time initialization.
/// Sharing a chain across threads requires an external lock, the same
/// single-writer contract as any ordinary mutable collection.
#[derive(Debug, Clone, Default)]
pub struct LazyChain {
    store: Option<EagerChain>,
}

impl LazyChain {
    /// Creates a chain with no backing storage yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the backing storage has been created.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the backing store, creating it on first call.
    pub(crate) fn materialize(&mut self) -> &mut EagerChain {
        if self.store.is_none() {
            trace!("materializing lazy chain backing store");
        }
        self.store.get_or_insert_with(EagerChain::new)
    }

    /// Consumes the chain, yielding its backing store (empty if never
    /// materialized). Used by the merge path, which always mutates.
    pub(crate) fn into_eager(self) -> EagerChain {
        self.store.unwrap_or_default()
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.as_ref().map_or(0, EagerChain::len)
    }

    /// Returns true if the chain holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`]; on an un-materialized chain
    /// every index is out of bounds.
    pub fn get(&self, index: usize) -> ChainResult<&Segment> {
        match &self.store {
            Some(chain) => chain.get(index),
            None => Err(ChainError::out_of_bounds(index, 0)),
        }
    }

    /// Replaces the segment at `index`, returning the previous element.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, segment: impl Into<Segment>) -> ChainResult<Segment> {
        self.materialize().set(index, segment)
    }

    /// Inserts a segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index > len`.
    pub fn insert(&mut self, index: usize, segment: impl Into<Segment>) -> ChainResult<()> {
        self.materialize().insert(index, segment)
    }

    /// Removes and returns the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> ChainResult<Segment> {
        self.materialize().remove(index)
    }

    /// Appends a segment at the end of the chain.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.materialize().push(segment);
    }

    /// Retains only the segments for which the predicate holds.
    pub fn retain(&mut self, f: impl FnMut(&Segment) -> bool) {
        self.materialize().retain(f);
    }

    /// Removes all segments.
    pub fn clear(&mut self) {
        self.materialize().clear();
    }

    /// Returns true if the chain contains an element equal to `segment`.
    #[must_use]
    pub fn contains_segment(&self, segment: &Segment) -> bool {
        self.store
            .as_ref()
            .is_some_and(|chain| chain.contains_segment(segment))
    }

    /// Returns true if any single element's rendering contains `needle`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.store
            .as_ref()
            .is_some_and(|chain| chain.contains_text(needle))
    }

    /// Returns an iterator over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.as_slice().iter()
    }

    /// Returns a mutable iterator over the segments, materializing first.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Segment> {
        self.materialize().iter_mut()
    }

    /// Returns the segments as a slice (empty before materialization).
    #[must_use]
    pub fn as_slice(&self) -> &[Segment] {
        self.store.as_ref().map_or(&[], EagerChain::as_slice)
    }

    /// Returns a copy of the half-open index range `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `to > len` or `from > to`;
    /// on an un-materialized chain only `(0, 0)` succeeds.
    pub fn subsequence(&self, from: usize, to: usize) -> ChainResult<EagerChain> {
        match &self.store {
            Some(chain) => chain.subsequence(from, to),
            None => EagerChain::new().subsequence(from, to),
        }
    }

    /// Returns the concatenated rendering (empty before materialization).
    #[must_use]
    pub fn render(&self) -> String {
        self.store.as_ref().map_or_else(String::new, EagerChain::render)
    }

    /// Visits each content-bearing segment in order.
    pub fn for_each_content<F: FnMut(&Segment)>(&self, f: F) {
        if let Some(chain) = &self.store {
            chain.for_each_content(f);
        }
    }
}

impl PartialEq for LazyChain {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for LazyChain {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::PlainText;

    fn text(s: &str) -> Segment {
        Segment::from(PlainText::new(s))
    }

    #[test]
    fn lazy_reads_behave_as_empty_before_materialization() {
        let chain = LazyChain::new();
        assert!(!chain.is_materialized());
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
        assert_eq!(chain.render(), "");
        assert!(!chain.contains_text("x"));
        assert!(!chain.contains_segment(&text("x")));
        assert_eq!(chain.iter().count(), 0);
        assert!(chain.get(0).is_err());
    }

    #[test]
    fn lazy_reads_do_not_materialize() {
        let chain = LazyChain::new();
        let _ = chain.len();
        let _ = chain.render();
        let _ = chain.iter().count();
        let _ = chain.subsequence(0, 0);
        assert!(!chain.is_materialized());
    }

    #[test]
    fn lazy_mutation_materializes_once() {
        let mut chain = LazyChain::new();
        chain.push(text("a"));
        assert!(chain.is_materialized());
        chain.push(text("b"));
        assert_eq!(chain.render(), "ab");
    }

    #[test]
    fn lazy_clear_materializes_even_when_empty() {
        let mut chain = LazyChain::new();
        chain.clear();
        assert!(chain.is_materialized());
        assert!(chain.is_empty());
    }

    #[test]
    fn lazy_index_access_fails_before_materialization() {
        let chain = LazyChain::new();
        let err = chain.get(0).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ChainError::OutOfBounds { index: 0, len: 0 }
        ));
    }

    #[test]
    fn lazy_subsequence_of_empty_range_succeeds() {
        let chain = LazyChain::new();
        assert!(chain.subsequence(0, 0).unwrap().is_empty());
        assert!(chain.subsequence(0, 1).is_err());
    }

    #[test]
    fn lazy_equals_materialized_empty() {
        let fresh = LazyChain::new();
        let mut touched = LazyChain::new();
        touched.clear();
        assert_eq!(fresh, touched);
    }

    #[test]
    fn lazy_into_eager_preserves_elements() {
        let mut chain = LazyChain::new();
        chain.push(text("a"));
        let eager = chain.into_eager();
        assert_eq!(eager.render(), "a");

        let empty = LazyChain::new().into_eager();
        assert!(empty.is_empty());
    }
}
