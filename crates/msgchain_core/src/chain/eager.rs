//! Eager chain: the concrete ordered, mutable segment storage.

use std::fmt;

use tracing::{debug, trace};

use crate::chain::Message;
use crate::error::{ChainError, ChainResult};
use crate::segment::{Segment, SegmentKind};

/// An ordered, mutable sequence of segments with real backing storage.
///
/// `EagerChain` is a thin owning wrapper around a `Vec<Segment>`: the chain
/// exclusively owns its backing sequence and the segments within it.
///
/// # Invariants
///
/// - No element is itself a chain; composing a chain into another flattens
///   it (see [`EagerChain::followed_by`]).
/// - Ordering is insertion order and duplicates are permitted; equality is
///   element-wise sequence equality.
/// - Only the merge path enforces the singleton-only placement rule. Bulk
///   constructors accept any element sequence as supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EagerChain {
    segments: Vec<Segment>,
}

impl EagerChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty chain with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            segments: Vec::with_capacity(capacity),
        }
    }

    /// Creates a chain holding a single segment.
    pub fn of(segment: impl Into<Segment>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Returns the number of segments in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the chain holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> ChainResult<&Segment> {
        self.segments
            .get(index)
            .ok_or(ChainError::out_of_bounds(index, self.segments.len()))
    }

    /// Returns a mutable reference to the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> ChainResult<&mut Segment> {
        let len = self.segments.len();
        self.segments
            .get_mut(index)
            .ok_or(ChainError::out_of_bounds(index, len))
    }

    /// Replaces the segment at `index`, returning the previous element.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, segment: impl Into<Segment>) -> ChainResult<Segment> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, segment.into()))
    }

    /// Inserts a segment at `index`, shifting later elements right.
    ///
    /// `index` may equal `len`, in which case this behaves like a push.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index > len`.
    pub fn insert(&mut self, index: usize, segment: impl Into<Segment>) -> ChainResult<()> {
        if index > self.segments.len() {
            return Err(ChainError::out_of_bounds(index, self.segments.len()));
        }
        self.segments.insert(index, segment.into());
        Ok(())
    }

    /// Removes and returns the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> ChainResult<Segment> {
        if index >= self.segments.len() {
            return Err(ChainError::out_of_bounds(index, self.segments.len()));
        }
        Ok(self.segments.remove(index))
    }

    /// Appends a segment at the end of the chain.
    ///
    /// This is a plain list mutation and does not enforce the
    /// singleton-only placement rule; only [`EagerChain::followed_by`] does.
    pub fn push(&mut self, segment: impl Into<Segment>) {
        self.segments.push(segment.into());
    }

    /// Retains only the segments for which the predicate holds.
    pub fn retain(&mut self, f: impl FnMut(&Segment) -> bool) {
        self.segments.retain(f);
    }

    /// Removes all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Returns true if the chain contains an element equal to `segment`.
    #[must_use]
    pub fn contains_segment(&self, segment: &Segment) -> bool {
        self.segments.contains(segment)
    }

    /// Returns true if any single element's rendering contains `needle`.
    ///
    /// This is a per-element substring test, not a check across element
    /// boundaries of the concatenated rendering.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.render().contains(needle))
    }

    /// Returns an iterator over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns a mutable iterator over the segments in order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Segment> {
        self.segments.iter_mut()
    }

    /// Returns the segments as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the chain, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Returns a copy of the half-open index range `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::OutOfBounds`] if `to > len` or `from > to`.
    pub fn subsequence(&self, from: usize, to: usize) -> ChainResult<EagerChain> {
        let len = self.segments.len();
        if to > len {
            return Err(ChainError::out_of_bounds(to, len));
        }
        if from > to {
            return Err(ChainError::out_of_bounds(from, len));
        }
        Ok(Self {
            segments: self.segments[from..to].to_vec(),
        })
    }

    /// Returns the concatenation of every element's rendering, in order,
    /// with no separator.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Appends a message after this chain, returning the receiver.
    ///
    /// A segment tail is appended directly; a chain tail contributes its
    /// elements in order, so the result never contains a nested chain.
    /// The incoming elements are validated before any is appended: a failed
    /// merge leaves the receiver untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::ConstraintViolation`] if any incoming element
    /// is singleton-only. A singleton-only segment may never be the result
    /// of an append, regardless of the receiver's current size.
    pub fn followed_by(mut self, tail: impl Into<Message>) -> ChainResult<Self> {
        self.append(tail)?;
        Ok(self)
    }

    /// In-place form of [`EagerChain::followed_by`].
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::ConstraintViolation`] if any incoming element
    /// is singleton-only; the receiver is left untouched on failure.
    pub fn append(&mut self, tail: impl Into<Message>) -> ChainResult<()> {
        self.absorb(tail.into())
    }

    fn absorb(&mut self, tail: Message) -> ChainResult<()> {
        match tail {
            Message::Single(segment) => {
                check_appendable(&segment)?;
                self.segments.push(segment);
            }
            Message::Chain(chain) => {
                let incoming = chain.into_segments();
                for segment in &incoming {
                    check_appendable(segment)?;
                }
                trace!(count = incoming.len(), "flattening chain into receiver");
                self.segments.extend(incoming);
            }
        }
        Ok(())
    }

    /// Visits each content-bearing segment in order, without allocating.
    ///
    /// A segment qualifies if its kind is in the content set, except that a
    /// mention immediately preceded by a quote reply is suppressed.
    pub fn for_each_content<F: FnMut(&Segment)>(&self, mut f: F) {
        let mut previous: Option<&Segment> = None;
        for segment in &self.segments {
            let suppressed = segment.kind() == SegmentKind::Mention
                && previous.is_some_and(|prev| prev.kind() == SegmentKind::QuoteReply);
            if segment.is_content() && !suppressed {
                f(segment);
            }
            previous = Some(segment);
        }
    }
}

fn check_appendable(segment: &Segment) -> ChainResult<()> {
    if segment.is_singleton_only() {
        debug!(kind = ?segment.kind(), "rejecting singleton-only append");
        return Err(ChainError::constraint_violation(segment.kind()));
    }
    Ok(())
}

impl fmt::Display for EagerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            segment.fmt(f)?;
        }
        Ok(())
    }
}

impl Extend<Segment> for EagerChain {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        self.segments.extend(iter);
    }
}

impl From<Vec<Segment>> for EagerChain {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for EagerChain {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for EagerChain {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a EagerChain {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MessageChain;
    use crate::segment::{Mention, MessageSource, PlainText, QuoteReply};

    fn text(s: &str) -> Segment {
        Segment::from(s)
    }

    #[test]
    fn eager_new_is_empty() {
        let chain = EagerChain::new();
        assert_eq!(chain.len(), 0);
        assert!(chain.is_empty());
        assert_eq!(chain.render(), "");
    }

    #[test]
    fn eager_push_preserves_insertion_order() {
        let mut chain = EagerChain::new();
        chain.push(text("a"));
        chain.push(text("b"));
        chain.push(text("a"));

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.render(), "aba");
    }

    #[test]
    fn eager_get_out_of_range_fails() {
        let chain = EagerChain::of(text("a"));
        let err = chain.get(1).unwrap_err();
        assert!(matches!(err, ChainError::OutOfBounds { index: 1, len: 1 }));
    }

    #[test]
    fn eager_set_returns_replaced_element() {
        let mut chain = EagerChain::of(text("a"));
        let old = chain.set(0, text("b")).unwrap();
        assert_eq!(old, text("a"));
        assert_eq!(chain.render(), "b");
    }

    #[test]
    fn eager_insert_at_len_appends() {
        let mut chain = EagerChain::of(text("a"));
        chain.insert(1, text("b")).unwrap();
        assert_eq!(chain.render(), "ab");

        let err = chain.insert(3, text("c")).unwrap_err();
        assert!(matches!(err, ChainError::OutOfBounds { index: 3, len: 2 }));
    }

    #[test]
    fn eager_remove_returns_element() {
        let mut chain = EagerChain::from(vec![text("a"), text("b")]);
        assert_eq!(chain.remove(0).unwrap(), text("a"));
        assert_eq!(chain.render(), "b");
        assert!(chain.remove(5).is_err());
    }

    #[test]
    fn eager_retain_and_clear() {
        let mut chain = EagerChain::from(vec![
            text("a"),
            Segment::from(crate::segment::MentionAll),
            text("b"),
        ]);
        chain.retain(|segment| segment.kind() == SegmentKind::Plain);
        assert_eq!(chain.len(), 2);
        chain.clear();
        assert!(chain.is_empty());
    }

    #[test]
    fn eager_contains_segment_is_membership() {
        let chain = EagerChain::from(vec![text("a"), text("b")]);
        assert!(chain.contains_segment(&text("a")));
        assert!(!chain.contains_segment(&text("c")));
    }

    #[test]
    fn eager_contains_text_checks_single_elements() {
        let chain = EagerChain::from(vec![text("hello"), text("world")]);
        assert!(chain.contains_text("ell"));
        assert!(chain.contains_text("world"));
        // The concatenated rendering is "helloworld", but the substring
        // spans an element boundary, so it is not found.
        assert!(!chain.contains_text("oworl"));
    }

    #[test]
    fn eager_subsequence_copies_half_open_range() {
        let chain = EagerChain::from(vec![text("a"), text("b"), text("c")]);
        let sub = chain.subsequence(1, 3).unwrap();
        assert_eq!(sub.render(), "bc");

        let empty = chain.subsequence(2, 2).unwrap();
        assert!(empty.is_empty());

        assert!(chain.subsequence(0, 4).is_err());
        assert!(chain.subsequence(2, 1).is_err());
    }

    #[test]
    fn eager_render_concatenates_without_separator() {
        let chain = EagerChain::from(vec![text("a"), text("b"), text("c")]);
        assert_eq!(chain.render(), "abc");
    }

    #[test]
    fn followed_by_appends_single_segment() {
        let chain = EagerChain::of(text("a"))
            .followed_by(text("b"))
            .unwrap();
        assert_eq!(chain.render(), "ab");
    }

    #[test]
    fn followed_by_flattens_chain_tail() {
        let tail = MessageChain::from_iter([text("x"), text("y")]);
        let chain = EagerChain::of(text("a")).followed_by(tail).unwrap();

        assert_eq!(chain.len(), 3);
        assert_eq!(chain.render(), "axy");
        for segment in chain.iter() {
            assert_eq!(segment.kind(), SegmentKind::Plain);
        }
    }

    #[test]
    fn followed_by_rejects_singleton_only_into_empty_chain() {
        let source = MessageSource::new(1, 2, 3);
        let err = EagerChain::new().followed_by(source).unwrap_err();
        assert!(matches!(
            err,
            ChainError::ConstraintViolation {
                kind: SegmentKind::Source
            }
        ));
    }

    #[test]
    fn failed_merge_leaves_receiver_untouched() {
        let tail = MessageChain::from_iter([
            text("x"),
            Segment::from(MessageSource::new(1, 2, 3)),
        ]);
        let chain = EagerChain::of(text("a"));
        let err = chain.clone().followed_by(tail).unwrap_err();

        assert!(matches!(err, ChainError::ConstraintViolation { .. }));
        // Same merge applied in place: nothing is appended on failure.
        let mut receiver = chain;
        assert!(receiver.append(MessageSource::new(1, 2, 3)).is_err());
        assert_eq!(receiver.render(), "a");
        assert_eq!(receiver.len(), 1);
    }

    #[test]
    fn bulk_constructors_accept_singleton_only_anywhere() {
        // Construction is a trusted bypass; only the merge path enforces
        // singleton-only placement.
        let chain = EagerChain::from(vec![
            text("a"),
            Segment::from(MessageSource::new(1, 2, 3)),
            text("b"),
        ]);
        assert_eq!(chain.len(), 3);
    }

    #[test]
    fn for_each_content_suppresses_mention_after_quote() {
        let chain = EagerChain::from(vec![
            Segment::from(QuoteReply::new(9)),
            Segment::from(Mention::new(1, "alice")),
            Segment::from(PlainText::new("hi")),
        ]);

        let mut seen = Vec::new();
        chain.for_each_content(|segment| seen.push(segment.render()));
        assert_eq!(seen, vec!["hi"]);
    }

    #[test]
    fn for_each_content_keeps_mention_without_preceding_quote() {
        let chain = EagerChain::from(vec![
            Segment::from(Mention::new(1, "alice")),
            Segment::from(PlainText::new("hi")),
        ]);

        let mut seen = Vec::new();
        chain.for_each_content(|segment| seen.push(segment.render()));
        assert_eq!(seen, vec!["@alice", "hi"]);
    }

    #[test]
    fn for_each_content_skips_quote_and_source() {
        let chain = EagerChain::from(vec![
            Segment::from(MessageSource::new(1, 2, 3)),
            Segment::from(QuoteReply::new(9)),
            Segment::from(PlainText::new("hi")),
        ]);

        let mut seen = Vec::new();
        chain.for_each_content(|segment| seen.push(segment.render()));
        assert_eq!(seen, vec!["hi"]);
    }

    #[test]
    fn equality_is_element_wise() {
        let a = EagerChain::from(vec![text("a"), text("b")]);
        let b = EagerChain::from(vec![text("a"), text("b")]);
        let c = EagerChain::from(vec![text("b"), text("a")]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
