//! Chain variants, the shared facade, and composition.
//!
//! A message chain comes in three variants, modeled as one closed sum:
//!
//! - [`EagerChain`] owns real backing storage;
//! - [`LazyChain`] stays empty until first mutation;
//! - the null sentinel represents "no chain" and fails loudly on every
//!   structural accessor.
//!
//! [`MessageChain`] is the facade over the three. Composition goes through
//! [`MessageChain::followed_by`] and the free function [`concat`]; both
//! flatten chain tails so a chain never contains another chain.

pub mod eager;
pub mod lazy;

pub use eager::EagerChain;
pub use lazy::LazyChain;

use std::fmt;

use crate::error::{ChainError, ChainResult};
use crate::segment::{
    ImageRef, Mention, MentionAll, MessageSource, PlainText, QuoteReply, RichMarkup, Segment,
    Sticker,
};

/// A composed message: an ordered, mutable sequence of segments.
///
/// # Invariants
///
/// - No element is itself a chain (composition flattens).
/// - A singleton-only segment may only be a chain's sole original element,
///   never the result of an append; only the merge path enforces this.
/// - Equality is element-wise sequence equality across the eager and lazy
///   variants; the null sentinel equals only itself.
#[derive(Debug, Clone)]
pub enum MessageChain {
    /// A chain with real backing storage.
    Eager(EagerChain),
    /// A chain that allocates its backing storage on first mutation.
    Lazy(LazyChain),
    /// The "no chain" sentinel. Never data-bearing and never mutated;
    /// every structural accessor fails with an invalid-operation error.
    Null,
}

fn null_access(operation: &str) -> ChainError {
    ChainError::invalid_operation(operation)
}

impl MessageChain {
    /// Creates an empty chain in the lazy form.
    #[must_use]
    pub fn empty() -> Self {
        Self::Lazy(LazyChain::new())
    }

    /// Creates an empty chain with a capacity hint.
    ///
    /// A hint of `0` yields the lazy form without pre-allocating; anything
    /// else reserves eagerly.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            Self::empty()
        } else {
            Self::Eager(EagerChain::with_capacity(capacity))
        }
    }

    /// Creates a chain holding a single segment.
    pub fn of(segment: impl Into<Segment>) -> Self {
        Self::Eager(EagerChain::of(segment))
    }

    /// Returns the null sentinel.
    ///
    /// The sentinel is a fieldless marker: every value of it is identical
    /// and immutable, so it behaves as one process-wide instance.
    #[must_use]
    pub fn null() -> Self {
        Self::Null
    }

    /// Returns true if this is the null sentinel.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the segments as a slice.
    ///
    /// An un-materialized lazy chain yields an empty slice.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn segments(&self) -> ChainResult<&[Segment]> {
        self.slice_or("segments")
    }

    pub(crate) fn slice_or(&self, operation: &str) -> ChainResult<&[Segment]> {
        self.slice_opt().ok_or_else(|| null_access(operation))
    }

    fn slice_opt(&self) -> Option<&[Segment]> {
        match self {
            Self::Eager(chain) => Some(chain.as_slice()),
            Self::Lazy(lazy) => Some(lazy.as_slice()),
            Self::Null => None,
        }
    }

    /// Returns the number of segments.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn len(&self) -> ChainResult<usize> {
        Ok(self.slice_or("len")?.len())
    }

    /// Returns true if the chain holds no segments.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn is_empty(&self) -> ChainResult<bool> {
        Ok(self.slice_or("is_empty")?.is_empty())
    }

    /// Returns the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel and
    /// [`ChainError::OutOfBounds`] for an out-of-range index.
    pub fn get(&self, index: usize) -> ChainResult<&Segment> {
        match self {
            Self::Eager(chain) => chain.get(index),
            Self::Lazy(lazy) => lazy.get(index),
            Self::Null => Err(null_access("get")),
        }
    }

    /// Replaces the segment at `index`, returning the previous element.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel and
    /// [`ChainError::OutOfBounds`] for an out-of-range index.
    pub fn set(&mut self, index: usize, segment: impl Into<Segment>) -> ChainResult<Segment> {
        match self {
            Self::Eager(chain) => chain.set(index, segment),
            Self::Lazy(lazy) => lazy.set(index, segment),
            Self::Null => Err(null_access("set")),
        }
    }

    /// Inserts a segment at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel and
    /// [`ChainError::OutOfBounds`] if `index > len`.
    pub fn insert(&mut self, index: usize, segment: impl Into<Segment>) -> ChainResult<()> {
        match self {
            Self::Eager(chain) => chain.insert(index, segment),
            Self::Lazy(lazy) => lazy.insert(index, segment),
            Self::Null => Err(null_access("insert")),
        }
    }

    /// Removes and returns the segment at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel and
    /// [`ChainError::OutOfBounds`] for an out-of-range index.
    pub fn remove(&mut self, index: usize) -> ChainResult<Segment> {
        match self {
            Self::Eager(chain) => chain.remove(index),
            Self::Lazy(lazy) => lazy.remove(index),
            Self::Null => Err(null_access("remove")),
        }
    }

    /// Appends a segment at the end of the chain.
    ///
    /// This is plain list mutation; it does not enforce the singleton-only
    /// placement rule (only the merge path does).
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn push(&mut self, segment: impl Into<Segment>) -> ChainResult<()> {
        match self {
            Self::Eager(chain) => {
                chain.push(segment);
                Ok(())
            }
            Self::Lazy(lazy) => {
                lazy.push(segment);
                Ok(())
            }
            Self::Null => Err(null_access("push")),
        }
    }

    /// Appends every segment from the iterator, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn extend<I: IntoIterator<Item = Segment>>(&mut self, segments: I) -> ChainResult<()> {
        match self {
            Self::Eager(chain) => {
                chain.extend(segments);
                Ok(())
            }
            Self::Lazy(lazy) => {
                lazy.materialize().extend(segments);
                Ok(())
            }
            Self::Null => Err(null_access("extend")),
        }
    }

    /// Retains only the segments for which the predicate holds.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn retain(&mut self, f: impl FnMut(&Segment) -> bool) -> ChainResult<()> {
        match self {
            Self::Eager(chain) => {
                chain.retain(f);
                Ok(())
            }
            Self::Lazy(lazy) => {
                lazy.retain(f);
                Ok(())
            }
            Self::Null => Err(null_access("retain")),
        }
    }

    /// Removes all segments.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn clear(&mut self) -> ChainResult<()> {
        match self {
            Self::Eager(chain) => {
                chain.clear();
                Ok(())
            }
            Self::Lazy(lazy) => {
                lazy.clear();
                Ok(())
            }
            Self::Null => Err(null_access("clear")),
        }
    }

    /// Returns true if the chain contains an element equal to `segment`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn contains_segment(&self, segment: &Segment) -> ChainResult<bool> {
        Ok(self.slice_or("contains_segment")?.contains(segment))
    }

    /// Returns true if any single element's rendering contains `needle`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn contains_text(&self, needle: &str) -> ChainResult<bool> {
        match self {
            Self::Eager(chain) => Ok(chain.contains_text(needle)),
            Self::Lazy(lazy) => Ok(lazy.contains_text(needle)),
            Self::Null => Err(null_access("contains_text")),
        }
    }

    /// Returns an iterator over the segments in order.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn iter(&self) -> ChainResult<std::slice::Iter<'_, Segment>> {
        Ok(self.slice_or("iter")?.iter())
    }

    /// Returns a copy of the half-open index range `[from, to)` as a plain
    /// eager chain.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel and
    /// [`ChainError::OutOfBounds`] for an invalid range.
    pub fn subsequence(&self, from: usize, to: usize) -> ChainResult<EagerChain> {
        match self {
            Self::Eager(chain) => chain.subsequence(from, to),
            Self::Lazy(lazy) => lazy.subsequence(from, to),
            Self::Null => Err(null_access("subsequence")),
        }
    }

    /// Returns the textual rendering of the chain.
    ///
    /// This is total over all variants: the null sentinel renders as the
    /// literal `"null"`, an un-materialized lazy chain as the empty string.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Appends a message after this chain.
    ///
    /// A segment tail is appended directly; a chain tail contributes its
    /// elements in order (flattening). The receiver is returned for
    /// chained composition. A lazy receiver always materializes, since
    /// appending necessarily mutates. The null sentinel is the one
    /// exception: it promotes the tail to a chain and is itself never
    /// mutated and never part of the result.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::ConstraintViolation`] if any incoming element
    /// is singleton-only.
    pub fn followed_by(self, tail: impl Into<Message>) -> ChainResult<MessageChain> {
        match self {
            Self::Eager(chain) => chain.followed_by(tail).map(Self::Eager),
            Self::Lazy(lazy) => lazy.into_eager().followed_by(tail).map(Self::Eager),
            Self::Null => Ok(tail.into().to_chain()),
        }
    }

    /// Visits each content-bearing segment in order, without allocating.
    ///
    /// A segment qualifies if its kind is content-bearing, except that a
    /// mention immediately preceded by a quote reply is suppressed.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn for_each_content<F: FnMut(&Segment)>(&self, f: F) -> ChainResult<()> {
        match self {
            Self::Eager(chain) => {
                chain.for_each_content(f);
                Ok(())
            }
            Self::Lazy(lazy) => {
                lazy.for_each_content(f);
                Ok(())
            }
            Self::Null => Err(null_access("for_each_content")),
        }
    }

    /// Consumes the chain, returning its segments.
    ///
    /// The null sentinel and an un-materialized lazy chain contribute
    /// nothing.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        match self {
            Self::Eager(chain) => chain.into_segments(),
            Self::Lazy(lazy) => lazy.into_eager().into_segments(),
            Self::Null => Vec::new(),
        }
    }
}

impl fmt::Display for MessageChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager(chain) => chain.fmt(f),
            Self::Lazy(lazy) => {
                for segment in lazy.as_slice() {
                    segment.fmt(f)?;
                }
                Ok(())
            }
            Self::Null => f.write_str("null"),
        }
    }
}

impl PartialEq for MessageChain {
    fn eq(&self, other: &Self) -> bool {
        match (self.slice_opt(), other.slice_opt()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl Eq for MessageChain {}

impl Default for MessageChain {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<EagerChain> for MessageChain {
    fn from(chain: EagerChain) -> Self {
        Self::Eager(chain)
    }
}

impl From<LazyChain> for MessageChain {
    fn from(lazy: LazyChain) -> Self {
        Self::Lazy(lazy)
    }
}

impl From<Vec<Segment>> for MessageChain {
    fn from(segments: Vec<Segment>) -> Self {
        chain_of(segments)
    }
}

impl FromIterator<Segment> for MessageChain {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        chain_of(iter)
    }
}

/// A message-like value: either one segment or a whole chain.
///
/// Composition operations accept this union so a tail can be supplied as
/// a bare segment, a payload type, or another chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// One segment.
    Single(Segment),
    /// A chain of segments.
    Chain(MessageChain),
}

impl Message {
    /// Returns the textual rendering of this message.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Single(segment) => segment.render(),
            Self::Chain(chain) => chain.render(),
        }
    }
}

impl From<Segment> for Message {
    fn from(segment: Segment) -> Self {
        Self::Single(segment)
    }
}

impl From<MessageChain> for Message {
    fn from(chain: MessageChain) -> Self {
        Self::Chain(chain)
    }
}

impl From<EagerChain> for Message {
    fn from(chain: EagerChain) -> Self {
        Self::Chain(MessageChain::Eager(chain))
    }
}

impl From<LazyChain> for Message {
    fn from(lazy: LazyChain) -> Self {
        Self::Chain(MessageChain::Lazy(lazy))
    }
}

impl From<PlainText> for Message {
    fn from(plain: PlainText) -> Self {
        Self::Single(plain.into())
    }
}

impl From<Mention> for Message {
    fn from(mention: Mention) -> Self {
        Self::Single(mention.into())
    }
}

impl From<MentionAll> for Message {
    fn from(all: MentionAll) -> Self {
        Self::Single(all.into())
    }
}

impl From<ImageRef> for Message {
    fn from(image: ImageRef) -> Self {
        Self::Single(image.into())
    }
}

impl From<Sticker> for Message {
    fn from(sticker: Sticker) -> Self {
        Self::Single(sticker.into())
    }
}

impl From<RichMarkup> for Message {
    fn from(markup: RichMarkup) -> Self {
        Self::Single(markup.into())
    }
}

impl From<QuoteReply> for Message {
    fn from(quote: QuoteReply) -> Self {
        Self::Single(quote.into())
    }
}

impl From<MessageSource> for Message {
    fn from(source: MessageSource) -> Self {
        Self::Single(source.into())
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Single(text.into())
    }
}

/// Conversion of a message-like value into a chain.
pub trait ToChain {
    /// Converts this value into a chain.
    ///
    /// For a value that already is a chain this is the identity (the same
    /// instance, no copy); for a segment it is a single-element wrap.
    fn to_chain(self) -> MessageChain;
}

impl ToChain for MessageChain {
    fn to_chain(self) -> MessageChain {
        self
    }
}

impl ToChain for Segment {
    fn to_chain(self) -> MessageChain {
        MessageChain::of(self)
    }
}

impl ToChain for Message {
    fn to_chain(self) -> MessageChain {
        match self {
            Message::Single(segment) => segment.to_chain(),
            Message::Chain(chain) => chain,
        }
    }
}

impl ToChain for EagerChain {
    fn to_chain(self) -> MessageChain {
        MessageChain::Eager(self)
    }
}

impl ToChain for LazyChain {
    fn to_chain(self) -> MessageChain {
        MessageChain::Lazy(self)
    }
}

impl ToChain for Vec<Segment> {
    fn to_chain(self) -> MessageChain {
        chain_of(self)
    }
}

/// Creates an empty chain in the lazy form.
#[must_use]
pub fn empty_chain() -> MessageChain {
    MessageChain::empty()
}

/// Creates a chain from an ordered collection of segments.
///
/// Accepts arrays, vectors, and any other ordered iterable; an empty input
/// yields an empty chain. Like every bulk constructor this does not
/// validate singleton-only placement; the elements are taken as supplied.
pub fn chain_of<I>(segments: I) -> MessageChain
where
    I: IntoIterator,
    I::Item: Into<Segment>,
{
    let segments: Vec<Segment> = segments.into_iter().map(Into::into).collect();
    if segments.is_empty() {
        MessageChain::empty()
    } else {
        MessageChain::Eager(EagerChain::from(segments))
    }
}

/// Composes two message-like values into one chain.
///
/// - chain + chain: the left chain absorbs the right one's elements
///   (flattened) without allocating a new chain;
/// - segment + segment: a new two-element chain;
/// - mixed: the segment is folded into the chain on whichever side,
///   preserving order.
///
/// # Errors
///
/// Returns [`ChainError::ConstraintViolation`] if the composition would
/// append a singleton-only segment.
pub fn concat(lhs: impl Into<Message>, rhs: impl Into<Message>) -> ChainResult<MessageChain> {
    lhs.into().to_chain().followed_by(rhs)
}
