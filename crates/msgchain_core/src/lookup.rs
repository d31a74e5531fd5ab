//! Typed first-match lookup over chains.
//!
//! Two lookup protocols coexist:
//!
//! - the generic path, parameterized by a payload type implementing
//!   [`SegmentContent`], which can refine any kind including
//!   [`MessageSource`];
//! - the key-indexed path ([`EagerChain::first_of_kind`]), which dispatches
//!   through a fixed table of recognized keys and resolves everything else
//!   to "not found". The table deliberately covers only seven kinds;
//!   `Source` is reachable through the generic path alone.

use crate::chain::{EagerChain, MessageChain};
use crate::error::{ChainError, ChainResult};
use crate::segment::{
    ImageRef, Mention, MentionAll, MessageSource, PlainText, QuoteReply, RichMarkup, Segment,
    SegmentKind, Sticker,
};

/// A payload type that can be refined out of a [`Segment`].
///
/// The `KIND`-to-type mapping is a bijection over the kinds the lookup
/// protocol recognizes: each payload type is associated with exactly one
/// kind, and `refine` succeeds exactly on segments of that kind.
pub trait SegmentContent: Sized {
    /// The kind discriminant associated with this payload type.
    const KIND: SegmentKind;

    /// Borrows the payload out of a segment of matching kind.
    fn refine(segment: &Segment) -> Option<&Self>;
}

impl SegmentContent for PlainText {
    const KIND: SegmentKind = SegmentKind::Plain;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::Plain(plain) => Some(plain),
            _ => None,
        }
    }
}

impl SegmentContent for Mention {
    const KIND: SegmentKind = SegmentKind::Mention;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::Mention(mention) => Some(mention),
            _ => None,
        }
    }
}

impl SegmentContent for MentionAll {
    const KIND: SegmentKind = SegmentKind::MentionAll;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::MentionAll(all) => Some(all),
            _ => None,
        }
    }
}

impl SegmentContent for ImageRef {
    const KIND: SegmentKind = SegmentKind::Image;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::Image(image) => Some(image),
            _ => None,
        }
    }
}

impl SegmentContent for Sticker {
    const KIND: SegmentKind = SegmentKind::Sticker;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::Sticker(sticker) => Some(sticker),
            _ => None,
        }
    }
}

impl SegmentContent for RichMarkup {
    const KIND: SegmentKind = SegmentKind::RichMarkup;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::RichMarkup(markup) => Some(markup),
            _ => None,
        }
    }
}

impl SegmentContent for QuoteReply {
    const KIND: SegmentKind = SegmentKind::QuoteReply;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::QuoteReply(quote) => Some(quote),
            _ => None,
        }
    }
}

impl SegmentContent for MessageSource {
    const KIND: SegmentKind = SegmentKind::Source;

    fn refine(segment: &Segment) -> Option<&Self> {
        match segment {
            Segment::Source(source) => Some(source),
            _ => None,
        }
    }
}

fn find_first<T: SegmentContent>(segments: &[Segment]) -> Option<&T> {
    segments.iter().find_map(T::refine)
}

fn find_matching<T: SegmentContent>(segments: &[Segment]) -> Option<&Segment> {
    segments.iter().find(|segment| T::refine(segment).is_some())
}

/// The fixed key-to-typed-lookup table. Keys outside the seven wired-up
/// entries resolve to `None`.
fn find_first_of_kind(segments: &[Segment], key: SegmentKind) -> Option<&Segment> {
    match key {
        SegmentKind::Plain => find_matching::<PlainText>(segments),
        SegmentKind::Mention => find_matching::<Mention>(segments),
        SegmentKind::MentionAll => find_matching::<MentionAll>(segments),
        SegmentKind::Image => find_matching::<ImageRef>(segments),
        SegmentKind::Sticker => find_matching::<Sticker>(segments),
        SegmentKind::RichMarkup => find_matching::<RichMarkup>(segments),
        SegmentKind::QuoteReply => find_matching::<QuoteReply>(segments),
        _ => None,
    }
}

impl EagerChain {
    /// Returns the first segment payload of type `T`, scanning in order.
    #[must_use]
    pub fn first_of<T: SegmentContent>(&self) -> Option<&T> {
        find_first(self.as_slice())
    }

    /// Returns the first segment payload of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotFound`] if no segment matches.
    pub fn first_of_or_err<T: SegmentContent>(&self) -> ChainResult<&T> {
        self.first_of::<T>()
            .ok_or(ChainError::not_found(T::KIND))
    }

    /// Returns true if any segment of type `T` is present.
    #[must_use]
    pub fn any_of<T: SegmentContent>(&self) -> bool {
        self.first_of::<T>().is_some()
    }

    /// Returns an iterator over every payload of type `T`, in order.
    pub fn segments_of<'a, T: SegmentContent + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.iter().filter_map(T::refine)
    }

    /// Returns the first segment whose kind matches `key`.
    ///
    /// Dispatches through a fixed table of recognized keys. A key outside
    /// the table resolves to `None` rather than an error, keeping the
    /// lookup total over the whole key space; that includes `Source`,
    /// which only the generic typed path covers.
    #[must_use]
    pub fn first_of_kind(&self, key: SegmentKind) -> Option<&Segment> {
        find_first_of_kind(self.as_slice(), key)
    }
}

impl MessageChain {
    /// Returns the first segment payload of type `T`, scanning in order.
    ///
    /// An un-materialized lazy chain finds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn first_of<T: SegmentContent>(&self) -> ChainResult<Option<&T>> {
        Ok(find_first(self.slice_or("first_of")?))
    }

    /// Returns the first segment payload of type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel and
    /// [`ChainError::NotFound`] if no segment matches.
    pub fn first_of_or_err<T: SegmentContent>(&self) -> ChainResult<&T> {
        self.first_of::<T>()?
            .ok_or(ChainError::not_found(T::KIND))
    }

    /// Returns true if any segment of type `T` is present.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    pub fn any_of<T: SegmentContent>(&self) -> ChainResult<bool> {
        Ok(self.first_of::<T>()?.is_some())
    }

    /// Returns the first segment whose kind matches `key`, through the
    /// fixed recognized-key table.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::InvalidOperation`] on the null sentinel.
    /// An unrecognized key is not an error; it resolves to `Ok(None)`.
    pub fn first_of_kind(&self, key: SegmentKind) -> ChainResult<Option<&Segment>> {
        Ok(find_first_of_kind(self.slice_or("first_of_kind")?, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::chain_of;

    fn sample() -> EagerChain {
        EagerChain::from(vec![
            Segment::from(QuoteReply::new(7)),
            Segment::from(Mention::new(1, "alice")),
            Segment::from("hello"),
            Segment::from(Mention::new(2, "bob")),
            Segment::from(MessageSource::new(10, 20, 30)),
        ])
    }

    #[test]
    fn first_of_returns_first_match_in_order() {
        let chain = sample();
        let mention = chain.first_of::<Mention>().unwrap();
        assert_eq!(mention.display(), "alice");

        let plain = chain.first_of::<PlainText>().unwrap();
        assert_eq!(plain.text(), "hello");
    }

    #[test]
    fn first_of_misses_yield_none() {
        let chain = sample();
        assert!(chain.first_of::<Sticker>().is_none());
    }

    #[test]
    fn first_of_or_err_signals_not_found() {
        let chain = sample();
        let err = chain.first_of_or_err::<ImageRef>().unwrap_err();
        assert!(matches!(
            err,
            ChainError::NotFound {
                kind: SegmentKind::Image
            }
        ));
    }

    #[test]
    fn any_of_is_existence_check() {
        let chain = sample();
        assert!(chain.any_of::<QuoteReply>());
        assert!(!chain.any_of::<MentionAll>());
    }

    #[test]
    fn segments_of_filters_in_order() {
        let chain = sample();
        let names: Vec<&str> = chain.segments_of::<Mention>().map(Mention::display).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn generic_path_reaches_source() {
        let chain = sample();
        let source = chain.first_of::<MessageSource>().unwrap();
        assert_eq!(source.message_id(), 10);
    }

    #[test]
    fn keyed_lookup_finds_recognized_kinds() {
        let chain = sample();
        let segment = chain.first_of_kind(SegmentKind::Mention).unwrap();
        assert_eq!(segment.render(), "@alice");
        assert!(chain.first_of_kind(SegmentKind::Sticker).is_none());
    }

    #[test]
    fn keyed_lookup_is_total_over_unrecognized_keys() {
        // Source is present in the chain and reachable through the generic
        // path, but the keyed table does not recognize it.
        let chain = sample();
        assert!(chain.any_of::<MessageSource>());
        assert!(chain.first_of_kind(SegmentKind::Source).is_none());
    }

    #[test]
    fn facade_lookup_delegates() {
        let chain = chain_of([
            Segment::from("hi"),
            Segment::from(Mention::new(1, "alice")),
        ]);
        assert_eq!(
            chain.first_of::<Mention>().unwrap().unwrap().display(),
            "alice"
        );
        assert!(chain.any_of::<PlainText>().unwrap());
        assert!(chain
            .first_of_kind(SegmentKind::Mention)
            .unwrap()
            .is_some());
    }

    #[test]
    fn facade_lookup_on_lazy_finds_nothing() {
        let chain = crate::chain::empty_chain();
        assert!(chain.first_of::<PlainText>().unwrap().is_none());
        assert!(!chain.any_of::<PlainText>().unwrap());
        assert!(chain.first_of_kind(SegmentKind::Plain).unwrap().is_none());
    }

    #[test]
    fn facade_lookup_on_null_fails() {
        let chain = MessageChain::null();
        assert!(chain.first_of::<PlainText>().is_err());
        assert!(chain.any_of::<PlainText>().is_err());
        assert!(chain.first_of_kind(SegmentKind::Plain).is_err());

        let err = chain.first_of_or_err::<PlainText>().unwrap_err();
        assert!(matches!(err, ChainError::InvalidOperation { .. }));
    }

    #[test]
    fn facade_first_of_or_err_not_found() {
        let chain = chain_of([Segment::from("hi")]);
        let err = chain.first_of_or_err::<Mention>().unwrap_err();
        assert!(matches!(
            err,
            ChainError::NotFound {
                kind: SegmentKind::Mention
            }
        ));
    }
}
