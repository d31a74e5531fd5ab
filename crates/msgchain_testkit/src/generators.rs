//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random segments and chains that
//! maintain the placement invariants tests care about.

use msgchain_core::{
    EagerChain, ImageRef, Mention, MentionAll, MessageSource, PlainText, QuoteReply, RichMarkup,
    Segment, SegmentKind, Sticker,
};
use proptest::prelude::*;

/// Strategy for generating plain text segments.
pub fn plain_text_strategy() -> impl Strategy<Value = Segment> {
    prop::string::string_regex("[a-zA-Z0-9 ]{0,16}")
        .expect("Invalid regex")
        .prop_map(|text| Segment::from(PlainText::new(text)))
}

/// Strategy for generating mention segments.
pub fn mention_strategy() -> impl Strategy<Value = Segment> {
    (
        any::<u64>(),
        prop::string::string_regex("[a-z]{1,8}").expect("Invalid regex"),
    )
        .prop_map(|(target, display)| Segment::from(Mention::new(target, display)))
}

/// Strategy for generating quote reply segments.
pub fn quote_strategy() -> impl Strategy<Value = Segment> {
    any::<u64>().prop_map(|id| Segment::from(QuoteReply::new(id)))
}

/// Strategy for generating singleton-only provenance segments.
pub fn source_strategy() -> impl Strategy<Value = Segment> {
    (any::<u64>(), any::<u64>(), any::<i64>())
        .prop_map(|(message_id, sender_id, ts)| {
            Segment::from(MessageSource::new(message_id, sender_id, ts))
        })
}

/// Strategy for generating any segment that is legal to append.
///
/// Covers every kind except the singleton-only provenance segment.
pub fn appendable_segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        plain_text_strategy(),
        mention_strategy(),
        Just(Segment::from(MentionAll)),
        prop::string::string_regex("[a-z0-9-]{1,12}")
            .expect("Invalid regex")
            .prop_map(|id| Segment::from(ImageRef::new(id))),
        any::<u32>().prop_map(|id| Segment::from(Sticker::new(id))),
        prop::string::string_regex("<[a-z]{1,8}/>")
            .expect("Invalid regex")
            .prop_map(|xml| Segment::from(RichMarkup::new(xml))),
        quote_strategy(),
    ]
}

/// Strategy for generating any segment, including singleton-only ones.
pub fn any_segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        7 => appendable_segment_strategy(),
        1 => source_strategy(),
    ]
}

/// Strategy for generating every segment kind.
pub fn segment_kind_strategy() -> impl Strategy<Value = SegmentKind> {
    prop_oneof![
        Just(SegmentKind::Plain),
        Just(SegmentKind::Mention),
        Just(SegmentKind::MentionAll),
        Just(SegmentKind::Image),
        Just(SegmentKind::Sticker),
        Just(SegmentKind::RichMarkup),
        Just(SegmentKind::QuoteReply),
        Just(SegmentKind::Source),
    ]
}

/// Strategy for generating eager chains of appendable segments.
pub fn eager_chain_strategy(max_len: usize) -> impl Strategy<Value = EagerChain> {
    prop::collection::vec(appendable_segment_strategy(), 0..=max_len).prop_map(EagerChain::from)
}
