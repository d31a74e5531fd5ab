//! Ready-made segments and chains for tests.

use msgchain_core::{
    chain_of, ImageRef, Mention, MentionAll, MessageChain, MessageSource, PlainText, QuoteReply,
    RichMarkup, Segment, Sticker,
};

/// A plain text segment.
#[must_use]
pub fn text(content: &str) -> Segment {
    Segment::from(PlainText::new(content))
}

/// A mention segment with the given target id and display name.
#[must_use]
pub fn mention(target: u64, display: &str) -> Segment {
    Segment::from(Mention::new(target, display))
}

/// A mention-all segment.
#[must_use]
pub fn mention_all() -> Segment {
    Segment::from(MentionAll)
}

/// An image reference segment.
#[must_use]
pub fn image(image_id: &str) -> Segment {
    Segment::from(ImageRef::new(image_id))
}

/// A sticker segment.
#[must_use]
pub fn sticker(sticker_id: u32) -> Segment {
    Segment::from(Sticker::new(sticker_id))
}

/// A rich markup segment.
#[must_use]
pub fn markup(content: &str) -> Segment {
    Segment::from(RichMarkup::new(content))
}

/// A quote reply segment.
#[must_use]
pub fn quote(quoted_message_id: u64) -> Segment {
    Segment::from(QuoteReply::new(quoted_message_id))
}

/// A singleton-only provenance segment.
#[must_use]
pub fn source(message_id: u64, sender_id: u64) -> Segment {
    Segment::from(MessageSource::new(message_id, sender_id, 1_700_000_000))
}

/// A chain exercising every placement rule at once: a quote followed by a
/// suppressed mention, then visible content.
#[must_use]
pub fn mixed_chain() -> MessageChain {
    chain_of([
        quote(100),
        mention(1, "alice"),
        text("hello "),
        mention_all(),
        image("img-1"),
    ])
}
