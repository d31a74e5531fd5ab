//! Message segments: the atomic units of message content.
//!
//! A [`Segment`] is one element of a message chain. Every segment reports a
//! stable kind discriminant ([`SegmentKind`]) and a human-readable rendering.
//! Two kinds carry extra placement rules:
//!
//! - [`MessageSource`] is **singleton-only**: it may only be the sole
//!   original element of a chain, never the result of an append.
//! - [`Mention`] is **adjacency-sensitive**: it is excluded from content
//!   iteration when it immediately follows a [`QuoteReply`].

mod kinds;

pub use kinds::{
    ImageRef, Mention, MentionAll, MessageSource, PlainText, QuoteReply, RichMarkup, Sticker,
};

use std::fmt;

/// The kind discriminant of a segment.
///
/// Also serves as the lookup key for key-indexed retrieval
/// ([`crate::chain::EagerChain::first_of_kind`]). The key space is open
/// (`non_exhaustive`), but only a fixed set of keys is wired into the
/// key-indexed lookup table; unrecognized keys resolve to "not found"
/// rather than an error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Plain text.
    Plain,
    /// A mention of one member.
    Mention,
    /// A mention of every member.
    MentionAll,
    /// An image reference.
    Image,
    /// A sticker.
    Sticker,
    /// Rich-content markup.
    RichMarkup,
    /// A quoted reply to an earlier message.
    QuoteReply,
    /// Provenance metadata for the message.
    Source,
}

/// One atomic unit of message content.
///
/// The variant set is closed: a chain never stores another chain as an
/// element (composition flattens), so `Segment` has no chain variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Plain text.
    Plain(PlainText),
    /// A mention of one member.
    Mention(Mention),
    /// A mention of every member.
    MentionAll(MentionAll),
    /// An image reference.
    Image(ImageRef),
    /// A sticker.
    Sticker(Sticker),
    /// Rich-content markup.
    RichMarkup(RichMarkup),
    /// A quoted reply to an earlier message.
    QuoteReply(QuoteReply),
    /// Provenance metadata for the message.
    Source(MessageSource),
}

impl Segment {
    /// Returns the kind discriminant of this segment.
    #[must_use]
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Plain(_) => SegmentKind::Plain,
            Segment::Mention(_) => SegmentKind::Mention,
            Segment::MentionAll(_) => SegmentKind::MentionAll,
            Segment::Image(_) => SegmentKind::Image,
            Segment::Sticker(_) => SegmentKind::Sticker,
            Segment::RichMarkup(_) => SegmentKind::RichMarkup,
            Segment::QuoteReply(_) => SegmentKind::QuoteReply,
            Segment::Source(_) => SegmentKind::Source,
        }
    }

    /// Returns true if this segment may only exist as a chain's sole
    /// original element and never as the result of an append.
    #[must_use]
    pub fn is_singleton_only(&self) -> bool {
        matches!(self, Segment::Source(_))
    }

    /// Returns true if this segment belongs to the content-bearing set.
    ///
    /// Content iteration additionally suppresses a [`Mention`] that
    /// immediately follows a [`QuoteReply`]; that adjacency rule lives in
    /// the chain traversal, not here.
    #[must_use]
    pub fn is_content(&self) -> bool {
        matches!(
            self.kind(),
            SegmentKind::Mention
                | SegmentKind::MentionAll
                | SegmentKind::Plain
                | SegmentKind::Image
                | SegmentKind::Sticker
                | SegmentKind::RichMarkup
        )
    }

    /// Returns the human-readable rendering of this segment.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Plain(plain) => plain.fmt(f),
            Segment::Mention(mention) => mention.fmt(f),
            Segment::MentionAll(all) => all.fmt(f),
            Segment::Image(image) => image.fmt(f),
            Segment::Sticker(sticker) => sticker.fmt(f),
            Segment::RichMarkup(markup) => markup.fmt(f),
            Segment::QuoteReply(quote) => quote.fmt(f),
            Segment::Source(source) => source.fmt(f),
        }
    }
}

impl From<PlainText> for Segment {
    fn from(plain: PlainText) -> Self {
        Segment::Plain(plain)
    }
}

impl From<Mention> for Segment {
    fn from(mention: Mention) -> Self {
        Segment::Mention(mention)
    }
}

impl From<MentionAll> for Segment {
    fn from(all: MentionAll) -> Self {
        Segment::MentionAll(all)
    }
}

impl From<ImageRef> for Segment {
    fn from(image: ImageRef) -> Self {
        Segment::Image(image)
    }
}

impl From<Sticker> for Segment {
    fn from(sticker: Sticker) -> Self {
        Segment::Sticker(sticker)
    }
}

impl From<RichMarkup> for Segment {
    fn from(markup: RichMarkup) -> Self {
        Segment::RichMarkup(markup)
    }
}

impl From<QuoteReply> for Segment {
    fn from(quote: QuoteReply) -> Self {
        Segment::QuoteReply(quote)
    }
}

impl From<MessageSource> for Segment {
    fn from(source: MessageSource) -> Self {
        Segment::Source(source)
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Segment::Plain(PlainText::new(text))
    }
}

impl From<String> for Segment {
    fn from(text: String) -> Self {
        Segment::Plain(PlainText::new(text))
    }
}
