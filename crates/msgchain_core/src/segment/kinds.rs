//! Concrete segment payload types.

use std::fmt;

/// A run of plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlainText {
    text: String,
}

impl PlainText {
    /// Creates a plain text segment payload.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for PlainText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A mention of one member, rendered as `@display`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mention {
    target: u64,
    display: String,
}

impl Mention {
    /// Creates a mention of the member with the given id and display name.
    pub fn new(target: u64, display: impl Into<String>) -> Self {
        Self {
            target,
            display: display.into(),
        }
    }

    /// Returns the id of the mentioned member.
    #[must_use]
    pub fn target(&self) -> u64 {
        self.target
    }

    /// Returns the display name used for rendering.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.display)
    }
}

/// A mention of every member, rendered as `@all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MentionAll;

impl fmt::Display for MentionAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@all")
    }
}

/// A reference to an uploaded image, rendered as `[image]`.
///
/// The id is opaque to the chain engine; hosts resolve it against their
/// own media storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    image_id: String,
}

impl ImageRef {
    /// Creates an image reference with the given opaque id.
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
        }
    }

    /// Returns the opaque image id.
    #[must_use]
    pub fn image_id(&self) -> &str {
        &self.image_id
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[image]")
    }
}

/// A sticker, rendered as `[sticker]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sticker {
    sticker_id: u32,
}

impl Sticker {
    /// Creates a sticker payload with the given id.
    #[must_use]
    pub fn new(sticker_id: u32) -> Self {
        Self { sticker_id }
    }

    /// Returns the sticker id.
    #[must_use]
    pub fn sticker_id(&self) -> u32 {
        self.sticker_id
    }
}

impl fmt::Display for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[sticker]")
    }
}

/// Rich-content markup, rendered as its raw markup text.
///
/// The chain engine does not interpret the markup; hosts decide whether it
/// is XML, JSON, or anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RichMarkup {
    markup: String,
}

impl RichMarkup {
    /// Creates a rich markup payload.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// Returns the raw markup text.
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

impl fmt::Display for RichMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

/// A quoted reply to an earlier message, rendered as `[quote]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuoteReply {
    quoted_message_id: u64,
}

impl QuoteReply {
    /// Creates a quote of the message with the given id.
    #[must_use]
    pub fn new(quoted_message_id: u64) -> Self {
        Self { quoted_message_id }
    }

    /// Returns the id of the quoted message.
    #[must_use]
    pub fn quoted_message_id(&self) -> u64 {
        self.quoted_message_id
    }
}

impl fmt::Display for QuoteReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[quote]")
    }
}

/// Provenance metadata for a message.
///
/// This kind is singleton-only: it may only be the sole original element of
/// a chain, never the result of an append. It renders as the empty string
/// since it carries no visible content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageSource {
    message_id: u64,
    sender_id: u64,
    timestamp: i64,
}

impl MessageSource {
    /// Creates provenance metadata for a message.
    #[must_use]
    pub fn new(message_id: u64, sender_id: u64, timestamp: i64) -> Self {
        Self {
            message_id,
            sender_id,
            timestamp,
        }
    }

    /// Returns the id of the message this source describes.
    #[must_use]
    pub fn message_id(&self) -> u64 {
        self.message_id
    }

    /// Returns the id of the sender.
    #[must_use]
    pub fn sender_id(&self) -> u64 {
        self.sender_id
    }

    /// Returns the send time as a unix timestamp in seconds.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl fmt::Display for MessageSource {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}
