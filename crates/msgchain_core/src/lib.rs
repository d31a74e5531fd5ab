//! # Msgchain Core
//!
//! Message chain composition and typed lookup engine.
//!
//! A message chain is an ordered, mutable sequence of heterogeneous
//! segments (text, mentions, images, stickers, rich markup, quoted
//! replies, provenance metadata) that together compose one chat message.
//!
//! This crate provides:
//! - the three chain variants (eager, lazy, null sentinel) behind one
//!   closed facade type, [`MessageChain`];
//! - the merge protocol: appending flattens chain tails and rejects
//!   singleton-only segments;
//! - typed first-match lookup, both generic ([`SegmentContent`]) and
//!   key-indexed over a fixed recognized-key table;
//! - content iteration with the mention-after-quote adjacency rule.
//!
//! Wire-format encoding, transport, and persistence of segments are the
//! host application's concern; the engine only needs each segment's kind,
//! rendering, and placement markers.
//!
//! ## Example
//!
//! ```
//! use msgchain_core::{chain_of, Mention, PlainText, Segment};
//!
//! let chain = chain_of([
//!     Segment::from(Mention::new(1, "alice")),
//!     Segment::from(" hello"),
//! ]);
//! assert_eq!(chain.render(), "@alice hello");
//!
//! let mention = chain.first_of::<Mention>().unwrap().unwrap();
//! assert_eq!(mention.target(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod chain;
pub mod error;
pub mod lookup;
pub mod segment;

pub use chain::{
    chain_of, concat, empty_chain, EagerChain, LazyChain, Message, MessageChain, ToChain,
};
pub use error::{ChainError, ChainResult};
pub use lookup::SegmentContent;
pub use segment::{
    ImageRef, Mention, MentionAll, MessageSource, PlainText, QuoteReply, RichMarkup, Segment,
    SegmentKind, Sticker,
};
