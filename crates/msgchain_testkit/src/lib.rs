//! # Msgchain Testkit
//!
//! Test utilities for msgchain.
//!
//! This crate provides:
//! - Ready-made segment and chain fixtures
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use msgchain_testkit::prelude::*;
//!
//! let chain = mixed_chain();
//! assert!(chain.len().unwrap() > 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use fixtures::*;
pub use generators::*;
