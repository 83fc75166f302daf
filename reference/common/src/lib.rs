//! RemitRoute Common Types
//!
//! This crate contains shared types used across RemitRoute, including
//! currency codes, currency pairs, quote identifiers and error definitions.

pub mod identifiers;
pub mod monetary;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use error::*;
pub use time::*;
