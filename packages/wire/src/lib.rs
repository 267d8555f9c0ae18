//! Wire Layer
//!
//! Typed request and response messages exchanged with the frontend service,
//! and the codecs that turn them into the opaque byte arrays carried across
//! the runtime boundary.
//!
//! - [`Codec`]: the encode/decode trait, with [`BinaryCodec`] (compact,
//!   length-bounded), [`JsonCodec`] (readable) and [`WireCodec`] (chosen by
//!   [`Format`] at startup)
//! - [`messages`]: every request and response shape
//! - [`ColumnType`]: flattened column type trees
//! - [`NamePattern`]: `*`/`|` name patterns used by listing operations
//!
//! Both sides of the boundary must agree on the format; nothing in an encoded
//! message identifies it.
//!
//! # Example
//!
//! ```rust
//! use febridge_wire::{messages::GetTablesParams, BinaryCodec, Codec};
//!
//! let codec = BinaryCodec::new();
//! let params = GetTablesParams {
//!     db: "functional".to_string(),
//!     pattern: Some("alltypes*".to_string()),
//!     session: None,
//! };
//! let bytes = codec.encode(&params).unwrap();
//! let back: GetTablesParams = codec.decode(&bytes).unwrap();
//! assert_eq!(back, params);
//! ```

mod codec;
mod error;
mod format;
pub mod messages;
mod pattern;
mod types;

pub use codec::{BinaryCodec, Codec, JsonCodec, WireCodec};
pub use error::{Error, Result};
pub use format::Format;
pub use pattern::NamePattern;
pub use types::{ColumnType, PrimitiveType, ScalarType, StructField, TypeNode, TypeNodeType};
