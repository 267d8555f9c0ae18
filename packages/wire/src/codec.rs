//! Message codecs.
//!
//! A codec turns any structured message into a flat byte sequence and back.
//! Codecs are stateless apart from their configuration and perform no I/O.

use bincode::Options;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::format::Format;

/// Converts structured messages to and from bytes.
pub trait Codec: Send + Sync {
    /// The wire format this codec produces and accepts.
    fn format(&self) -> Format;

    /// Encode a message. Fails only when the codec is misconfigured (for
    /// example, a message larger than the configured limit).
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes>;

    /// Decode bytes as a `T`. Fails with [`Error::Decode`] when the bytes do
    /// not match `T`'s shape.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Short type name used in error messages.
pub(crate) fn shape_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.contains('<') {
        full
    } else {
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// Compact binary codec.
///
/// Fixed-width integers, length-prefixed sequences, and no trailing bytes
/// tolerated on decode. The size limit bounds both encoded output and any
/// allocation a decode may attempt, so a corrupt length prefix cannot make
/// the decoder allocate unbounded memory.
#[derive(Debug, Clone, Copy)]
pub struct BinaryCodec {
    limit: u64,
}

impl BinaryCodec {
    /// Default size limit: 256 MiB.
    pub const DEFAULT_LIMIT: u64 = 256 * 1024 * 1024;

    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    fn options(&self) -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(self.limit)
            .reject_trailing_bytes()
    }
}

impl Default for BinaryCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for BinaryCodec {
    fn format(&self) -> Format {
        Format::BINARY
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes> {
        self.options()
            .serialize(value)
            .map(Bytes::from)
            .map_err(|e| Error::Encode {
                format: Format::BINARY,
                shape: shape_name::<T>(),
                message: e.to_string(),
            })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        self.options()
            .deserialize(bytes)
            .map_err(|e| Error::Decode {
                format: Format::BINARY,
                shape: shape_name::<T>(),
                message: e.to_string(),
            })
    }
}

/// JSON codec. Useful when the far side logs or inspects raw payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::JSON
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| Error::Encode {
                format: Format::JSON,
                shape: shape_name::<T>(),
                message: e.to_string(),
            })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decode {
            format: Format::JSON,
            shape: shape_name::<T>(),
            message: e.to_string(),
        })
    }
}

/// A codec chosen at configuration time from a [`Format`].
#[derive(Debug, Clone, Copy)]
pub enum WireCodec {
    Binary(BinaryCodec),
    Json(JsonCodec),
}

impl WireCodec {
    /// Pick the codec for `format`. `limit` applies to the binary codec.
    pub fn for_format(format: &Format, limit: u64) -> Result<Self> {
        if format.is_binary() {
            Ok(WireCodec::Binary(BinaryCodec::with_limit(limit)))
        } else if format.is_json() {
            Ok(WireCodec::Json(JsonCodec))
        } else {
            Err(Error::UnsupportedFormat(format.clone()))
        }
    }

    /// Whether a codec exists for `format`.
    pub fn supports(format: &Format) -> bool {
        format.is_binary() || format.is_json()
    }
}

impl Default for WireCodec {
    fn default() -> Self {
        WireCodec::Binary(BinaryCodec::default())
    }
}

impl Codec for WireCodec {
    fn format(&self) -> Format {
        match self {
            WireCodec::Binary(c) => c.format(),
            WireCodec::Json(c) => c.format(),
        }
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes> {
        match self {
            WireCodec::Binary(c) => c.encode(value),
            WireCodec::Json(c) => c.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            WireCodec::Binary(c) => c.decode(bytes),
            WireCodec::Json(c) => c.decode(bytes),
        }
    }
}
