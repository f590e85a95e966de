//! Error types for ASN.1 decoding and encoding.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors that can occur when converting between TLVs and typed elements.
#[derive(Debug, Error)]
pub enum Error {
    // INTEGER errors
    #[error("INTEGER: no data")]
    IntegerNoData,
    /// A leading `00` before a byte < 0x80 (or `FF` before a byte >= 0x80)
    /// is a padded two's-complement encoding, which DER forbids.
    #[error("INTEGER: non-minimal encoding")]
    IntegerNonMinimal,
    #[error("parse int error: {0}")]
    ParseInt(ParseIntError),

    // OBJECT IDENTIFIER errors
    #[error("OBJECT IDENTIFIER: no data")]
    ObjectIdentifierNoData,
    #[error("OBJECT IDENTIFIER: incomplete encoding")]
    ObjectIdentifierIncompleteEncoding,
    #[error("OBJECT IDENTIFIER: non-minimal arc encoding")]
    ObjectIdentifierNonMinimalArc,
    #[error("OBJECT IDENTIFIER: too few components (need at least 2)")]
    ObjectIdentifierTooFewComponents,

    // BIT STRING errors
    #[error("BIT STRING: no data")]
    BitStringNoData,
    #[error("BIT STRING: unused bits {0} out of range (must be 0-7)")]
    BitStringUnusedBitsOutOfRange(u8),

    // NULL errors
    #[error("NULL: content must be empty")]
    NullWithContent,

    // structural errors
    #[error("unsupported tag: 0x{0:02x}")]
    UnsupportedTag(u8),
    #[error("tag 0x{0:02x}: expected primitive content")]
    ExpectedPrimitive(u8),

    // DER errors
    #[error("invalid DER encoding: {0}")]
    Der(#[from] der::error::Error),
}
