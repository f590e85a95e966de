use base64::DecodeError;
use thiserror::Error;

/// Errors that can occur when parsing or decoding PEM data.
///
/// PEM parsing follows RFC 7468 and requires proper boundary markers,
/// valid base64 encoding, and matching labels.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Missing the opening boundary marker (e.g., `-----BEGIN PUBLIC KEY-----`)
    #[error("missing a pre encapsulation boundary")]
    MissingPreEncapsulationBoundary,

    /// Missing the closing boundary marker (e.g., `-----END PUBLIC KEY-----`)
    #[error("missing a post encapsulation boundary")]
    MissingPostEncapsulationBoundary,

    /// No data found between boundary markers
    #[error("missing PEM data")]
    MissingData,

    /// The label in the boundary marker is not one of the recognized key labels
    #[error("unknown label: {0}")]
    UnknownLabel(String),

    /// The BEGIN and END labels do not match
    #[error("label mismatch: BEGIN {begin}, END {end}")]
    LabelMismatch {
        begin: &'static str,
        end: &'static str,
    },

    /// The label does not match the key kind the caller expects
    #[error("expected label {expected}, got {actual}")]
    UnexpectedLabel {
        expected: &'static str,
        actual: &'static str,
    },

    /// Malformed boundary marker
    #[error("invalid encapsulation boundary")]
    InvalidEncapsulationBoundary,

    /// Malformed base64 line inside the encapsulated data
    #[error("invalid base64 line")]
    InvalidBase64Line,

    /// Failed to decode base64 data
    #[error("base64 decode: {0}")]
    Base64Decode(DecodeError),
}
