use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from key structure decoding, encoding and PEM conversion.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad PEM framing or base64.
    #[error("malformed PEM: {0}")]
    MalformedPem(#[from] pem::error::Error),

    /// DER is structurally invalid or does not describe the requested
    /// key type.
    #[error("malformed key: {0}")]
    MalformedKey(String),

    /// The handle cannot be exported in the requested form (e.g. a private
    /// handle passed to a public-key encoder).
    #[error("encoding: {0}")]
    Encoding(String),
}

impl From<der::error::Error> for Error {
    fn from(e: der::error::Error) -> Self {
        Error::MalformedKey(e.to_string())
    }
}

impl From<asn1::error::Error> for Error {
    fn from(e: asn1::error::Error) -> Self {
        Error::MalformedKey(e.to_string())
    }
}
