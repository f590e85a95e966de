use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no key stored under tag {tag:?}")]
    KeyNotFound { tag: String },
    #[error("access to key material denied: {reason}")]
    AccessDenied { reason: String },
    #[error("key store failure: {0}")]
    Store(String),
}
