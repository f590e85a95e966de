use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported algorithm name: {0:?}")]
    UnsupportedAlgorithm(String),
}
