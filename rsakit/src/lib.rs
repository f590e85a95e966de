//! # rsakit
//!
//! Core traits for the rsakit RSA key-material toolkit.
//!
//! Every conversion between representations of key material follows the same
//! chain, and each step is one `Decoder`/`Encoder` implementation:
//!
//! ```text
//! PEM text → Pem → Vec<u8> → Der → Element → RsaPublicKey / RsaPrivateKey
//! ```
//!
//! The `DecodableFrom` and `EncodableTo` marker traits pin down which pairs of
//! types may convert into each other, so an invalid conversion is a compile
//! error rather than a runtime surprise.

#![forbid(unsafe_code)]

pub mod decoder;
pub mod encoder;
