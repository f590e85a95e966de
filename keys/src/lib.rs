//! RSA key structures and PEM import/export.
//!
//! Three DER framings of the same key material are supported:
//!
//! - PKCS#1 `RSAPublicKey` / `RSAPrivateKey` (the bare structures)
//! - X.509 `SubjectPublicKeyInfo` (public key behind the rsaEncryption OID)
//! - PKCS#8 `PrivateKeyInfo` (private key behind the rsaEncryption OID)
//!
//! [`handle::KeyHandle`] is the opaque value the rest of the workspace passes
//! around; the [`handle`] module holds the import/export boundary operations.

use std::str::FromStr;

use asn1::{ASN1Object, Element, ObjectIdentifier};
use rsakit::decoder::Decoder;
use rsakit::encoder::Encoder;

pub mod error;
pub mod handle;
pub mod pkcs1;
pub mod pkcs8;
pub mod spki;

pub use error::{Error, Result};
pub use handle::{
    KeyHandle, KeyKind, PrivateKeyFormat, export_private_key_to_pem, export_public_key_to_pem,
    import_private_key_from_pem, import_public_key_from_pem,
};
pub use pkcs1::{RsaPrivateKey, RsaPublicKey};

/// rsaEncryption (RFC 8017)
pub const OID_RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";

/// Parses DER bytes expecting exactly one top-level element.
pub(crate) fn single_element(der_bytes: &[u8]) -> Result<Element> {
    let der: der::Der = der_bytes.decode()?;
    let obj: ASN1Object = der.decode()?;
    match obj.elements() {
        [element] => Ok(element.clone()),
        elements => Err(Error::MalformedKey(format!(
            "expected exactly one top-level element, got {}",
            elements.len()
        ))),
    }
}

/// Serializes one element to DER bytes.
pub(crate) fn element_to_der_bytes(element: &Element) -> Result<Vec<u8>> {
    let der = ASN1Object::new(vec![element.clone()]).encode()?;
    Ok(der.encode()?)
}

/// The `AlgorithmIdentifier` for rsaEncryption: the OID with NULL parameters.
pub(crate) fn rsa_algorithm_identifier() -> Result<Element> {
    let oid = ObjectIdentifier::from_str(OID_RSA_ENCRYPTION)?;
    Ok(Element::Sequence(vec![
        Element::ObjectIdentifier(oid),
        Element::Null,
    ]))
}

/// Validates an `AlgorithmIdentifier` element names rsaEncryption.
///
/// The parameters field must be absent or NULL; any other algorithm OID is a
/// key-type mismatch.
pub(crate) fn validate_rsa_algorithm(element: &Element) -> Result<()> {
    let Element::Sequence(elements) = element else {
        return Err(Error::MalformedKey(
            "expected Sequence for AlgorithmIdentifier".to_string(),
        ));
    };
    let Some(Element::ObjectIdentifier(oid)) = elements.first() else {
        return Err(Error::MalformedKey(
            "AlgorithmIdentifier has no algorithm OID".to_string(),
        ));
    };
    if *oid != OID_RSA_ENCRYPTION {
        return Err(Error::MalformedKey(format!(
            "algorithm OID is {}, expected rsaEncryption ({})",
            oid, OID_RSA_ENCRYPTION
        )));
    }
    match elements.get(1) {
        None | Some(Element::Null) => Ok(()),
        Some(other) => Err(Error::MalformedKey(format!(
            "unexpected rsaEncryption parameters: {}",
            other
        ))),
    }
}
