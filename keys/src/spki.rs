//! X.509 SubjectPublicKeyInfo framing for RSA public keys (RFC 5280).
//!
//! ```asn1
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         AlgorithmIdentifier,
//!     subjectPublicKey  BIT STRING  -- DER of PKCS#1 RSAPublicKey
//! }
//! ```

use asn1::{BitString, Element};

use rsakit::decoder::{DecodableFrom, Decoder};
use rsakit::encoder::{EncodableTo, Encoder};

use crate::error::{Error, Result};
use crate::pkcs1::RsaPublicKey;
use crate::{element_to_der_bytes, rsa_algorithm_identifier, single_element, validate_rsa_algorithm};

/// An RSA public key behind the rsaEncryption AlgorithmIdentifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectPublicKeyInfo {
    pub key: RsaPublicKey,
}

impl DecodableFrom<Element> for SubjectPublicKeyInfo {}

impl Decoder<Element, SubjectPublicKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<SubjectPublicKeyInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::MalformedKey(
                "expected Sequence for SubjectPublicKeyInfo".to_string(),
            ));
        };
        if elements.len() != 2 {
            return Err(Error::MalformedKey(format!(
                "expected 2 elements in SubjectPublicKeyInfo sequence, got {}",
                elements.len()
            )));
        }

        validate_rsa_algorithm(&elements[0])?;

        let Element::BitString(bs) = &elements[1] else {
            return Err(Error::MalformedKey(
                "expected BitString for subjectPublicKey".to_string(),
            ));
        };
        if bs.unused_bits() != 0 {
            return Err(Error::MalformedKey(
                "subjectPublicKey must be byte-aligned".to_string(),
            ));
        }

        let key: RsaPublicKey = single_element(bs.as_bytes())?.decode()?;
        Ok(SubjectPublicKeyInfo { key })
    }
}

impl EncodableTo<SubjectPublicKeyInfo> for Element {}

impl Encoder<SubjectPublicKeyInfo, Element> for SubjectPublicKeyInfo {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let key_der = element_to_der_bytes(&self.key.encode()?)?;
        Ok(Element::Sequence(vec![
            rsa_algorithm_identifier()?,
            Element::BitString(BitString::new(key_der)),
        ]))
    }
}
