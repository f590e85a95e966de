//! PKCS#8 PrivateKeyInfo framing for RSA private keys (RFC 5208).
//!
//! ```asn1
//! PrivateKeyInfo ::= SEQUENCE {
//!     version             INTEGER,  -- v1(0)
//!     privateKeyAlgorithm AlgorithmIdentifier,
//!     privateKey          OCTET STRING,  -- DER of PKCS#1 RSAPrivateKey
//!     attributes          [0] IMPLICIT Attributes OPTIONAL
//! }
//! ```
//!
//! Only non-encrypted v1 keys are handled; attributes are not modeled (their
//! presence is rejected by the tag layer, which has no context-specific tags).

use asn1::{Element, Integer, OctetString};

use rsakit::decoder::{DecodableFrom, Decoder};
use rsakit::encoder::{EncodableTo, Encoder};

use crate::error::{Error, Result};
use crate::pkcs1::RsaPrivateKey;
use crate::{element_to_der_bytes, rsa_algorithm_identifier, single_element, validate_rsa_algorithm};

/// An RSA private key behind the rsaEncryption AlgorithmIdentifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKeyInfo {
    pub key: RsaPrivateKey,
}

impl DecodableFrom<Element> for PrivateKeyInfo {}

impl Decoder<Element, PrivateKeyInfo> for Element {
    type Error = Error;

    fn decode(&self) -> Result<PrivateKeyInfo> {
        let Element::Sequence(elements) = self else {
            return Err(Error::MalformedKey(
                "expected Sequence for PrivateKeyInfo".to_string(),
            ));
        };
        if elements.len() != 3 {
            return Err(Error::MalformedKey(format!(
                "expected 3 elements in PrivateKeyInfo sequence, got {}",
                elements.len()
            )));
        }

        match &elements[0] {
            Element::Integer(version) if version.to_i64() == Some(0) => {}
            Element::Integer(version) => {
                return Err(Error::MalformedKey(format!(
                    "unsupported PrivateKeyInfo version: {}",
                    version
                )));
            }
            _ => {
                return Err(Error::MalformedKey(
                    "version must be an INTEGER element".to_string(),
                ));
            }
        }

        validate_rsa_algorithm(&elements[1])?;

        let Element::OctetString(os) = &elements[2] else {
            return Err(Error::MalformedKey(
                "expected OctetString for privateKey".to_string(),
            ));
        };

        let key: RsaPrivateKey = single_element(os.as_bytes())?.decode()?;
        Ok(PrivateKeyInfo { key })
    }
}

impl EncodableTo<PrivateKeyInfo> for Element {}

impl Encoder<PrivateKeyInfo, Element> for PrivateKeyInfo {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        let key_der = element_to_der_bytes(&self.key.encode()?)?;
        Ok(Element::Sequence(vec![
            Element::Integer(Integer::from(0)),
            rsa_algorithm_identifier()?,
            Element::OctetString(OctetString::from(key_der)),
        ]))
    }
}
