//! PKCS#1 RSA key structures (RFC 8017).

use asn1::{Element, Integer};

use rsakit::decoder::{DecodableFrom, Decoder};
use rsakit::encoder::{EncodableTo, Encoder};

use crate::error::{Error, Result};

/*
RFC 8017 - PKCS #1: RSA Cryptography Specifications

RSAPrivateKey ::= SEQUENCE {
    version           Version,
    modulus           INTEGER,  -- n
    publicExponent    INTEGER,  -- e
    privateExponent   INTEGER,  -- d
    prime1            INTEGER,  -- p
    prime2            INTEGER,  -- q
    exponent1         INTEGER,  -- d mod (p-1)
    exponent2         INTEGER,  -- d mod (q-1)
    coefficient       INTEGER,  -- (inverse of q) mod p
    otherPrimeInfos   OtherPrimeInfos OPTIONAL
}

Version ::= INTEGER { two-prime(0), multi(1) }
*/

/// PKCS#1 RSAPrivateKey version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    TwoPrime = 0,
    Multi = 1,
}

impl From<Version> for Integer {
    fn from(v: Version) -> Self {
        Integer::from(v as i64)
    }
}

impl TryFrom<i64> for Version {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Version::TwoPrime),
            1 => Ok(Version::Multi),
            _ => Err(Error::MalformedKey(format!(
                "invalid RSAPrivateKey version: {}",
                value
            ))),
        }
    }
}

impl DecodableFrom<Element> for Version {}

impl Decoder<Element, Version> for Element {
    type Error = Error;

    fn decode(&self) -> Result<Version> {
        match self {
            Element::Integer(int) => {
                let value = int.to_i64().ok_or_else(|| {
                    Error::MalformedKey("version integer out of range".to_string())
                })?;
                Version::try_from(value)
            }
            _ => Err(Error::MalformedKey(
                "version must be an INTEGER element".to_string(),
            )),
        }
    }
}

/// PKCS#1 RSA private key structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub version: Version,
    pub modulus: Integer,          // n
    pub public_exponent: Integer,  // e
    pub private_exponent: Integer, // d
    pub prime1: Integer,           // p
    pub prime2: Integer,           // q
    pub exponent1: Integer,        // d mod (p-1)
    pub exponent2: Integer,        // d mod (q-1)
    pub coefficient: Integer,      // (inverse of q) mod p
                                   // otherPrimeInfos is rarely used, omitted
}

impl RsaPrivateKey {
    /// Key size in bits (modulus bit length).
    pub fn key_size(&self) -> u32 {
        self.modulus.bits() as u32
    }

    /// The public half of this key.
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
        }
    }
}

impl DecodableFrom<Element> for RsaPrivateKey {}

impl Decoder<Element, RsaPrivateKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RsaPrivateKey> {
        match self {
            Element::Sequence(elements) => {
                if elements.len() < 9 {
                    return Err(Error::MalformedKey(format!(
                        "expected at least 9 elements in RSAPrivateKey sequence, got {}",
                        elements.len()
                    )));
                }

                let version: Version = elements[0].decode()?;

                Ok(RsaPrivateKey {
                    version,
                    modulus: get_integer(elements, 1, "modulus")?,
                    public_exponent: get_integer(elements, 2, "publicExponent")?,
                    private_exponent: get_integer(elements, 3, "privateExponent")?,
                    prime1: get_integer(elements, 4, "prime1")?,
                    prime2: get_integer(elements, 5, "prime2")?,
                    exponent1: get_integer(elements, 6, "exponent1")?,
                    exponent2: get_integer(elements, 7, "exponent2")?,
                    coefficient: get_integer(elements, 8, "coefficient")?,
                })
            }
            _ => Err(Error::MalformedKey(
                "expected Sequence for RSAPrivateKey".to_string(),
            )),
        }
    }
}

impl EncodableTo<RsaPrivateKey> for Element {}

impl Encoder<RsaPrivateKey, Element> for RsaPrivateKey {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::Integer(Integer::from(self.version)),
            Element::Integer(self.modulus.clone()),
            Element::Integer(self.public_exponent.clone()),
            Element::Integer(self.private_exponent.clone()),
            Element::Integer(self.prime1.clone()),
            Element::Integer(self.prime2.clone()),
            Element::Integer(self.exponent1.clone()),
            Element::Integer(self.exponent2.clone()),
            Element::Integer(self.coefficient.clone()),
        ]))
    }
}

/*
RFC 8017 - RSA Public Key

RSAPublicKey ::= SEQUENCE {
    modulus           INTEGER,  -- n
    publicExponent    INTEGER   -- e
}
*/

/// PKCS#1 RSA public key structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub modulus: Integer,         // n
    pub public_exponent: Integer, // e
}

impl RsaPublicKey {
    /// Key size in bits (modulus bit length).
    pub fn key_size(&self) -> u32 {
        self.modulus.bits() as u32
    }
}

impl DecodableFrom<Element> for RsaPublicKey {}

impl Decoder<Element, RsaPublicKey> for Element {
    type Error = Error;

    fn decode(&self) -> Result<RsaPublicKey> {
        match self {
            Element::Sequence(elements) => {
                if elements.len() != 2 {
                    return Err(Error::MalformedKey(format!(
                        "expected 2 elements in RSAPublicKey sequence, got {}",
                        elements.len()
                    )));
                }

                Ok(RsaPublicKey {
                    modulus: get_integer(elements, 0, "modulus")?,
                    public_exponent: get_integer(elements, 1, "publicExponent")?,
                })
            }
            _ => Err(Error::MalformedKey(
                "expected Sequence for RSAPublicKey".to_string(),
            )),
        }
    }
}

impl EncodableTo<RsaPublicKey> for Element {}

impl Encoder<RsaPublicKey, Element> for RsaPublicKey {
    type Error = Error;

    fn encode(&self) -> Result<Element> {
        Ok(Element::Sequence(vec![
            Element::Integer(self.modulus.clone()),
            Element::Integer(self.public_exponent.clone()),
        ]))
    }
}

fn get_integer(elements: &[Element], idx: usize, field_name: &str) -> Result<Integer> {
    if let Element::Integer(int) = &elements[idx] {
        Ok(int.clone())
    } else {
        Err(Error::MalformedKey(format!(
            "expected Integer for {}",
            field_name
        )))
    }
}
