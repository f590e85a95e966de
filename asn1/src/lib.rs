//! Typed ASN.1 elements for RSA key structures.
//!
//! Sits between the raw TLV layer (`der`) and the key structure layer
//! (`keys`). Only the six universal types RSA key material uses are modeled:
//! INTEGER, BIT STRING, OCTET STRING, NULL, OBJECT IDENTIFIER and SEQUENCE.
//! Decoding enforces the DER minimal-encoding rules a lenient BER reader
//! would let through, so a structurally non-canonical key is rejected here
//! instead of round-tripping to different bytes.

use std::{fmt::Display, str::FromStr};

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use der::{Der, Tag, Tlv};
use rsakit::decoder::{DecodableFrom, Decoder};
use rsakit::encoder::{EncodableTo, Encoder};

pub mod error;

use error::Error;

/// A decoded ASN.1 document: the typed view of a [`Der`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl DecodableFrom<Der> for ASN1Object {}

impl Decoder<Der, ASN1Object> for Der {
    type Error = Error;

    fn decode(&self) -> Result<ASN1Object, Error> {
        let mut elements = Vec::new();
        for tlv in self.elements() {
            elements.push(Element::try_from(tlv)?);
        }
        Ok(ASN1Object { elements })
    }
}

impl EncodableTo<ASN1Object> for Der {}

impl Encoder<ASN1Object, Der> for ASN1Object {
    type Error = Error;

    fn encode(&self) -> Result<Der, Self::Error> {
        let mut tlvs = Vec::new();
        for element in &self.elements {
            tlvs.push(Tlv::try_from(element)?);
        }
        Ok(Der::new(tlvs))
    }
}

/// One typed ASN.1 value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    Sequence(Vec<Element>),
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self, Self::Error> {
        match tlv.tag() {
            Tag::Integer => {
                let data = tlv.data().ok_or(Error::ExpectedPrimitive(0x02))?;
                Ok(Element::Integer(Integer::from_der_bytes(data)?))
            }
            Tag::BitString => {
                let data = tlv.data().ok_or(Error::ExpectedPrimitive(0x03))?;
                Ok(Element::BitString(BitString::try_from(data)?))
            }
            Tag::OctetString => {
                let data = tlv.data().ok_or(Error::ExpectedPrimitive(0x04))?;
                Ok(Element::OctetString(OctetString::from(data)))
            }
            Tag::Null => {
                let data = tlv.data().ok_or(Error::ExpectedPrimitive(0x05))?;
                if !data.is_empty() {
                    return Err(Error::NullWithContent);
                }
                Ok(Element::Null)
            }
            Tag::ObjectIdentifier => {
                let data = tlv.data().ok_or(Error::ExpectedPrimitive(0x06))?;
                Ok(Element::ObjectIdentifier(ObjectIdentifier::try_from(data)?))
            }
            Tag::Sequence => {
                let mut elements = Vec::new();
                if let Some(tlvs) = tlv.tlvs() {
                    for sub_tlv in tlvs {
                        elements.push(Element::try_from(sub_tlv)?);
                    }
                }
                Ok(Element::Sequence(elements))
            }
            Tag::Unsupported(t) => Err(Error::UnsupportedTag(t)),
        }
    }
}

impl TryFrom<&Element> for Tlv {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self, Self::Error> {
        match element {
            Element::Integer(i) => Ok(Tlv::new_primitive(Tag::Integer, i.to_der_bytes())),
            Element::BitString(bs) => {
                let mut data = Vec::with_capacity(bs.as_bytes().len() + 1);
                data.push(bs.unused_bits());
                data.extend_from_slice(bs.as_bytes());
                Ok(Tlv::new_primitive(Tag::BitString, data))
            }
            Element::OctetString(os) => {
                Ok(Tlv::new_primitive(Tag::OctetString, os.as_bytes().to_vec()))
            }
            Element::Null => Ok(Tlv::new_primitive(Tag::Null, vec![])),
            Element::ObjectIdentifier(oid) => Ok(Tlv::new_primitive(
                Tag::ObjectIdentifier,
                Vec::try_from(oid.clone())?,
            )),
            Element::Sequence(elements) => {
                let tlvs = elements
                    .iter()
                    .map(Tlv::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Tlv::new_constructed(Tag::Sequence, tlvs))
            }
        }
    }
}

impl EncodableTo<Element> for Tlv {}

impl Encoder<Element, Tlv> for Element {
    type Error = Error;

    fn encode(&self) -> Result<Tlv, Self::Error> {
        Tlv::try_from(self)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::BitString(bs) => write!(f, "BitString({} bytes)", bs.as_bytes().len()),
            Element::OctetString(os) => write!(f, "OctetString({} bytes)", os.as_bytes().len()),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::Sequence(seq) => write!(f, "Sequence({:?})", seq),
        }
    }
}

/// ASN.1 INTEGER, arbitrary precision and signed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    /// Decodes DER content octets (two's-complement, big-endian).
    ///
    /// Rejects empty contents and padded encodings.
    pub fn from_der_bytes(data: &[u8]) -> Result<Self, Error> {
        match data {
            [] => Err(Error::IntegerNoData),
            [0x00, b, ..] if *b < 0x80 => Err(Error::IntegerNonMinimal),
            [0xff, b, ..] if *b >= 0x80 => Err(Error::IntegerNonMinimal),
            _ => Ok(Integer {
                inner: BigInt::from_signed_bytes_be(data),
            }),
        }
    }

    /// Encodes to DER content octets (minimal two's-complement, big-endian).
    pub fn to_der_bytes(&self) -> Vec<u8> {
        self.inner.to_signed_bytes_be()
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    /// Bit length of the value's magnitude (RSA key size for a modulus).
    pub fn bits(&self) -> u64 {
        self.inner.bits()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.inner.to_i64()
    }
}

impl From<BigInt> for Integer {
    fn from(inner: BigInt) -> Self {
        Integer { inner }
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// ASN.1 BIT STRING: content bytes plus a count of unused trailing bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused_bits: u8,
    inner: Vec<u8>,
}

impl BitString {
    /// A byte-aligned bit string (zero unused bits), the form key
    /// structures use.
    pub fn new(inner: Vec<u8>) -> Self {
        BitString {
            unused_bits: 0,
            inner,
        }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        let (&unused_bits, rest) = data.split_first().ok_or(Error::BitStringNoData)?;
        if unused_bits > 7 || (rest.is_empty() && unused_bits != 0) {
            return Err(Error::BitStringUnusedBitsOutOfRange(unused_bits));
        }
        Ok(BitString {
            unused_bits,
            inner: rest.to_vec(),
        })
    }
}

/// ASN.1 OCTET STRING.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }
}

impl From<&[u8]> for OctetString {
    fn from(data: &[u8]) -> Self {
        OctetString {
            inner: data.to_vec(),
        }
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(inner: Vec<u8>) -> Self {
        OctetString { inner }
    }
}

/// ASN.1 OBJECT IDENTIFIER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::ObjectIdentifierNoData);
        }

        let mut values = Vec::new();
        let first = value[0] as u64;
        values.push(first / 40);
        values.push(first % 40);

        let mut val = 0u64;
        let mut pending = false;
        for v in value[1..].iter() {
            if !pending && *v == 0x80 {
                // leading 0x80 arc octets are padding
                return Err(Error::ObjectIdentifierNonMinimalArc);
            }
            val = (val << 7) | (*v as u64 & 0x7f);
            if *v & 0x80 == 0 {
                // continuation bit cleared: end of this arc
                values.push(val);
                val = 0;
                pending = false;
            } else {
                pending = true;
            }
        }
        if pending {
            return Err(Error::ObjectIdentifierIncompleteEncoding);
        }

        Ok(ObjectIdentifier { inner: values })
    }
}

impl TryFrom<ObjectIdentifier> for Vec<u8> {
    type Error = Error;

    fn try_from(oid: ObjectIdentifier) -> Result<Self, Self::Error> {
        if oid.inner.len() < 2 {
            return Err(Error::ObjectIdentifierTooFewComponents);
        }

        let mut result = Vec::new();
        // the first two arcs share one octet
        let first = (oid.inner[0] * 40 + oid.inner[1]) as u8;
        result.push(first);

        for v in oid.inner[2..].iter() {
            let mut encoded = Vec::new();
            let mut value = *v;
            loop {
                encoded.push(value as u8 & 0x7f);
                value >>= 7;
                if value == 0 {
                    break;
                }
            }

            while let Some(b) = encoded.pop() {
                // every octet but the last carries the continuation bit
                if !encoded.is_empty() {
                    result.push(b | 0x80);
                } else {
                    result.push(b);
                }
            }
        }

        Ok(result)
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self.inner.first() {
            Some(n) => self.inner[1..]
                .iter()
                .fold(n.to_string(), |s, n| s + "." + &n.to_string()),
            None => String::new(),
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split('.')
            .map(|s| s.parse::<u64>().map_err(Error::ParseInt))
            .collect::<Result<Vec<u64>, Error>>()?;
        Ok(ObjectIdentifier { inner: values })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use rsakit::decoder::Decoder;
    use rsakit::encoder::Encoder;

    use crate::{ASN1Object, BitString, Element, Error, Integer, ObjectIdentifier, OctetString};

    #[rstest(data, expected,
        case(vec![0x00], 0),
        case(vec![0x2a], 42),
        case(vec![0x00, 0x80], 128),
        case(vec![0x01, 0x00, 0x01], 65537),
        case(vec![0xff], -1),
    )]
    fn test_integer_from_der_bytes(data: Vec<u8>, expected: i64) {
        let integer = Integer::from_der_bytes(&data).unwrap();
        assert_eq!(integer.to_i64(), Some(expected));
        // minimal inputs re-encode to themselves
        assert_eq!(integer.to_der_bytes(), data);
    }

    #[rstest(data,
        case::empty(vec![]),
        case::padded_positive(vec![0x00, 0x7f]),
        case::padded_negative(vec![0xff, 0x80]),
    )]
    fn test_integer_rejects_non_minimal(data: Vec<u8>) {
        assert!(Integer::from_der_bytes(&data).is_err());
    }

    #[rstest(oid_str, encoded,
        case("1.2.840.113549.1.1.1", vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]),
        case("1.2.840.113549.1.1.10", vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0a]),
        case("2.16.840.1.101.3.4.2.1", vec![0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01]),
    )]
    fn test_oid_roundtrip(oid_str: &str, encoded: Vec<u8>) {
        let decoded = ObjectIdentifier::try_from(encoded.as_slice()).unwrap();
        assert_eq!(decoded, oid_str);
        assert_eq!(decoded, ObjectIdentifier::from_str(oid_str).unwrap());
        assert_eq!(Vec::try_from(decoded).unwrap(), encoded);
    }

    #[rstest(encoded,
        case::empty(vec![]),
        case::dangling_continuation(vec![0x2a, 0x86]),
        case::padded_arc(vec![0x2a, 0x80, 0x01]),
    )]
    fn test_oid_rejects_malformed(encoded: Vec<u8>) {
        assert!(ObjectIdentifier::try_from(encoded.as_slice()).is_err());
    }

    #[rstest(data, unused, content,
        case(vec![0x00, 0xab, 0xcd], 0, vec![0xab, 0xcd]),
        case(vec![0x06, 0x6e, 0x5d, 0xc0], 6, vec![0x6e, 0x5d, 0xc0]),
        case(vec![0x00], 0, vec![]),
    )]
    fn test_bit_string(data: Vec<u8>, unused: u8, content: Vec<u8>) {
        let bs = BitString::try_from(data.as_slice()).unwrap();
        assert_eq!(bs.unused_bits(), unused);
        assert_eq!(bs.as_bytes(), content.as_slice());
    }

    #[rstest(data,
        case::empty(vec![]),
        case::unused_out_of_range(vec![0x08, 0xff]),
        case::unused_without_content(vec![0x03]),
    )]
    fn test_bit_string_rejects_malformed(data: Vec<u8>) {
        assert!(BitString::try_from(data.as_slice()).is_err());
    }

    #[test]
    fn test_element_roundtrip_via_der() {
        let element = Element::Sequence(vec![
            Element::Integer(Integer::from(0)),
            Element::Sequence(vec![
                Element::ObjectIdentifier(
                    ObjectIdentifier::from_str("1.2.840.113549.1.1.1").unwrap(),
                ),
                Element::Null,
            ]),
            Element::OctetString(OctetString::from(vec![0x01, 0x02, 0x03])),
        ]);

        let obj = ASN1Object::new(vec![element.clone()]);
        let der = obj.encode().unwrap();
        let bytes: Vec<u8> = der.encode().unwrap();

        let reparsed: der::Der = bytes.decode().unwrap();
        let decoded: ASN1Object = reparsed.decode().unwrap();
        assert_eq!(decoded.elements(), &[element]);
    }

    #[test]
    fn test_null_with_content_rejected() {
        // NULL must have zero-length contents
        let bytes: Vec<u8> = vec![0x05, 0x01, 0x00];
        let der: der::Der = bytes.decode().unwrap();
        let result: Result<ASN1Object, _> = der.decode();
        assert!(matches!(result, Err(Error::NullWithContent)));
    }

    #[test]
    fn test_unsupported_tag_rejected() {
        // UTF8String is outside the key-structure subset
        let bytes: Vec<u8> = vec![0x0c, 0x02, 0x68, 0x69];
        let der: der::Der = bytes.decode().unwrap();
        let result: Result<ASN1Object, _> = der.decode();
        assert!(matches!(result, Err(Error::UnsupportedTag(0x0c))));
    }
}
