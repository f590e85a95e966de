//! DER (Distinguished Encoding Rules) TLV codec.
//!
//! This crate parses raw bytes into a tree of tag-length-value triples and
//! serializes such a tree back to bytes. DER is the canonical subset of BER:
//! lengths are definite and minimally encoded. The parser rejects the BER
//! constructs DER forbids (indefinite lengths, padded length octets) so that
//! two distinct byte strings can never decode to the same structure.

use nom::{IResult, Parser};

use rsakit::decoder::{DecodableFrom, Decoder};
use rsakit::encoder::{EncodableTo, Encoder};

pub mod error;

use error::Error;

/// A decoded DER document: the list of top-level TLVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    tlvs: Vec<Tlv>,
}

impl Der {
    pub fn new(tlvs: Vec<Tlv>) -> Self {
        Der { tlvs }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.tlvs
    }
}

/// DER tags used by RSA key structures.
///
/// Anything else (context-specific tags, strings, times) is carried through
/// as [`Tag::Unsupported`] and rejected by the typed layer above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    Sequence,
    Unsupported(u8),
}

impl From<u8> for Tag {
    fn from(value: u8) -> Self {
        match value {
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x30 => Self::Sequence,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        match tag {
            Tag::Integer => 0x02,
            Tag::BitString => 0x03,
            Tag::OctetString => 0x04,
            Tag::Null => 0x05,
            Tag::ObjectIdentifier => 0x06,
            Tag::Sequence => 0x30,
            Tag::Unsupported(value) => value,
        }
    }
}

/// One tag-length-value triple.
///
/// A SEQUENCE holds nested TLVs; every other tag holds raw content octets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            value: Value::Data(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        Tlv {
            tag,
            value: Value::Tlv(tlvs),
        }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Content octets of a primitive TLV, `None` for a constructed one.
    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    /// Nested TLVs of a constructed TLV, `None` for a primitive one.
    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Tlv> {
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = nom::bytes::complete::take(length).parse(input)?;

        if tag.eq(&Tag::Sequence) {
            // parse nested TLVs recursively
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, v) = Self::parse(data)?;
                data = rest;
                tlvs.push(v);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                value: Value::Data(data.to_vec()),
            },
        ))
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(u8::from(self.tag));
        match &self.value {
            Value::Data(data) => {
                write_length(data.len(), out);
                out.extend_from_slice(data);
            }
            Value::Tlv(tlvs) => {
                let mut inner = Vec::new();
                for tlv in tlvs {
                    tlv.write(&mut inner);
                }
                write_length(inner.len(), out);
                out.extend_from_slice(&inner);
            }
        }
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    Ok((input, Tag::from(n)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, n) = nom::number::be_u8().parse(input)?;
    if n == 0x80 {
        // indefinite length is a BER construct, invalid in DER
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    if n & 0x80 == 0x80 {
        // long form
        // First 1 bit is a marker for long form.
        // Other bits represent bytes length of the length field.
        let length = n & 0x7f;
        let (input, bs) = nom::bytes::complete::take(length).parse(input)?;
        if bs.first() == Some(&0x00) {
            // leading zero length octets are non-minimal
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Verify,
            )));
        }
        if bs.len() > 8 {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::TooLarge,
            )));
        }
        let n = bs.iter().enumerate().fold(0u64, |n, (i, &b)| {
            n + 256_u64.pow((bs.len() - i - 1) as u32) * b as u64
        });
        if n < 0x80 {
            // would fit in short form; DER requires the minimal encoding
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Verify,
            )));
        }
        return Ok((input, n));
    }
    // short form: 0-127
    Ok((input, n as u64))
}

fn write_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        self.as_slice().decode()
    }
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der, Self::Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        let mut tlvs = Vec::new();
        let mut input = *self;
        while !input.is_empty() {
            let (rest, tlv) = Tlv::parse(input)?;
            input = rest;
            tlvs.push(tlv);
        }
        Ok(Der { tlvs })
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>, Self::Error> {
        let mut out = Vec::new();
        for tlv in &self.tlvs {
            tlv.write(&mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use rsakit::decoder::Decoder;
    use rsakit::encoder::Encoder;

    use crate::{Der, Tag, Tlv, Value, parse_length, parse_tag};

    #[rstest(input, expected,
        case(vec![0x02], Tag::Integer),
        case(vec![0x02, 0x01], Tag::Integer),
        case(vec![0x30, 0x01], Tag::Sequence),
        case(vec![0x06, 0x09], Tag::ObjectIdentifier),
        case(vec![0xa0, 0x03], Tag::Unsupported(0xa0)),
    )]
    fn test_parse_tag(input: Vec<u8>, expected: Tag) {
        let actual = parse_tag(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input, expected,
        case(vec![0x02], 0x02),
        case(vec![0x7f], 0x7f),
        case(vec![0x81, 0x80], 0x80),
        case(vec![0x82, 0x02, 0x10], 256 * 0x02 + 0x10),
        case(vec![0x83, 0x01, 0x00, 0x00], 256 * 256),
        case(vec![0x82, 0xff, 0xff], 256 * 0xff + 0xff),
    )]
    fn test_parse_length(input: Vec<u8>, expected: u64) {
        let actual = parse_length(&input).unwrap();

        assert_eq!(expected, actual.1);
    }

    #[rstest(input,
        case::indefinite(vec![0x80]),
        case::short_form_fits(vec![0x81, 0x7f]),
        case::leading_zero(vec![0x82, 0x00, 0x80]),
    )]
    fn test_parse_length_rejects_non_der(input: Vec<u8>) {
        assert!(parse_length(&input).is_err());
    }

    #[rstest(input, expected,
        case(vec![0x02, 0x01, 0x01], Tlv{tag: Tag::Integer, value: Value::Data(vec![0x01])}),
        case(vec![0x02, 0x09, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01], Tlv{tag: Tag::Integer, value: Value::Data(vec![0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01])}),
        case(vec![0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01], Tlv { tag: Tag::ObjectIdentifier, value: Value::Data(vec![0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01]) }),
        case(vec![0x05, 0x00], Tlv { tag: Tag::Null, value: Value::Data(vec![]) }),
        case(vec![0x04, 0x04, 0x03, 0x02, 0x06, 0xa0], Tlv { tag: Tag::OctetString, value: Value::Data(vec![0x03, 0x02, 0x06, 0xa0]) }),
        case(vec![0x03, 0x04, 0x06, 0x6e, 0x5d, 0xc0], Tlv { tag: Tag::BitString, value: Value::Data(vec![0x06, 0x6e, 0x5d, 0xc0]) }),
    )]
    fn test_tlv_parse_primitive(input: Vec<u8>, expected: Tlv) {
        let (rest, actual) = Tlv::parse(&input).unwrap();
        assert!(rest.is_empty());
        assert_eq!(expected, actual);
    }

    #[rstest(input, expected,
        case(
            vec![0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09],
            Tlv::new_constructed(Tag::Sequence, vec![
                Tlv::new_primitive(Tag::Integer, vec![0x07]),
                Tlv::new_primitive(Tag::Integer, vec![0x08]),
                Tlv::new_primitive(Tag::Integer, vec![0x09]),
            ]),
        ),
        case(
            vec![0x30, 0x06, 0x30, 0x04, 0x02, 0x02, 0x01, 0x00],
            Tlv::new_constructed(Tag::Sequence, vec![
                Tlv::new_constructed(Tag::Sequence, vec![
                    Tlv::new_primitive(Tag::Integer, vec![0x01, 0x00]),
                ]),
            ]),
        ),
    )]
    fn test_tlv_parse_structured(input: Vec<u8>, expected: Tlv) {
        let (rest, actual) = Tlv::parse(&input).unwrap();
        assert!(rest.is_empty());
        assert_eq!(expected, actual);
    }

    #[rstest(input,
        case::truncated_value(vec![0x02, 0x05, 0x01]),
        case::truncated_length(vec![0x02]),
        case::garbage_after_tlv(vec![0x05, 0x00, 0xff]),
    )]
    fn test_decode_rejects_malformed(input: Vec<u8>) {
        let result: Result<Der, _> = input.decode();
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_rejects_empty() {
        let result: Result<Der, _> = Vec::<u8>::new().decode();
        assert!(result.is_err());
    }

    #[rstest(input,
        case(vec![0x02, 0x01, 0x01]),
        case(vec![0x30, 0x09, 0x02, 0x01, 0x07, 0x02, 0x01, 0x08, 0x02, 0x01, 0x09]),
        case(vec![0x30, 0x03, 0x02, 0x01, 0x2a, 0x05, 0x00]),
    )]
    fn test_der_roundtrip(input: Vec<u8>) {
        let der: Der = input.decode().unwrap();
        let encoded: Vec<u8> = der.encode().unwrap();
        assert_eq!(input, encoded);
    }

    #[test]
    fn test_encode_long_form_length() {
        // 200 content octets need the long form: 0x81 0xc8
        let tlv = Tlv::new_primitive(Tag::OctetString, vec![0xab; 200]);
        let der = Der::new(vec![tlv]);
        let encoded: Vec<u8> = der.encode().unwrap();
        assert_eq!(&encoded[..2], &[0x04, 0x81]);
        assert_eq!(encoded[2], 200);
        assert_eq!(encoded.len(), 203);

        let decoded: Der = encoded.decode().unwrap();
        assert_eq!(der, decoded);
    }
}
