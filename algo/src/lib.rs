//! Algorithm-name resolution for RSA operations.
//!
//! Callers name algorithms with JCA-style strings such as `SHA256withRSA` or
//! `RSA/ECB/OAEPWithSHA-256AndMGF1Padding`. [`resolve`] maps a name to an
//! [`AlgorithmId`] through a closed, case-sensitive table. Nothing is
//! inferred from the shape of a name: engines disagree on what a "default"
//! padding or hash means, so every legal combination is enumerated and
//! everything else is rejected.

pub mod error;

pub use error::{Error, Result};

/// Whether an algorithm signs or encrypts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Signature,
    Encryption,
}

/// RSA padding scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Padding {
    /// PKCS#1 v1.5.
    Pkcs1,
    /// RSASSA-PSS (signatures only).
    Pss,
    /// RSAES-OAEP (encryption only).
    Oaep,
    /// No digest before padding; the caller supplies the full block.
    Raw,
}

/// Digest applied before padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    None,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

/// The (family, padding, hash) triple an [`AlgorithmId`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmSpec {
    pub family: Family,
    pub padding: Padding,
    pub hash: HashAlg,
}

/// One entry of the recognized-algorithm table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    Sha1WithRsa,
    Sha224WithRsa,
    Sha256WithRsa,
    Sha384WithRsa,
    Sha512WithRsa,
    Sha1WithRsaPss,
    Sha224WithRsaPss,
    Sha256WithRsaPss,
    Sha384WithRsaPss,
    Sha512WithRsaPss,
    NoneWithRsa,
    RsaPkcs1Encryption,
    RsaOaepSha1,
    RsaOaepSha224,
    RsaOaepSha256,
    RsaOaepSha384,
    RsaOaepSha512,
}

/// The full vocabulary, in resolution order.
const NAMES: [(&str, AlgorithmId); 17] = [
    ("SHA1withRSA", AlgorithmId::Sha1WithRsa),
    ("SHA224withRSA", AlgorithmId::Sha224WithRsa),
    ("SHA256withRSA", AlgorithmId::Sha256WithRsa),
    ("SHA384withRSA", AlgorithmId::Sha384WithRsa),
    ("SHA512withRSA", AlgorithmId::Sha512WithRsa),
    ("SHA1withRSA/PSS", AlgorithmId::Sha1WithRsaPss),
    ("SHA224withRSA/PSS", AlgorithmId::Sha224WithRsaPss),
    ("SHA256withRSA/PSS", AlgorithmId::Sha256WithRsaPss),
    ("SHA384withRSA/PSS", AlgorithmId::Sha384WithRsaPss),
    ("SHA512withRSA/PSS", AlgorithmId::Sha512WithRsaPss),
    ("NONEwithRSA", AlgorithmId::NoneWithRsa),
    ("RSA/ECB/PKCS1Padding", AlgorithmId::RsaPkcs1Encryption),
    ("RSA/ECB/OAEPWithSHA-1AndMGF1Padding", AlgorithmId::RsaOaepSha1),
    ("RSA/ECB/OAEPWithSHA-224AndMGF1Padding", AlgorithmId::RsaOaepSha224),
    ("RSA/ECB/OAEPWithSHA-256AndMGF1Padding", AlgorithmId::RsaOaepSha256),
    ("RSA/ECB/OAEPWithSHA-384AndMGF1Padding", AlgorithmId::RsaOaepSha384),
    ("RSA/ECB/OAEPWithSHA-512AndMGF1Padding", AlgorithmId::RsaOaepSha512),
];

impl AlgorithmId {
    pub fn spec(&self) -> AlgorithmSpec {
        use AlgorithmId::*;
        let (family, padding, hash) = match self {
            Sha1WithRsa => (Family::Signature, Padding::Pkcs1, HashAlg::Sha1),
            Sha224WithRsa => (Family::Signature, Padding::Pkcs1, HashAlg::Sha224),
            Sha256WithRsa => (Family::Signature, Padding::Pkcs1, HashAlg::Sha256),
            Sha384WithRsa => (Family::Signature, Padding::Pkcs1, HashAlg::Sha384),
            Sha512WithRsa => (Family::Signature, Padding::Pkcs1, HashAlg::Sha512),
            Sha1WithRsaPss => (Family::Signature, Padding::Pss, HashAlg::Sha1),
            Sha224WithRsaPss => (Family::Signature, Padding::Pss, HashAlg::Sha224),
            Sha256WithRsaPss => (Family::Signature, Padding::Pss, HashAlg::Sha256),
            Sha384WithRsaPss => (Family::Signature, Padding::Pss, HashAlg::Sha384),
            Sha512WithRsaPss => (Family::Signature, Padding::Pss, HashAlg::Sha512),
            NoneWithRsa => (Family::Signature, Padding::Raw, HashAlg::None),
            RsaPkcs1Encryption => (Family::Encryption, Padding::Pkcs1, HashAlg::None),
            RsaOaepSha1 => (Family::Encryption, Padding::Oaep, HashAlg::Sha1),
            RsaOaepSha224 => (Family::Encryption, Padding::Oaep, HashAlg::Sha224),
            RsaOaepSha256 => (Family::Encryption, Padding::Oaep, HashAlg::Sha256),
            RsaOaepSha384 => (Family::Encryption, Padding::Oaep, HashAlg::Sha384),
            RsaOaepSha512 => (Family::Encryption, Padding::Oaep, HashAlg::Sha512),
        };
        AlgorithmSpec {
            family,
            padding,
            hash,
        }
    }

    /// The PKCS#1 object identifier for this algorithm.
    ///
    /// PKCS#1 v1.5 signatures each carry their own OID; PSS and OAEP share
    /// one OID each and carry the hash in AlgorithmIdentifier parameters;
    /// raw signing and v1.5 encryption fall back to rsaEncryption.
    pub fn oid(&self) -> &'static str {
        use AlgorithmId::*;
        match self {
            Sha1WithRsa => "1.2.840.113549.1.1.5",
            Sha224WithRsa => "1.2.840.113549.1.1.14",
            Sha256WithRsa => "1.2.840.113549.1.1.11",
            Sha384WithRsa => "1.2.840.113549.1.1.12",
            Sha512WithRsa => "1.2.840.113549.1.1.13",
            Sha1WithRsaPss | Sha224WithRsaPss | Sha256WithRsaPss | Sha384WithRsaPss
            | Sha512WithRsaPss => "1.2.840.113549.1.1.10",
            NoneWithRsa | RsaPkcs1Encryption => "1.2.840.113549.1.1.1",
            RsaOaepSha1 | RsaOaepSha224 | RsaOaepSha256 | RsaOaepSha384 | RsaOaepSha512 => {
                "1.2.840.113549.1.1.7"
            }
        }
    }

    /// The name this identifier resolves from.
    pub fn name(&self) -> &'static str {
        use AlgorithmId::*;
        match self {
            Sha1WithRsa => "SHA1withRSA",
            Sha224WithRsa => "SHA224withRSA",
            Sha256WithRsa => "SHA256withRSA",
            Sha384WithRsa => "SHA384withRSA",
            Sha512WithRsa => "SHA512withRSA",
            Sha1WithRsaPss => "SHA1withRSA/PSS",
            Sha224WithRsaPss => "SHA224withRSA/PSS",
            Sha256WithRsaPss => "SHA256withRSA/PSS",
            Sha384WithRsaPss => "SHA384withRSA/PSS",
            Sha512WithRsaPss => "SHA512withRSA/PSS",
            NoneWithRsa => "NONEwithRSA",
            RsaPkcs1Encryption => "RSA/ECB/PKCS1Padding",
            RsaOaepSha1 => "RSA/ECB/OAEPWithSHA-1AndMGF1Padding",
            RsaOaepSha224 => "RSA/ECB/OAEPWithSHA-224AndMGF1Padding",
            RsaOaepSha256 => "RSA/ECB/OAEPWithSHA-256AndMGF1Padding",
            RsaOaepSha384 => "RSA/ECB/OAEPWithSHA-384AndMGF1Padding",
            RsaOaepSha512 => "RSA/ECB/OAEPWithSHA-512AndMGF1Padding",
        }
    }
}

/// Resolves an algorithm name against the table.
pub fn resolve(name: &str) -> Result<AlgorithmId> {
    NAMES
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| Error::UnsupportedAlgorithm(name.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use rstest::rstest;

    use asn1::ObjectIdentifier;

    use super::*;

    #[test]
    fn test_table_is_total_and_distinct() {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for (name, id) in NAMES {
            assert!(names.insert(name), "duplicate name {}", name);
            assert!(ids.insert(id), "duplicate identifier for {}", name);
            assert_eq!(resolve(name).unwrap(), id);
            assert_eq!(id.name(), name);
        }
        assert_eq!(ids.len(), 17);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        assert_eq!(
            resolve("SHA256withRSA/PSS").unwrap(),
            resolve("SHA256withRSA/PSS").unwrap()
        );
    }

    #[rstest(name,
        case("MD5withRSA"),
        case("SHA256withECDSA"),
        case("sha256withrsa"),
        case("SHA256WithRSA"),
        case("RSA/ECB/OAEPWithMD5AndMGF1Padding"),
        case("RSA"),
        case(""),
    )]
    fn test_unlisted_names_are_rejected(name: &str) {
        assert_eq!(
            resolve(name),
            Err(Error::UnsupportedAlgorithm(name.to_string()))
        );
    }

    #[rstest(name, family, padding, hash,
        case("SHA512withRSA", Family::Signature, Padding::Pkcs1, HashAlg::Sha512),
        case("SHA1withRSA/PSS", Family::Signature, Padding::Pss, HashAlg::Sha1),
        case("NONEwithRSA", Family::Signature, Padding::Raw, HashAlg::None),
        case("RSA/ECB/PKCS1Padding", Family::Encryption, Padding::Pkcs1, HashAlg::None),
        case("RSA/ECB/OAEPWithSHA-384AndMGF1Padding", Family::Encryption, Padding::Oaep, HashAlg::Sha384),
    )]
    fn test_spec_components(name: &str, family: Family, padding: Padding, hash: HashAlg) {
        let spec = resolve(name).unwrap().spec();
        assert_eq!(spec.family, family);
        assert_eq!(spec.padding, padding);
        assert_eq!(spec.hash, hash);
    }

    #[rstest(name, oid,
        case("SHA1withRSA", "1.2.840.113549.1.1.5"),
        case("SHA256withRSA", "1.2.840.113549.1.1.11"),
        case("SHA256withRSA/PSS", "1.2.840.113549.1.1.10"),
        case("RSA/ECB/OAEPWithSHA-256AndMGF1Padding", "1.2.840.113549.1.1.7"),
        case("NONEwithRSA", "1.2.840.113549.1.1.1"),
    )]
    fn test_oid_assignment(name: &str, oid: &str) {
        assert_eq!(resolve(name).unwrap().oid(), oid);
    }

    #[test]
    fn test_all_oids_parse() {
        for (name, id) in NAMES {
            assert!(
                ObjectIdentifier::from_str(id.oid()).is_ok(),
                "OID of {} does not parse",
                name
            );
        }
    }
}
