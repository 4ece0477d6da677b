//! Key identifier derivation for the Authority/Subject Key Identifier extensions
//!
//! The identifier is the SHA-1 digest of the `subjectPublicKey` BIT STRING
//! payload of the key's SubjectPublicKeyInfo, excluding the unused-bits octet
//! and any outer wrapper. This is the RFC 5280 §4.2.1.2 method (1) convention
//! certificate consumers expect, so the output must stay bit-exact.

use der::asn1::{Any, BitString, ObjectIdentifier};
use der::{Decode, Sequence};
use sha1::{Digest, Sha1};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyIdGenError {
    /// asn1 deserialization error
    #[error("(asn1) couldn't deserialize {element}: {source}")]
    Asn1Deserialization {
        element: &'static str,
        source: der::Error,
    },
}

/// AlgorithmIdentifier as found inside SubjectPublicKeyInfo.
///
/// Parameters are carried opaquely: key identifier derivation never looks at
/// them.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct AlgorithmIdentifier {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<Any>,
}

/// RFC 5280 §4.1.2.7
///
/// ```not_rust
/// SubjectPublicKeyInfo ::= SEQUENCE {
///      algorithm            AlgorithmIdentifier,
///      subjectPublicKey     BIT STRING }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SubjectPublicKeyInfo {
    pub algorithm: AlgorithmIdentifier,
    pub subject_public_key: BitString,
}

/// Derives the 160-bit key identifier for the public key whose DER-encoded
/// SubjectPublicKeyInfo is `spki_der`.
pub fn generate_160_bit_id(spki_der: &[u8]) -> Result<[u8; 20], KeyIdGenError> {
    let spki =
        SubjectPublicKeyInfo::from_der(spki_der).map_err(|source| KeyIdGenError::Asn1Deserialization {
            element: "subject public key info",
            source,
        })?;
    Ok(Sha1::digest(spki.subject_public_key.raw_bytes()).into())
}
