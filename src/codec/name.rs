//! GeneralName and the minimal directory-name model
//!
//! RFC 5280 §4.2.1.6. Only the name forms the editing workflow can produce are
//! supported; x400Address and ediPartyName decode to a codec error, matching
//! the behavior consumers of this crate had before.

use crate::codec::{ser_err, ExtensionCodecError};
use crate::oids;
use der::asn1::{Any, Ia5String, ObjectIdentifier, OctetString, SetOfVec, Utf8StringRef};
use der::{Choice, Sequence, ValueOrd};

/// ```not_rust
/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
/// ```
pub type GeneralNames = Vec<GeneralName>;

/// ```not_rust
/// GeneralName ::= CHOICE {
///       otherName                       [0]     OtherName,
///       rfc822Name                      [1]     IA5String,
///       dNSName                         [2]     IA5String,
///       x400Address                     [3]     ORAddress,
///       directoryName                   [4]     Name,
///       ediPartyName                    [5]     EDIPartyName,
///       uniformResourceIdentifier       [6]     IA5String,
///       iPAddress                       [7]     OCTET STRING,
///       registeredID                    [8]     OBJECT IDENTIFIER }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Choice)]
pub enum GeneralName {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", constructed = "true")]
    OtherName(OtherName),

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT")]
    Rfc822Name(Ia5String),

    #[asn1(context_specific = "2", tag_mode = "IMPLICIT")]
    DnsName(Ia5String),

    // directoryName is EXPLICIT regardless of the module's IMPLICIT TAGS
    // default because Name is itself a CHOICE
    #[asn1(context_specific = "4", tag_mode = "EXPLICIT", constructed = "true")]
    DirectoryName(Name),

    #[asn1(context_specific = "6", tag_mode = "IMPLICIT")]
    UniformResourceIdentifier(Ia5String),

    #[asn1(context_specific = "7", tag_mode = "IMPLICIT")]
    IpAddress(OctetString),

    #[asn1(context_specific = "8", tag_mode = "IMPLICIT")]
    RegisteredId(ObjectIdentifier),
}

/// ```not_rust
/// OtherName ::= SEQUENCE {
///      type-id    OBJECT IDENTIFIER,
///      value      [0] EXPLICIT ANY DEFINED BY type-id }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct OtherName {
    pub type_id: ObjectIdentifier,

    #[asn1(context_specific = "0", tag_mode = "EXPLICIT")]
    pub value: Any,
}

/// ```not_rust
/// Name ::= CHOICE { rdnSequence RDNSequence }
/// RDNSequence ::= SEQUENCE OF RelativeDistinguishedName
/// ```
pub type Name = Vec<RelativeDistinguishedName>;

/// ```not_rust
/// RelativeDistinguishedName ::= SET SIZE (1..MAX) OF AttributeTypeAndValue
/// ```
pub type RelativeDistinguishedName = SetOfVec<AttributeTypeAndValue>;

/// ```not_rust
/// AttributeTypeAndValue ::= SEQUENCE {
///      type  AttributeType,
///      value AttributeValue }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence, ValueOrd)]
pub struct AttributeTypeAndValue {
    pub oid: ObjectIdentifier,
    pub value: Any,
}

/// Builds a single-RDN `Name` holding one common name attribute, which is all
/// the certificate contexts handled here ever need.
pub fn common_name(value: &str) -> Result<Name, ExtensionCodecError> {
    let value = Utf8StringRef::new(value)
        .and_then(|s| Any::encode_from(&s))
        .map_err(ser_err("common name"))?;
    let attribute = AttributeTypeAndValue {
        oid: oids::at_common_name(),
        value,
    };
    let rdn = RelativeDistinguishedName::try_from(vec![attribute]).map_err(ser_err("common name"))?;
    Ok(vec![rdn])
}

/// A syntactically-empty GeneralName: empty rfc822/DNS/URI string, zero-length
/// IP address, or a directory name with no attributes at all. Such names are
/// valid DER but produce extensions verifiers reject.
pub fn is_general_name_empty(name: &GeneralName) -> bool {
    match name {
        GeneralName::Rfc822Name(s) | GeneralName::DnsName(s) | GeneralName::UniformResourceIdentifier(s) => {
            s.as_str().is_empty()
        }
        GeneralName::DirectoryName(name) => name.iter().all(|rdn| rdn.len() == 0),
        GeneralName::IpAddress(octets) => octets.as_bytes().is_empty(),
        GeneralName::OtherName(_) | GeneralName::RegisteredId(_) => false,
    }
}
