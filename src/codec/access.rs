//! Authority/Subject Information Access extensions (RFC 5280 §4.2.2.1/§4.2.2.2)

use crate::codec::name::GeneralName;
use der::asn1::ObjectIdentifier;
use der::Sequence;

/// ```not_rust
/// AuthorityInfoAccessSyntax ::= SEQUENCE SIZE (1..MAX) OF AccessDescription
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorityInfoAccess(pub Vec<AccessDescription>);

impl_newtype!(AuthorityInfoAccess, Vec<AccessDescription>);

/// ```not_rust
/// SubjectInfoAccessSyntax ::= SEQUENCE SIZE (1..MAX) OF AccessDescription
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubjectInfoAccess(pub Vec<AccessDescription>);

impl_newtype!(SubjectInfoAccess, Vec<AccessDescription>);

/// ```not_rust
/// AccessDescription ::= SEQUENCE {
///      accessMethod    OBJECT IDENTIFIER,
///      accessLocation  GeneralName }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct AccessDescription {
    pub access_method: ObjectIdentifier,
    pub access_location: GeneralName,
}
