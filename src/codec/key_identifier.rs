//! Subject/Authority Key Identifier extensions (RFC 5280 §4.2.1.1/§4.2.1.2)

use crate::codec::name::GeneralNames;
use der::asn1::{Int, OctetString};
use der::Sequence;

/// ```not_rust
/// SubjectKeyIdentifier ::= KeyIdentifier
/// KeyIdentifier ::= OCTET STRING
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubjectKeyIdentifier(pub OctetString);

impl_newtype!(SubjectKeyIdentifier, OctetString);

/// ```not_rust
/// AuthorityKeyIdentifier ::= SEQUENCE {
///     keyIdentifier             [0] KeyIdentifier            OPTIONAL,
///     authorityCertIssuer       [1] GeneralNames             OPTIONAL,
///     authorityCertSerialNumber [2] CertificateSerialNumber  OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct AuthorityKeyIdentifier {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub key_identifier: Option<OctetString>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub authority_cert_issuer: Option<GeneralNames>,

    #[asn1(context_specific = "2", tag_mode = "IMPLICIT", optional = "true")]
    pub authority_cert_serial_number: Option<Int>,
}
