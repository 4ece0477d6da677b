//! Certificate policy extensions

use der::asn1::{Any, ObjectIdentifier};
use der::Sequence;

/// RFC 5280 §4.2.1.4
///
/// ```not_rust
/// certificatePolicies ::= SEQUENCE SIZE (1..MAX) OF PolicyInformation
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificatePolicies(pub Vec<PolicyInformation>);

impl_newtype!(CertificatePolicies, Vec<PolicyInformation>);

/// ```not_rust
/// PolicyInformation ::= SEQUENCE {
///      policyIdentifier   CertPolicyId,
///      policyQualifiers   SEQUENCE SIZE (1..MAX) OF PolicyQualifierInfo OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct PolicyInformation {
    pub policy_identifier: ObjectIdentifier,
    pub policy_qualifiers: Option<Vec<PolicyQualifierInfo>>,
}

/// ```not_rust
/// PolicyQualifierInfo ::= SEQUENCE {
///      policyQualifierId  PolicyQualifierId,
///      qualifier          ANY DEFINED BY policyQualifierId }
/// ```
///
/// Qualifiers (CPS URIs, user notices) are carried opaquely; the editing
/// workflow treats them as pass-through data.
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct PolicyQualifierInfo {
    pub policy_qualifier_id: ObjectIdentifier,
    pub qualifier: Option<Any>,
}

/// RFC 5280 §4.2.1.5
///
/// ```not_rust
/// PolicyMappings ::= SEQUENCE SIZE (1..MAX) OF SEQUENCE {
///      issuerDomainPolicy      CertPolicyId,
///      subjectDomainPolicy     CertPolicyId }
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicyMappings(pub Vec<PolicyMapping>);

impl_newtype!(PolicyMappings, Vec<PolicyMapping>);

#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct PolicyMapping {
    pub issuer_domain_policy: ObjectIdentifier,
    pub subject_domain_policy: ObjectIdentifier,
}
