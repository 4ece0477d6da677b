//! Registry mapping extension identity to canonical OID and back

use crate::oids;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Identity of a certificate extension.
///
/// One variant per supported extension plus [`ExtensionType::Custom`], which
/// carries the dotted OID of anything the registry has no typed handler for.
/// [`ExtensionType::resolve`] is total: any syntactically-valid OID string
/// resolves to something.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtensionType {
    AuthorityKeyIdentifier,
    SubjectKeyIdentifier,
    BasicConstraints,
    KeyUsage,
    ExtendedKeyUsage,
    CertificatePolicies,
    PolicyMappings,
    PolicyConstraints,
    InhibitAnyPolicy,
    NameConstraints,
    SubjectAlternativeName,
    IssuerAlternativeName,
    AuthorityInformationAccess,
    SubjectInformationAccess,
    CrlDistributionPoints,
    PrivateKeyUsagePeriod,
    /// Extension with no typed codec; the dotted OID is carried verbatim.
    Custom(String),
}

impl ExtensionType {
    /// Every extension with a typed codec, in OID-table order.
    pub const KNOWN: [ExtensionType; 16] = [
        ExtensionType::SubjectKeyIdentifier,
        ExtensionType::KeyUsage,
        ExtensionType::PrivateKeyUsagePeriod,
        ExtensionType::SubjectAlternativeName,
        ExtensionType::IssuerAlternativeName,
        ExtensionType::BasicConstraints,
        ExtensionType::NameConstraints,
        ExtensionType::CrlDistributionPoints,
        ExtensionType::CertificatePolicies,
        ExtensionType::PolicyMappings,
        ExtensionType::AuthorityKeyIdentifier,
        ExtensionType::PolicyConstraints,
        ExtensionType::ExtendedKeyUsage,
        ExtensionType::InhibitAnyPolicy,
        ExtensionType::AuthorityInformationAccess,
        ExtensionType::SubjectInformationAccess,
    ];

    /// Resolves a dotted OID string. Never fails: an OID without a typed
    /// handler resolves to [`ExtensionType::Custom`].
    pub fn resolve(oid: &str) -> Self {
        match registry().get(oid) {
            Some(ty) => ty.clone(),
            None => ExtensionType::Custom(oid.to_owned()),
        }
    }

    /// Canonical dotted OID for this extension type.
    pub fn oid(&self) -> &str {
        match self {
            ExtensionType::AuthorityKeyIdentifier => oids::AUTHORITY_KEY_IDENTIFIER,
            ExtensionType::SubjectKeyIdentifier => oids::SUBJECT_KEY_IDENTIFIER,
            ExtensionType::BasicConstraints => oids::BASIC_CONSTRAINTS,
            ExtensionType::KeyUsage => oids::KEY_USAGE,
            ExtensionType::ExtendedKeyUsage => oids::EXTENDED_KEY_USAGE,
            ExtensionType::CertificatePolicies => oids::CERTIFICATE_POLICIES,
            ExtensionType::PolicyMappings => oids::POLICY_MAPPINGS,
            ExtensionType::PolicyConstraints => oids::POLICY_CONSTRAINTS,
            ExtensionType::InhibitAnyPolicy => oids::INHIBIT_ANY_POLICY,
            ExtensionType::NameConstraints => oids::NAME_CONSTRAINTS,
            ExtensionType::SubjectAlternativeName => oids::SUBJECT_ALTERNATIVE_NAME,
            ExtensionType::IssuerAlternativeName => oids::ISSUER_ALTERNATIVE_NAME,
            ExtensionType::AuthorityInformationAccess => oids::AUTHORITY_INFORMATION_ACCESS,
            ExtensionType::SubjectInformationAccess => oids::SUBJECT_INFORMATION_ACCESS,
            ExtensionType::CrlDistributionPoints => oids::CRL_DISTRIBUTION_POINTS,
            ExtensionType::PrivateKeyUsagePeriod => oids::PRIVATE_KEY_USAGE_PERIOD,
            ExtensionType::Custom(oid) => oid,
        }
    }

    /// Human-readable name, for display in pick lists and error messages.
    pub fn friendly_name(&self) -> &str {
        match self {
            ExtensionType::AuthorityKeyIdentifier => "Authority Key Identifier",
            ExtensionType::SubjectKeyIdentifier => "Subject Key Identifier",
            ExtensionType::BasicConstraints => "Basic Constraints",
            ExtensionType::KeyUsage => "Key Usage",
            ExtensionType::ExtendedKeyUsage => "Extended Key Usage",
            ExtensionType::CertificatePolicies => "Certificate Policies",
            ExtensionType::PolicyMappings => "Policy Mappings",
            ExtensionType::PolicyConstraints => "Policy Constraints",
            ExtensionType::InhibitAnyPolicy => "Inhibit Any Policy",
            ExtensionType::NameConstraints => "Name Constraints",
            ExtensionType::SubjectAlternativeName => "Subject Alternative Name",
            ExtensionType::IssuerAlternativeName => "Issuer Alternative Name",
            ExtensionType::AuthorityInformationAccess => "Authority Information Access",
            ExtensionType::SubjectInformationAccess => "Subject Information Access",
            ExtensionType::CrlDistributionPoints => "CRL Distribution Points",
            ExtensionType::PrivateKeyUsagePeriod => "Private Key Usage Period",
            ExtensionType::Custom(_) => "Custom Extension",
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.friendly_name(), self.oid())
    }
}

fn registry() -> &'static HashMap<&'static str, ExtensionType> {
    static REGISTRY: OnceLock<HashMap<&'static str, ExtensionType>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        ExtensionType::KNOWN
            .iter()
            .map(|ty| (ty.oid_static(), ty.clone()))
            .collect()
    })
}

impl ExtensionType {
    // `oid()` borrows from `self` because of `Custom`; the registry needs the
    // `'static` table entries.
    fn oid_static(&self) -> &'static str {
        match self {
            ExtensionType::AuthorityKeyIdentifier => oids::AUTHORITY_KEY_IDENTIFIER,
            ExtensionType::SubjectKeyIdentifier => oids::SUBJECT_KEY_IDENTIFIER,
            ExtensionType::BasicConstraints => oids::BASIC_CONSTRAINTS,
            ExtensionType::KeyUsage => oids::KEY_USAGE,
            ExtensionType::ExtendedKeyUsage => oids::EXTENDED_KEY_USAGE,
            ExtensionType::CertificatePolicies => oids::CERTIFICATE_POLICIES,
            ExtensionType::PolicyMappings => oids::POLICY_MAPPINGS,
            ExtensionType::PolicyConstraints => oids::POLICY_CONSTRAINTS,
            ExtensionType::InhibitAnyPolicy => oids::INHIBIT_ANY_POLICY,
            ExtensionType::NameConstraints => oids::NAME_CONSTRAINTS,
            ExtensionType::SubjectAlternativeName => oids::SUBJECT_ALTERNATIVE_NAME,
            ExtensionType::IssuerAlternativeName => oids::ISSUER_ALTERNATIVE_NAME,
            ExtensionType::AuthorityInformationAccess => oids::AUTHORITY_INFORMATION_ACCESS,
            ExtensionType::SubjectInformationAccess => oids::SUBJECT_INFORMATION_ACCESS,
            ExtensionType::CrlDistributionPoints => oids::CRL_DISTRIBUTION_POINTS,
            ExtensionType::PrivateKeyUsagePeriod => oids::PRIVATE_KEY_USAGE_PERIOD,
            ExtensionType::Custom(_) => unreachable!("custom types are never in the registry table"),
        }
    }
}
