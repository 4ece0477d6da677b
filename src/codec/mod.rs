//! Typed encoders/decoders for the supported extensions
//!
//! Each extension has its own ASN.1 schema; [`ExtensionValue`] is the tagged
//! union over all of them, with one encode/decode arm per type plus a
//! `Custom` fallback carrying raw DER for OIDs without a typed handler.
//! Codecs are pure transforms: no I/O, no partial results on failure.

pub mod access;
pub mod constraints;
pub mod crl;
pub mod key_identifier;
pub mod name;
pub mod policy;
pub mod usage;

pub use access::{AccessDescription, AuthorityInfoAccess, SubjectInfoAccess};
pub use constraints::{BasicConstraints, GeneralSubtree, InhibitAnyPolicy, NameConstraints, PolicyConstraints};
pub use crl::{CrlDistributionPoints, DistributionPoint, DistributionPointName, ReasonFlags};
pub use key_identifier::{AuthorityKeyIdentifier, SubjectKeyIdentifier};
pub use name::{
    common_name, is_general_name_empty, AttributeTypeAndValue, GeneralName, GeneralNames, Name,
    OtherName, RelativeDistinguishedName,
};
pub use policy::{CertificatePolicies, PolicyInformation, PolicyMapping, PolicyMappings, PolicyQualifierInfo};
pub use usage::{ExtendedKeyUsage, KeyUsage, PrivateKeyUsagePeriod};

use crate::ext_type::ExtensionType;
use der::asn1::{Any, Null, OctetString};
use der::{Decode, Encode, Tag, Tagged};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionCodecError {
    /// asn1 serialization error
    #[error("(asn1) couldn't serialize {element}: {source}")]
    Asn1Serialization {
        element: &'static str,
        source: der::Error,
    },

    /// asn1 deserialization error
    #[error("(asn1) couldn't deserialize {element}: {source}")]
    Asn1Deserialization {
        element: &'static str,
        source: der::Error,
    },

    /// a wrapped extension value was neither an OCTET STRING nor a DER NULL
    #[error("unexpected tag for wrapped extension value: {tag}")]
    UnexpectedWrapperTag { tag: Tag },
}

pub(crate) fn ser_err(element: &'static str) -> impl FnOnce(der::Error) -> ExtensionCodecError {
    move |source| ExtensionCodecError::Asn1Serialization { element, source }
}

pub(crate) fn de_err(element: &'static str) -> impl FnOnce(der::Error) -> ExtensionCodecError {
    move |source| ExtensionCodecError::Asn1Deserialization { element, source }
}

/// Wraps an extension's inner DER structure the way it is stored in a
/// certificate: an OCTET STRING around the value.
///
/// An empty inner value degenerates to a DER NULL instead of a zero-length
/// OCTET STRING. Known-empty extensions such as id-pkix-ocsp-nocheck are
/// encoded that way in the wild and consumers expect it, so the asymmetry is
/// preserved exactly.
pub fn wrap_in_octet_string(inner: &[u8]) -> Result<Vec<u8>, ExtensionCodecError> {
    if inner.is_empty() {
        Null.to_der().map_err(ser_err("wrapped extension value"))
    } else {
        OctetString::new(inner)
            .and_then(|wrapped| wrapped.to_der())
            .map_err(ser_err("wrapped extension value"))
    }
}

/// Inverse of [`wrap_in_octet_string`]: recovers the inner DER structure.
/// A DER NULL unwraps to the empty payload.
pub fn unwrap_extension(wrapped: &[u8]) -> Result<Vec<u8>, ExtensionCodecError> {
    let any = Any::from_der(wrapped).map_err(de_err("wrapped extension value"))?;
    match any.tag() {
        Tag::OctetString => Ok(any.value().to_vec()),
        Tag::Null => Ok(Vec::new()),
        tag => Err(ExtensionCodecError::UnexpectedWrapperTag { tag }),
    }
}

/// A decoded extension value, one variant per supported extension type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExtensionValue {
    AuthorityKeyIdentifier(AuthorityKeyIdentifier),
    SubjectKeyIdentifier(SubjectKeyIdentifier),
    BasicConstraints(BasicConstraints),
    KeyUsage(KeyUsage),
    ExtendedKeyUsage(ExtendedKeyUsage),
    CertificatePolicies(CertificatePolicies),
    PolicyMappings(PolicyMappings),
    PolicyConstraints(PolicyConstraints),
    InhibitAnyPolicy(InhibitAnyPolicy),
    NameConstraints(NameConstraints),
    SubjectAltName(GeneralNames),
    IssuerAltName(GeneralNames),
    AuthorityInfoAccess(AuthorityInfoAccess),
    SubjectInfoAccess(SubjectInfoAccess),
    CrlDistributionPoints(CrlDistributionPoints),
    PrivateKeyUsagePeriod(PrivateKeyUsagePeriod),
    /// Raw inner DER for an extension without a typed codec.
    Custom { oid: String, der: Vec<u8> },
}

impl ExtensionValue {
    /// Encodes the extension's inner DER structure (before the outer
    /// OCTET STRING wrap).
    pub fn encode(&self) -> Result<Vec<u8>, ExtensionCodecError> {
        match self {
            Self::AuthorityKeyIdentifier(v) => v.to_der().map_err(ser_err("authority key identifier")),
            Self::SubjectKeyIdentifier(v) => v.to_der().map_err(ser_err("subject key identifier")),
            Self::BasicConstraints(v) => v.to_der().map_err(ser_err("basic constraints")),
            Self::KeyUsage(v) => v.to_der().map_err(ser_err("key usage")),
            Self::ExtendedKeyUsage(v) => v.to_der().map_err(ser_err("extended key usage")),
            Self::CertificatePolicies(v) => v.to_der().map_err(ser_err("certificate policies")),
            Self::PolicyMappings(v) => v.to_der().map_err(ser_err("policy mappings")),
            Self::PolicyConstraints(v) => v.to_der().map_err(ser_err("policy constraints")),
            Self::InhibitAnyPolicy(v) => v.to_der().map_err(ser_err("inhibit any policy")),
            Self::NameConstraints(v) => v.to_der().map_err(ser_err("name constraints")),
            Self::SubjectAltName(v) => v.to_der().map_err(ser_err("subject alternative name")),
            Self::IssuerAltName(v) => v.to_der().map_err(ser_err("issuer alternative name")),
            Self::AuthorityInfoAccess(v) => v.to_der().map_err(ser_err("authority information access")),
            Self::SubjectInfoAccess(v) => v.to_der().map_err(ser_err("subject information access")),
            Self::CrlDistributionPoints(v) => v.to_der().map_err(ser_err("crl distribution points")),
            Self::PrivateKeyUsagePeriod(v) => v.to_der().map_err(ser_err("private key usage period")),
            Self::Custom { der, .. } => Ok(der.clone()),
        }
    }

    /// Decodes the inner DER structure of an extension of type `ty`.
    ///
    /// Fails with [`ExtensionCodecError`] on malformed or truncated input;
    /// unknown types decode to [`ExtensionValue::Custom`] without inspection.
    pub fn decode(ty: &ExtensionType, inner: &[u8]) -> Result<Self, ExtensionCodecError> {
        let value = match ty {
            ExtensionType::AuthorityKeyIdentifier => Self::AuthorityKeyIdentifier(
                AuthorityKeyIdentifier::from_der(inner).map_err(de_err("authority key identifier"))?,
            ),
            ExtensionType::SubjectKeyIdentifier => Self::SubjectKeyIdentifier(
                SubjectKeyIdentifier::from_der(inner).map_err(de_err("subject key identifier"))?,
            ),
            ExtensionType::BasicConstraints => {
                Self::BasicConstraints(BasicConstraints::from_der(inner).map_err(de_err("basic constraints"))?)
            }
            ExtensionType::KeyUsage => Self::KeyUsage(KeyUsage::from_der(inner).map_err(de_err("key usage"))?),
            ExtensionType::ExtendedKeyUsage => {
                Self::ExtendedKeyUsage(ExtendedKeyUsage::from_der(inner).map_err(de_err("extended key usage"))?)
            }
            ExtensionType::CertificatePolicies => Self::CertificatePolicies(
                CertificatePolicies::from_der(inner).map_err(de_err("certificate policies"))?,
            ),
            ExtensionType::PolicyMappings => {
                Self::PolicyMappings(PolicyMappings::from_der(inner).map_err(de_err("policy mappings"))?)
            }
            ExtensionType::PolicyConstraints => {
                Self::PolicyConstraints(PolicyConstraints::from_der(inner).map_err(de_err("policy constraints"))?)
            }
            ExtensionType::InhibitAnyPolicy => {
                Self::InhibitAnyPolicy(InhibitAnyPolicy::from_der(inner).map_err(de_err("inhibit any policy"))?)
            }
            ExtensionType::NameConstraints => {
                Self::NameConstraints(NameConstraints::from_der(inner).map_err(de_err("name constraints"))?)
            }
            ExtensionType::SubjectAlternativeName => Self::SubjectAltName(
                GeneralNames::from_der(inner).map_err(de_err("subject alternative name"))?,
            ),
            ExtensionType::IssuerAlternativeName => {
                Self::IssuerAltName(GeneralNames::from_der(inner).map_err(de_err("issuer alternative name"))?)
            }
            ExtensionType::AuthorityInformationAccess => Self::AuthorityInfoAccess(
                AuthorityInfoAccess::from_der(inner).map_err(de_err("authority information access"))?,
            ),
            ExtensionType::SubjectInformationAccess => Self::SubjectInfoAccess(
                SubjectInfoAccess::from_der(inner).map_err(de_err("subject information access"))?,
            ),
            ExtensionType::CrlDistributionPoints => Self::CrlDistributionPoints(
                CrlDistributionPoints::from_der(inner).map_err(de_err("crl distribution points"))?,
            ),
            ExtensionType::PrivateKeyUsagePeriod => Self::PrivateKeyUsagePeriod(
                PrivateKeyUsagePeriod::from_der(inner).map_err(de_err("private key usage period"))?,
            ),
            ExtensionType::Custom(oid) => Self::Custom {
                oid: oid.clone(),
                der: inner.to_vec(),
            },
        };
        Ok(value)
    }

    /// The registry identity this value encodes for.
    pub fn extension_type(&self) -> ExtensionType {
        match self {
            Self::AuthorityKeyIdentifier(_) => ExtensionType::AuthorityKeyIdentifier,
            Self::SubjectKeyIdentifier(_) => ExtensionType::SubjectKeyIdentifier,
            Self::BasicConstraints(_) => ExtensionType::BasicConstraints,
            Self::KeyUsage(_) => ExtensionType::KeyUsage,
            Self::ExtendedKeyUsage(_) => ExtensionType::ExtendedKeyUsage,
            Self::CertificatePolicies(_) => ExtensionType::CertificatePolicies,
            Self::PolicyMappings(_) => ExtensionType::PolicyMappings,
            Self::PolicyConstraints(_) => ExtensionType::PolicyConstraints,
            Self::InhibitAnyPolicy(_) => ExtensionType::InhibitAnyPolicy,
            Self::NameConstraints(_) => ExtensionType::NameConstraints,
            Self::SubjectAltName(_) => ExtensionType::SubjectAlternativeName,
            Self::IssuerAltName(_) => ExtensionType::IssuerAlternativeName,
            Self::AuthorityInfoAccess(_) => ExtensionType::AuthorityInformationAccess,
            Self::SubjectInfoAccess(_) => ExtensionType::SubjectInformationAccess,
            Self::CrlDistributionPoints(_) => ExtensionType::CrlDistributionPoints,
            Self::PrivateKeyUsagePeriod(_) => ExtensionType::PrivateKeyUsagePeriod,
            Self::Custom { oid, .. } => ExtensionType::Custom(oid.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn wrap_non_empty_value_as_octet_string() {
        // BasicConstraints { ca: true }
        let inner = [0x30, 0x03, 0x01, 0x01, 0xFF];
        let wrapped = wrap_in_octet_string(&inner).unwrap();
        assert_eq!(wrapped, vec![0x04, 0x05, 0x30, 0x03, 0x01, 0x01, 0xFF]);
        assert_eq!(unwrap_extension(&wrapped).unwrap(), inner);
    }

    #[test]
    fn wrap_empty_value_as_der_null() {
        // empty extension value, e.g. id-pkix-ocsp-nocheck from RFC 6960
        let wrapped = wrap_in_octet_string(&[]).unwrap();
        assert_eq!(wrapped, vec![0x05, 0x00]);
        assert_eq!(unwrap_extension(&wrapped).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn unwrap_rejects_other_tags() {
        // INTEGER 7 is neither an OCTET STRING nor a NULL
        let err = unwrap_extension(&[0x02, 0x01, 0x07]).unwrap_err();
        assert!(matches!(err, ExtensionCodecError::UnexpectedWrapperTag { tag: Tag::Integer }));
    }

    #[test]
    fn truncated_input_fails_for_every_known_type() {
        // a lone SEQUENCE header promising more content than provided
        let truncated = [0x30, 0x10, 0x01];
        for ty in crate::ext_type::ExtensionType::KNOWN {
            let result = ExtensionValue::decode(&ty, &truncated);
            assert!(result.is_err(), "decode of truncated input succeeded for {ty:?}");
        }
    }

    #[test]
    fn custom_value_round_trips_without_inspection() {
        let ty = crate::ext_type::ExtensionType::resolve("1.2.3.4");
        let raw = vec![0xDE, 0xAD, 0xBE, 0xEF];
        let value = ExtensionValue::decode(&ty, &raw).unwrap();
        assert_eq!(value.encode().unwrap(), raw);
        assert_eq!(value.extension_type(), ty);
    }
}
