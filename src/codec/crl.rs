//! CRL Distribution Points extension (RFC 5280 §4.2.1.13)

use crate::codec::name::{GeneralNames, RelativeDistinguishedName};
use crate::codec::usage::{bit_string_to_named_bits, named_bits_to_bit_string};
use der::asn1::BitString;
use der::{Choice, DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Sequence, Tag, Writer};
use std::ops::BitOr;

/// ```not_rust
/// CRLDistributionPoints ::= SEQUENCE SIZE (1..MAX) OF DistributionPoint
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrlDistributionPoints(pub Vec<DistributionPoint>);

impl_newtype!(CrlDistributionPoints, Vec<DistributionPoint>);

/// ```not_rust
/// DistributionPoint ::= SEQUENCE {
///      distributionPoint       [0]     DistributionPointName OPTIONAL,
///      reasons                 [1]     ReasonFlags OPTIONAL,
///      cRLIssuer               [2]     GeneralNames OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct DistributionPoint {
    // [0] is EXPLICIT: DistributionPointName is a CHOICE
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT", optional = "true")]
    pub distribution_point: Option<DistributionPointName>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub reasons: Option<ReasonFlags>,

    #[asn1(context_specific = "2", tag_mode = "IMPLICIT", optional = "true")]
    pub crl_issuer: Option<GeneralNames>,
}

/// ```not_rust
/// DistributionPointName ::= CHOICE {
///      fullName                [0]     GeneralNames,
///      nameRelativeToCRLIssuer [1]     RelativeDistinguishedName }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Choice)]
pub enum DistributionPointName {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", constructed = "true")]
    FullName(GeneralNames),

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", constructed = "true")]
    NameRelativeToCrlIssuer(RelativeDistinguishedName),
}

/// ```not_rust
/// ReasonFlags ::= BIT STRING {
///      unused                  (0),
///      keyCompromise           (1),
///      cACompromise            (2),
///      affiliationChanged      (3),
///      superseded              (4),
///      cessationOfOperation    (5),
///      certificateHold         (6),
///      privilegeWithdrawn      (7),
///      aACompromise            (8) }
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ReasonFlags(u16);

impl ReasonFlags {
    pub const UNUSED: Self = Self(1 << 0);
    pub const KEY_COMPROMISE: Self = Self(1 << 1);
    pub const CA_COMPROMISE: Self = Self(1 << 2);
    pub const AFFILIATION_CHANGED: Self = Self(1 << 3);
    pub const SUPERSEDED: Self = Self(1 << 4);
    pub const CESSATION_OF_OPERATION: Self = Self(1 << 5);
    pub const CERTIFICATE_HOLD: Self = Self(1 << 6);
    pub const PRIVILEGE_WITHDRAWN: Self = Self(1 << 7);
    pub const AA_COMPROMISE: Self = Self(1 << 8);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, reason: Self) -> bool {
        self.0 & reason.0 == reason.0
    }
}

impl BitOr for ReasonFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl<'a> DecodeValue<'a> for ReasonFlags {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let bits = BitString::decode_value(reader, header)?;
        Ok(Self(bit_string_to_named_bits(&bits)))
    }
}

impl EncodeValue for ReasonFlags {
    fn value_len(&self) -> der::Result<Length> {
        named_bits_to_bit_string(self.0)?.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        named_bits_to_bit_string(self.0)?.encode_value(writer)
    }
}

impl FixedTag for ReasonFlags {
    const TAG: Tag = Tag::BitString;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::name::GeneralName;
    use der::asn1::Ia5String;
    use der::{Decode, Encode};
    use pretty_assertions::assert_eq;

    fn http_point(uri: &str) -> DistributionPoint {
        DistributionPoint {
            distribution_point: Some(DistributionPointName::FullName(vec![
                GeneralName::UniformResourceIdentifier(Ia5String::new(uri).unwrap()),
            ])),
            reasons: None,
            crl_issuer: None,
        }
    }

    #[test]
    fn single_full_name_point() {
        let points = CrlDistributionPoints(vec![http_point("http://crl.example.com/ca.crl")]);
        let encoded = points.to_der().unwrap();
        assert_eq!(CrlDistributionPoints::from_der(&encoded).unwrap(), points);
    }

    #[test]
    fn point_with_reasons_and_issuer() {
        let mut point = http_point("http://crl.example.com/ca.crl");
        point.reasons = Some(ReasonFlags::KEY_COMPROMISE | ReasonFlags::CA_COMPROMISE);
        point.crl_issuer = Some(vec![GeneralName::DnsName(Ia5String::new("crl.example.com").unwrap())]);
        let points = CrlDistributionPoints(vec![point]);
        let encoded = points.to_der().unwrap();
        assert_eq!(CrlDistributionPoints::from_der(&encoded).unwrap(), points);
    }

    #[test]
    fn reason_flags_encoding() {
        let reasons = ReasonFlags::KEY_COMPROMISE | ReasonFlags::CA_COMPROMISE;
        // bits 1 and 2 set, five trailing bits trimmed
        assert_eq!(reasons.to_der().unwrap(), vec![0x03, 0x02, 0x05, 0x60]);
    }
}
