//! Key usage related extensions

use der::asn1::{BitString, GeneralizedTime, ObjectIdentifier};
use der::{DecodeValue, EncodeValue, FixedTag, Header, Length, Reader, Sequence, Tag, Writer};
use std::ops::BitOr;

/// Encodes a named-bit mask as a DER BIT STRING, trimming trailing zero bits
/// as DER requires for named bit lists.
pub(crate) fn named_bits_to_bit_string(mask: u16) -> der::Result<BitString> {
    if mask == 0 {
        return BitString::new(0, vec![]);
    }
    let bit_count = 16 - mask.leading_zeros() as usize;
    let byte_count = (bit_count + 7) / 8;
    let mut bytes = vec![0u8; byte_count];
    for bit in 0..bit_count {
        if mask & (1 << bit) != 0 {
            bytes[bit / 8] |= 0x80 >> (bit % 8);
        }
    }
    let unused = (byte_count * 8 - bit_count) as u8;
    BitString::new(unused, bytes)
}

/// Reads a named-bit list back into a mask. Bits beyond the first 16 are not
/// defined for any extension handled here and are dropped.
pub(crate) fn bit_string_to_named_bits(bits: &BitString) -> u16 {
    let mut mask = 0u16;
    for (position, bit) in bits.bits().enumerate() {
        if bit && position < 16 {
            mask |= 1 << position;
        }
    }
    mask
}

/// RFC 5280 §4.2.1.3
///
/// ```not_rust
/// KeyUsage ::= BIT STRING {
///      digitalSignature        (0),
///      nonRepudiation          (1),
///      keyEncipherment         (2),
///      dataEncipherment        (3),
///      keyAgreement            (4),
///      keyCertSign             (5),
///      cRLSign                 (6),
///      encipherOnly            (7),
///      decipherOnly            (8) }
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct KeyUsage(u16);

impl KeyUsage {
    pub const DIGITAL_SIGNATURE: Self = Self(1 << 0);
    pub const NON_REPUDIATION: Self = Self(1 << 1);
    pub const KEY_ENCIPHERMENT: Self = Self(1 << 2);
    pub const DATA_ENCIPHERMENT: Self = Self(1 << 3);
    pub const KEY_AGREEMENT: Self = Self(1 << 4);
    pub const KEY_CERT_SIGN: Self = Self(1 << 5);
    pub const CRL_SIGN: Self = Self(1 << 6);
    pub const ENCIPHER_ONLY: Self = Self(1 << 7);
    pub const DECIPHER_ONLY: Self = Self(1 << 8);

    /// All nine defined bits.
    pub const ALL: Self = Self(0x01FF);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, usage: Self) -> bool {
        self.0 & usage.0 == usage.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for KeyUsage {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl<'a> DecodeValue<'a> for KeyUsage {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        let bits = BitString::decode_value(reader, header)?;
        Ok(Self(bit_string_to_named_bits(&bits)))
    }
}

impl EncodeValue for KeyUsage {
    fn value_len(&self) -> der::Result<Length> {
        named_bits_to_bit_string(self.0)?.value_len()
    }

    fn encode_value(&self, writer: &mut impl Writer) -> der::Result<()> {
        named_bits_to_bit_string(self.0)?.encode_value(writer)
    }
}

impl FixedTag for KeyUsage {
    const TAG: Tag = Tag::BitString;
}

/// RFC 5280 §4.2.1.12
///
/// ```not_rust
/// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
/// KeyPurposeId ::= OBJECT IDENTIFIER
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtendedKeyUsage(pub Vec<ObjectIdentifier>);

impl_newtype!(ExtendedKeyUsage, Vec<ObjectIdentifier>);

/// RFC 3280 §4.2.1.4 (removed from RFC 5280 but still issued by CA tooling)
///
/// ```not_rust
/// PrivateKeyUsagePeriod ::= SEQUENCE {
///      notBefore       [0]     GeneralizedTime OPTIONAL,
///      notAfter        [1]     GeneralizedTime OPTIONAL }
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
pub struct PrivateKeyUsagePeriod {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub not_before: Option<GeneralizedTime>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub not_after: Option<GeneralizedTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oids;
    use der::{Decode, Encode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::Duration;

    #[test]
    fn key_usage_digital_signature_and_key_encipherment() {
        let ku = KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_ENCIPHERMENT;
        let encoded = ku.to_der().unwrap();
        // bits 0 and 2 set over a three-bit span, five unused
        assert_eq!(encoded, vec![0x03, 0x02, 0x05, 0xA0]);
        assert_eq!(KeyUsage::from_der(&encoded).unwrap(), ku);
    }

    #[test]
    fn key_usage_all_bits_set() {
        let encoded = KeyUsage::ALL.to_der().unwrap();
        // nine named bits spill into a second octet with seven unused bits
        assert_eq!(encoded, vec![0x03, 0x03, 0x07, 0xFF, 0x80]);
        assert_eq!(KeyUsage::from_der(&encoded).unwrap(), KeyUsage::ALL);
    }

    #[test]
    fn key_usage_single_bit() {
        let encoded = KeyUsage::CRL_SIGN.to_der().unwrap();
        assert_eq!(encoded, vec![0x03, 0x02, 0x01, 0x02]);
        assert_eq!(KeyUsage::from_der(&encoded).unwrap(), KeyUsage::CRL_SIGN);
    }

    #[rstest]
    #[case(KeyUsage::DIGITAL_SIGNATURE)]
    #[case(KeyUsage::DECIPHER_ONLY)]
    #[case(KeyUsage::KEY_CERT_SIGN | KeyUsage::CRL_SIGN)]
    #[case(KeyUsage::default())]
    fn key_usage_round_trip(#[case] ku: KeyUsage) {
        let encoded = ku.to_der().unwrap();
        assert_eq!(KeyUsage::from_der(&encoded).unwrap(), ku);
    }

    #[test]
    fn extended_key_usage_server_auth() {
        let eku = ExtendedKeyUsage(vec![oids::kp_server_auth()]);
        let encoded = eku.to_der().unwrap();
        #[rustfmt::skip]
        let expected = [
            0x30, 0x0A, // sequence
                0x06, 0x08, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01, // id-kp-serverAuth
        ];
        assert_eq!(encoded, expected);
        assert_eq!(ExtendedKeyUsage::from_der(&encoded).unwrap(), eku);
    }

    #[test]
    fn private_key_usage_period_round_trip() {
        let period = PrivateKeyUsagePeriod {
            not_before: Some(GeneralizedTime::from_unix_duration(Duration::from_secs(1_600_000_000)).unwrap()),
            not_after: Some(GeneralizedTime::from_unix_duration(Duration::from_secs(1_700_000_000)).unwrap()),
        };
        let encoded = period.to_der().unwrap();
        assert_eq!(PrivateKeyUsagePeriod::from_der(&encoded).unwrap(), period);
    }
}
