//! Re-derivation of key material dependent extensions
//!
//! When a certificate request is re-keyed or re-issued under a different
//! authority, the Subject Key Identifier and Authority Key Identifier
//! extensions go stale. [`update`] recomputes them in place from the new
//! keys, leaving every other extension untouched.

use crate::codec::{
    de_err, ser_err, AuthorityKeyIdentifier, ExtensionCodecError, GeneralName, Name,
    SubjectKeyIdentifier,
};
use crate::key_id::{generate_160_bit_id, KeyIdGenError};
use crate::oids;
use crate::set::ExtensionSet;
use der::asn1::{Int, OctetString};
use der::{Decode, Encode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateError {
    /// codec error
    #[error(transparent)]
    Codec(#[from] ExtensionCodecError),

    /// key identifier derivation failed
    #[error(transparent)]
    KeyIdGen(#[from] KeyIdGenError),
}

/// Recomputes the key material dependent extensions of `set` in place.
///
/// The Subject Key Identifier, when present, is re-derived from
/// `subject_spki_der`. The Authority Key Identifier, when present, is
/// re-derived from `issuer_spki_der`, `issuer_name` and `issuer_serial`
/// shape-preservingly: each of its three optional fields is recomputed if the
/// stored extension carried it and stays absent if it did not. Criticality
/// flags and entry order never change, and extensions that are absent are not
/// added, so running the update twice with the same inputs is a no-op.
pub fn update(
    set: &mut ExtensionSet,
    subject_spki_der: &[u8],
    issuer_spki_der: &[u8],
    issuer_name: &Name,
    issuer_serial: &[u8],
) -> Result<(), UpdateError> {
    if set.contains(oids::SUBJECT_KEY_IDENTIFIER) {
        let id = generate_160_bit_id(subject_spki_der)?;
        let ski = SubjectKeyIdentifier(
            OctetString::new(id.to_vec()).map_err(ser_err("subject key identifier"))?,
        );
        let inner = ski.to_der().map_err(ser_err("subject key identifier"))?;
        set.replace_value(oids::SUBJECT_KEY_IDENTIFIER, &inner)?;
    }

    if let Some(entry) = set.get(oids::AUTHORITY_KEY_IDENTIFIER) {
        let stored = AuthorityKeyIdentifier::from_der(&entry.inner_value()?)
            .map_err(de_err("authority key identifier"))?;

        let key_identifier = match stored.key_identifier {
            Some(_) => {
                let id = generate_160_bit_id(issuer_spki_der)?;
                Some(OctetString::new(id.to_vec()).map_err(ser_err("authority key identifier"))?)
            }
            None => None,
        };
        let authority_cert_issuer = stored
            .authority_cert_issuer
            .map(|_| vec![GeneralName::DirectoryName(issuer_name.clone())]);
        let authority_cert_serial_number = match stored.authority_cert_serial_number {
            Some(_) => Some(Int::new(issuer_serial).map_err(ser_err("authority key identifier"))?),
            None => None,
        };

        let aki = AuthorityKeyIdentifier {
            key_identifier,
            authority_cert_issuer,
            authority_cert_serial_number,
        };
        let inner = aki.to_der().map_err(ser_err("authority key identifier"))?;
        set.replace_value(oids::AUTHORITY_KEY_IDENTIFIER, &inner)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{common_name, BasicConstraints, ExtensionValue};
    use crate::key_id::{AlgorithmIdentifier, SubjectPublicKeyInfo};
    use der::asn1::{BitString, ObjectIdentifier};
    use pretty_assertions::assert_eq;
    use sha1::{Digest, Sha1};

    fn spki_with_payload(payload: &[u8]) -> Vec<u8> {
        let spki = SubjectPublicKeyInfo {
            algorithm: AlgorithmIdentifier {
                algorithm: ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1"),
                parameters: None,
            },
            subject_public_key: BitString::from_bytes(payload).unwrap(),
        };
        spki.to_der().unwrap()
    }

    fn decoded_aki(set: &ExtensionSet) -> AuthorityKeyIdentifier {
        let inner = set
            .get(oids::AUTHORITY_KEY_IDENTIFIER)
            .unwrap()
            .inner_value()
            .unwrap();
        AuthorityKeyIdentifier::from_der(&inner).unwrap()
    }

    fn set_with_both_identifiers() -> ExtensionSet {
        let mut set = ExtensionSet::new();
        let ski = SubjectKeyIdentifier(OctetString::new(vec![0u8; 20]).unwrap());
        set.add(oids::SUBJECT_KEY_IDENTIFIER, false, &ski.to_der().unwrap()).unwrap();
        let aki = AuthorityKeyIdentifier {
            key_identifier: Some(OctetString::new(vec![0u8; 20]).unwrap()),
            authority_cert_issuer: None,
            authority_cert_serial_number: None,
        };
        set.add(oids::AUTHORITY_KEY_IDENTIFIER, false, &aki.to_der().unwrap()).unwrap();
        set
    }

    #[test]
    fn key_identifiers_are_rederived() {
        let mut set = set_with_both_identifiers();
        let subject_payload = [0x11u8; 32];
        let issuer_payload = [0x22u8; 32];
        let issuer = common_name("Issuing CA").unwrap();

        update(
            &mut set,
            &spki_with_payload(&subject_payload),
            &spki_with_payload(&issuer_payload),
            &issuer,
            &[0x01],
        )
        .unwrap();

        let ski_inner = set.get(oids::SUBJECT_KEY_IDENTIFIER).unwrap().inner_value().unwrap();
        let ski = SubjectKeyIdentifier::from_der(&ski_inner).unwrap();
        let expected_subject_id: [u8; 20] = Sha1::digest(subject_payload).into();
        assert_eq!(ski.0.as_bytes(), expected_subject_id);

        let aki = decoded_aki(&set);
        let expected_issuer_id: [u8; 20] = Sha1::digest(issuer_payload).into();
        assert_eq!(aki.key_identifier.unwrap().as_bytes(), expected_issuer_id);
    }

    #[test]
    fn absent_aki_fields_stay_absent() {
        let mut set = set_with_both_identifiers();
        let issuer = common_name("Issuing CA").unwrap();
        update(
            &mut set,
            &spki_with_payload(&[1; 8]),
            &spki_with_payload(&[2; 8]),
            &issuer,
            &[0x05, 0x39],
        )
        .unwrap();

        let aki = decoded_aki(&set);
        assert!(aki.key_identifier.is_some());
        assert!(aki.authority_cert_issuer.is_none());
        assert!(aki.authority_cert_serial_number.is_none());
    }

    #[test]
    fn present_aki_fields_are_all_rederived() {
        let mut set = ExtensionSet::new();
        let aki = AuthorityKeyIdentifier {
            key_identifier: Some(OctetString::new(vec![0u8; 20]).unwrap()),
            authority_cert_issuer: Some(vec![GeneralName::DirectoryName(common_name("Old CA").unwrap())]),
            authority_cert_serial_number: Some(Int::new(&[0x01]).unwrap()),
        };
        set.add(oids::AUTHORITY_KEY_IDENTIFIER, false, &aki.to_der().unwrap()).unwrap();

        let issuer = common_name("New CA").unwrap();
        update(
            &mut set,
            &spki_with_payload(&[1; 8]),
            &spki_with_payload(&[2; 8]),
            &issuer,
            &[0x05, 0x39],
        )
        .unwrap();

        let updated = decoded_aki(&set);
        assert_eq!(
            updated.authority_cert_issuer,
            Some(vec![GeneralName::DirectoryName(issuer)])
        );
        assert_eq!(updated.authority_cert_serial_number, Some(Int::new(&[0x05, 0x39]).unwrap()));
    }

    #[test]
    fn update_is_idempotent() {
        let mut set = set_with_both_identifiers();
        let subject = spki_with_payload(&[0x11; 32]);
        let issuer_key = spki_with_payload(&[0x22; 32]);
        let issuer = common_name("Issuing CA").unwrap();

        update(&mut set, &subject, &issuer_key, &issuer, &[0x01]).unwrap();
        let first = set.clone();
        update(&mut set, &subject, &issuer_key, &issuer, &[0x01]).unwrap();
        assert_eq!(set, first);
    }

    #[test]
    fn unrelated_entries_and_criticality_are_untouched() {
        let mut set = ExtensionSet::new();
        let bc = ExtensionValue::BasicConstraints(BasicConstraints {
            ca: true,
            path_len_constraint: None,
        })
        .encode()
        .unwrap();
        set.add(oids::BASIC_CONSTRAINTS, true, &bc).unwrap();
        let ski = SubjectKeyIdentifier(OctetString::new(vec![0u8; 20]).unwrap());
        set.add(oids::SUBJECT_KEY_IDENTIFIER, false, &ski.to_der().unwrap()).unwrap();

        let issuer = common_name("Issuing CA").unwrap();
        update(
            &mut set,
            &spki_with_payload(&[1; 8]),
            &spki_with_payload(&[2; 8]),
            &issuer,
            &[0x01],
        )
        .unwrap();

        let oids_in_order: Vec<&str> = set.all_oids().collect();
        assert_eq!(oids_in_order, [oids::BASIC_CONSTRAINTS, oids::SUBJECT_KEY_IDENTIFIER]);
        let entry = set.get(oids::BASIC_CONSTRAINTS).unwrap();
        assert!(entry.critical());
        assert_eq!(entry.inner_value().unwrap(), bc);
        assert!(!set.get(oids::SUBJECT_KEY_IDENTIFIER).unwrap().critical());
    }

    #[test]
    fn missing_identifiers_are_not_added() {
        let mut set = ExtensionSet::new();
        let issuer = common_name("Issuing CA").unwrap();
        update(
            &mut set,
            &spki_with_payload(&[1; 8]),
            &spki_with_payload(&[2; 8]),
            &issuer,
            &[0x01],
        )
        .unwrap();
        assert!(set.is_empty());
    }
}
