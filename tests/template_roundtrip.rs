use x509_ext::codec::{
    common_name, AuthorityKeyIdentifier, BasicConstraints, ExtensionValue, ExtensionCodecError,
    ExtendedKeyUsage, GeneralName, KeyUsage, SubjectKeyIdentifier,
};
use x509_ext::key_id::{AlgorithmIdentifier, SubjectPublicKeyInfo};
use x509_ext::set::ExtensionSet;
use x509_ext::{oids, updater, ExtensionType};

use der::asn1::{BitString, Ia5String, ObjectIdentifier, OctetString};
use der::{Decode, Encode};
use pretty_assertions::assert_eq;

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

fn tls_server_extensions() -> ExtensionSet {
    let mut set = ExtensionSet::new();

    let bc = ExtensionValue::BasicConstraints(BasicConstraints {
        ca: false,
        path_len_constraint: None,
    });
    set.add(oids::BASIC_CONSTRAINTS, true, &bc.encode().unwrap()).unwrap();

    let ku = ExtensionValue::KeyUsage(KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_ENCIPHERMENT);
    set.add(oids::KEY_USAGE, true, &ku.encode().unwrap()).unwrap();

    let eku = ExtensionValue::ExtendedKeyUsage(ExtendedKeyUsage(vec![oids::kp_server_auth()]));
    set.add(oids::EXTENDED_KEY_USAGE, false, &eku.encode().unwrap()).unwrap();

    set
}

#[test]
fn template_round_trip_preserves_a_curated_set() {
    let set = tls_server_extensions();

    let mut template = Vec::new();
    set.save(&mut template).unwrap();
    let reloaded = ExtensionSet::load(template.as_slice()).unwrap();

    assert_eq!(reloaded, set);
    let oids_in_order: Vec<&str> = reloaded.all_oids().collect();
    assert_eq!(
        oids_in_order,
        [oids::BASIC_CONSTRAINTS, oids::KEY_USAGE, oids::EXTENDED_KEY_USAGE]
    );
    let critical: Vec<&str> = reloaded.critical_oids().collect();
    assert_eq!(critical, [oids::BASIC_CONSTRAINTS, oids::KEY_USAGE]);
}

#[test]
fn every_loaded_entry_decodes_through_its_typed_codec() {
    let set = tls_server_extensions();
    let mut template = Vec::new();
    set.save(&mut template).unwrap();
    let reloaded = ExtensionSet::load(template.as_slice()).unwrap();

    for entry in &reloaded {
        let ty = ExtensionType::resolve(entry.oid());
        let inner = entry.inner_value().unwrap();
        let value = ExtensionValue::decode(&ty, &inner).unwrap();
        assert_eq!(value.encode().unwrap(), inner);
    }
}

#[test]
fn reissue_under_new_authority_then_persist() {
    let mut set = tls_server_extensions();

    let san = ExtensionValue::SubjectAltName(vec![GeneralName::DnsName(
        Ia5String::new("devel.example.com").unwrap(),
    )]);
    set.add(oids::SUBJECT_ALTERNATIVE_NAME, false, &san.encode().unwrap()).unwrap();

    let ski = SubjectKeyIdentifier(OctetString::new(vec![0u8; 20]).unwrap());
    set.add(oids::SUBJECT_KEY_IDENTIFIER, false, &ski.to_der().unwrap()).unwrap();
    let aki = AuthorityKeyIdentifier {
        key_identifier: Some(OctetString::new(vec![0u8; 20]).unwrap()),
        authority_cert_issuer: None,
        authority_cert_serial_number: None,
    };
    set.add(oids::AUTHORITY_KEY_IDENTIFIER, false, &aki.to_der().unwrap()).unwrap();

    let issuer = common_name("Issuing CA").unwrap();
    updater::update(
        &mut set,
        &spki_with_payload(&[0x11; 32]),
        &spki_with_payload(&[0x22; 32]),
        &issuer,
        &[0x10, 0x01],
    )
    .unwrap();

    assert!(!set.is_san_empty().unwrap());

    let mut template = Vec::new();
    set.save(&mut template).unwrap();
    let reloaded = ExtensionSet::load(template.as_slice()).unwrap();
    assert_eq!(reloaded, set);

    let ski_inner = reloaded.get(oids::SUBJECT_KEY_IDENTIFIER).unwrap().inner_value().unwrap();
    let reloaded_ski = SubjectKeyIdentifier::from_der(&ski_inner).unwrap();
    assert_eq!(reloaded_ski.0.as_bytes().len(), 20);
}

#[test]
fn empty_san_is_flagged_before_commit() {
    let mut set = tls_server_extensions();
    set.add(oids::SUBJECT_ALTERNATIVE_NAME, false, &[]).unwrap();
    assert!(set.is_san_empty().unwrap());
}

#[test]
fn malformed_entry_surfaces_as_codec_error() {
    let mut set = ExtensionSet::new();
    set.add(oids::BASIC_CONSTRAINTS, true, &[0x30, 0x10, 0x01]).unwrap();

    let entry = set.get(oids::BASIC_CONSTRAINTS).unwrap();
    let inner = entry.inner_value().unwrap();
    let err = ExtensionValue::decode(&ExtensionType::BasicConstraints, &inner).unwrap_err();
    assert!(matches!(err, ExtensionCodecError::Asn1Deserialization { .. }));
}
