//! OIDs used by the supported certificate extensions

use der::asn1::ObjectIdentifier;

macro_rules! define_oid {
    ( $( $uppercase:ident => $lowercase:ident => $str_value:literal, )+ ) => {
        $(
            pub const $uppercase: &str = $str_value;

            pub fn $lowercase() -> ObjectIdentifier {
                ObjectIdentifier::new_unwrap($str_value)
            }
        )+
    };
}

define_oid! {
    // certificate extensions
    SUBJECT_KEY_IDENTIFIER => subject_key_identifier => "2.5.29.14",
    KEY_USAGE => key_usage => "2.5.29.15",
    PRIVATE_KEY_USAGE_PERIOD => private_key_usage_period => "2.5.29.16",
    SUBJECT_ALTERNATIVE_NAME => subject_alternative_name => "2.5.29.17",
    ISSUER_ALTERNATIVE_NAME => issuer_alternative_name => "2.5.29.18",
    BASIC_CONSTRAINTS => basic_constraints => "2.5.29.19",
    NAME_CONSTRAINTS => name_constraints => "2.5.29.30",
    CRL_DISTRIBUTION_POINTS => crl_distribution_points => "2.5.29.31",
    CERTIFICATE_POLICIES => certificate_policies => "2.5.29.32",
    POLICY_MAPPINGS => policy_mappings => "2.5.29.33",
    AUTHORITY_KEY_IDENTIFIER => authority_key_identifier => "2.5.29.35",
    POLICY_CONSTRAINTS => policy_constraints => "2.5.29.36",
    EXTENDED_KEY_USAGE => extended_key_usage => "2.5.29.37",
    INHIBIT_ANY_POLICY => inhibit_any_policy => "2.5.29.54",
    AUTHORITY_INFORMATION_ACCESS => authority_information_access => "1.3.6.1.5.5.7.1.1",
    SUBJECT_INFORMATION_ACCESS => subject_information_access => "1.3.6.1.5.5.7.1.11",

    // extended key purpose OIDs
    KP_SERVER_AUTH => kp_server_auth => "1.3.6.1.5.5.7.3.1",
    KP_CLIENT_AUTH => kp_client_auth => "1.3.6.1.5.5.7.3.2",
    KP_CODE_SIGNING => kp_code_signing => "1.3.6.1.5.5.7.3.3",
    KP_EMAIL_PROTECTION => kp_email_protection => "1.3.6.1.5.5.7.3.4",
    KP_TIME_STAMPING => kp_time_stamping => "1.3.6.1.5.5.7.3.8",
    KP_OCSP_SIGNING => kp_ocsp_signing => "1.3.6.1.5.5.7.3.9",
    KP_ANY_EXTENDED_KEY_USAGE => kp_any_extended_key_usage => "2.5.29.37.0",

    // access method OIDs (authority/subject information access)
    AD_OCSP => ad_ocsp => "1.3.6.1.5.5.7.48.1",
    AD_CA_ISSUERS => ad_ca_issuers => "1.3.6.1.5.5.7.48.2",
    AD_TIME_STAMPING => ad_time_stamping => "1.3.6.1.5.5.7.48.3",
    AD_CA_REPOSITORY => ad_ca_repository => "1.3.6.1.5.5.7.48.5",

    // id-pkix-ocsp-nocheck, the usual empty-valued extension (RFC 6960)
    OCSP_NO_CHECK => ocsp_no_check => "1.3.6.1.5.5.7.48.1.5",

    // attribute types
    AT_COMMON_NAME => at_common_name => "2.5.4.3",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_and_accessors_agree() {
        assert_eq!(basic_constraints().to_string(), BASIC_CONSTRAINTS);
        assert_eq!(authority_key_identifier().to_string(), AUTHORITY_KEY_IDENTIFIER);
        assert_eq!(kp_server_auth().to_string(), KP_SERVER_AUTH);
        assert_eq!(ad_ocsp().to_string(), AD_OCSP);
    }
}
