//! Basic/Name/Policy constraint extensions

use crate::codec::name::GeneralName;
use der::Sequence;

/// RFC 5280 §4.2.1.9
///
/// ```not_rust
/// BasicConstraints ::= SEQUENCE {
///      cA                      BOOLEAN DEFAULT FALSE,
///      pathLenConstraint       INTEGER (0..MAX) OPTIONAL }
/// ```
///
/// A negative path length does not decode (the INTEGER is constrained to
/// `u8`), which keeps the constraint violation inside the codec error path.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Sequence)]
pub struct BasicConstraints {
    #[asn1(default = "Default::default")]
    pub ca: bool,

    pub path_len_constraint: Option<u8>,
}

/// RFC 5280 §4.2.1.10
///
/// ```not_rust
/// NameConstraints ::= SEQUENCE {
///      permittedSubtrees       [0]     GeneralSubtrees OPTIONAL,
///      excludedSubtrees        [1]     GeneralSubtrees OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct NameConstraints {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub permitted_subtrees: Option<Vec<GeneralSubtree>>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub excluded_subtrees: Option<Vec<GeneralSubtree>>,
}

/// ```not_rust
/// GeneralSubtree ::= SEQUENCE {
///      base                    GeneralName,
///      minimum         [0]     BaseDistance DEFAULT 0,
///      maximum         [1]     BaseDistance OPTIONAL }
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct GeneralSubtree {
    pub base: GeneralName,

    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", default = "Default::default")]
    pub minimum: u32,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub maximum: Option<u32>,
}

/// RFC 5280 §4.2.1.11
///
/// ```not_rust
/// PolicyConstraints ::= SEQUENCE {
///      requireExplicitPolicy           [0] SkipCerts OPTIONAL,
///      inhibitPolicyMapping            [1] SkipCerts OPTIONAL }
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Sequence)]
pub struct PolicyConstraints {
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub require_explicit_policy: Option<u32>,

    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub inhibit_policy_mapping: Option<u32>,
}

/// RFC 5280 §4.2.1.14
///
/// ```not_rust
/// InhibitAnyPolicy ::= SkipCerts
/// SkipCerts ::= INTEGER (0..MAX)
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InhibitAnyPolicy(pub u32);

impl_newtype!(InhibitAnyPolicy, u32);
