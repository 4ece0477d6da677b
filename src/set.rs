//! Ordered, OID-unique collection of certificate extensions

use crate::codec::{
    is_general_name_empty, unwrap_extension, wrap_in_octet_string, ExtensionCodecError, GeneralNames,
};
use crate::oids;
use der::Decode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtensionSetError {
    /// an extension with this OID is already present
    #[error("duplicate extension OID: {oid}")]
    DuplicateOid { oid: String },

    /// codec error
    #[error(transparent)]
    Codec(#[from] ExtensionCodecError),
}

/// One extension as stored: OID, criticality flag, and the wrapped value
/// (the OCTET STRING as it would appear in a certificate).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExtensionEntry {
    oid: String,
    critical: bool,
    value: Vec<u8>,
}

impl ExtensionEntry {
    pub(crate) fn new(oid: String, critical: bool, value: Vec<u8>) -> Self {
        Self { oid, critical, value }
    }

    pub fn oid(&self) -> &str {
        &self.oid
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    /// The wrapped value as stored (OCTET STRING, or DER NULL for an
    /// empty-valued extension).
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// The inner DER structure, with the storage wrap removed.
    pub fn inner_value(&self) -> Result<Vec<u8>, ExtensionCodecError> {
        unwrap_extension(&self.value)
    }
}

/// An editable set of certificate extensions.
///
/// Entries keep their insertion order and are unique by OID. Values are
/// stored wrapped; [`ExtensionSet::add`] takes the inner DER structure and
/// wraps it itself, so callers only deal with the extension's own schema.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtensionSet {
    entries: Vec<ExtensionEntry>,
}

impl ExtensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extension. `inner` is the extension's own DER structure; an
    /// empty slice stores a DER NULL, the convention for empty-valued
    /// extensions such as id-pkix-ocsp-nocheck.
    ///
    /// Refuses to overwrite: adding an OID already present is an error.
    pub fn add(&mut self, oid: &str, critical: bool, inner: &[u8]) -> Result<(), ExtensionSetError> {
        if self.contains(oid) {
            return Err(ExtensionSetError::DuplicateOid { oid: oid.to_owned() });
        }
        let value = wrap_in_octet_string(inner)?;
        self.entries.push(ExtensionEntry::new(oid.to_owned(), critical, value));
        Ok(())
    }

    /// Removes the extension with this OID, returning it if it was present.
    pub fn remove(&mut self, oid: &str) -> Option<ExtensionEntry> {
        let index = self.entries.iter().position(|entry| entry.oid == oid)?;
        Some(self.entries.remove(index))
    }

    /// Flips the criticality flag of the extension with this OID.
    /// Returns false if no such extension exists.
    pub fn toggle_criticality(&mut self, oid: &str) -> bool {
        match self.entries.iter_mut().find(|entry| entry.oid == oid) {
            Some(entry) => {
                entry.critical = !entry.critical;
                true
            }
            None => false,
        }
    }

    /// Replaces the value of an existing extension in place, preserving its
    /// position and criticality. Returns false if the OID is not present.
    pub fn replace_value(&mut self, oid: &str, inner: &[u8]) -> Result<bool, ExtensionCodecError> {
        let value = wrap_in_octet_string(inner)?;
        match self.entries.iter_mut().find(|entry| entry.oid == oid) {
            Some(entry) => {
                entry.value = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&self, oid: &str) -> Option<&ExtensionEntry> {
        self.entries.iter().find(|entry| entry.oid == oid)
    }

    pub fn contains(&self, oid: &str) -> bool {
        self.get(oid).is_some()
    }

    /// OIDs in insertion order.
    pub fn all_oids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.oid.as_str())
    }

    /// OIDs of the critical extensions, in insertion order.
    pub fn critical_oids(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.critical)
            .map(|entry| entry.oid.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtensionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts an already-wrapped entry. Used by the template loader, which
    /// validates the wrap itself.
    pub(crate) fn insert_entry(&mut self, entry: ExtensionEntry) -> Result<(), ExtensionSetError> {
        if self.contains(&entry.oid) {
            return Err(ExtensionSetError::DuplicateOid { oid: entry.oid });
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Whether the Subject Alternative Name extension is present but carries
    /// no usable name. An absent SAN is not empty; a SAN whose value is the
    /// empty payload, an empty GeneralNames sequence, or only blank names is.
    ///
    /// Used as a commit-time check: an empty SAN makes a certificate request
    /// unverifiable by name and is almost always an editing mistake.
    pub fn is_san_empty(&self) -> Result<bool, ExtensionCodecError> {
        let entry = match self.get(oids::SUBJECT_ALTERNATIVE_NAME) {
            Some(entry) => entry,
            None => return Ok(false),
        };
        let inner = entry.inner_value()?;
        if inner.is_empty() {
            return Ok(true);
        }
        let names = GeneralNames::from_der(&inner)
            .map_err(|source| ExtensionCodecError::Asn1Deserialization {
                element: "subject alternative name",
                source,
            })?;
        Ok(names.is_empty() || names.iter().any(is_general_name_empty))
    }
}

impl<'a> IntoIterator for &'a ExtensionSet {
    type Item = &'a ExtensionEntry;
    type IntoIter = std::slice::Iter<'a, ExtensionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
