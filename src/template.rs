//! Certificate extension template persistence
//!
//! A template is a JSON document carrying a versioned list of extensions so
//! that a curated set can be saved once and applied to many certificate
//! requests. Values are stored wrapped (as they would appear in a
//! certificate) and base64-encoded.

use crate::codec::unwrap_extension;
use crate::set::{ExtensionEntry, ExtensionSet, ExtensionSetError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use thiserror::Error;

const TEMPLATE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum TemplateError {
    /// underlying I/O error
    #[error("template I/O error: {0}")]
    Io(#[from] io::Error),

    /// the document is not valid template JSON
    #[error("invalid template document: {source}")]
    InvalidFormat { source: serde_json::Error },

    /// an entry's value is not valid base64 or not a valid wrapped value
    #[error("invalid value for extension {oid}")]
    InvalidValue { oid: String },

    /// the document declares a version this build does not understand
    #[error("unsupported template version: {version}")]
    UnsupportedVersion { version: u32 },

    /// the document lists the same OID twice
    #[error("duplicate extension OID in template: {oid}")]
    DuplicateOid { oid: String },
}

#[derive(Debug, Deserialize, Serialize)]
struct TemplateDocument {
    version: u32,
    extensions: Vec<TemplateEntry>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TemplateEntry {
    oid: String,
    critical: bool,
    /// base64 of the wrapped value
    value: String,
}

impl ExtensionSet {
    /// Writes the set as a template document.
    pub fn save(&self, writer: impl Write) -> Result<(), TemplateError> {
        let document = TemplateDocument {
            version: TEMPLATE_VERSION,
            extensions: self
                .iter()
                .map(|entry| TemplateEntry {
                    oid: entry.oid().to_owned(),
                    critical: entry.critical(),
                    value: BASE64.encode(entry.value()),
                })
                .collect(),
        };
        serde_json::to_writer_pretty(writer, &document).map_err(|source| {
            if source.is_io() {
                TemplateError::Io(io::Error::from(source))
            } else {
                TemplateError::InvalidFormat { source }
            }
        })
    }

    /// Reads a template document back into a set.
    ///
    /// Every entry's value must decode as a valid wrapped extension value;
    /// a template written by [`ExtensionSet::save`] always does, so a
    /// failure here means the document was edited or corrupted.
    pub fn load(mut reader: impl Read) -> Result<Self, TemplateError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let document: TemplateDocument =
            serde_json::from_slice(&raw).map_err(|source| TemplateError::InvalidFormat { source })?;

        if document.version != TEMPLATE_VERSION {
            return Err(TemplateError::UnsupportedVersion {
                version: document.version,
            });
        }

        let mut set = ExtensionSet::new();
        for entry in document.extensions {
            let value = BASE64
                .decode(&entry.value)
                .ok()
                .filter(|value| unwrap_extension(value).is_ok())
                .ok_or_else(|| TemplateError::InvalidValue { oid: entry.oid.clone() })?;

            set.insert_entry(ExtensionEntry::new(entry.oid, entry.critical, value))
                .map_err(|err| match err {
                    ExtensionSetError::DuplicateOid { oid } => TemplateError::DuplicateOid { oid },
                    ExtensionSetError::Codec(_) => unreachable!("insertion does not run codecs"),
                })?;
        }
        Ok(set)
    }
}
