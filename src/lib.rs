//! # x509-ext
//!
//! In-memory model of an X.509 certificate's extension set, the typed codecs
//! used to build and inspect each extension value, and the on-disk template
//! format ("CET") used to persist a reusable set of extensions between
//! certificate-creation sessions.
//!
//! The crate is deliberately scoped to the extension subsystem: certificate
//! assembly and signing, keystore handling and key generation are left to the
//! caller. A finalized [`ExtensionSet`] is handed by value to whatever builds
//! the certificate.
//!
//! ```
//! use x509_ext::codec::{BasicConstraints, ExtensionValue, KeyUsage};
//! use x509_ext::set::ExtensionSet;
//! use x509_ext::oids;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut extensions = ExtensionSet::new();
//!
//! let bc = ExtensionValue::BasicConstraints(BasicConstraints {
//!     ca: true,
//!     path_len_constraint: None,
//! });
//! extensions.add(oids::BASIC_CONSTRAINTS, true, &bc.encode()?)?;
//!
//! let ku = ExtensionValue::KeyUsage(KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_ENCIPHERMENT);
//! extensions.add(oids::KEY_USAGE, true, &ku.encode()?)?;
//!
//! let mut template = Vec::new();
//! extensions.save(&mut template)?;
//! let reloaded = ExtensionSet::load(template.as_slice())?;
//! assert_eq!(extensions, reloaded);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod codec;
pub mod ext_type;
pub mod key_id;
pub mod oids;
pub mod set;
pub mod template;
pub mod updater;

pub use codec::{ExtensionCodecError, ExtensionValue};
pub use ext_type::ExtensionType;
pub use key_id::{generate_160_bit_id, KeyIdGenError};
pub use set::{ExtensionEntry, ExtensionSet, ExtensionSetError};
pub use template::TemplateError;
pub use updater::{update, UpdateError};
