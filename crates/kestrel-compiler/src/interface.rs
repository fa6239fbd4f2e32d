//! Storing and loading module interfaces.
//!
//! This is the glue between the codec and the compilation driver. [`store`]
//! turns a module's exports into artifact bytes. [`InterfaceLoader`] reverses
//! that, reporting any problem with the metadata through the fatal diagnostic
//! channel.

use std::sync::Arc;

use kestrel_core::QName;
use kestrel_meta::{HEADER_SIZE, Header, Interface};

use crate::decode::{check_budget, decode_interface};
use crate::diagnostics::{Diagnostics, Position};
use crate::encode::encode_interface;
use crate::expr::Expr;
use crate::types::Sigma;
use crate::{Error, Result};

/// One exported binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub name: QName,
    pub sigma: Arc<Sigma>,
    /// Body made available for inlining in importing modules.
    pub inline: Option<Arc<Expr>>,
}

/// The exported subset of a module, in export order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleInterface {
    pub exports: Vec<Export>,
}

/// Resource limits applied when decoding untrusted interface data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Total records (all tables plus exports) accepted before decoding starts.
    pub max_records: usize,
    /// Maximum nesting depth while decoding.
    pub max_depth: usize,
    /// Total string bytes copied out of the blob while parsing it.
    pub max_string_bytes: u64,
}

impl CodecConfig {
    pub const DEFAULT_MAX_RECORDS: usize = 1 << 20;
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    pub const DEFAULT_MAX_STRING_BYTES: u64 = kestrel_meta::DEFAULT_MAX_STRING_BYTES;
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_records: Self::DEFAULT_MAX_RECORDS,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_string_bytes: Self::DEFAULT_MAX_STRING_BYTES,
        }
    }
}

/// Encode and serialize a module interface.
pub fn store(module: &ModuleInterface) -> Result<Vec<u8>> {
    let interface = encode_interface(module)?;
    let bytes = interface.to_bytes()?;
    tracing::debug!(
        exports = module.exports.len(),
        records = interface.record_count(),
        bytes = bytes.len(),
        "stored interface"
    );
    Ok(bytes)
}

/// Loads interface metadata produced by [`store`].
///
/// ```ignore
/// let module = InterfaceLoader::new()
///     .with_max_records(10_000)
///     .load(&bytes, &mut diagnostics)?;
/// ```
#[derive(Clone, Debug, Default)]
pub struct InterfaceLoader {
    config: CodecConfig,
}

impl InterfaceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record budget checked before decoding.
    pub fn with_max_records(mut self, limit: usize) -> Self {
        self.config.max_records = limit;
        self
    }

    /// Set the maximum nesting depth while decoding.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.config.max_depth = limit;
        self
    }

    /// Set the total string bytes the parser may copy out of the blob.
    pub fn with_max_string_bytes(mut self, limit: u64) -> Self {
        self.config.max_string_bytes = limit;
        self
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse, verify and decode an interface blob.
    ///
    /// The record budget is checked against the header counts before any
    /// section is parsed. Any failure records exactly one fatal diagnostic at
    /// [`Position::EndOfModule`] and returns [`Error::Fatal`].
    pub fn load(&self, bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<ModuleInterface> {
        if let Err(err) = self.check_header(bytes) {
            return Err(fatal(diagnostics, err));
        }
        let parsed = Interface::from_bytes_with_limit(bytes, self.config.max_string_bytes);
        let interface = match parsed {
            Ok(interface) => interface,
            Err(err) => return Err(fatal(diagnostics, Error::Format(err))),
        };
        self.load_interface(&interface, diagnostics)
    }

    /// Verify and decode an already parsed interface.
    pub fn load_interface(
        &self,
        interface: &Interface,
        diagnostics: &mut Diagnostics,
    ) -> Result<ModuleInterface> {
        match self.decode(interface) {
            Ok(module) => {
                tracing::debug!(exports = module.exports.len(), "loaded interface");
                Ok(module)
            }
            Err(err) => Err(fatal(diagnostics, err)),
        }
    }

    /// Budget check on the raw header. Blobs without a recognisable header
    /// are left for the parser to reject.
    fn check_header(&self, bytes: &[u8]) -> Result<()> {
        let Some(header) = bytes.first_chunk::<HEADER_SIZE>().map(Header::from_bytes) else {
            return Ok(());
        };
        if !header.validate_magic() || !header.validate_version() {
            return Ok(());
        }
        let records = usize::try_from(header.record_count()).unwrap_or(usize::MAX);
        check_budget(records, &self.config)?;
        Ok(())
    }

    fn decode(&self, interface: &Interface) -> Result<ModuleInterface> {
        check_budget(interface.record_count(), &self.config)?;
        interface.verify()?;
        Ok(decode_interface(interface, &self.config)?)
    }
}

fn fatal(diagnostics: &mut Diagnostics, err: Error) -> Error {
    Error::Fatal(diagnostics.fatal(Position::EndOfModule, err.to_string()))
}
