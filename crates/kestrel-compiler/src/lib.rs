//! Kestrel interface metadata codec.
//!
//! This crate turns the compiler's live type graph into interface tables and
//! back:
//! - `types` / `expr` - live types, kinds, contexts and inlinable expressions
//! - `encode` - flattening a live graph into an interned Table Set
//! - `decode` - rebuilding the live graph from a Table Set, validating as it goes
//! - `interface` - store/load glue used by the compilation driver
//! - `diagnostics` - fatal and source diagnostics

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod decode;
pub mod diagnostics;
pub mod encode;
pub mod expr;
pub mod interface;
pub mod types;

#[cfg(test)]
mod interface_tests;
#[cfg(test)]
pub(crate) mod test_utils;

use kestrel_meta::{FormatError, StructuralError};

pub use decode::{DecodeError, Decoder, decode_interface, decode_sigma};
pub use diagnostics::{Diagnostics, Fatal, Position, Severity};
pub use encode::{EncodeError, TableBuilder, encode_interface, encode_sigma};
pub use expr::{Alt, Expr};
pub use interface::{CodecConfig, Export, InterfaceLoader, ModuleInterface, store};
pub use types::{Context, Kind, Rho, Sigma, Tau};

/// Errors that can occur while storing or loading interface metadata.
///
/// Every variant is fatal for the compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed interface blob: {0}")]
    Format(#[from] FormatError),

    #[error("invalid interface tables: {0}")]
    Structural(#[from] StructuralError),

    #[error("cannot encode interface: {0}")]
    Encode(#[from] EncodeError),

    #[error("cannot decode interface: {0}")]
    Decode(#[from] DecodeError),

    /// A fatal diagnostic was reported; the compilation unit must stop.
    #[error("{0}")]
    Fatal(Fatal),
}

/// Result type for interface operations.
pub type Result<T> = std::result::Result<T, Error>;
