//! Binary interface format.
//!
//! An interface blob is a 64-byte [`Header`] followed by sections, each aligned
//! to [`SECTION_ALIGN`] bytes:
//!
//! Header → StringBlob → StringTable → ListPool → Taus → Rhos → Sigmas →
//! Contexts → Exprs → Names → Exports
//!
//! All integers are little-endian. Optional indices encode `None` as
//! `u32::MAX`. Variable-length lists (Rho constraints, Sigma binders and kinds,
//! case alternatives) live in the shared list pool and are referenced by
//! `(start, count)`.

mod header;
mod reader;
mod writer;

#[cfg(test)]
mod format_tests;

pub use header::{Header, SectionOffsets};

/// Magic bytes identifying an interface blob.
pub const MAGIC: [u8; 4] = *b"KIFC";

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Size of the header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Section alignment in bytes.
pub const SECTION_ALIGN: usize = 8;

/// Default cap on the string bytes materialised while reading one interface.
pub const DEFAULT_MAX_STRING_BYTES: u64 = 1 << 26;

pub const TAU_SIZE: usize = 20;
pub const RHO_SIZE: usize = 20;
pub const SIGMA_SIZE: usize = 20;
pub const CONTEXT_SIZE: usize = 8;
pub const EXPR_SIZE: usize = 32;
pub const NAME_SIZE: usize = 16;
pub const EXPORT_SIZE: usize = 12;

/// Encoding of `None` for optional indices.
pub(crate) const NONE: u32 = u32::MAX;
