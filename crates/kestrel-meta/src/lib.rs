//! Module interface metadata for Kestrel.
//!
//! This crate contains:
//! - Record layout and tag scheme (TauRecord, RhoRecord, SigmaRecord, ContextRecord, ExprRecord)
//! - The Table Set carrying an encoded interface, with bounds-checked access and verification
//! - The binary interface format (header, sections, writer, validating reader)
//! - A human-readable dump of interface tables

pub mod dump;
pub mod error;
pub mod format;
pub mod ids;
pub mod records;
pub mod table_set;
pub mod tags;
mod verify;

#[cfg(test)]
mod table_set_tests;
#[cfg(test)]
mod tags_tests;

pub use dump::dump;
pub use error::{FormatError, StructuralError};
pub use format::{
    DEFAULT_MAX_STRING_BYTES, FORMAT_VERSION, HEADER_SIZE, Header, MAGIC, SECTION_ALIGN,
};
pub use ids::{ContextId, ExprId, NameId, RhoId, SigmaId, Table, TauId};
pub use records::{
    ContextRecord, ExportRecord, ExprNode, ExprRecord, KindNode, NameRecord, RhoRecord, RhoTail,
    SigmaRecord, TauRecord, TypeNode,
};
pub use table_set::{Interface, TableSet};
pub use tags::{ExprKind, LitKind, TagRange, TauTag};
