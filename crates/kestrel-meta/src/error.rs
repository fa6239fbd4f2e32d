//! Errors raised while reading interface metadata.

use crate::ids::Table;
use crate::tags::TagRange;

/// A Table Set violates the record layout contract.
///
/// Either the encoder has a bug or the data was corrupted after it was
/// written. There is no recovery: the interface must be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("{table} index {index} out of bounds (table has {len} records)")]
    IndexOutOfBounds { table: Table, index: u32, len: usize },

    #[error("{table} record {index} has unknown tag {tag}")]
    UnknownTag { table: Table, index: u32, tag: u8 },

    #[error("tau record {index} has tag {tag}, which is not a {expected} tag")]
    TagContextMismatch {
        index: u32,
        tag: u8,
        expected: TagRange,
    },

    #[error("tau record {index} is an unresolved kind variable")]
    UnresolvedKindVariable { index: u32 },

    #[error("sigma record {index} binds {bound} variables but lists {kinds} kinds")]
    BoundKindsMismatch {
        index: u32,
        bound: usize,
        kinds: usize,
    },

    #[error("{table} record {index} requires a name but has none")]
    MissingName { table: Table, index: u32 },

    #[error("expr record {index} is referenced as {expected} but is {actual}")]
    UnexpectedExprKind {
        index: u32,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("expr record {index} has literal kind {lkind}, which is not a literal kind")]
    InvalidLiteralKind { index: u32, lkind: u8 },

    #[error("expr table does not start with the placeholder record")]
    MissingPlaceholder,

    #[error("name record {index} is malformed")]
    InvalidName { index: u32 },
}

/// An interface blob could not be parsed into a Table Set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("interface too small: {0} bytes (minimum 64)")]
    TooSmall(usize),

    #[error("invalid magic: expected KIFC")]
    InvalidMagic,

    #[error("unsupported interface version: {0} (expected {expected})", expected = crate::FORMAT_VERSION)]
    UnsupportedVersion(u32),

    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },

    #[error("checksum mismatch: header says {header:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { header: u32, actual: u32 },

    #[error("{section} section ends at byte {end}, past the end of the interface")]
    SectionOutOfBounds { section: &'static str, end: u64 },

    #[error("string table offsets are not monotone or exceed the string blob")]
    InvalidStringTable,

    #[error("string {0} is not valid UTF-8")]
    InvalidUtf8(u32),

    #[error("string index {index} out of bounds ({count} strings)")]
    StringOutOfBounds { index: u32, count: usize },

    #[error("list {start}..+{count} exceeds the list pool ({len} entries)")]
    ListOutOfBounds { start: u32, count: u32, len: usize },

    #[error("{section} record {index} has invalid flag byte {value}")]
    InvalidFlag {
        section: &'static str,
        index: u32,
        value: u8,
    },

    #[error("strings referenced by the interface exceed {limit} bytes")]
    StringBudgetExceeded { limit: u64 },

    #[error("too many {section} records: {count} (max {max})", max = u32::MAX)]
    TooManyRecords { section: &'static str, count: usize },
}
