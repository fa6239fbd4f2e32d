//! Validating deserialization of an interface blob.
//!
//! The reader checks the container: header identity, size, checksum, section
//! bounds, string table shape, list ranges and UTF-8. Record contents (tags,
//! cross-table indices) are left to [`Interface::verify`] and the decoder.

use std::cell::Cell;

use super::header::Header;
use super::{
    CONTEXT_SIZE, DEFAULT_MAX_STRING_BYTES, EXPORT_SIZE, EXPR_SIZE, HEADER_SIZE, NAME_SIZE, NONE,
    RHO_SIZE, SIGMA_SIZE, TAU_SIZE,
};
use crate::error::FormatError;
use crate::ids::{ContextId, ExprId, NameId, RhoId, SigmaId, TauId};
use crate::records::{
    ContextRecord, ExportRecord, ExprRecord, NameRecord, RhoRecord, SigmaRecord, TauRecord,
};
use crate::table_set::{Interface, TableSet};

/// Sequential little-endian reads within one fixed-size record.
struct Fields<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn u8(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    fn u32(&mut self) -> u32 {
        let b = &self.bytes[self.pos..self.pos + 4];
        self.pos += 4;
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    fn opt(&mut self) -> Option<u32> {
        Some(self.u32()).filter(|&v| v != NONE)
    }
}

/// Resolved string and list pools shared by the record readers.
///
/// Lists written by the writer are disjoint, so the total number of entries
/// referenced never exceeds the pool length. `referenced` enforces that bound.
/// Strings are shared, so every reference copies one out; `materialised`
/// counts those bytes against `max_string_bytes`.
struct Pools {
    strings: Vec<String>,
    list: Vec<u32>,
    referenced: Cell<u64>,
    materialised: Cell<u64>,
    max_string_bytes: u64,
}

impl Pools {
    fn string(&self, index: u32) -> Result<String, FormatError> {
        let s = self
            .strings
            .get(index as usize)
            .ok_or(FormatError::StringOutOfBounds {
                index,
                count: self.strings.len(),
            })?;
        let materialised = self.materialised.get() + s.len() as u64;
        if materialised > self.max_string_bytes {
            return Err(FormatError::StringBudgetExceeded {
                limit: self.max_string_bytes,
            });
        }
        self.materialised.set(materialised);
        Ok(s.clone())
    }

    fn list(&self, start: u32, count: u32) -> Result<&[u32], FormatError> {
        let out_of_bounds = FormatError::ListOutOfBounds {
            start,
            count,
            len: self.list.len(),
        };
        let end = u64::from(start) + u64::from(count);
        let referenced = self.referenced.get() + u64::from(count);
        if end > self.list.len() as u64 || referenced > self.list.len() as u64 {
            return Err(out_of_bounds);
        }
        self.referenced.set(referenced);
        Ok(&self.list[start as usize..end as usize])
    }
}

/// Slice `len` bytes starting at `start`, checking bounds.
fn section<'a>(
    bytes: &'a [u8],
    name: &'static str,
    start: u64,
    len: u64,
) -> Result<&'a [u8], FormatError> {
    let end = start + len;
    if end > bytes.len() as u64 {
        return Err(FormatError::SectionOutOfBounds { section: name, end });
    }
    Ok(&bytes[start as usize..end as usize])
}

fn words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn read_strings(blob: &[u8], offsets: &[u32]) -> Result<Vec<String>, FormatError> {
    if offsets.first().is_some_and(|&first| first != 0) {
        return Err(FormatError::InvalidStringTable);
    }
    let mut strings = Vec::with_capacity(offsets.len().saturating_sub(1));
    for (i, pair) in offsets.windows(2).enumerate() {
        let (start, end) = (pair[0] as usize, pair[1] as usize);
        if start > end || end > blob.len() {
            return Err(FormatError::InvalidStringTable);
        }
        let s = std::str::from_utf8(&blob[start..end])
            .map_err(|_| FormatError::InvalidUtf8(i as u32))?;
        strings.push(s.to_owned());
    }
    Ok(strings)
}

impl Interface {
    /// Parse an interface blob.
    ///
    /// Never panics on corrupt input; every inconsistency becomes a
    /// [`FormatError`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::from_bytes_with_limit(bytes, DEFAULT_MAX_STRING_BYTES)
    }

    /// Parse an interface blob, copying out at most `max_string_bytes` of
    /// string data across all records.
    pub fn from_bytes_with_limit(
        bytes: &[u8],
        max_string_bytes: u64,
    ) -> Result<Self, FormatError> {
        let header_bytes: &[u8; HEADER_SIZE] = bytes
            .get(..HEADER_SIZE)
            .and_then(|h| h.try_into().ok())
            .ok_or(FormatError::TooSmall(bytes.len()))?;
        let header = Header::from_bytes(header_bytes);

        if !header.validate_magic() {
            return Err(FormatError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(FormatError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != bytes.len() {
            return Err(FormatError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }
        let actual = crc32fast::hash(&bytes[HEADER_SIZE..]);
        if actual != header.checksum {
            return Err(FormatError::ChecksumMismatch {
                header: header.checksum,
                actual,
            });
        }

        let off = header.compute_offsets();
        let size = |count: u32, record: usize| u64::from(count) * record as u64;

        let blob = section(
            bytes,
            "string blob",
            off.str_blob,
            u64::from(header.str_blob_size),
        )?;
        let str_table = section(
            bytes,
            "string table",
            off.str_table,
            (u64::from(header.str_count) + 1) * 4,
        )?;
        let list_pool = section(
            bytes,
            "list pool",
            off.list_pool,
            size(header.list_pool_count, 4),
        )?;
        let taus = section(bytes, "tau", off.taus, size(header.taus_count, TAU_SIZE))?;
        let rhos = section(bytes, "rho", off.rhos, size(header.rhos_count, RHO_SIZE))?;
        let sigmas = section(
            bytes,
            "sigma",
            off.sigmas,
            size(header.sigmas_count, SIGMA_SIZE),
        )?;
        let contexts = section(
            bytes,
            "context",
            off.contexts,
            size(header.contexts_count, CONTEXT_SIZE),
        )?;
        let exprs = section(bytes, "expr", off.exprs, size(header.exprs_count, EXPR_SIZE))?;
        let names = section(bytes, "name", off.names, size(header.names_count, NAME_SIZE))?;
        let exports = section(
            bytes,
            "export",
            off.exports,
            size(header.exports_count, EXPORT_SIZE),
        )?;

        let pools = Pools {
            strings: read_strings(blob, &words(str_table))?,
            list: words(list_pool),
            referenced: Cell::new(0),
            materialised: Cell::new(0),
            max_string_bytes,
        };

        let mut tables = TableSet::new();

        for chunk in taus.chunks_exact(TAU_SIZE) {
            let mut f = Fields::new(chunk);
            let tag = f.u8();
            f.skip(3);
            tables.taus.push(TauRecord {
                tag,
                suba: TauId(f.u32()),
                subb: TauId(f.u32()),
                tcon: f.opt().map(NameId),
                var: pools.string(f.u32())?,
            });
        }

        for (i, chunk) in rhos.chunks_exact(RHO_SIZE).enumerate() {
            let mut f = Fields::new(chunk);
            let rhofun = match f.u8() {
                0 => false,
                1 => true,
                value => {
                    return Err(FormatError::InvalidFlag {
                        section: "rho",
                        index: i as u32,
                        value,
                    });
                }
            };
            f.skip(3);
            let (start, count) = (f.u32(), f.u32());
            tables.rhos.push(RhoRecord {
                rhofun,
                cont: pools.list(start, count)?.iter().map(|&c| ContextId(c)).collect(),
                sigma: SigmaId(f.u32()),
                rhotau: f.u32(),
            });
        }

        for chunk in sigmas.chunks_exact(SIGMA_SIZE) {
            let mut f = Fields::new(chunk);
            let (bound_start, bound_count) = (f.u32(), f.u32());
            let (kinds_start, kinds_count) = (f.u32(), f.u32());
            let bound = pools
                .list(bound_start, bound_count)?
                .iter()
                .map(|&s| pools.string(s))
                .collect::<Result<Vec<_>, _>>()?;
            let kinds = pools
                .list(kinds_start, kinds_count)?
                .iter()
                .map(|&k| TauId(k))
                .collect();
            tables.sigmas.push(SigmaRecord {
                bound,
                kinds,
                rho: RhoId(f.u32()),
            });
        }

        for chunk in contexts.chunks_exact(CONTEXT_SIZE) {
            let mut f = Fields::new(chunk);
            tables.contexts.push(ContextRecord {
                class: NameId(f.u32()),
                tau: TauId(f.u32()),
            });
        }

        for chunk in exprs.chunks_exact(EXPR_SIZE) {
            let mut f = Fields::new(chunk);
            let kind = f.u8();
            let lkind = f.u8();
            f.skip(2);
            let name = f.opt().map(NameId);
            let text = pools.string(f.u32())?;
            let (start, count) = (f.u32(), f.u32());
            tables.exprs.push(ExprRecord {
                kind,
                name,
                lkind,
                text,
                alts: pools.list(start, count)?.iter().map(|&a| ExprId(a)).collect(),
                subx1: ExprId(f.u32()),
                subx2: ExprId(f.u32()),
                subx3: ExprId(f.u32()),
            });
        }

        for chunk in names.chunks_exact(NAME_SIZE) {
            let mut f = Fields::new(chunk);
            let kind = f.u8();
            f.skip(3);
            tables.names.push(NameRecord {
                kind,
                pack: pools.string(f.u32())?,
                base: pools.string(f.u32())?,
                member: pools.string(f.u32())?,
            });
        }

        let exports = exports
            .chunks_exact(EXPORT_SIZE)
            .map(|chunk| {
                let mut f = Fields::new(chunk);
                ExportRecord {
                    name: NameId(f.u32()),
                    sigma: SigmaId(f.u32()),
                    inline: f.opt().map(ExprId),
                }
            })
            .collect();

        Ok(Interface::new(tables, exports))
    }
}
