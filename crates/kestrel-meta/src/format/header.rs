//! Interface blob header (64 bytes).
//!
//! Offsets are not stored: they are computed from the counts and blob size,
//! so a header cannot describe overlapping sections.

use super::{
    CONTEXT_SIZE, EXPORT_SIZE, EXPR_SIZE, FORMAT_VERSION, HEADER_SIZE, MAGIC, NAME_SIZE, RHO_SIZE,
    SECTION_ALIGN, SIGMA_SIZE, TAU_SIZE,
};

/// First 64 bytes of an interface blob.
///
/// Layout:
/// - 0-19: identity and sizes (magic, version, checksum, total_size, str_blob_size)
/// - 20-55: counts (9 × u32), in section order
/// - 56-63: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes: b"KIFC"
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 of everything after the header
    pub checksum: u32,
    /// Total blob size in bytes, header included
    pub total_size: u32,
    pub str_blob_size: u32,

    /// Number of strings, the empty string at index 0 included.
    pub str_count: u32,
    /// Number of `u32` entries in the list pool.
    pub list_pool_count: u32,
    pub taus_count: u32,
    pub rhos_count: u32,
    pub sigmas_count: u32,
    pub contexts_count: u32,
    pub exprs_count: u32,
    pub names_count: u32,
    pub exports_count: u32,

    pub _reserved: [u8; 8],
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: FORMAT_VERSION,
            checksum: 0,
            total_size: 0,
            str_blob_size: 0,
            str_count: 0,
            list_pool_count: 0,
            taus_count: 0,
            rhos_count: 0,
            sigmas_count: 0,
            contexts_count: 0,
            exprs_count: 0,
            names_count: 0,
            exports_count: 0,
            _reserved: [0; 8],
        }
    }
}

/// Section offsets derived from header counts.
///
/// Computed in `u64` so that a corrupt header cannot overflow the arithmetic.
/// `end` is the offset one past the export section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub str_blob: u64,
    pub str_table: u64,
    pub list_pool: u64,
    pub taus: u64,
    pub rhos: u64,
    pub sigmas: u64,
    pub contexts: u64,
    pub exprs: u64,
    pub names: u64,
    pub exports: u64,
    pub end: u64,
}

fn u32_at(bytes: &[u8; HEADER_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

impl Header {
    /// Decode a header from its 64 bytes.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&bytes[56..64]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32_at(bytes, 4),
            checksum: u32_at(bytes, 8),
            total_size: u32_at(bytes, 12),
            str_blob_size: u32_at(bytes, 16),
            str_count: u32_at(bytes, 20),
            list_pool_count: u32_at(bytes, 24),
            taus_count: u32_at(bytes, 28),
            rhos_count: u32_at(bytes, 32),
            sigmas_count: u32_at(bytes, 36),
            contexts_count: u32_at(bytes, 40),
            exprs_count: u32_at(bytes, 44),
            names_count: u32_at(bytes, 48),
            exports_count: u32_at(bytes, 52),
            _reserved: reserved,
        }
    }

    /// Encode the header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        let words = [
            self.version,
            self.checksum,
            self.total_size,
            self.str_blob_size,
            self.str_count,
            self.list_pool_count,
            self.taus_count,
            self.rhos_count,
            self.sigmas_count,
            self.contexts_count,
            self.exprs_count,
            self.names_count,
            self.exports_count,
        ];
        for (i, word) in words.iter().enumerate() {
            let at = 4 + i * 4;
            bytes[at..at + 4].copy_from_slice(&word.to_le_bytes());
        }
        bytes[56..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == FORMAT_VERSION
    }

    /// Total records across every table and the export list.
    ///
    /// Readable before any section is parsed, so callers can refuse an
    /// oversized interface without allocating for it.
    pub fn record_count(&self) -> u64 {
        [
            self.taus_count,
            self.rhos_count,
            self.sigmas_count,
            self.contexts_count,
            self.exprs_count,
            self.names_count,
            self.exports_count,
        ]
        .iter()
        .map(|&count| u64::from(count))
        .sum()
    }

    /// Compute section offsets from counts and the string blob size.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let str_blob = HEADER_SIZE as u64;
        let str_table = align_up(str_blob + u64::from(self.str_blob_size));
        let list_pool = align_up(str_table + (u64::from(self.str_count) + 1) * 4);
        let taus = align_up(list_pool + u64::from(self.list_pool_count) * 4);
        let rhos = align_up(taus + section_size(self.taus_count, TAU_SIZE));
        let sigmas = align_up(rhos + section_size(self.rhos_count, RHO_SIZE));
        let contexts = align_up(sigmas + section_size(self.sigmas_count, SIGMA_SIZE));
        let exprs = align_up(contexts + section_size(self.contexts_count, CONTEXT_SIZE));
        let names = align_up(exprs + section_size(self.exprs_count, EXPR_SIZE));
        let exports = align_up(names + section_size(self.names_count, NAME_SIZE));
        let end = exports + section_size(self.exports_count, EXPORT_SIZE);

        SectionOffsets {
            str_blob,
            str_table,
            list_pool,
            taus,
            rhos,
            sigmas,
            contexts,
            exprs,
            names,
            exports,
            end,
        }
    }
}

fn section_size(count: u32, record: usize) -> u64 {
    u64::from(count) * record as u64
}

/// Round up to the next multiple of [`SECTION_ALIGN`].
fn align_up(value: u64) -> u64 {
    let align = SECTION_ALIGN as u64;
    (value + align - 1) & !(align - 1)
}
