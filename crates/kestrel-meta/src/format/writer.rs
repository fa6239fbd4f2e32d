//! Serialization of an [`Interface`] into an interface blob.

use kestrel_core::Interner;

use super::header::Header;
use super::{HEADER_SIZE, NONE};
use crate::error::FormatError;
use crate::table_set::Interface;

/// Accumulates the string pool, list pool and record sections.
struct Writer {
    strings: Interner,
    pool: Vec<u32>,
}

impl Writer {
    fn string(&mut self, s: &str) -> u32 {
        self.strings.intern(s).as_u32()
    }

    /// Append a list to the pool, returning `(start, count)`.
    fn list(&mut self, items: impl IntoIterator<Item = u32>) -> Result<(u32, u32), FormatError> {
        let start = self.pool.len();
        self.pool.extend(items);
        Ok((
            count("list pool", start)?,
            count("list pool", self.pool.len() - start)?,
        ))
    }
}

fn count(section: &'static str, n: usize) -> Result<u32, FormatError> {
    u32::try_from(n).map_err(|_| FormatError::TooManyRecords { section, count: n })
}

fn opt(index: Option<u32>) -> u32 {
    index.unwrap_or(NONE)
}

fn put(out: &mut Vec<u8>, words: &[u32]) {
    for word in words {
        out.extend_from_slice(&word.to_le_bytes());
    }
}

/// Flag byte followed by three bytes of padding.
fn put_flag(out: &mut Vec<u8>, flag: u8) {
    out.extend_from_slice(&[flag, 0, 0, 0]);
}

impl Interface {
    /// Serialize to an interface blob.
    ///
    /// Output is deterministic: equal interfaces produce identical bytes.
    /// Records are written as-is; nothing is verified here.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FormatError> {
        let tables = &self.tables;
        let mut w = Writer {
            strings: Interner::new(),
            pool: Vec::new(),
        };

        let mut taus = Vec::with_capacity(tables.taus.len() * super::TAU_SIZE);
        for tau in &tables.taus {
            put_flag(&mut taus, tau.tag);
            let var = w.string(&tau.var);
            put(
                &mut taus,
                &[tau.suba.0, tau.subb.0, opt(tau.tcon.map(|n| n.0)), var],
            );
        }

        let mut rhos = Vec::with_capacity(tables.rhos.len() * super::RHO_SIZE);
        for rho in &tables.rhos {
            put_flag(&mut rhos, u8::from(rho.rhofun));
            let (start, n) = w.list(rho.cont.iter().map(|c| c.0))?;
            put(&mut rhos, &[start, n, rho.sigma.0, rho.rhotau]);
        }

        let mut sigmas = Vec::with_capacity(tables.sigmas.len() * super::SIGMA_SIZE);
        for sigma in &tables.sigmas {
            let bound: Vec<u32> = sigma.bound.iter().map(|b| w.string(b)).collect();
            let (bound_start, bound_count) = w.list(bound)?;
            let (kinds_start, kinds_count) = w.list(sigma.kinds.iter().map(|k| k.0))?;
            put(
                &mut sigmas,
                &[bound_start, bound_count, kinds_start, kinds_count, sigma.rho.0],
            );
        }

        let mut contexts = Vec::with_capacity(tables.contexts.len() * super::CONTEXT_SIZE);
        for context in &tables.contexts {
            put(&mut contexts, &[context.class.0, context.tau.0]);
        }

        let mut exprs = Vec::with_capacity(tables.exprs.len() * super::EXPR_SIZE);
        for expr in &tables.exprs {
            exprs.extend_from_slice(&[expr.kind, expr.lkind, 0, 0]);
            let text = w.string(&expr.text);
            let (alts_start, alts_count) = w.list(expr.alts.iter().map(|a| a.0))?;
            put(
                &mut exprs,
                &[
                    opt(expr.name.map(|n| n.0)),
                    text,
                    alts_start,
                    alts_count,
                    expr.subx1.0,
                    expr.subx2.0,
                    expr.subx3.0,
                ],
            );
        }

        let mut names = Vec::with_capacity(tables.names.len() * super::NAME_SIZE);
        for name in &tables.names {
            put_flag(&mut names, name.kind);
            let pack = w.string(&name.pack);
            let base = w.string(&name.base);
            let member = w.string(&name.member);
            put(&mut names, &[pack, base, member]);
        }

        let mut exports = Vec::with_capacity(self.exports.len() * super::EXPORT_SIZE);
        for export in &self.exports {
            put(
                &mut exports,
                &[export.name.0, export.sigma.0, opt(export.inline.map(|e| e.0))],
            );
        }

        let (str_blob, str_offsets) = w.strings.to_blob();
        let mut str_table = Vec::with_capacity(str_offsets.len() * 4);
        put(&mut str_table, &str_offsets);
        let mut list_pool = Vec::with_capacity(w.pool.len() * 4);
        put(&mut list_pool, &w.pool);

        let mut header = Header {
            str_blob_size: count("string blob", str_blob.len())?,
            str_count: count("string", w.strings.len())?,
            list_pool_count: count("list pool", w.pool.len())?,
            taus_count: count("tau", tables.taus.len())?,
            rhos_count: count("rho", tables.rhos.len())?,
            sigmas_count: count("sigma", tables.sigmas.len())?,
            contexts_count: count("context", tables.contexts.len())?,
            exprs_count: count("expr", tables.exprs.len())?,
            names_count: count("name", tables.names.len())?,
            exports_count: count("export", self.exports.len())?,
            ..Header::default()
        };

        let offsets = header.compute_offsets();
        header.total_size =
            u32::try_from(offsets.end).map_err(|_| FormatError::TooManyRecords {
                section: "interface byte",
                count: offsets.end as usize,
            })?;

        let mut out = vec![0u8; header.total_size as usize];
        let sections: [(u64, &[u8]); 10] = [
            (offsets.str_blob, &str_blob),
            (offsets.str_table, &str_table),
            (offsets.list_pool, &list_pool),
            (offsets.taus, &taus),
            (offsets.rhos, &rhos),
            (offsets.sigmas, &sigmas),
            (offsets.contexts, &contexts),
            (offsets.exprs, &exprs),
            (offsets.names, &names),
            (offsets.exports, &exports),
        ];
        for (at, bytes) in sections {
            let at = at as usize;
            out[at..at + bytes.len()].copy_from_slice(bytes);
        }

        header.checksum = crc32fast::hash(&out[HEADER_SIZE..]);
        out[..HEADER_SIZE].copy_from_slice(&header.to_bytes());
        Ok(out)
    }
}
