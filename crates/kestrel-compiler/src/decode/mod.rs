//! Decoding of interface tables back into live graphs.
//!
//! Decoding starts at a root index and walks top-down, validating every index
//! and tag on the way. Untrusted tables can therefore not cause a panic: an
//! out-of-bounds index, a tag from the wrong range, a reference cycle or
//! excessive nesting all surface as a [`DecodeError`].

mod decoder;


use std::sync::Arc;

use kestrel_meta::{Interface, SigmaId, StructuralError, Table, TableSet};

use crate::interface::{CodecConfig, Export, ModuleInterface};
use crate::types::Sigma;

pub use decoder::Decoder;

/// Error during interface decoding. No live graph is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("{table} record {index} transitively references itself")]
    Cycle { table: Table, index: u32 },

    #[error("interface nesting exceeds the recursion limit of {limit}")]
    RecursionLimitExceeded { limit: usize },

    #[error("interface has {records} records, over the budget of {limit}")]
    BudgetExceeded { records: usize, limit: usize },
}

pub(crate) fn check_budget(records: usize, config: &CodecConfig) -> Result<(), DecodeError> {
    if records > config.max_records {
        return Err(DecodeError::BudgetExceeded {
            records,
            limit: config.max_records,
        });
    }
    Ok(())
}

/// Decode the Sigma at `root`.
pub fn decode_sigma(
    tables: &TableSet,
    root: SigmaId,
    config: &CodecConfig,
) -> Result<Arc<Sigma>, DecodeError> {
    check_budget(tables.record_count(), config)?;
    Decoder::new(tables)
        .with_recursion_limit(config.max_depth)
        .sigma(root)
}

/// Decode every export of an interface, in order.
///
/// One [`Decoder`] is shared across exports, so records referenced from
/// several exports are decoded once and shared.
pub fn decode_interface(
    interface: &Interface,
    config: &CodecConfig,
) -> Result<ModuleInterface, DecodeError> {
    check_budget(interface.record_count(), config)?;
    let mut decoder = Decoder::new(&interface.tables).with_recursion_limit(config.max_depth);
    let exports = interface
        .exports
        .iter()
        .map(|export| {
            Ok(Export {
                name: decoder.name(export.name)?,
                sigma: decoder.sigma(export.sigma)?,
                inline: export.inline.map(|body| decoder.expr(body)).transpose()?,
            })
        })
        .collect::<Result<Vec<_>, DecodeError>>()?;
    tracing::debug!(
        exports = exports.len(),
        records = interface.record_count(),
        "decoded interface"
    );
    Ok(ModuleInterface { exports })
}
