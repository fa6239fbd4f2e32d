//! Encoding of live graphs into interface tables.
//!
//! The [`TableBuilder`] walks a live graph depth-first, children before
//! parents, and interns every node by structural content. Every reference in
//! the output therefore points at a record appended earlier, and structurally
//! identical sub-graphs share one record.

mod table_builder;


use std::sync::Arc;

use kestrel_core::QName;
use kestrel_meta::{ExportRecord, ExprId, Interface, SigmaId, Table, TableSet};

use crate::interface::ModuleInterface;
use crate::types::Sigma;

pub use table_builder::TableBuilder;

/// Error during interface encoding. No tables are produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Inference left a kind variable unresolved.
    #[error("unresolved kind variable ?k{0} reached the interface encoder")]
    UnresolvedKindVariable(u32),

    /// A name the decoder would reject, such as one with an empty base.
    #[error("malformed {} name `{}`", .0.kind.mnemonic(), .0)]
    InvalidName(QName),

    #[error("context constraint on {0}, which is not a class")]
    NotAClass(QName),

    #[error("inline body of {0} is the placeholder expression")]
    PlaceholderInline(QName),

    #[error("{0} table exceeds the u32 index space")]
    TableOverflow(Table),
}

/// Encode a single Sigma into a fresh Table Set.
pub fn encode_sigma(sigma: &Arc<Sigma>) -> Result<(TableSet, SigmaId), EncodeError> {
    let mut builder = TableBuilder::new();
    let root = builder.sigma(sigma)?;
    Ok((builder.finish(), root))
}

/// Encode a module's exports, in order, into one shared Table Set.
pub fn encode_interface(module: &ModuleInterface) -> Result<Interface, EncodeError> {
    let mut builder = TableBuilder::new();
    let mut exports = Vec::with_capacity(module.exports.len());
    for export in &module.exports {
        let name = builder.name(&export.name)?;
        let sigma = builder.sigma(&export.sigma)?;
        let inline = export
            .inline
            .as_ref()
            .map(|body| builder.expr(body))
            .transpose()?;
        if inline == Some(ExprId::PLACEHOLDER) {
            return Err(EncodeError::PlaceholderInline(export.name.clone()));
        }
        exports.push(ExportRecord {
            name,
            sigma,
            inline,
        });
    }
    let tables = builder.finish();
    tracing::debug!(
        exports = exports.len(),
        taus = tables.taus.len(),
        rhos = tables.rhos.len(),
        sigmas = tables.sigmas.len(),
        contexts = tables.contexts.len(),
        exprs = tables.exprs.len(),
        names = tables.names.len(),
        "encoded interface"
    );
    Ok(Interface::new(tables, exports))
}
