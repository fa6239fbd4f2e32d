//! The encoded form of a module interface.
//!
//! A [`TableSet`] is five record tables plus the shared name table. It is built
//! once by the encoder, immutable afterwards, and read concurrently by any
//! number of decoders. An [`Interface`] adds the export list naming the roots.

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;
use crate::ids::{ContextId, ExprId, NameId, RhoId, SigmaId, Table, TauId};
use crate::records::{
    ContextRecord, ExportRecord, ExprRecord, NameRecord, RhoRecord, SigmaRecord, TauRecord,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSet {
    pub taus: Vec<TauRecord>,
    pub rhos: Vec<RhoRecord>,
    pub sigmas: Vec<SigmaRecord>,
    pub contexts: Vec<ContextRecord>,
    pub exprs: Vec<ExprRecord>,
    pub names: Vec<NameRecord>,
}

fn lookup<T>(records: &[T], table: Table, index: u32) -> Result<&T, StructuralError> {
    records
        .get(index as usize)
        .ok_or(StructuralError::IndexOutOfBounds {
            table,
            index,
            len: records.len(),
        })
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tau(&self, id: TauId) -> Result<&TauRecord, StructuralError> {
        lookup(&self.taus, Table::Tau, id.0)
    }

    pub fn rho(&self, id: RhoId) -> Result<&RhoRecord, StructuralError> {
        lookup(&self.rhos, Table::Rho, id.0)
    }

    pub fn sigma(&self, id: SigmaId) -> Result<&SigmaRecord, StructuralError> {
        lookup(&self.sigmas, Table::Sigma, id.0)
    }

    pub fn context(&self, id: ContextId) -> Result<&ContextRecord, StructuralError> {
        lookup(&self.contexts, Table::Context, id.0)
    }

    pub fn expr(&self, id: ExprId) -> Result<&ExprRecord, StructuralError> {
        lookup(&self.exprs, Table::Expr, id.0)
    }

    pub fn name(&self, id: NameId) -> Result<&NameRecord, StructuralError> {
        lookup(&self.names, Table::Name, id.0)
    }

    /// Total number of records across all tables.
    pub fn record_count(&self) -> usize {
        self.taus.len()
            + self.rhos.len()
            + self.sigmas.len()
            + self.contexts.len()
            + self.exprs.len()
            + self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

/// A Table Set together with the exported roots it describes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interface {
    pub tables: TableSet,
    pub exports: Vec<ExportRecord>,
}

impl Interface {
    pub fn new(tables: TableSet, exports: Vec<ExportRecord>) -> Self {
        Self { tables, exports }
    }

    /// Total number of records, exports included.
    pub fn record_count(&self) -> usize {
        self.tables.record_count() + self.exports.len()
    }
}
