//! Eager structural verification of a Table Set.
//!
//! The decoder validates lazily, only along the paths it walks. Verification
//! checks every record up front, so a loader can reject a corrupt interface
//! before handing any of it to inference.

use kestrel_core::NameKind;

use crate::error::StructuralError;
use crate::ids::{ExprId, NameId, SigmaId, TauId};
use crate::records::{ExprNode, KindNode, RhoTail, TypeNode};
use crate::table_set::{Interface, TableSet};
use crate::tags::ExprKind;

impl TableSet {
    /// Check every record of every table.
    ///
    /// Verifies index bounds, tag validity for the context each Tau index is
    /// used in, Sigma arity, name well-formedness and the placeholder at
    /// expression index 0. Does not detect reference cycles.
    pub fn verify(&self) -> Result<(), StructuralError> {
        for (i, record) in self.taus.iter().enumerate() {
            let at = TauId(i as u32);
            if record.tag(at)?.is_kind() {
                self.verify_kind_node(at)?;
            } else {
                self.verify_type_node(at)?;
            }
        }

        for record in &self.rhos {
            for &ctx in &record.cont {
                self.context(ctx)?;
            }
            match record.tail() {
                RhoTail::Rho(result) => {
                    self.sigma(record.sigma)?;
                    self.rho(result)?;
                }
                RhoTail::Tau(tau) => {
                    self.type_at(tau)?;
                }
            }
        }

        for (i, record) in self.sigmas.iter().enumerate() {
            record.check_arity(SigmaId(i as u32))?;
            for &kind in &record.kinds {
                self.kind_at(kind)?;
            }
            self.rho(record.rho)?;
        }

        for record in &self.contexts {
            let class = self.qname_kind(record.class)?;
            if class != NameKind::Class {
                return Err(StructuralError::InvalidName {
                    index: record.class.0,
                });
            }
            self.type_at(record.tau)?;
        }

        if let Some(first) = self.exprs.first()
            && !first.is_placeholder()
        {
            return Err(StructuralError::MissingPlaceholder);
        }
        for i in 0..self.exprs.len() {
            self.verify_expr(ExprId(i as u32))?;
        }

        for i in 0..self.names.len() {
            let at = NameId(i as u32);
            self.name(at)?.to_qname(at)?;
        }

        Ok(())
    }

    fn type_at(&self, id: TauId) -> Result<TypeNode<'_>, StructuralError> {
        self.tau(id)?.as_type(id)
    }

    fn kind_at(&self, id: TauId) -> Result<KindNode, StructuralError> {
        self.tau(id)?.as_kind(id)
    }

    fn qname_kind(&self, id: NameId) -> Result<NameKind, StructuralError> {
        Ok(self.name(id)?.to_qname(id)?.kind)
    }

    fn verify_type_node(&self, at: TauId) -> Result<(), StructuralError> {
        match self.type_at(at)? {
            TypeNode::App { fun, arg } => {
                self.type_at(fun)?;
                self.type_at(arg)?;
            }
            TypeNode::Con(name) => {
                self.name(name)?;
            }
            TypeNode::Var { kind, .. } => {
                self.kind_at(kind)?;
            }
        }
        Ok(())
    }

    fn verify_kind_node(&self, at: TauId) -> Result<(), StructuralError> {
        match self.kind_at(at)? {
            KindNode::App { arg, res } => {
                self.kind_at(arg)?;
                self.kind_at(res)?;
            }
            KindNode::Type => {}
            KindNode::Gen(tau) => {
                self.type_at(tau)?;
            }
        }
        Ok(())
    }

    fn verify_expr(&self, at: ExprId) -> Result<(), StructuralError> {
        let sub = |id: ExprId| self.expr(id).map(|_| ());
        match self.expr(at)?.classify(at)? {
            ExprNode::Placeholder | ExprNode::Local(_) | ExprNode::Lit { .. } => {}
            ExprNode::Global(name) | ExprNode::Con(name) => {
                self.name(name)?;
            }
            ExprNode::App { fun: a, arg: b }
            | ExprNode::Lam { pat: a, body: b }
            | ExprNode::Alt { pat: a, body: b }
            | ExprNode::Let {
                value: a, body: b, ..
            } => {
                sub(a)?;
                sub(b)?;
            }
            ExprNode::Ifte { cond, then, els } => {
                sub(cond)?;
                sub(then)?;
                sub(els)?;
            }
            ExprNode::Case { scrutinee, alts } => {
                sub(scrutinee)?;
                for &alt in alts {
                    let kind = self.expr(alt)?.kind(alt)?;
                    if kind != ExprKind::Alt {
                        return Err(StructuralError::UnexpectedExprKind {
                            index: alt.0,
                            expected: ExprKind::Alt.mnemonic(),
                            actual: kind.mnemonic(),
                        });
                    }
                }
            }
            ExprNode::Field { name, record } => {
                self.name(name)?;
                sub(record)?;
            }
        }
        Ok(())
    }
}

impl Interface {
    /// Verify the tables and every export's references.
    pub fn verify(&self) -> Result<(), StructuralError> {
        self.tables.verify()?;
        for export in &self.exports {
            self.tables.name(export.name)?;
            self.tables.sigma(export.sigma)?;
            if let Some(body) = export.inline {
                if body == ExprId::PLACEHOLDER {
                    return Err(StructuralError::UnexpectedExprKind {
                        index: body.0,
                        expected: "inline body",
                        actual: ExprKind::Placeholder.mnemonic(),
                    });
                }
                self.tables.expr(body)?;
            }
        }
        Ok(())
    }
}
