//! Top-down decoder with per-call caches.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use kestrel_core::{NameKind, QName};
use kestrel_meta::{
    ContextId, ExprId, ExprKind, ExprNode, KindNode, NameId, RhoId, RhoTail, SigmaId,
    StructuralError, Table, TableSet, TauId, TypeNode,
};

use super::DecodeError;
use crate::expr::{Alt, Expr};
use crate::interface::CodecConfig;
use crate::types::{Context, Kind, Rho, Sigma, Tau};

/// Rebuilds live graphs from a [`TableSet`].
///
/// Repeated indices yield the same `Arc`, so a shared record decodes to a
/// shared node. Caches live as long as the decoder; create one per interface.
/// The table set is only read.
pub struct Decoder<'t> {
    tables: &'t TableSet,
    max_depth: usize,
    depth: usize,
    /// Records currently being decoded, for cycle detection.
    in_progress: HashSet<(Table, u32)>,
    kinds: HashMap<TauId, Arc<Kind>>,
    taus: HashMap<TauId, Arc<Tau>>,
    rhos: HashMap<RhoId, Arc<Rho>>,
    sigmas: HashMap<SigmaId, Arc<Sigma>>,
    contexts: HashMap<ContextId, Context>,
    exprs: HashMap<ExprId, Arc<Expr>>,
    alts: HashMap<ExprId, Alt>,
    names: HashMap<NameId, QName>,
}

impl<'t> Decoder<'t> {
    pub fn new(tables: &'t TableSet) -> Self {
        Self {
            tables,
            max_depth: CodecConfig::DEFAULT_MAX_DEPTH,
            depth: 0,
            in_progress: HashSet::new(),
            kinds: HashMap::new(),
            taus: HashMap::new(),
            rhos: HashMap::new(),
            sigmas: HashMap::new(),
            contexts: HashMap::new(),
            exprs: HashMap::new(),
            alts: HashMap::new(),
            names: HashMap::new(),
        }
    }

    /// Set the maximum nesting depth.
    ///
    /// The decoder recurses once per nested record; this bounds stack usage
    /// on adversarial input.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }

    /// Run `f` with `(table, index)` marked as in progress.
    fn guarded<T>(
        &mut self,
        table: Table,
        index: u32,
        f: impl FnOnce(&mut Self) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        if self.depth >= self.max_depth {
            return Err(DecodeError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }
        if !self.in_progress.insert((table, index)) {
            return Err(DecodeError::Cycle { table, index });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        self.in_progress.remove(&(table, index));
        result
    }

    pub fn name(&mut self, id: NameId) -> Result<QName, DecodeError> {
        if let Some(name) = self.names.get(&id) {
            return Ok(name.clone());
        }
        let name = self.tables.name(id)?.to_qname(id)?;
        self.names.insert(id, name.clone());
        Ok(name)
    }

    /// Decode the Tau record at `id` under the kind interpretation.
    pub fn kind(&mut self, id: TauId) -> Result<Arc<Kind>, DecodeError> {
        if let Some(kind) = self.kinds.get(&id) {
            return Ok(kind.clone());
        }
        let tables = self.tables;
        let kind = self.guarded(Table::Tau, id.0, |d| {
            let kind = match tables.tau(id)?.as_kind(id)? {
                KindNode::App { arg, res } => Kind::App(d.kind(arg)?, d.kind(res)?),
                KindNode::Type => Kind::Type,
                KindNode::Gen(tau) => Kind::Gen(d.tau(tau)?),
            };
            Ok(Arc::new(kind))
        })?;
        self.kinds.insert(id, kind.clone());
        Ok(kind)
    }

    /// Decode the Tau record at `id` under the type interpretation.
    pub fn tau(&mut self, id: TauId) -> Result<Arc<Tau>, DecodeError> {
        if let Some(tau) = self.taus.get(&id) {
            return Ok(tau.clone());
        }
        let tables = self.tables;
        let tau = self.guarded(Table::Tau, id.0, |d| {
            let tau = match tables.tau(id)?.as_type(id)? {
                TypeNode::App { fun, arg } => Tau::App(d.tau(fun)?, d.tau(arg)?),
                TypeNode::Con(name) => Tau::Con(d.name(name)?),
                TypeNode::Var { label, kind } => Tau::Var {
                    name: label.to_owned(),
                    kind: d.kind(kind)?,
                },
            };
            Ok(Arc::new(tau))
        })?;
        self.taus.insert(id, tau.clone());
        Ok(tau)
    }

    pub fn context(&mut self, id: ContextId) -> Result<Context, DecodeError> {
        if let Some(context) = self.contexts.get(&id) {
            return Ok(context.clone());
        }
        let tables = self.tables;
        let context = self.guarded(Table::Context, id.0, |d| {
            let record = tables.context(id)?;
            let class = d.name(record.class)?;
            if class.kind != NameKind::Class {
                return Err(StructuralError::InvalidName {
                    index: record.class.0,
                }
                .into());
            }
            Ok(Context::new(class, d.tau(record.tau)?))
        })?;
        self.contexts.insert(id, context.clone());
        Ok(context)
    }

    pub fn rho(&mut self, id: RhoId) -> Result<Arc<Rho>, DecodeError> {
        if let Some(rho) = self.rhos.get(&id) {
            return Ok(rho.clone());
        }
        let tables = self.tables;
        let rho = self.guarded(Table::Rho, id.0, |d| {
            let record = tables.rho(id)?;
            let context = record
                .cont
                .iter()
                .map(|&c| d.context(c))
                .collect::<Result<Vec<_>, _>>()?;
            let rho = match record.tail() {
                RhoTail::Rho(result) => Rho::Fun {
                    context,
                    arg: d.sigma(record.sigma)?,
                    result: d.rho(result)?,
                },
                RhoTail::Tau(tau) => Rho::Tau {
                    context,
                    tau: d.tau(tau)?,
                },
            };
            Ok(Arc::new(rho))
        })?;
        self.rhos.insert(id, rho.clone());
        Ok(rho)
    }

    pub fn sigma(&mut self, id: SigmaId) -> Result<Arc<Sigma>, DecodeError> {
        if let Some(sigma) = self.sigmas.get(&id) {
            return Ok(sigma.clone());
        }
        let tables = self.tables;
        let sigma = self.guarded(Table::Sigma, id.0, |d| {
            let record = tables.sigma(id)?;
            record.check_arity(id)?;
            let bound = record
                .bound
                .iter()
                .zip(&record.kinds)
                .map(|(label, &kind)| Ok((label.clone(), d.kind(kind)?)))
                .collect::<Result<Vec<_>, DecodeError>>()?;
            Ok(Arc::new(Sigma {
                bound,
                rho: d.rho(record.rho)?,
            }))
        })?;
        self.sigmas.insert(id, sigma.clone());
        Ok(sigma)
    }

    /// Decode an expression. Index 0 decodes to [`Expr::Placeholder`].
    pub fn expr(&mut self, id: ExprId) -> Result<Arc<Expr>, DecodeError> {
        if let Some(expr) = self.exprs.get(&id) {
            return Ok(expr.clone());
        }
        let tables = self.tables;
        let expr = self.guarded(Table::Expr, id.0, |d| {
            let expr = match tables.expr(id)?.classify(id)? {
                ExprNode::Placeholder => Expr::Placeholder,
                ExprNode::Global(name) => Expr::Global(d.name(name)?),
                ExprNode::Con(name) => Expr::Con(d.name(name)?),
                ExprNode::Local(label) => Expr::Local(label.to_owned()),
                ExprNode::Lit { kind, text } => Expr::Lit {
                    kind,
                    text: text.to_owned(),
                },
                ExprNode::App { fun, arg } => Expr::App(d.expr(fun)?, d.expr(arg)?),
                ExprNode::Lam { pat, body } => Expr::Lam {
                    pat: d.expr(pat)?,
                    body: d.expr(body)?,
                },
                ExprNode::Ifte { cond, then, els } => Expr::Ifte {
                    cond: d.expr(cond)?,
                    then: d.expr(then)?,
                    els: d.expr(els)?,
                },
                ExprNode::Case { scrutinee, alts } => Expr::Case {
                    scrutinee: d.expr(scrutinee)?,
                    alts: alts
                        .iter()
                        .map(|&alt| d.alt(alt))
                        .collect::<Result<Vec<_>, _>>()?,
                },
                ExprNode::Alt { .. } => {
                    return Err(StructuralError::UnexpectedExprKind {
                        index: id.0,
                        expected: "expression",
                        actual: ExprKind::Alt.mnemonic(),
                    }
                    .into());
                }
                ExprNode::Field { name, record } => Expr::Field {
                    name: d.name(name)?,
                    record: d.expr(record)?,
                },
                ExprNode::Let { label, value, body } => Expr::Let {
                    label: label.to_owned(),
                    value: d.expr(value)?,
                    body: d.expr(body)?,
                },
            };
            Ok(Arc::new(expr))
        })?;
        self.exprs.insert(id, expr.clone());
        Ok(expr)
    }

    fn alt(&mut self, id: ExprId) -> Result<Alt, DecodeError> {
        if let Some(alt) = self.alts.get(&id) {
            return Ok(alt.clone());
        }
        let tables = self.tables;
        let alt = self.guarded(Table::Expr, id.0, |d| {
            let record = tables.expr(id)?;
            match record.classify(id)? {
                ExprNode::Alt { pat, body } => Ok(Alt {
                    pat: d.expr(pat)?,
                    body: d.expr(body)?,
                }),
                _ => Err(StructuralError::UnexpectedExprKind {
                    index: id.0,
                    expected: ExprKind::Alt.mnemonic(),
                    actual: record.kind(id)?.mnemonic(),
                }
                .into()),
            }
        })?;
        self.alts.insert(id, alt.clone());
        Ok(alt)
    }
}
