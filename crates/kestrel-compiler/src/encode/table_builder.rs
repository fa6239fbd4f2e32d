//! Interning table builder.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexSet;
use kestrel_core::{NameKind, QName};
use kestrel_meta::{
    ContextId, ContextRecord, ExprId, ExprRecord, NameId, NameRecord, RhoId, RhoRecord, SigmaId,
    SigmaRecord, Table, TableSet, TauId, TauRecord,
};

use super::EncodeError;
use crate::expr::{Alt, Expr};
use crate::types::{Context, Kind, Rho, Sigma, Tau};

/// One table under construction. Insertion order is output order.
#[derive(Debug)]
struct Interned<R> {
    table: Table,
    records: IndexSet<R>,
}

impl<R: Eq + Hash> Interned<R> {
    fn new(table: Table) -> Self {
        Self {
            table,
            records: IndexSet::new(),
        }
    }

    /// Index of `record`, appending it if no equal record exists yet.
    fn intern(&mut self, record: R) -> Result<u32, EncodeError> {
        let (index, inserted) = self.records.insert_full(record);
        if !inserted {
            tracing::trace!(table = %self.table, index, "reused interned record");
        }
        u32::try_from(index).map_err(|_| EncodeError::TableOverflow(self.table))
    }

    fn into_vec(self) -> Vec<R> {
        self.records.into_iter().collect()
    }
}

/// Identity memo: a shared allocation is walked once. Holding the `Arc`
/// keeps the address from being reused while the builder lives.
#[derive(Debug)]
struct Memo<T, I> {
    seen: HashMap<*const T, (Arc<T>, I)>,
}

impl<T, I: Copy> Memo<T, I> {
    fn new() -> Self {
        Self {
            seen: HashMap::new(),
        }
    }

    fn get(&self, node: &Arc<T>) -> Option<I> {
        self.seen.get(&Arc::as_ptr(node)).map(|&(_, id)| id)
    }

    fn insert(&mut self, node: &Arc<T>, id: I) {
        self.seen.insert(Arc::as_ptr(node), (node.clone(), id));
    }
}

/// Builds a [`TableSet`] from live graphs.
///
/// Several roots may be encoded into one builder; they share records. Each
/// method returns the index of the root it was given. Call
/// [`finish`](Self::finish) to obtain the tables.
///
/// Only graphs the decoder accepts are encoded: malformed names, non-class
/// constraints and unresolved kind variables fail with an [`EncodeError`].
#[derive(Debug)]
pub struct TableBuilder {
    taus: Interned<TauRecord>,
    rhos: Interned<RhoRecord>,
    sigmas: Interned<SigmaRecord>,
    contexts: Interned<ContextRecord>,
    exprs: Interned<ExprRecord>,
    names: Interned<NameRecord>,
    kind_memo: Memo<Kind, TauId>,
    tau_memo: Memo<Tau, TauId>,
    rho_memo: Memo<Rho, RhoId>,
    sigma_memo: Memo<Sigma, SigmaId>,
    expr_memo: Memo<Expr, ExprId>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut exprs = Interned::new(Table::Expr);
        // index 0 is the placeholder that unused sub-expression slots point at
        exprs.records.insert(ExprRecord::DEFAULT);
        Self {
            taus: Interned::new(Table::Tau),
            rhos: Interned::new(Table::Rho),
            sigmas: Interned::new(Table::Sigma),
            contexts: Interned::new(Table::Context),
            exprs,
            names: Interned::new(Table::Name),
            kind_memo: Memo::new(),
            tau_memo: Memo::new(),
            rho_memo: Memo::new(),
            sigma_memo: Memo::new(),
            expr_memo: Memo::new(),
        }
    }

    pub fn name(&mut self, name: &QName) -> Result<NameId, EncodeError> {
        if !name.is_well_formed() {
            return Err(EncodeError::InvalidName(name.clone()));
        }
        self.names.intern(NameRecord::from_qname(name)).map(NameId)
    }

    pub fn kind(&mut self, kind: &Arc<Kind>) -> Result<TauId, EncodeError> {
        if let Some(id) = self.kind_memo.get(kind) {
            return Ok(id);
        }
        let record = match &**kind {
            Kind::Type => TauRecord::kind_type(),
            Kind::App(arg, res) => {
                let arg = self.kind(arg)?;
                let res = self.kind(res)?;
                TauRecord::kind_app(arg, res)
            }
            Kind::Gen(tau) => TauRecord::kind_gen(self.tau(tau)?),
            Kind::Var(var) => return Err(EncodeError::UnresolvedKindVariable(*var)),
        };
        let id = TauId(self.taus.intern(record)?);
        self.kind_memo.insert(kind, id);
        Ok(id)
    }

    pub fn tau(&mut self, tau: &Arc<Tau>) -> Result<TauId, EncodeError> {
        if let Some(id) = self.tau_memo.get(tau) {
            return Ok(id);
        }
        let record = match &**tau {
            Tau::App(fun, arg) => {
                let fun = self.tau(fun)?;
                let arg = self.tau(arg)?;
                TauRecord::app(fun, arg)
            }
            Tau::Con(name) => TauRecord::con(self.name(name)?),
            Tau::Var { name, kind } => TauRecord::var(name.as_str(), self.kind(kind)?),
        };
        let id = TauId(self.taus.intern(record)?);
        self.tau_memo.insert(tau, id);
        Ok(id)
    }

    pub fn context(&mut self, context: &Context) -> Result<ContextId, EncodeError> {
        if context.class.kind != NameKind::Class {
            return Err(EncodeError::NotAClass(context.class.clone()));
        }
        let class = self.name(&context.class)?;
        let tau = self.tau(&context.tau)?;
        self.contexts
            .intern(ContextRecord::new(class, tau))
            .map(ContextId)
    }

    pub fn rho(&mut self, rho: &Arc<Rho>) -> Result<RhoId, EncodeError> {
        if let Some(id) = self.rho_memo.get(rho) {
            return Ok(id);
        }
        let cont = rho
            .context()
            .iter()
            .map(|c| self.context(c))
            .collect::<Result<Vec<_>, _>>()?;
        let record = match &**rho {
            Rho::Fun { arg, result, .. } => {
                let arg = self.sigma(arg)?;
                let result = self.rho(result)?;
                RhoRecord::fun(cont, arg, result)
            }
            Rho::Tau { tau, .. } => RhoRecord::tau(cont, self.tau(tau)?),
        };
        let id = RhoId(self.rhos.intern(record)?);
        self.rho_memo.insert(rho, id);
        Ok(id)
    }

    pub fn sigma(&mut self, sigma: &Arc<Sigma>) -> Result<SigmaId, EncodeError> {
        if let Some(id) = self.sigma_memo.get(sigma) {
            return Ok(id);
        }
        let mut bound = Vec::with_capacity(sigma.bound.len());
        let mut kinds = Vec::with_capacity(sigma.bound.len());
        for (label, kind) in &sigma.bound {
            bound.push(label.clone());
            kinds.push(self.kind(kind)?);
        }
        let rho = self.rho(&sigma.rho)?;
        let id = SigmaId(self.sigmas.intern(SigmaRecord::new(bound, kinds, rho))?);
        self.sigma_memo.insert(sigma, id);
        Ok(id)
    }

    pub fn expr(&mut self, expr: &Arc<Expr>) -> Result<ExprId, EncodeError> {
        if let Some(id) = self.expr_memo.get(expr) {
            return Ok(id);
        }
        let record = match &**expr {
            Expr::Placeholder => return Ok(ExprId::PLACEHOLDER),
            Expr::Global(name) => ExprRecord::global(self.name(name)?),
            Expr::Con(name) => ExprRecord::con(self.name(name)?),
            Expr::Local(label) => ExprRecord::local(label.as_str()),
            Expr::Lit { kind, text } => ExprRecord::lit(*kind, text.as_str()),
            Expr::App(fun, arg) => {
                let fun = self.expr(fun)?;
                let arg = self.expr(arg)?;
                ExprRecord::app(fun, arg)
            }
            Expr::Lam { pat, body } => {
                let pat = self.expr(pat)?;
                let body = self.expr(body)?;
                ExprRecord::lam(pat, body)
            }
            Expr::Ifte { cond, then, els } => {
                let cond = self.expr(cond)?;
                let then = self.expr(then)?;
                let els = self.expr(els)?;
                ExprRecord::ifte(cond, then, els)
            }
            Expr::Case { scrutinee, alts } => {
                let scrutinee = self.expr(scrutinee)?;
                let alts = alts
                    .iter()
                    .map(|alt| self.alt(alt))
                    .collect::<Result<Vec<_>, _>>()?;
                ExprRecord::case(scrutinee, alts)
            }
            Expr::Field { name, record } => {
                let name = self.name(name)?;
                let record = self.expr(record)?;
                ExprRecord::field(name, record)
            }
            Expr::Let { label, value, body } => {
                let value = self.expr(value)?;
                let body = self.expr(body)?;
                ExprRecord::let_in(label.as_str(), value, body)
            }
        };
        let id = ExprId(self.exprs.intern(record)?);
        self.expr_memo.insert(expr, id);
        Ok(id)
    }

    fn alt(&mut self, alt: &Alt) -> Result<ExprId, EncodeError> {
        let pat = self.expr(&alt.pat)?;
        let body = self.expr(&alt.body)?;
        self.exprs.intern(ExprRecord::alt(pat, body)).map(ExprId)
    }

    /// Consume the builder, yielding the tables in first-seen order.
    pub fn finish(self) -> TableSet {
        TableSet {
            taus: self.taus.into_vec(),
            rhos: self.rhos.into_vec(),
            sigmas: self.sigmas.into_vec(),
            contexts: self.contexts.into_vec(),
            exprs: self.exprs.into_vec(),
            names: self.names.into_vec(),
        }
    }
}
