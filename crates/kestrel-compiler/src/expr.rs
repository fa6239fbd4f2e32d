//! Live inlinable expression bodies.

use std::fmt;
use std::sync::Arc;

use kestrel_core::QName;
use kestrel_meta::LitKind;

/// Expression fragment of an inlinable function body.
///
/// Sub-expressions are shared through `Arc`; the same allocation may occur at
/// several places in a body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Absent sub-expression, e.g. a wildcard pattern.
    Placeholder,
    Global(QName),
    Con(QName),
    Local(String),
    Lit {
        kind: LitKind,
        text: String,
    },
    App(Arc<Expr>, Arc<Expr>),
    Lam {
        pat: Arc<Expr>,
        body: Arc<Expr>,
    },
    Ifte {
        cond: Arc<Expr>,
        then: Arc<Expr>,
        els: Arc<Expr>,
    },
    /// Alternatives are tried in order; the first match wins.
    Case {
        scrutinee: Arc<Expr>,
        alts: Vec<Alt>,
    },
    Field {
        name: QName,
        record: Arc<Expr>,
    },
    Let {
        label: String,
        value: Arc<Expr>,
        body: Arc<Expr>,
    },
}

/// One `pat -> body` alternative of a case expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Alt {
    pub pat: Arc<Expr>,
    pub body: Arc<Expr>,
}

impl Expr {
    fn is_atom(&self) -> bool {
        matches!(
            self,
            Expr::Placeholder | Expr::Global(_) | Expr::Con(_) | Expr::Local(_) | Expr::Lit { .. }
        )
    }

    fn fmt_atom(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_atom() {
            write!(f, "{self}")
        } else {
            write!(f, "({self})")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Placeholder => f.write_str("_"),
            Expr::Global(name) | Expr::Con(name) => f.write_str(name.short()),
            Expr::Local(label) => f.write_str(label),
            Expr::Lit { kind, text } => match kind {
                LitKind::String => write!(f, "{text:?}"),
                LitKind::Char => write!(f, "'{text}'"),
                _ => f.write_str(text),
            },
            Expr::App(fun, arg) => {
                if matches!(**fun, Expr::App(..)) {
                    write!(f, "{fun} ")?;
                } else {
                    fun.fmt_atom(f)?;
                    f.write_str(" ")?;
                }
                arg.fmt_atom(f)
            }
            Expr::Lam { pat, body } => {
                f.write_str("\\")?;
                pat.fmt_atom(f)?;
                write!(f, " -> {body}")
            }
            Expr::Ifte { cond, then, els } => write!(f, "if {cond} then {then} else {els}"),
            Expr::Case { scrutinee, alts } => {
                write!(f, "case {scrutinee} of {{")?;
                for (i, alt) in alts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(";")?;
                    }
                    write!(f, " {} -> {}", alt.pat, alt.body)?;
                }
                f.write_str(" }")
            }
            Expr::Field { name, record } => {
                record.fmt_atom(f)?;
                write!(f, ".{}", name.short())
            }
            Expr::Let { label, value, body } => write!(f, "let {label} = {value} in {body}"),
        }
    }
}
