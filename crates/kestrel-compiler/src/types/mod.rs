//! Live type representation produced by inference.
//!
//! Nodes are immutable and shared through `Arc`. Equality is structural: two
//! separately built graphs with the same shape compare equal.
//!
//! The layering is the usual one for a higher-rank qualified type system:
//! - [`Tau`]: monomorphic types (application, constructor, variable)
//! - [`Kind`]: classifies types (`*`, `k1 -> k2`)
//! - [`Rho`]: a possibly-qualified, possibly-function type
//! - [`Sigma`]: quantified variables with their kinds, wrapping a Rho
//! - [`Context`]: a single class constraint `C t`

mod display;


use std::sync::Arc;

use kestrel_core::QName;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The ground kind `*`.
    Type,
    /// `arg -> res`
    App(Arc<Kind>, Arc<Kind>),
    /// Kind abstraction over a concrete type.
    Gen(Arc<Tau>),
    /// Unresolved inference variable. Must not reach the encoder.
    Var(u32),
}

impl Kind {
    pub fn ground() -> Arc<Self> {
        Arc::new(Self::Type)
    }

    pub fn app(arg: Arc<Kind>, res: Arc<Kind>) -> Arc<Self> {
        Arc::new(Self::App(arg, res))
    }

    pub fn gen_of(tau: Arc<Tau>) -> Arc<Self> {
        Arc::new(Self::Gen(tau))
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, Self::Type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tau {
    App(Arc<Tau>, Arc<Tau>),
    Con(QName),
    Var { name: String, kind: Arc<Kind> },
}

impl Tau {
    pub fn app(fun: Arc<Tau>, arg: Arc<Tau>) -> Arc<Self> {
        Arc::new(Self::App(fun, arg))
    }

    pub fn con(name: QName) -> Arc<Self> {
        Arc::new(Self::Con(name))
    }

    pub fn var(name: impl Into<String>, kind: Arc<Kind>) -> Arc<Self> {
        Arc::new(Self::Var {
            name: name.into(),
            kind,
        })
    }
}

/// `class tau`, e.g. `Eq a`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context {
    pub class: QName,
    pub tau: Arc<Tau>,
}

impl Context {
    pub fn new(class: QName, tau: Arc<Tau>) -> Self {
        Self { class, tau }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rho {
    /// `context => arg -> result`. The argument may itself be polymorphic.
    Fun {
        context: Vec<Context>,
        arg: Arc<Sigma>,
        result: Arc<Rho>,
    },
    /// `context => tau`
    Tau {
        context: Vec<Context>,
        tau: Arc<Tau>,
    },
}

impl Rho {
    pub fn fun(context: Vec<Context>, arg: Arc<Sigma>, result: Arc<Rho>) -> Arc<Self> {
        Arc::new(Self::Fun {
            context,
            arg,
            result,
        })
    }

    pub fn tau(context: Vec<Context>, tau: Arc<Tau>) -> Arc<Self> {
        Arc::new(Self::Tau { context, tau })
    }

    /// Constraints in source order.
    pub fn context(&self) -> &[Context] {
        match self {
            Self::Fun { context, .. } | Self::Tau { context, .. } => context,
        }
    }
}

/// `forall bound. rho`. Binder order is significant.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Sigma {
    pub bound: Vec<(String, Arc<Kind>)>,
    pub rho: Arc<Rho>,
}

impl Sigma {
    pub fn new(bound: Vec<(String, Arc<Kind>)>, rho: Arc<Rho>) -> Arc<Self> {
        Arc::new(Self { bound, rho })
    }

    /// A Sigma with no quantified variables.
    pub fn mono(rho: Arc<Rho>) -> Arc<Self> {
        Self::new(Vec::new(), rho)
    }

    pub fn is_mono(&self) -> bool {
        self.bound.is_empty()
    }
}
