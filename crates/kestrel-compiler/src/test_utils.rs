//! Builders for live graphs used across the crate's tests.

use std::sync::Arc;

use kestrel_core::QName;
use kestrel_meta::LitKind;

use crate::{Alt, Context, Export, Expr, Kind, ModuleInterface, Rho, Sigma, Tau};

pub const PRELUDE: &str = "kestrel.Prelude";

pub fn star() -> Arc<Kind> {
    Kind::ground()
}

/// `* -> *`
pub fn star_to_star() -> Arc<Kind> {
    Kind::app(star(), star())
}

pub fn tvar(name: &str) -> Arc<Tau> {
    Tau::var(name, star())
}

pub fn tcon(name: &str) -> Arc<Tau> {
    Tau::con(QName::ty(PRELUDE, name))
}

pub fn tapp(fun: Arc<Tau>, args: &[Arc<Tau>]) -> Arc<Tau> {
    args.iter()
        .fold(fun, |acc, arg| Tau::app(acc, arg.clone()))
}

pub fn mono(tau: Arc<Tau>) -> Arc<Sigma> {
    Sigma::mono(Rho::tau(vec![], tau))
}

/// `a -> b` between monotypes.
pub fn arrow(arg: Arc<Tau>, result: Arc<Tau>) -> Arc<Rho> {
    Rho::fun(vec![], mono(arg), Rho::tau(vec![], result))
}

pub fn class(name: &str, tau: Arc<Tau>) -> Context {
    Context::new(QName::class(PRELUDE, name), tau)
}

/// `∀a. a -> a`
pub fn identity_sigma() -> Arc<Sigma> {
    Sigma::new(vec![("a".into(), star())], arrow(tvar("a"), tvar("a")))
}

pub fn local(name: &str) -> Arc<Expr> {
    Arc::new(Expr::Local(name.into()))
}

pub fn global(name: &str) -> Arc<Expr> {
    Arc::new(Expr::Global(QName::value(PRELUDE, name)))
}

pub fn int(text: &str) -> Arc<Expr> {
    Arc::new(Expr::Lit {
        kind: LitKind::Int,
        text: text.into(),
    })
}

pub fn app(fun: Arc<Expr>, arg: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::App(fun, arg))
}

pub fn lam(pat: Arc<Expr>, body: Arc<Expr>) -> Arc<Expr> {
    Arc::new(Expr::Lam { pat, body })
}

pub fn alt(pat: Arc<Expr>, body: Arc<Expr>) -> Alt {
    Alt { pat, body }
}

/// `id :: ∀a. a -> a` with body `\x -> x`.
pub fn identity_module() -> ModuleInterface {
    ModuleInterface {
        exports: vec![Export {
            name: QName::value(PRELUDE, "id"),
            sigma: identity_sigma(),
            inline: Some(lam(local("x"), local("x"))),
        }],
    }
}
