//! Source-like rendering of live types, used by the CLI and in tests.
//!
//! `∀a. a -> a`, `∀(f :: * -> *) a. Functor f => f a -> f a`.

use std::fmt;

use super::{Context, Kind, Rho, Sigma, Tau};

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Type => f.write_str("*"),
            Kind::App(arg, res) => {
                if matches!(**arg, Kind::App(..)) {
                    write!(f, "({arg}) -> {res}")
                } else {
                    write!(f, "{arg} -> {res}")
                }
            }
            Kind::Gen(tau) => write!(f, "gen({tau})"),
            Kind::Var(n) => write!(f, "?k{n}"),
        }
    }
}

impl Tau {
    fn fmt_atom(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self, Tau::App(..)) {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Tau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tau::Con(name) => f.write_str(name.short()),
            Tau::Var { name, .. } => f.write_str(name),
            Tau::App(fun, arg) => {
                // application is left-nested: print the spine flat
                write!(f, "{fun} ")?;
                arg.fmt_atom(f)
            }
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.class.short())?;
        self.tau.fmt_atom(f)
    }
}

fn fmt_context(context: &[Context], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match context {
        [] => Ok(()),
        [single] => write!(f, "{single} => "),
        many => {
            f.write_str("(")?;
            for (i, c) in many.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{c}")?;
            }
            f.write_str(") => ")
        }
    }
}

impl fmt::Display for Rho {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_context(self.context(), f)?;
        match self {
            Rho::Tau { tau, .. } => write!(f, "{tau}"),
            Rho::Fun { arg, result, .. } => {
                let wrap_arg = !arg.is_mono()
                    || !arg.rho.context().is_empty()
                    || matches!(*arg.rho, Rho::Fun { .. });
                if wrap_arg {
                    write!(f, "({arg}) -> ")?;
                } else {
                    write!(f, "{arg} -> ")?;
                }
                if result.context().is_empty() {
                    write!(f, "{result}")
                } else {
                    write!(f, "({result})")
                }
            }
        }
    }
}

impl fmt::Display for Sigma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bound.is_empty() {
            return write!(f, "{}", self.rho);
        }
        f.write_str("∀")?;
        for (i, (name, kind)) in self.bound.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if kind.is_ground() {
                f.write_str(name)?;
            } else {
                write!(f, "({name} :: {kind})")?;
            }
        }
        write!(f, ". {}", self.rho)
    }
}
