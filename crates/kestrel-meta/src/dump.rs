//! Human-readable dump of interface tables for debugging and tests.
//!
//! Every record is printed on its own line, prefixed with its table letter and
//! index (`T3`, `R0`, `E12`, ...). Tags are decoded to mnemonics; tags outside
//! the known set print as `?tag` instead of failing, so a corrupt interface can
//! still be inspected.

use std::fmt::Write as _;

use kestrel_core::{Colors, NameKind};

use crate::ids::{ExprId, NameId};
use crate::records::{ExprRecord, NameRecord, RhoTail, TauRecord};
use crate::table_set::Interface;
use crate::tags::{ExprKind, LitKind, TauTag};

/// Generate a human-readable dump of an interface.
pub fn dump(interface: &Interface, colors: Colors) -> String {
    let ctx = DumpContext::new(interface, colors);
    let sections: [fn(&mut String, &DumpContext); 7] = [
        dump_taus,
        dump_rhos,
        dump_sigmas,
        dump_contexts,
        dump_exprs,
        dump_names,
        dump_exports,
    ];

    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        section(&mut out, &ctx);
    }
    out
}

fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

struct DumpContext<'a> {
    interface: &'a Interface,
    /// Width for tau indices (T#).
    tw: usize,
    /// Width for rho indices (R#).
    rw: usize,
    /// Width for sigma indices (S#).
    sw: usize,
    /// Width for context indices (C#).
    cw: usize,
    /// Width for expr indices (E#).
    ew: usize,
    /// Width for name indices (N#).
    nw: usize,
    colors: Colors,
}

impl<'a> DumpContext<'a> {
    fn new(interface: &'a Interface, colors: Colors) -> Self {
        let t = &interface.tables;
        Self {
            interface,
            tw: width_for_count(t.taus.len()),
            rw: width_for_count(t.rhos.len()),
            sw: width_for_count(t.sigmas.len()),
            cw: width_for_count(t.contexts.len()),
            ew: width_for_count(t.exprs.len()),
            nw: width_for_count(t.names.len()),
            colors,
        }
    }

    fn tau(&self, id: u32) -> String {
        format!("T{:0w$}", id, w = self.tw)
    }

    fn rho(&self, id: u32) -> String {
        format!("R{:0w$}", id, w = self.rw)
    }

    fn sigma(&self, id: u32) -> String {
        format!("S{:0w$}", id, w = self.sw)
    }

    fn context(&self, id: u32) -> String {
        format!("C{:0w$}", id, w = self.cw)
    }

    fn expr(&self, id: u32) -> String {
        format!("E{:0w$}", id, w = self.ew)
    }

    fn name(&self, id: u32) -> String {
        format!("N{:0w$}", id, w = self.nw)
    }

    fn unknown(&self, tag: u8) -> String {
        let c = &self.colors;
        format!("{}?{tag}{}", c.red, c.reset)
    }

    /// Trailing comment showing the qualified name behind a name index.
    fn name_comment(&self, id: NameId) -> String {
        let c = &self.colors;
        match self.interface.tables.names.get(id.index()) {
            Some(record) => format!("{}  ; {}{}", c.dim, qualified(record), c.reset),
            None => String::new(),
        }
    }
}

fn qualified(record: &NameRecord) -> String {
    let mut out = String::new();
    if !record.pack.is_empty() {
        out.push_str(&record.pack);
        out.push('.');
    }
    out.push_str(&record.base);
    if !record.member.is_empty() {
        out.push('.');
        out.push_str(&record.member);
    }
    out
}

fn dump_taus(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[taus]{}", c.blue, c.reset).unwrap();
    for (i, tau) in ctx.interface.tables.taus.iter().enumerate() {
        let line = format_tau(tau, ctx);
        writeln!(out, "{} = {line}", ctx.tau(i as u32)).unwrap();
    }
}

fn format_tau(tau: &TauRecord, ctx: &DumpContext) -> String {
    let c = &ctx.colors;
    let Some(tag) = TauTag::from_u8(tau.tag) else {
        return ctx.unknown(tau.tag);
    };
    let m = tag.mnemonic();
    match tag {
        TauTag::TypeApp | TauTag::KindApp => {
            format!("{m} {} {}", ctx.tau(tau.suba.0), ctx.tau(tau.subb.0))
        }
        TauTag::TypeCon => match tau.tcon {
            Some(name) => format!("{m} {}{}", ctx.name(name.0), ctx.name_comment(name)),
            None => format!("{m} {}-{}", c.dim, c.reset),
        },
        TauTag::TypeVar => format!(
            "{m} {}{:?}{} :: {}",
            c.green,
            tau.var,
            c.reset,
            ctx.tau(tau.suba.0)
        ),
        TauTag::KindType | TauTag::KindVar => m.to_string(),
        TauTag::KindGen => format!("{m} {}", ctx.tau(tau.suba.0)),
    }
}

fn dump_rhos(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[rhos]{}", c.blue, c.reset).unwrap();
    for (i, rho) in ctx.interface.tables.rhos.iter().enumerate() {
        let mut line = String::new();
        if !rho.cont.is_empty() {
            let cont: Vec<_> = rho.cont.iter().map(|id| ctx.context(id.0)).collect();
            write!(line, "{} => ", cont.join(", ")).unwrap();
        }
        match rho.tail() {
            RhoTail::Rho(result) => {
                write!(line, "{} -> {}", ctx.sigma(rho.sigma.0), ctx.rho(result.0)).unwrap()
            }
            RhoTail::Tau(tau) => line.push_str(&ctx.tau(tau.0)),
        }
        writeln!(out, "{} = {line}", ctx.rho(i as u32)).unwrap();
    }
}

fn dump_sigmas(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[sigmas]{}", c.blue, c.reset).unwrap();
    for (i, sigma) in ctx.interface.tables.sigmas.iter().enumerate() {
        let arity = sigma.bound.len().max(sigma.kinds.len());
        let binders: Vec<String> = (0..arity)
            .map(|j| {
                let label = match sigma.bound.get(j) {
                    Some(label) => label.clone(),
                    None => format!("{}?{}", c.red, c.reset),
                };
                let kind = match sigma.kinds.get(j) {
                    Some(kind) => ctx.tau(kind.0),
                    None => format!("{}?{}", c.red, c.reset),
                };
                format!("{label}:{kind}")
            })
            .collect();
        let rho = ctx.rho(sigma.rho.0);
        if binders.is_empty() {
            writeln!(out, "{} = {rho}", ctx.sigma(i as u32)).unwrap();
        } else {
            writeln!(
                out,
                "{} = forall {}. {rho}",
                ctx.sigma(i as u32),
                binders.join(" ")
            )
            .unwrap();
        }
    }
}

fn dump_contexts(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[contexts]{}", c.blue, c.reset).unwrap();
    for (i, context) in ctx.interface.tables.contexts.iter().enumerate() {
        writeln!(
            out,
            "{} = {} {}{}",
            ctx.context(i as u32),
            ctx.name(context.class.0),
            ctx.tau(context.tau.0),
            ctx.name_comment(context.class)
        )
        .unwrap();
    }
}

fn dump_exprs(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[exprs]{}", c.blue, c.reset).unwrap();
    for (i, expr) in ctx.interface.tables.exprs.iter().enumerate() {
        let line = format_expr(expr, ctx);
        writeln!(out, "{} = {line}", ctx.expr(i as u32)).unwrap();
    }
}

fn format_expr(expr: &ExprRecord, ctx: &DumpContext) -> String {
    let c = &ctx.colors;
    let Some(kind) = ExprKind::from_u8(expr.kind) else {
        return ctx.unknown(expr.kind);
    };
    let m = kind.mnemonic();
    let named = |name: Option<NameId>| match name {
        Some(name) => (ctx.name(name.0), ctx.name_comment(name)),
        None => (format!("{}-{}", c.dim, c.reset), String::new()),
    };
    let text = format!("{}{:?}{}", c.green, expr.text, c.reset);
    let e = |id: ExprId| ctx.expr(id.0);

    match kind {
        ExprKind::Placeholder => m.to_string(),
        ExprKind::Global | ExprKind::Con => {
            let (name, comment) = named(expr.name);
            format!("{m} {name}{comment}")
        }
        ExprKind::Local => format!("{m} {text}"),
        ExprKind::Lit => {
            let lit = match LitKind::from_u8(expr.lkind) {
                Some(lit) => lit.mnemonic().to_string(),
                None => ctx.unknown(expr.lkind),
            };
            format!("{m} {lit} {text}")
        }
        ExprKind::App | ExprKind::Lam | ExprKind::Alt => {
            format!("{m} {} {}", e(expr.subx1), e(expr.subx2))
        }
        ExprKind::Ifte => format!(
            "{m} {} {} {}",
            e(expr.subx1),
            e(expr.subx2),
            e(expr.subx3)
        ),
        ExprKind::Case => {
            let alts: Vec<_> = expr.alts.iter().map(|&a| e(a)).collect();
            format!("{m} {} [{}]", e(expr.subx1), alts.join(", "))
        }
        ExprKind::Field => {
            let (name, comment) = named(expr.name);
            format!("{m} {name} {}{comment}", e(expr.subx1))
        }
        ExprKind::Let => format!("{m} {text} {} {}", e(expr.subx1), e(expr.subx2)),
    }
}

fn dump_names(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[names]{}", c.blue, c.reset).unwrap();
    for (i, name) in ctx.interface.tables.names.iter().enumerate() {
        let kind = match NameKind::from_u8(name.kind) {
            Some(kind) => kind.mnemonic().to_string(),
            None => ctx.unknown(name.kind),
        };
        writeln!(
            out,
            "{} = {kind} {}{}{}",
            ctx.name(i as u32),
            c.green,
            qualified(name),
            c.reset
        )
        .unwrap();
    }
}

fn dump_exports(out: &mut String, ctx: &DumpContext) {
    let c = &ctx.colors;
    writeln!(out, "{}[exports]{}", c.blue, c.reset).unwrap();
    let xw = width_for_count(ctx.interface.exports.len());
    for (i, export) in ctx.interface.exports.iter().enumerate() {
        let mut line = format!(
            "{} :: {}",
            ctx.name(export.name.0),
            ctx.sigma(export.sigma.0)
        );
        if let Some(body) = export.inline {
            write!(line, " = {}", ctx.expr(body.0)).unwrap();
        }
        writeln!(
            out,
            "X{i:0xw$} = {line}{}",
            ctx.name_comment(export.name)
        )
        .unwrap();
    }
}
