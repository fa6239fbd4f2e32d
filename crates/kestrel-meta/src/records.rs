//! Record layout of the interface tables.
//!
//! Records reference each other only through table indices. Every record kind
//! derives `Eq + Hash + Ord`, so tables can be interned by structural content.
//!
//! Tags and kinds are stored as raw bytes: a record read from an untrusted
//! interface may hold any value, and the typed views ([`TauRecord::as_type`],
//! [`TauRecord::as_kind`], [`ExprRecord::classify`]) are where they get checked.

use kestrel_core::{NameKind, QName};
use serde::{Deserialize, Serialize};

use crate::error::StructuralError;
use crate::ids::{ContextId, ExprId, NameId, RhoId, SigmaId, Table, TauId};
use crate::tags::{ExprKind, LitKind, TagRange, TauTag};

/// Type or kind node.
///
/// Semantics of the fields depend on `tag`:
/// - `TypeApp`: `suba` = function type, `subb` = argument type
/// - `TypeCon`: `tcon` = constructor name
/// - `TypeVar`: `var` = label, `suba` = the variable's kind
/// - `KindApp`: `suba` -> `subb`
/// - `KindType`: no payload
/// - `KindGen`: `suba` = a type node
///
/// Unused fields hold `TauId(0)`, `None` and `""`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TauRecord {
    pub tag: u8,
    pub suba: TauId,
    pub subb: TauId,
    pub tcon: Option<NameId>,
    pub var: String,
}

/// Typed view of a Tau record read as a type node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeNode<'a> {
    App { fun: TauId, arg: TauId },
    Con(NameId),
    Var { label: &'a str, kind: TauId },
}

/// Typed view of a Tau record read as a kind node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindNode {
    /// `arg -> res`
    App { arg: TauId, res: TauId },
    Type,
    Gen(TauId),
}

impl TauRecord {
    fn bare(tag: TauTag) -> Self {
        Self {
            tag: tag as u8,
            suba: TauId(0),
            subb: TauId(0),
            tcon: None,
            var: String::new(),
        }
    }

    pub fn app(fun: TauId, arg: TauId) -> Self {
        Self {
            suba: fun,
            subb: arg,
            ..Self::bare(TauTag::TypeApp)
        }
    }

    pub fn con(name: NameId) -> Self {
        Self {
            tcon: Some(name),
            ..Self::bare(TauTag::TypeCon)
        }
    }

    pub fn var(label: impl Into<String>, kind: TauId) -> Self {
        Self {
            suba: kind,
            var: label.into(),
            ..Self::bare(TauTag::TypeVar)
        }
    }

    pub fn kind_app(arg: TauId, res: TauId) -> Self {
        Self {
            suba: arg,
            subb: res,
            ..Self::bare(TauTag::KindApp)
        }
    }

    pub fn kind_type() -> Self {
        Self::bare(TauTag::KindType)
    }

    pub fn kind_gen(tau: TauId) -> Self {
        Self {
            suba: tau,
            ..Self::bare(TauTag::KindGen)
        }
    }

    /// Decode the tag, failing on values outside the enumeration.
    pub fn tag(&self, at: TauId) -> Result<TauTag, StructuralError> {
        TauTag::from_u8(self.tag).ok_or(StructuralError::UnknownTag {
            table: Table::Tau,
            index: at.0,
            tag: self.tag,
        })
    }

    /// Interpret this record as a type node.
    ///
    /// `at` is the record's own index, used for error reporting.
    pub fn as_type(&self, at: TauId) -> Result<TypeNode<'_>, StructuralError> {
        match self.tag(at)? {
            TauTag::TypeApp => Ok(TypeNode::App {
                fun: self.suba,
                arg: self.subb,
            }),
            TauTag::TypeCon => match self.tcon {
                Some(name) => Ok(TypeNode::Con(name)),
                None => Err(StructuralError::MissingName {
                    table: Table::Tau,
                    index: at.0,
                }),
            },
            TauTag::TypeVar => Ok(TypeNode::Var {
                label: &self.var,
                kind: self.suba,
            }),
            TauTag::KindApp | TauTag::KindType | TauTag::KindVar | TauTag::KindGen => {
                Err(StructuralError::TagContextMismatch {
                    index: at.0,
                    tag: self.tag,
                    expected: TagRange::Type,
                })
            }
        }
    }

    /// Interpret this record as a kind node.
    pub fn as_kind(&self, at: TauId) -> Result<KindNode, StructuralError> {
        match self.tag(at)? {
            TauTag::KindApp => Ok(KindNode::App {
                arg: self.suba,
                res: self.subb,
            }),
            TauTag::KindType => Ok(KindNode::Type),
            TauTag::KindGen => Ok(KindNode::Gen(self.suba)),
            TauTag::KindVar => Err(StructuralError::UnresolvedKindVariable { index: at.0 }),
            TauTag::TypeApp | TauTag::TypeCon | TauTag::TypeVar => {
                Err(StructuralError::TagContextMismatch {
                    index: at.0,
                    tag: self.tag,
                    expected: TagRange::Kind,
                })
            }
        }
    }
}

/// Possibly qualified, possibly function type.
///
/// With `rhofun` set, `sigma` is the argument type and `rhotau` indexes the Rho
/// table (the result). Otherwise `sigma` is `SigmaId(0)` and `rhotau` indexes
/// the Tau table. Use [`RhoRecord::tail`] instead of reading `rhotau` directly.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RhoRecord {
    pub rhofun: bool,
    /// Constraints in source order.
    pub cont: Vec<ContextId>,
    pub sigma: SigmaId,
    pub rhotau: u32,
}

/// Typed view of [`RhoRecord::rhotau`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RhoTail {
    /// Function result.
    Rho(RhoId),
    /// Monomorphic tail.
    Tau(TauId),
}

impl RhoRecord {
    pub fn fun(cont: Vec<ContextId>, arg: SigmaId, result: RhoId) -> Self {
        Self {
            rhofun: true,
            cont,
            sigma: arg,
            rhotau: result.0,
        }
    }

    pub fn tau(cont: Vec<ContextId>, tau: TauId) -> Self {
        Self {
            rhofun: false,
            cont,
            sigma: SigmaId(0),
            rhotau: tau.0,
        }
    }

    pub fn tail(&self) -> RhoTail {
        if self.rhofun {
            RhoTail::Rho(RhoId(self.rhotau))
        } else {
            RhoTail::Tau(TauId(self.rhotau))
        }
    }
}

/// Quantified type. `bound` and `kinds` are parallel and in binder order.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SigmaRecord {
    pub bound: Vec<String>,
    pub kinds: Vec<TauId>,
    pub rho: RhoId,
}

impl SigmaRecord {
    pub fn new(bound: Vec<String>, kinds: Vec<TauId>, rho: RhoId) -> Self {
        Self { bound, kinds, rho }
    }

    /// Check the parallel-list invariant.
    pub fn check_arity(&self, at: SigmaId) -> Result<(), StructuralError> {
        if self.bound.len() == self.kinds.len() {
            Ok(())
        } else {
            Err(StructuralError::BoundKindsMismatch {
                index: at.0,
                bound: self.bound.len(),
                kinds: self.kinds.len(),
            })
        }
    }
}

/// "`tau` is an instance of class `class`".
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContextRecord {
    pub class: NameId,
    pub tau: TauId,
}

impl ContextRecord {
    pub fn new(class: NameId, tau: TauId) -> Self {
        Self { class, tau }
    }
}

/// Fragment of an inlinable function body.
///
/// See [`ExprKind`] for the meaning of each field per kind. Unused
/// sub-expression slots point at [`ExprId::PLACEHOLDER`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExprRecord {
    pub kind: u8,
    pub name: Option<NameId>,
    pub lkind: u8,
    pub text: String,
    /// Case alternatives in source order. First match wins.
    pub alts: Vec<ExprId>,
    pub subx1: ExprId,
    pub subx2: ExprId,
    pub subx3: ExprId,
}

/// Typed view of an Expr record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprNode<'a> {
    Placeholder,
    Global(NameId),
    Con(NameId),
    Local(&'a str),
    Lit { kind: LitKind, text: &'a str },
    App { fun: ExprId, arg: ExprId },
    Lam { pat: ExprId, body: ExprId },
    Ifte { cond: ExprId, then: ExprId, els: ExprId },
    Case { scrutinee: ExprId, alts: &'a [ExprId] },
    Alt { pat: ExprId, body: ExprId },
    Field { name: NameId, record: ExprId },
    Let { label: &'a str, value: ExprId, body: ExprId },
}

impl ExprRecord {
    /// The canonical placeholder record, stored at expression index 0.
    pub const DEFAULT: Self = Self {
        kind: ExprKind::Placeholder as u8,
        name: None,
        lkind: LitKind::NONE,
        text: String::new(),
        alts: Vec::new(),
        subx1: ExprId::PLACEHOLDER,
        subx2: ExprId::PLACEHOLDER,
        subx3: ExprId::PLACEHOLDER,
    };

    fn bare(kind: ExprKind) -> Self {
        Self {
            kind: kind as u8,
            ..Self::DEFAULT
        }
    }

    pub fn global(name: NameId) -> Self {
        Self {
            name: Some(name),
            ..Self::bare(ExprKind::Global)
        }
    }

    pub fn con(name: NameId) -> Self {
        Self {
            name: Some(name),
            ..Self::bare(ExprKind::Con)
        }
    }

    pub fn local(label: impl Into<String>) -> Self {
        Self {
            text: label.into(),
            ..Self::bare(ExprKind::Local)
        }
    }

    pub fn lit(kind: LitKind, text: impl Into<String>) -> Self {
        Self {
            lkind: kind as u8,
            text: text.into(),
            ..Self::bare(ExprKind::Lit)
        }
    }

    pub fn app(fun: ExprId, arg: ExprId) -> Self {
        Self {
            subx1: fun,
            subx2: arg,
            ..Self::bare(ExprKind::App)
        }
    }

    pub fn lam(pat: ExprId, body: ExprId) -> Self {
        Self {
            subx1: pat,
            subx2: body,
            ..Self::bare(ExprKind::Lam)
        }
    }

    pub fn ifte(cond: ExprId, then: ExprId, els: ExprId) -> Self {
        Self {
            subx1: cond,
            subx2: then,
            subx3: els,
            ..Self::bare(ExprKind::Ifte)
        }
    }

    pub fn case(scrutinee: ExprId, alts: Vec<ExprId>) -> Self {
        Self {
            subx1: scrutinee,
            alts,
            ..Self::bare(ExprKind::Case)
        }
    }

    pub fn alt(pat: ExprId, body: ExprId) -> Self {
        Self {
            subx1: pat,
            subx2: body,
            ..Self::bare(ExprKind::Alt)
        }
    }

    pub fn field(name: NameId, record: ExprId) -> Self {
        Self {
            name: Some(name),
            subx1: record,
            ..Self::bare(ExprKind::Field)
        }
    }

    pub fn let_in(label: impl Into<String>, value: ExprId, body: ExprId) -> Self {
        Self {
            text: label.into(),
            subx1: value,
            subx2: body,
            ..Self::bare(ExprKind::Let)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::DEFAULT
    }

    /// Decode the kind, failing on values outside the enumeration.
    pub fn kind(&self, at: ExprId) -> Result<ExprKind, StructuralError> {
        ExprKind::from_u8(self.kind).ok_or(StructuralError::UnknownTag {
            table: Table::Expr,
            index: at.0,
            tag: self.kind,
        })
    }

    /// Classify this record into a typed view.
    pub fn classify(&self, at: ExprId) -> Result<ExprNode<'_>, StructuralError> {
        let kind = self.kind(at)?;
        let name = || {
            self.name.ok_or(StructuralError::MissingName {
                table: Table::Expr,
                index: at.0,
            })
        };
        let node = match kind {
            ExprKind::Placeholder => ExprNode::Placeholder,
            ExprKind::Global => ExprNode::Global(name()?),
            ExprKind::Con => ExprNode::Con(name()?),
            ExprKind::Local => ExprNode::Local(&self.text),
            ExprKind::Lit => {
                let lit = LitKind::from_u8(self.lkind).ok_or(
                    StructuralError::InvalidLiteralKind {
                        index: at.0,
                        lkind: self.lkind,
                    },
                )?;
                ExprNode::Lit {
                    kind: lit,
                    text: &self.text,
                }
            }
            ExprKind::App => ExprNode::App {
                fun: self.subx1,
                arg: self.subx2,
            },
            ExprKind::Lam => ExprNode::Lam {
                pat: self.subx1,
                body: self.subx2,
            },
            ExprKind::Ifte => ExprNode::Ifte {
                cond: self.subx1,
                then: self.subx2,
                els: self.subx3,
            },
            ExprKind::Case => ExprNode::Case {
                scrutinee: self.subx1,
                alts: &self.alts,
            },
            ExprKind::Alt => ExprNode::Alt {
                pat: self.subx1,
                body: self.subx2,
            },
            ExprKind::Field => ExprNode::Field {
                name: name()?,
                record: self.subx1,
            },
            ExprKind::Let => ExprNode::Let {
                label: &self.text,
                value: self.subx1,
                body: self.subx2,
            },
        };
        Ok(node)
    }
}

/// Entry of the shared qualified-name table.
///
/// `member` is empty unless `kind` is [`NameKind::Member`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NameRecord {
    pub kind: u8,
    pub pack: String,
    pub base: String,
    pub member: String,
}

impl NameRecord {
    pub fn from_qname(name: &QName) -> Self {
        Self {
            kind: name.kind as u8,
            pack: name.pack.clone(),
            base: name.base.clone(),
            member: name.member.clone().unwrap_or_default(),
        }
    }

    /// Rebuild the qualified name, validating kind and member consistency.
    pub fn to_qname(&self, at: NameId) -> Result<QName, StructuralError> {
        let invalid = StructuralError::InvalidName { index: at.0 };
        let kind = NameKind::from_u8(self.kind).ok_or(invalid.clone())?;
        let member = match (kind, self.member.is_empty()) {
            (NameKind::Member, false) => Some(self.member.clone()),
            (NameKind::Member, true) => return Err(invalid),
            (_, true) => None,
            (_, false) => return Err(invalid),
        };
        if self.base.is_empty() {
            return Err(invalid);
        }
        Ok(QName {
            kind,
            pack: self.pack.clone(),
            base: self.base.clone(),
            member,
        })
    }
}

/// An exported symbol: its name, type and optional inlinable body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExportRecord {
    pub name: NameId,
    pub sigma: SigmaId,
    pub inline: Option<ExprId>,
}
