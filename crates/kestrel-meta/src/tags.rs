//! Discriminator enumerations for interface records.
//!
//! The Tau table stores both type nodes and kind nodes in one record shape.
//! [`TauTag`] values are split into two disjoint ranges: `0..=7` for type
//! interpretations and `8..=15` for kind interpretations. Which range is legal
//! is decided by the calling context, never by the record itself.

use std::fmt;
use std::ops::RangeInclusive;

/// Tags legal where a type node is expected.
pub const TYPE_TAGS: RangeInclusive<u8> = 0..=7;

/// Tags legal where a kind node is expected.
pub const KIND_TAGS: RangeInclusive<u8> = 8..=15;

/// Discriminant of a [`TauRecord`](crate::TauRecord).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum TauTag {
    /// `suba` applied to `subb`.
    TypeApp = 0,
    /// Reference to the type constructor `tcon`.
    TypeCon = 1,
    /// Type variable `var` whose kind is `suba`.
    TypeVar = 2,
    /// Kind arrow `suba -> subb`.
    KindApp = 8,
    /// The kind of ordinary types, `*`.
    KindType = 9,
    /// Unresolved kind variable. Never valid in an interface.
    KindVar = 10,
    /// Kind abstraction over the concrete type `suba`.
    KindGen = 11,
}

impl TauTag {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::TypeApp),
            1 => Some(Self::TypeCon),
            2 => Some(Self::TypeVar),
            8 => Some(Self::KindApp),
            9 => Some(Self::KindType),
            10 => Some(Self::KindVar),
            11 => Some(Self::KindGen),
            _ => None,
        }
    }

    pub fn range(self) -> TagRange {
        if KIND_TAGS.contains(&(self as u8)) {
            TagRange::Kind
        } else {
            TagRange::Type
        }
    }

    pub fn is_type(self) -> bool {
        self.range() == TagRange::Type
    }

    pub fn is_kind(self) -> bool {
        self.range() == TagRange::Kind
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::TypeApp => "TApp",
            Self::TypeCon => "TCon",
            Self::TypeVar => "TVar",
            Self::KindApp => "KApp",
            Self::KindType => "KType",
            Self::KindVar => "KVar",
            Self::KindGen => "KGen",
        }
    }
}

/// The interpretation a Tau index is used under.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TagRange {
    Type,
    Kind,
}

impl fmt::Display for TagRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Kind => f.write_str("kind"),
        }
    }
}

/// Discriminant of an [`ExprRecord`](crate::ExprRecord).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum ExprKind {
    /// Canonical empty node, see [`ExprRecord::DEFAULT`](crate::ExprRecord::DEFAULT).
    Placeholder = 0,
    /// Reference to a top-level value (`name`).
    Global = 1,
    /// Reference to a data constructor (`name`).
    Con = 2,
    /// Reference to a local variable (`text`).
    Local = 3,
    /// Literal of kind `lkind` with raw source text `text`.
    Lit = 4,
    /// `subx1` applied to `subx2`.
    App = 5,
    /// Lambda with parameter pattern `subx1` and body `subx2`.
    Lam = 6,
    /// `if subx1 then subx2 else subx3`.
    Ifte = 7,
    /// Case over `subx1` with ordered alternatives `alts`.
    Case = 8,
    /// Case alternative: pattern `subx1`, body `subx2`.
    Alt = 9,
    /// Field `name` selected from `subx1`.
    Field = 10,
    /// `let text = subx1 in subx2`.
    Let = 11,
}

impl ExprKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Placeholder),
            1 => Some(Self::Global),
            2 => Some(Self::Con),
            3 => Some(Self::Local),
            4 => Some(Self::Lit),
            5 => Some(Self::App),
            6 => Some(Self::Lam),
            7 => Some(Self::Ifte),
            8 => Some(Self::Case),
            9 => Some(Self::Alt),
            10 => Some(Self::Field),
            11 => Some(Self::Let),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Placeholder => "Nop",
            Self::Global => "Global",
            Self::Con => "Con",
            Self::Local => "Local",
            Self::Lit => "Lit",
            Self::App => "App",
            Self::Lam => "Lam",
            Self::Ifte => "Ifte",
            Self::Case => "Case",
            Self::Alt => "Alt",
            Self::Field => "Field",
            Self::Let => "Let",
        }
    }

    /// Whether the record carries a `name`.
    pub fn has_name(self) -> bool {
        matches!(self, Self::Global | Self::Con | Self::Field)
    }
}

/// Literal kind of an `ExprKind::Lit` record. Raw value 0 means "not a literal".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum LitKind {
    Bool = 1,
    Char = 2,
    String = 3,
    Int = 4,
    Long = 5,
    BigInt = 6,
    Float = 7,
    Double = 8,
}

impl LitKind {
    /// Raw value stored in records that are not literals.
    pub const NONE: u8 = 0;

    /// Convert from raw discriminant. `0` and unknown values yield `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::Bool),
            2 => Some(Self::Char),
            3 => Some(Self::String),
            4 => Some(Self::Int),
            5 => Some(Self::Long),
            6 => Some(Self::BigInt),
            7 => Some(Self::Float),
            8 => Some(Self::Double),
            _ => None,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::String => "string",
            Self::Int => "int",
            Self::Long => "long",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}
