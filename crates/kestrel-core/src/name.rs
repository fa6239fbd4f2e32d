//! Qualified names.
//!
//! Every global entity referenced from interface metadata (type constructors,
//! classes, top-level values, data constructors, members) is identified by the
//! package that defines it plus its base name. Members additionally carry the
//! name of the member inside their owner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Namespace of a qualified name.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum NameKind {
    /// Type constructor (`Maybe`, `Int`, `->`).
    Type = 0,
    /// Type class (`Eq`, `Functor`).
    Class = 1,
    /// Top-level value.
    Value = 2,
    /// Data constructor (`Just`, `Nothing`).
    Con = 3,
    /// Member of a type or class (`Eq.==`, record fields).
    Member = 4,
}

impl NameKind {
    /// Convert from raw discriminant.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Type),
            1 => Some(Self::Class),
            2 => Some(Self::Value),
            3 => Some(Self::Con),
            4 => Some(Self::Member),
            _ => None,
        }
    }

    /// Short mnemonic used in dumps.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Class => "class",
            Self::Value => "value",
            Self::Con => "con",
            Self::Member => "member",
        }
    }
}

/// A fully qualified name.
///
/// `member` is present exactly for [`NameKind::Member`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct QName {
    pub kind: NameKind,
    pub pack: String,
    pub base: String,
    pub member: Option<String>,
}

impl QName {
    fn simple(kind: NameKind, pack: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            kind,
            pack: pack.into(),
            base: base.into(),
            member: None,
        }
    }

    pub fn ty(pack: impl Into<String>, base: impl Into<String>) -> Self {
        Self::simple(NameKind::Type, pack, base)
    }

    pub fn class(pack: impl Into<String>, base: impl Into<String>) -> Self {
        Self::simple(NameKind::Class, pack, base)
    }

    pub fn value(pack: impl Into<String>, base: impl Into<String>) -> Self {
        Self::simple(NameKind::Value, pack, base)
    }

    pub fn con(pack: impl Into<String>, base: impl Into<String>) -> Self {
        Self::simple(NameKind::Con, pack, base)
    }

    pub fn member(
        pack: impl Into<String>,
        owner: impl Into<String>,
        member: impl Into<String>,
    ) -> Self {
        Self {
            kind: NameKind::Member,
            pack: pack.into(),
            base: owner.into(),
            member: Some(member.into()),
        }
    }

    /// The unqualified name as written in source.
    pub fn short(&self) -> &str {
        self.member.as_deref().unwrap_or(&self.base)
    }

    /// Whether the name can be written to an interface and read back: the
    /// base is non-empty, and a non-empty `member` is present exactly for
    /// [`NameKind::Member`].
    pub fn is_well_formed(&self) -> bool {
        let member_agrees = match (self.kind, &self.member) {
            (NameKind::Member, Some(member)) => !member.is_empty(),
            (NameKind::Member, None) => false,
            (_, member) => member.is_none(),
        };
        member_agrees && !self.base.is_empty()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.pack.is_empty() {
            write!(f, "{}.", self.pack)?;
        }
        f.write_str(&self.base)?;
        if let Some(member) = &self.member {
            write!(f, ".{member}")?;
        }
        Ok(())
    }
}
