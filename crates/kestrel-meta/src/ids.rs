//! Table index newtypes.
//!
//! Each table of a [`TableSet`](crate::TableSet) has its own index type so that
//! indices from different tables cannot be mixed up.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! table_index {
    ($(#[$doc:meta])* $name:ident, $table:expr) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// The table this index points into.
            pub const TABLE: Table = $table;

            #[inline]
            pub fn get(self) -> u32 {
                self.0
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

table_index!(
    /// Index into the Tau table (type and kind nodes).
    TauId,
    Table::Tau
);
table_index!(
    /// Index into the Rho table.
    RhoId,
    Table::Rho
);
table_index!(
    /// Index into the Sigma table.
    SigmaId,
    Table::Sigma
);
table_index!(
    /// Index into the Context table.
    ContextId,
    Table::Context
);
table_index!(
    /// Index into the Expr table. Index 0 is the default placeholder record.
    ExprId,
    Table::Expr
);
table_index!(
    /// Index into the qualified-name table.
    NameId,
    Table::Name
);

impl ExprId {
    /// The placeholder record every non-empty expression table starts with.
    pub const PLACEHOLDER: Self = Self(0);
}

/// Names the tables of an interface, for error messages and dumps.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Table {
    Tau,
    Rho,
    Sigma,
    Context,
    Expr,
    Name,
    Export,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Self::Tau => "tau",
            Self::Rho => "rho",
            Self::Sigma => "sigma",
            Self::Context => "context",
            Self::Expr => "expr",
            Self::Name => "name",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_accessors() {
        assert_eq!(TauId(7).get(), 7);
        assert_eq!(SigmaId(3).index(), 3);
        assert_eq!(ExprId::PLACEHOLDER, ExprId(0));
    }

    #[test]
    fn ids_know_their_table() {
        assert_eq!(TauId::TABLE, Table::Tau);
        assert_eq!(ContextId::TABLE.to_string(), "context");
        assert_eq!(NameId::TABLE.name(), "name");
    }
}
