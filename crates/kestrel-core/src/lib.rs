#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the Kestrel compiler crates.
//!
//! - [`QName`] / [`NameKind`]: qualified names of types, classes, values and members
//! - [`Interner`] / [`Symbol`]: string deduplication for the interface string pool
//! - [`Colors`]: ANSI palette for dumps and CLI output

mod colors;
mod interner;
mod name;

#[cfg(test)]
mod interner_tests;
#[cfg(test)]
mod name_tests;

pub use colors::Colors;
pub use interner::{Interner, Symbol};
pub use name::{NameKind, QName};
