//! # dllsym-core
//!
//! Core value types shared by the dllsym crates. This crate defines the
//! pointer width of a build and the `(raw, decorated)` symbol pairs that a
//! symbol-table reader hands to the matching engine.

pub mod arch;
pub mod symbol;

pub use arch::Bitness;
pub use symbol::SymbolEntry;
