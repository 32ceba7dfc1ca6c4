//! Variable and documentation storage.
//!
//! `VarStore` holds the name -> value mapping with first-write-wins
//! semantics; `DocStore` holds the per-variable documentation entries
//! captured from comment blocks in the config files.

pub mod docs;
pub mod vars;

pub use docs::{DocEntry, DocStore};
pub use vars::VarStore;
