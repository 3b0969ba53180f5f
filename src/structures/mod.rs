//! Abstract elements of the library and their representation.
//!
//! - [Atoms](atom), [literals](literal), and [clauses](clause) are the vocabulary of the [engine](crate::engine).
//! - [Terms](term), [goals](goal), and [models](model) are the vocabulary of the front-end.

pub mod atom;
pub mod clause;
pub mod goal;
pub mod literal;
pub mod model;
pub mod term;
