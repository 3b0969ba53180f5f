//! Procedures of a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.
//!
//! - [scope]: push and pop.
//! - [internalize]: lowering of formulas and assumptions, through the [preprocessing](crate::preprocessing) pipeline and [goal2sat].
//! - [check]: assertion, and satisfiability queries.
//! - [core], [consequences], [mutexes], [model]: answers to queries, read back over terms.
//! - [weighted]: a weighted CNF dump of the lowered formulas.

pub mod check;
pub mod consequences;
pub mod core;
pub mod goal2sat;
pub mod internalize;
pub mod model;
pub mod mutexes;
pub mod scope;
pub mod weighted;
