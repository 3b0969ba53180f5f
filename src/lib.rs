//! An incremental front-end to a satisfiability engine.
//!
//! otter_inc accepts formulas over booleans and fixed-width bit-vectors, lowers them through a preprocessing pipeline to clauses of a CDCL engine, and answers satisfiability queries under assumptions.
//! Between queries formulas may be added, and the set of formulas may be scoped by [push](context::GenericContext::push) and [pop](context::GenericContext::pop).
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! - Terms are built through the [term manager](structures::term::TermManager) owned by a context.
//! - Asserted formulas are stored by the context and lowered lazily, only up to a frontier, the first time a query needs them.
//!   Lowering runs a [preprocessing](preprocessing) pipeline (cardinality elimination, simplification, sharing, bit-blasting) and then a Tseitin translation to clauses of the [engine].
//! - The [atom map](db::atom_map) and the [bit-blast map](db::blast_map) persist across queries and scopes, so lowered structure is reused.
//! - Answers come back as a [Report](reports::Report), with a [model](structures::model::Model), an unsatisfiable core of assumptions, fixed consequences, or mutually exclusive groups of literals.
//!
//! Useful starting points, then, may be:
//! - The [check procedure](crate::procedures::check) for the high-level flow of a query.
//! - The [scope procedures](crate::procedures::scope) for how push and pop keep the databases aligned.
//! - The [engine] for the CDCL search used by default.
//!
//! # Examples
//!
//! ```rust
//! # use otter_inc::config::Config;
//! # use otter_inc::context::Context;
//! # use otter_inc::reports::Report;
//! # use otter_inc::structures::term::Sort;
//! let mut ctx = Context::from_config(Config::default());
//!
//! let p = ctx.terms_mut().declare_const("p", Sort::Bool).unwrap();
//! let q = ctx.terms_mut().declare_const("q", Sort::Bool).unwrap();
//! let p_or_q = ctx.terms_mut().mk_or(&[p, q]).unwrap();
//! let not_p = ctx.terms_mut().mk_not(p).unwrap();
//!
//! ctx.assert_term(p_or_q).unwrap();
//! assert_eq!(ctx.check(&[not_p]), Report::Satisfiable);
//!
//! let not_q = ctx.terms_mut().mk_not(q).unwrap();
//! assert_eq!(ctx.check(&[not_p, not_q]), Report::Unsatisfiable);
//! assert_eq!(ctx.unsat_core().len(), 2);
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout, with targets listed in [misc::log].
//! No log implementation is bundled, though the tests use [env_logger](https://docs.rs/env_logger/latest/env_logger/).

pub mod config;
pub mod context;
pub mod db;
pub mod engine;
pub mod generic;
pub mod misc;
pub mod preprocessing;
pub mod procedures;
pub mod reports;
pub mod structures;
pub mod types;
