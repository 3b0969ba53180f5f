//! Atoms, the propositional variables of the engine.
//!
//! Atoms are positive integers, allocated in sequence by the engine.
//! Zero is never an atom, so that [as_int](crate::structures::literal::Literal::as_int) may be used in DIMACS style output.

/// An atom, aka. a 'variable'.
pub type Atom = u32;
