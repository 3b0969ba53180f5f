//! Literals are atoms paired with a (boolean) polarity.
//!
//! The canonical implementation of the literal trait is [CLiteral], an atom paired with a boolean.
//!
//! ```rust
//! # use otter_inc::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert!(!literal.negate().polarity());
//! assert_eq!(literal.negate().as_int(), -79);
//! ```
//!
//! Literals are ordered by atom and then polarity, with `false` (strictly) less than `true`.

use crate::structures::atom::Atom;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// A dense index of the literal, with the negative literal of an atom immediately before the positive.
    fn index(&self) -> usize;

    /// The literal in it's integer form, with sign indicating polarity.
    fn as_int(&self) -> isize;
}

/// The representation of a literal as an atom paired with a boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CLiteral {
    atom: Atom,
    polarity: bool,
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        CLiteral { atom, polarity }
    }

    fn negate(&self) -> Self {
        CLiteral {
            atom: self.atom,
            polarity: !self.polarity,
        }
    }

    fn atom(&self) -> Atom {
        self.atom
    }

    fn polarity(&self) -> bool {
        self.polarity
    }

    fn index(&self) -> usize {
        2 * self.atom as usize + self.polarity as usize
    }

    fn as_int(&self) -> isize {
        match self.polarity {
            true => self.atom as isize,
            false => -(self.atom as isize),
        }
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}
