//! Clauses, as disjunctions of literals.
//!
//! The canonical representation of a clause is a vector of literals.
//! The empty clause is unsatisfiable.

use crate::structures::literal::{CLiteral, Literal};

/// The canonical representation of a clause.
pub type CClause = Vec<CLiteral>;

/// Something which has methods for returning literals, etc.
pub trait Clause {
    /// The literals of the clause, in order.
    fn literals(&self) -> impl Iterator<Item = &CLiteral>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// The clause in DIMACS form, optionally terminated by `0`.
    fn as_dimacs(&self, zero: bool) -> String;
}

impl Clause for [CLiteral] {
    fn literals(&self) -> impl Iterator<Item = &CLiteral> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = self
            .iter()
            .map(|literal| literal.as_int().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if zero {
            if !dimacs.is_empty() {
                dimacs.push(' ');
            }
            dimacs.push('0');
        }
        dimacs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimacs() {
        let clause: CClause = vec![CLiteral::new(1, true), CLiteral::new(3, false)];
        assert_eq!(clause.as_dimacs(true), "1 -3 0");
        assert_eq!(clause.as_dimacs(false), "1 -3");
        let empty: CClause = vec![];
        assert_eq!(empty.as_dimacs(true), "0");
    }
}
