//! Output of the clauses of the engine as weighted CNF.
//!
//! The header is `p wcnf <atoms> <clauses> <top>`, with `top` one more than the sum of the soft weights.
//! Every clause added to the engine is hard, with weight `top`, and each assumption is a soft unit clause with the given weight.

use super::generic::GenericEngine;
use crate::structures::{clause::Clause, literal::CLiteral};

impl<R: rand::Rng + std::default::Default> GenericEngine<R> {
    pub(super) fn write_wcnf(
        &self,
        out: &mut dyn std::io::Write,
        assumptions: &[CLiteral],
        weights: &[u32],
    ) -> std::io::Result<()> {
        let top: u64 = weights.iter().map(|w| *w as u64).sum::<u64>() + 1;
        let hard = self
            .clauses
            .iter()
            .filter(|clause| !clause.learnt)
            .collect::<Vec<_>>();

        writeln!(
            out,
            "p wcnf {} {} {top}",
            self.atom_count(),
            hard.len() + assumptions.len()
        )?;

        for clause in hard {
            writeln!(out, "{top} {}", clause.literals.as_dimacs(true))?;
        }

        for (assumption, weight) in assumptions.iter().zip(weights) {
            writeln!(out, "{weight} {assumption} 0")?;
        }

        Ok(())
    }
}
