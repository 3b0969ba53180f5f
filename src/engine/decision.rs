/*!
Methods for choosing the value of an atom.

# Overview

An atom without a value is chosen, either at random (with probability [random_decision_bias](crate::config::EngineConfig::random_decision_bias)) or as the atom of highest activity.

# Phase saving

If phase saving is enabled, a chosen atom is valued as it was last valued.
Otherwise, the value is chosen at random with probability [polarity_lean](crate::config::EngineConfig::polarity_lean) of `true`.

Every atom has a 'last' value, initialised randomly with the same probability.
*/

use rand::{seq::IteratorRandom, Rng};

use super::generic::GenericEngine;
use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
};

impl<R: Rng + std::default::Default> GenericEngine<R> {
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom> + '_ {
        self.values
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, value)| value.is_none())
            .map(|(atom, _)| atom as Atom)
    }

    /// A literal to assign as a decision, if some atom is without a value.
    pub(super) fn choose_decision(&mut self) -> Option<CLiteral> {
        let bias = self.config.random_decision_bias.value;

        let chosen = match bias > 0.0 && self.rng.random_bool(bias) {
            true => {
                let candidates = self.unvalued_atoms().collect::<Vec<_>>();
                candidates.into_iter().choose(&mut self.rng)
            }
            false => {
                let mut best: Option<Atom> = None;
                for atom in self.unvalued_atoms() {
                    match best {
                        Some(b) if self.activity[b as usize] >= self.activity[atom as usize] => {}
                        _ => best = Some(atom),
                    }
                }
                best
            }
        }?;

        let polarity = match self.config.phase_saving.value {
            true => self.phases[chosen as usize],
            false => self.rng.random_bool(self.config.polarity_lean.value),
        };

        Some(CLiteral::new(chosen, polarity))
    }
}
