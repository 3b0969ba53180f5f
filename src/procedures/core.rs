/*!
Unsatisfiable cores, over terms.

The engine gives a core as a subset of the assumption literals of a query.
Each literal is read back to the assumption term it stands for through the inverse of the [dependency map](crate::db::dependency), and so a core is a subset of the assumptions of the query together with the standing assumptions.

Every literal of an engine core must have been an assumption literal, so a literal missing from the inverse map is a bug, and panics.
*/

use crate::{
    context::GenericContext, engine::SatEngine, misc::log::targets::{self},
    structures::term::TermId,
};

impl<E: SatEngine> GenericContext<E> {
    /// Replaces the core of the context with the core of the engine, over terms.
    pub(crate) fn extract_core(&mut self) {
        let asm2dep = self.dep2asm.invert();

        self.core.clear();
        for literal in self.engine.core() {
            match asm2dep.get(literal) {
                Some(term) => self.core.push(*term),
                None => {
                    log::error!(target: targets::CORE, "Core literal {literal} has no assumption");
                    panic!("! Core literal {literal} has no assumption");
                }
            }
        }

        log::trace!(target: targets::CORE, "Core of {} assumptions", self.core.len());
    }

    /// The unsatisfiable core of the most recent query, if the query was unsatisfiable.
    pub fn unsat_core(&self) -> &[TermId] {
        &self.core
    }
}
