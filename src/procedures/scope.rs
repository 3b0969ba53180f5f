/*!
Scopes of a context.

A [push](GenericContext::push) first lowers any formulas beyond the frontier, so every formula of an open scope is known to the engine at the depth it was asserted.
Then a [checkpoint](crate::context::Checkpoint) of the formulas, assumptions, and frontier is taken, and the push is forwarded to the engine, the preprocessor, and the atom map.

A [pop](GenericContext::pop) is clamped to the depth of the context, so popping more scopes than are open is the same as popping every open scope.
The pop is forwarded before the scoped sequences are restored from the checkpoints.

Neither push nor pop touch the cached model or core.
*/

use crate::{
    context::{Checkpoint, GenericContext},
    db::Scoped,
    engine::SatEngine,
    misc::log::targets::{self},
};

impl<E: SatEngine> GenericContext<E> {
    /// Opens a scope.
    pub fn push(&mut self) {
        if let Err(e) = self.internalize_formulas() {
            log::info!(target: targets::SCOPE, "Push with formulas beyond the frontier: {e}");
        }

        self.engine.push_scope();
        self.checkpoints.push(Checkpoint {
            formulas: self.formulas.len(),
            assumptions: self.assumptions.len(),
            frontier: self.frontier,
        });
        self.preprocessor.push_scope();
        self.atom_map.push_scope();

        log::trace!(target: targets::SCOPE, "Push to depth {}", self.scope_depth());
    }

    /// Closes `count` scopes, or every open scope if fewer than `count` are open.
    pub fn pop(&mut self, count: usize) {
        let count = std::cmp::min(count, self.scope_depth());
        if count == 0 {
            return;
        }

        self.preprocessor.pop_scopes(count);
        self.atom_map.pop_scopes(count);
        self.engine.pop_scopes(count);

        for _ in 0..count {
            if let Some(checkpoint) = self.checkpoints.pop() {
                self.formulas.truncate(checkpoint.formulas);
                self.assumptions.truncate(checkpoint.assumptions);
                self.frontier = checkpoint.frontier;
            }
        }

        log::trace!(target: targets::SCOPE, "Pop to depth {}", self.scope_depth());
    }

    /// The count of open scopes.
    pub fn scope_depth(&self) -> usize {
        self.checkpoints.len()
    }
}
