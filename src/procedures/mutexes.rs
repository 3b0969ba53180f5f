/*!
Groups of mutually exclusive atoms.

Each boolean term given is stripped of a negation and looked up in the [atom map](crate::db::atom_map), and the literal found (with the polarity of the term) is passed to the engine.
Terms without an atom are dropped, and so never appear in a group.
The literals of each group are read back to the terms given.
*/

use rustc_hash::FxHashMap;

use crate::{
    context::GenericContext,
    engine::SatEngine,
    misc::log::targets::{self},
    structures::{
        literal::{CLiteral, Literal},
        term::TermId,
    },
};

impl<E: SatEngine> GenericContext<E> {
    /// Groups of the given boolean terms, where at most one term of each group may be true.
    pub fn find_mutexes(&mut self, atoms: &[TermId]) -> Vec<Vec<TermId>> {
        if let Err(e) = self.internalize_formulas() {
            log::warn!(target: targets::MUTEX, "Mutexes over formulas not lowered: {e}");
        }
        self.engine.pop_to_base_level();

        let mut literals: Vec<CLiteral> = Vec::default();
        let mut origin: FxHashMap<CLiteral, TermId> = FxHashMap::default();

        for term in atoms {
            let (atom, polarity) = match self.tm.negated(*term) {
                Some(inner) => (inner, false),
                None => (*term, true),
            };
            match self.atom_map.to_atom(atom) {
                Some(atom) => {
                    let literal = CLiteral::new(atom, polarity);
                    if origin.insert(literal, *term).is_none() {
                        literals.push(literal);
                    }
                }
                None => {
                    log::trace!(target: targets::MUTEX, "{} has no atom", self.tm.display(*term));
                }
            }
        }

        self.engine
            .find_mutexes(&literals)
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .filter_map(|literal| origin.get(&literal).copied())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
