/*!
Models, over terms.

A model is built on the first request after a satisfiable query, and cached until the next query.

The model is built in two steps:
1. Each constant of the [atom map](crate::db::atom_map) valued by the engine is given the value of its atom.
   Applications of uninterpreted functions are skipped.
2. The model converter of the context is applied, after a step which assembles each bit-vector constant of the [blast map](crate::db::blast_map) from its bits.
   So, bit-vector constants are given values, while bits and dependency proxies are removed.

If the engine model is no longer current (e.g. clauses were added since the query) there is no model.

In debug builds each lowered formula is checked against the model, and a formula valued false panics.
*/

use crate::{
    context::{GenericContext, ModelCache},
    engine::SatEngine,
    misc::log::targets::{self},
    preprocessing::model_converter::ModelConverter,
    structures::model::{Model, Value},
};

impl<E: SatEngine> GenericContext<E> {
    /// The model of the most recent satisfiable query, if there is one.
    pub fn model(&mut self) -> Option<&Model> {
        if matches!(self.model, ModelCache::Pending) {
            self.model = match self.build_model() {
                Some(model) => ModelCache::Present(model),
                None => ModelCache::Absent,
            };
        }

        match &self.model {
            ModelCache::Present(model) => Some(model),
            _ => None,
        }
    }

    fn build_model(&self) -> Option<Model> {
        if !self.engine.model_is_current() {
            log::info!(target: targets::MODEL, "Model requested though the engine model is not current");
            return None;
        }

        let mut model = Model::default();
        for (term, atom) in self.atom_map.iter() {
            let Some(decl) = self.tm.as_const(term) else {
                continue;
            };
            if let Some(value) = self.engine.model_value(atom) {
                model.register(decl, Value::Bool(value));
            }
        }

        let map = self.preprocessor.blast_map();
        let converter = match map.is_empty() {
            false => self.model_converter.clone().then(ModelConverter::bit_blast(map)),
            true => self.model_converter.clone(),
        };
        converter.apply(&mut model);

        if cfg!(debug_assertions) {
            self.check_model(&model);
        }

        log::trace!(target: targets::MODEL, "Model with {} values", model.len());
        Some(model)
    }

    /// Panics if some lowered formula is false in the model.
    fn check_model(&self, model: &Model) {
        for formula in &self.formulas[..self.frontier] {
            if model.eval_bool(&self.tm, *formula, false) == Some(false) {
                log::error!(target: targets::MODEL, "Model falsifies {}", self.tm.display(*formula));
                panic!("! Model falsifies {}", self.tm.display(*formula));
            }
        }
    }
}
