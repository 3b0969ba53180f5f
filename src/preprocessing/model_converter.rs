/*!
Model converters, which undo the effect of preprocessing on models.

A converter is a sequence of steps, recorded in the order preprocessing happened, and applied to a model in reverse.
- A filter step removes declarations introduced by preprocessing (or lowering) from the model.
- A bit-blast step assembles the value of each bit-vector constant from the values of its bits, and removes the bits.
*/

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::{
    db::blast_map::{BitGroup, BlastMap},
    structures::{
        model::{Model, Value},
        term::DeclId,
    },
};

/// A step of a converter.
#[derive(Clone, Debug)]
pub enum ConverterStep {
    /// Remove the declarations from the model.
    Filter(Vec<DeclId>),

    /// Assemble bit-vector values from bits.
    BitBlast(Vec<BitGroup>),
}

/// A sequence of steps.
#[derive(Clone, Debug, Default)]
pub struct ModelConverter {
    steps: Vec<ConverterStep>,
}

impl ModelConverter {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// A converter which removes the declarations.
    pub fn filter(decls: Vec<DeclId>) -> Self {
        ModelConverter {
            steps: vec![ConverterStep::Filter(decls)],
        }
    }

    /// A converter which assembles values for every constant of the map.
    pub fn bit_blast(map: &BlastMap) -> Self {
        ModelConverter {
            steps: vec![ConverterStep::BitBlast(map.iter().cloned().collect())],
        }
    }

    /// Appends a step.
    pub fn push(&mut self, step: ConverterStep) {
        self.steps.push(step);
    }

    /// The converter of `self` followed by `later`.
    ///
    /// The steps of `later` are applied to a model before those of `self`.
    pub fn then(mut self, later: ModelConverter) -> Self {
        self.steps.extend(later.steps);
        self
    }

    /// Applies every step to the model, from last to first.
    pub fn apply(&self, model: &mut Model) {
        for step in self.steps.iter().rev() {
            match step {
                ConverterStep::Filter(decls) => {
                    for decl in decls {
                        model.remove(*decl);
                    }
                }

                ConverterStep::BitBlast(groups) => {
                    for group in groups {
                        let mut value = BigUint::zero();
                        for (position, bit) in group.bit_decls.iter().enumerate() {
                            if model.remove(*bit) == Some(Value::Bool(true)) {
                                value |= BigUint::one() << position;
                            }
                        }
                        let width = group.bit_decls.len() as u32;
                        model.register(group.decl, Value::BitVec { value, width });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::Scoped,
        structures::term::{Sort, TermId, TermManager},
    };

    #[test]
    fn assemble_and_filter() {
        let mut tm = TermManager::new();
        let b = tm.declare_const("b", Sort::BitVec(3)).unwrap();
        let bits: Vec<TermId> = (0..3).map(|_| tm.mk_fresh_const("b", Sort::Bool)).collect();
        let bit_decls: Vec<DeclId> = bits.iter().map(|t| tm.as_const(*t).unwrap()).collect();
        let proxy = tm.mk_fresh_const("dep", Sort::Bool);
        let proxy_decl = tm.as_const(proxy).unwrap();

        let mut map = BlastMap::default();
        map.push_scope();
        map.insert(BitGroup {
            decl: tm.as_const(b).unwrap(),
            bits,
            bit_decls: bit_decls.clone(),
        });

        let mut model = Model::default();
        model.register(bit_decls[0], Value::Bool(true));
        model.register(bit_decls[1], Value::Bool(false));
        model.register(bit_decls[2], Value::Bool(true));
        model.register(proxy_decl, Value::Bool(true));

        let converter =
            ModelConverter::filter(vec![proxy_decl]).then(ModelConverter::bit_blast(&map));
        converter.apply(&mut model);

        assert_eq!(model.len(), 1);
        assert_eq!(
            model.value_of_name(&tm, "b"),
            Some(&Value::BitVec {
                value: BigUint::from(5_u32),
                width: 3
            })
        );
    }
}
