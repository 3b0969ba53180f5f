/*!
Goals, the unit of work of [preprocessing](crate::preprocessing).

A goal is a conjunction of boolean formulas, each tagged with a [Dependency].
A dependency records which assumption terms (the 'leaves') a formula derives from, so that an unsatisfiable core over lowered literals may be traced back to assumption terms.

Formulas asserted to a goal are split on top-level conjunctions (and negated disjunctions), and `true` is dropped.
Asserting `false` marks the goal as inconsistent, though the formula is kept so that its dependency is not lost.
*/

use crate::structures::term::{Op, TermId, TermManager};

/// A set of leaves, kept sorted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dependency {
    leaves: Vec<TermId>,
}

impl Dependency {
    /// The dependency on a single leaf.
    pub fn leaf(term: TermId) -> Self {
        Dependency { leaves: vec![term] }
    }

    /// The union of two dependencies.
    pub fn join(&self, other: &Dependency) -> Self {
        let mut leaves = Vec::with_capacity(self.leaves.len() + other.leaves.len());
        leaves.extend_from_slice(&self.leaves);
        leaves.extend_from_slice(&other.leaves);
        leaves.sort_unstable();
        leaves.dedup();
        Dependency { leaves }
    }

    pub fn leaves(&self) -> &[TermId] {
        &self.leaves
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

/// A conjunction of formulas with dependencies.
#[derive(Clone, Debug)]
pub struct Goal {
    formulas: Vec<TermId>,
    dependencies: Vec<Dependency>,
    models_enabled: bool,
    cores_enabled: bool,
    inconsistent: bool,
}

impl Goal {
    pub fn new(models_enabled: bool, cores_enabled: bool) -> Self {
        Goal {
            formulas: Vec::default(),
            dependencies: Vec::default(),
            models_enabled,
            cores_enabled,
            inconsistent: false,
        }
    }

    /// An empty goal with the same flags.
    pub fn derive(&self) -> Self {
        Goal::new(self.models_enabled, self.cores_enabled)
    }

    pub fn models_enabled(&self) -> bool {
        self.models_enabled
    }

    pub fn cores_enabled(&self) -> bool {
        self.cores_enabled
    }

    /// Whether `false` has been asserted.
    pub fn is_inconsistent(&self) -> bool {
        self.inconsistent
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// The formula at the given index.
    pub fn formula(&self, index: usize) -> TermId {
        self.formulas[index]
    }

    /// The dependency of the formula at the given index.
    pub fn dependency(&self, index: usize) -> &Dependency {
        &self.dependencies[index]
    }

    /// Formulas paired with their dependencies.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &Dependency)> + '_ {
        self.formulas.iter().copied().zip(self.dependencies.iter())
    }

    /// The union of the dependencies of all `false` formulas.
    pub fn inconsistency_dependency(&self, tm: &TermManager) -> Dependency {
        let mut dependency = Dependency::default();
        for (formula, dep) in self.iter() {
            if matches!(tm.op(formula), Op::False) {
                dependency = dependency.join(dep);
            }
        }
        dependency
    }

    /// Asserts a formula with a dependency.
    pub fn assert(&mut self, tm: &mut TermManager, formula: TermId, dependency: Dependency) {
        let dependency = match self.cores_enabled {
            true => dependency,
            false => Dependency::default(),
        };

        let mut todo = vec![(formula, false)];
        while let Some((formula, negated)) = todo.pop() {
            match (tm.op(formula), negated) {
                (Op::True, false) | (Op::False, true) => {}

                (Op::False, false) | (Op::True, true) => {
                    self.inconsistent = true;
                    self.formulas.push(tm.mk_false());
                    self.dependencies.push(dependency.clone());
                }

                (Op::And, false) | (Op::Or, true) => {
                    for arg in tm.args(formula).iter().rev() {
                        todo.push((*arg, negated));
                    }
                }

                (Op::Not, _) => todo.push((tm.args(formula)[0], !negated)),

                (_, false) => {
                    self.formulas.push(formula);
                    self.dependencies.push(dependency.clone());
                }

                (_, true) => {
                    let negation = tm.mk(Op::Not, vec![formula]);
                    self.formulas.push(negation);
                    self.dependencies.push(dependency.clone());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Sort;

    #[test]
    fn splitting() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let z = tm.declare_const("z", Sort::Bool).unwrap();
        let t = tm.mk_true();
        let y_or_z = tm.mk_or(&[y, z]).unwrap();
        let not_or = tm.mk_not(y_or_z).unwrap();
        let conjunction = tm.mk_and(&[x, t, not_or]).unwrap();

        let mut goal = Goal::new(true, true);
        goal.assert(&mut tm, conjunction, Dependency::leaf(x));

        assert_eq!(goal.len(), 3);
        assert_eq!(goal.formula(0), x);
        assert_eq!(tm.op(goal.formula(1)), &Op::Not);
        assert!(goal.iter().all(|(_, dep)| dep.leaves() == [x]));
        assert!(!goal.is_inconsistent());
    }

    #[test]
    fn inconsistency() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let f = tm.mk_false();

        let mut goal = Goal::new(true, true);
        goal.assert(&mut tm, y, Dependency::leaf(y));
        goal.assert(&mut tm, f, Dependency::leaf(x));
        assert!(goal.is_inconsistent());
        assert_eq!(goal.inconsistency_dependency(&tm).leaves(), [x]);
    }

    #[test]
    fn dependency_join() {
        let mut tm = TermManager::new();
        let x = tm.declare_const("x", Sort::Bool).unwrap();
        let y = tm.declare_const("y", Sort::Bool).unwrap();
        let joined = Dependency::leaf(y).join(&Dependency::leaf(x)).join(&Dependency::leaf(y));
        assert_eq!(joined.leaves().len(), 2);
        assert!(joined.leaves().windows(2).all(|w| w[0] < w[1]));
    }
}
