/*!
Binarization of associative bit-vector operators, to maximise sharing.

An application of `bvadd`, `bvmul`, `bvand`, `bvor` or `bvxor` to more than two arguments is rewritten to nested binary applications.
Pairs of arguments whose binary application already exists in the term manager are combined first, so the resulting terms share structure with the terms already made.
*/

use rustc_hash::FxHashMap;

use super::tactic::{rewrite_goal, Tactic, TacticContext};
use crate::{
    reports::Statistics,
    structures::{
        goal::Goal,
        term::{Op, TermId, TermManager},
    },
    types::err::TacticError,
};

#[derive(Default)]
pub struct MaxBvSharing {
    cache: FxHashMap<TermId, TermId>,
    hits: u64,
}

fn is_associative(op: &Op) -> bool {
    matches!(
        op,
        Op::BvAdd | Op::BvMul | Op::BvAnd | Op::BvOr | Op::BvXor
    )
}

impl MaxBvSharing {
    fn rewrite(&mut self, tm: &mut TermManager, term: TermId) -> TermId {
        if let Some(done) = self.cache.get(&term) {
            return *done;
        }

        let original = tm.args(term).to_vec();
        let args = original
            .iter()
            .map(|arg| self.rewrite(tm, *arg))
            .collect::<Vec<_>>();

        let op = tm.op(term).clone();
        let rewritten = if is_associative(&op) && args.len() > 2 {
            self.binarize(tm, op, args)
        } else if args != original {
            tm.mk(op, args)
        } else {
            term
        };

        self.cache.insert(term, rewritten);
        rewritten
    }

    fn binarize(&mut self, tm: &mut TermManager, op: Op, mut args: Vec<TermId>) -> TermId {
        while args.len() > 2 {
            let shared = (0..args.len()).find_map(|i| {
                ((i + 1)..args.len()).find_map(|j| {
                    tm.find(&op, &[args[i], args[j]])
                        .or_else(|| tm.find(&op, &[args[j], args[i]]))
                        .map(|existing| (i, j, existing))
                })
            });

            let (i, j, combined) = match shared {
                Some(found) => {
                    self.hits += 1;
                    found
                }
                None => {
                    let pair = tm.mk(op.clone(), vec![args[0], args[1]]);
                    (0, 1, pair)
                }
            };

            args.remove(j);
            args.remove(i);
            args.push(combined);
        }
        tm.mk(op, args)
    }
}

impl Tactic for MaxBvSharing {
    fn name(&self) -> &'static str {
        "max_bv_sharing"
    }

    fn apply(&mut self, goal: Goal, ctx: &mut TacticContext) -> Result<Vec<Goal>, TacticError> {
        let goal = rewrite_goal(goal, ctx.tm, |tm, formula| Ok(self.rewrite(tm, formula)))?;
        Ok(vec![goal])
    }

    fn reset(&mut self) {
        self.cache.clear();
    }

    fn collect_statistics(&self, stats: &mut Statistics) {
        stats.update("max sharing hits", self.hits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::term::Sort;

    #[test]
    fn reuses_existing_pairs() {
        let mut tm = TermManager::new();
        let [x, y, z] = ["x", "y", "z"].map(|n| tm.declare_const(n, Sort::BitVec(4)).unwrap());
        let yz = tm.mk_bv_add(&[y, z]).unwrap();
        let sum = tm.mk_bv_add(&[x, y, z]).unwrap();

        let mut sharing = MaxBvSharing::default();
        let binary = sharing.rewrite(&mut tm, sum);

        assert_eq!(tm.args(binary).len(), 2);
        assert!(tm.args(binary).contains(&yz));
        assert_eq!(sharing.hits, 1);
    }

    #[test]
    fn binarizes_without_sharing() {
        let mut tm = TermManager::new();
        let xs: Vec<TermId> = (0..5)
            .map(|i| tm.declare_const(&format!("x{i}"), Sort::BitVec(2)).unwrap())
            .collect();
        let conjunction = tm.mk_bv_and(&xs).unwrap();

        let mut sharing = MaxBvSharing::default();
        let binary = sharing.rewrite(&mut tm, conjunction);

        let mut todo = vec![binary];
        while let Some(term) = todo.pop() {
            if tm.op(term) == &Op::BvAnd {
                assert_eq!(tm.args(term).len(), 2);
                todo.extend_from_slice(tm.args(term));
            }
        }
    }
}
