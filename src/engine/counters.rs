use crate::{generic::luby::Luby, reports::Statistics};

/// Counts for various things which count, roughly.
#[derive(Default)]
pub struct Counters {
    /// A count of queries.
    pub checks: usize,

    /// A count of every conflict seen.
    pub conflicts: usize,

    /// A count of conflicts seen since the last restart.
    pub fresh_conflicts: usize,

    /// A count of all decisions made, excluding assumptions.
    pub decisions: usize,

    /// A count of literals propagated.
    pub propagations: usize,

    /// The number of restarts.
    pub restarts: usize,

    /// A count of clauses learnt.
    pub learnt: usize,

    /// The current element in the luby sequence.
    pub luby: Luby,
}

impl Counters {
    pub fn collect(&self, stats: &mut Statistics) {
        stats.update("sat checks", self.checks as u64);
        stats.update("sat conflicts", self.conflicts as u64);
        stats.update("sat decisions", self.decisions as u64);
        stats.update("sat propagations", self.propagations as u64);
        stats.update("sat restarts", self.restarts as u64);
        stats.update("sat learnt", self.learnt as u64);
    }
}
