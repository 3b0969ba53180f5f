use crate::structures::literal::CLiteral;

/// Assignments of the engine, in order, partitioned into levels.
///
/// Level zero holds consequences of the clauses alone.
/// Each later level begins with an assumption or decision, followed by its consequences.
#[derive(Default)]
pub struct Trail {
    pub literals: Vec<CLiteral>,

    /// The index in `literals` at which each level (after level zero) begins.
    pub level_indices: Vec<usize>,

    /// The index of the next literal to propagate.
    pub q_head: usize,
}

impl Trail {
    /// The current level.
    pub fn level(&self) -> u32 {
        self.level_indices.len() as u32
    }

    /// Opens a fresh level.
    pub fn new_level(&mut self) {
        self.level_indices.push(self.literals.len());
    }

    /// Stores an assignment at the current level.
    pub fn store(&mut self, literal: CLiteral) {
        self.literals.push(literal);
    }

    /// Whether every stored literal has been propagated.
    pub fn exhausted(&self) -> bool {
        self.q_head >= self.literals.len()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The index at which assignments above `level` begin.
    pub fn start_of(&self, level: u32) -> usize {
        match self.level_indices.get(level as usize) {
            Some(index) => *index,
            None => self.literals.len(),
        }
    }
}
