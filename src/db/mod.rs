/*!
Databases which persist between queries of a context.

- The [atom map](atom_map) pairs boolean terms with the engine atoms they were lowered to.
- The [bit-blast map](blast_map) pairs bit-vector constants with the boolean constants of their bits.
- The [dependency map](dependency) pairs assumption terms with engine literals, though only for the duration of a single query.

The persistent maps are scoped, and are pushed and popped in step with the context.
*/

pub mod atom_map;
pub mod blast_map;
pub mod dependency;

/// Structures with a stack of scopes.
///
/// A pop restores the structure to exactly the state it had at the matching push, and a pop of more scopes than exist pops every scope.
pub trait Scoped {
    /// Opens a scope.
    fn push_scope(&mut self);

    /// Closes the given number of scopes, with the count clamped to the current depth.
    fn pop_scopes(&mut self, count: usize);

    /// The number of open scopes.
    fn scope_depth(&self) -> usize;
}
