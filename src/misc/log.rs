/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [push and pop](crate::procedures::scope).
    pub const SCOPE: &str = "scope";

    /// Logs related to lowering formulas and assumptions to the engine.
    pub const INTERNALIZE: &str = "internalize";

    /// Logs related to the [preprocessing pipeline](crate::preprocessing).
    pub const PREPROCESSING: &str = "preprocessing";

    /// Logs related to unsatisfiable cores.
    pub const CORE: &str = "core";

    /// Logs related to consequence finding.
    pub const CONSEQUENCES: &str = "consequences";

    /// Logs related to mutex detection.
    pub const MUTEX: &str = "mutex";

    /// Logs related to model reconstruction.
    pub const MODEL: &str = "model";

    /// Logs related to the [engine](crate::engine) as a whole.
    pub const ENGINE: &str = "engine";

    /// Logs related to propagation within the engine.
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to conflict analysis within the engine.
    pub const ANALYSIS: &str = "analysis";
}
