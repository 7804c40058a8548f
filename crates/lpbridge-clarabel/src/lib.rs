//! Clarabel adapter for the lpbridge solver abstraction.
//!
//! Maps the uniform handle/solver interface onto the `clarabel` crate's
//! conic form. Clarabel handles continuous problems only; integer and
//! binary variables are rejected at declaration time. The solver assembles
//! the objective vector, CSC constraint matrix, and cone list per solve,
//! translates applied parameters to `DefaultSettings`, and maps Clarabel
//! termination statuses onto the uniform status vocabulary.

pub mod handle;
pub mod solver;
mod status;

pub use handle::ClarabelHandle;
pub use solver::ClarabelSolver;
