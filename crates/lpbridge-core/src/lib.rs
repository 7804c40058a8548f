//! Backend-agnostic linear programming abstractions.
//!
//! This crate defines the uniform vocabulary and contracts that concrete
//! solver adapters (like `lpbridge-highs` and `lpbridge-clarabel`) implement:
//!
//! - [`LpHandle`]: mutable representation of one LP model
//! - [`LpSolver`]: parameterization, solve invocation, and result retrieval
//! - [`Param`] / [`ParamValue`] / [`ParamSet`]: typed, closed parameter vocabulary
//! - [`Status`]: uniform solve-outcome classification
//! - [`LpError`]: uniform error taxonomy; no native error type crosses it
//!
//! A handle and solver for the same model must come from the same backend
//! family; the [`LpSolver::Handle`] associated type makes cross-backend
//! pairing a compile error.

pub mod error;
pub mod ids;
pub mod model;
pub mod param;
pub mod solution;
pub mod status;
pub mod traits;
pub mod types;

pub use error::LpError;
pub use ids::{ConstraintId, VariableId};
pub use model::ModelStore;
pub use param::{verbosity_enables_output, Param, ParamKind, ParamSet, ParamValue};
pub use solution::{recorded_solution, recorded_status, Solution, SolveOutcome};
pub use status::Status;
pub use traits::{LpHandle, LpSolver};
pub use types::{Bounds, ComparisonSense, Constraint, Objective, Sense, VarKind, Variable};
