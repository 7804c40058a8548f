//! Handle and solver traits for abstraction over solver backends.
//!
//! Concurrency contract: one solve in flight per handle/solver pair. Neither
//! trait provides internal locking; callers must not mutate a handle or set
//! parameters while a `solve` on the same pair is in progress. Distinct
//! pairs own distinct native instances and may run on separate threads.

use crate::error::LpError;
use crate::ids::{ConstraintId, VariableId};
use crate::param::{Param, ParamSet, ParamValue};
use crate::solution::Solution;
use crate::status::Status;
use crate::types::{Bounds, ComparisonSense, Sense, VarKind};

/// Mutable representation of one LP model, independent of solver backend.
///
/// All operations mutate in-memory model state only and never trigger a
/// solve. Rejected operations leave the model unchanged.
pub trait LpHandle {
    /// Name of the backend family this handle builds for.
    fn backend_name(&self) -> &'static str;

    /// Declare a variable.
    ///
    /// # Errors
    ///
    /// `InvalidBounds` when `lower > upper`; `BackendRejected` when the
    /// backend does not support the variable kind.
    fn add_variable(&mut self, bounds: Bounds, kind: VarKind) -> Result<VariableId, LpError>;

    /// Add a linear constraint row.
    ///
    /// # Errors
    ///
    /// `UnknownVariable` when any term references an identifier not issued
    /// by this handle.
    fn add_constraint(
        &mut self,
        terms: &[(VariableId, f64)],
        sense: ComparisonSense,
        rhs: f64,
    ) -> Result<ConstraintId, LpError>;

    /// Replace the objective's linear terms and constant offset in full.
    /// Does not alter the objective sense.
    fn set_objective(&mut self, terms: &[(VariableId, f64)], constant: f64)
        -> Result<(), LpError>;

    /// Set minimize/maximize independently of the coefficients.
    fn set_objective_sense(&mut self, sense: Sense);

    fn num_variables(&self) -> usize;

    fn num_constraints(&self) -> usize;

    fn objective_sense(&self) -> Sense;
}

/// Configures and executes solves against a bound handle.
///
/// The solver owns the native backend instance and the applied parameter
/// set; it references a handle only for the duration of a `solve` call.
/// The `Handle` associated type ties each solver to its backend family, so
/// cross-backend pairing does not compile.
pub trait LpSolver {
    /// The handle type this solver accepts.
    type Handle: LpHandle;

    /// Name of the backend family.
    fn backend_name(&self) -> &'static str;

    /// Apply a parameter. Applied values take effect from the next `solve`.
    ///
    /// # Errors
    ///
    /// `InvalidParameterType` when the value kind does not match the key's
    /// declared kind; `UnknownParameter` when this backend has no native
    /// counterpart for the key. Previously applied parameters are unchanged
    /// either way. A prior solve's recorded status is not reset.
    fn set_parameter(&mut self, param: Param, value: ParamValue) -> Result<(), LpError>;

    /// The currently applied parameter set.
    fn parameters(&self) -> &ParamSet;

    /// Run the backend's solve on the model currently represented by
    /// `handle`. Blocking; always records a new outcome, overwriting any
    /// prior result. Repeated calls on an unmodified handle and parameter
    /// set produce the same status.
    ///
    /// # Errors
    ///
    /// `BackendRejected` when the native backend refuses the model (for
    /// example, a model with no variables). Terminal solve outcomes such as
    /// `NumericalError` are reported as statuses, not errors.
    fn solve(&mut self, handle: &Self::Handle) -> Result<Status, LpError>;

    /// Status recorded by the most recent `solve` call.
    ///
    /// # Errors
    ///
    /// `NoSolveYet` when `solve` has never been called.
    fn solution_status(&self) -> Result<Status, LpError>;

    /// Solution recorded by the most recent `solve` call.
    ///
    /// # Errors
    ///
    /// `NoSolveYet` before any solve; `NoUsableSolution` when the recorded
    /// status carries no solution.
    fn solution(&self) -> Result<&Solution, LpError>;
}
