//! Solve outcome and solution data, uniform across backends.

use crate::error::LpError;
use crate::ids::VariableId;
use crate::status::Status;

/// Solver-agnostic solution from one solve invocation.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Primal values indexed by variable identifier order.
    primal: Vec<f64>,
    /// Objective value achieved, including the objective constant.
    objective_value: f64,
    /// Status the solve terminated with.
    status: Status,
    /// Wall-clock solve time in seconds.
    solve_time_seconds: f64,
}

impl Solution {
    /// `primal` must be ordered by variable identifier: one value per
    /// issued identifier, starting from zero. Adapters whose native column
    /// order differs from identifier order rearrange through their
    /// id-to-native table before constructing.
    pub fn new(
        primal: Vec<f64>,
        objective_value: f64,
        status: Status,
        solve_time_seconds: f64,
    ) -> Self {
        Self {
            primal,
            objective_value,
            status,
            solve_time_seconds,
        }
    }

    /// Solved value of one variable, by the identifier its handle issued.
    pub fn value(&self, id: VariableId) -> Option<f64> {
        self.primal.get(id.inner() as usize).copied()
    }

    /// All primal values in variable identifier order.
    pub fn values(&self) -> &[f64] {
        &self.primal
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }
}

/// Result of the most recent solve, recorded by a solver.
///
/// A solution is only present when the status permits one; the retrieval
/// rules (`NoSolveYet`, `NoUsableSolution`) live here so every backend
/// enforces them identically.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    status: Status,
    solution: Option<Solution>,
}

impl SolveOutcome {
    /// Record an outcome. A solution passed alongside a status that carries
    /// no usable solution is discarded.
    pub fn new(status: Status, solution: Option<Solution>) -> Self {
        let solution = if status.has_solution() {
            solution
        } else {
            None
        };
        Self { status, solution }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Retrieve the solution.
    ///
    /// # Errors
    ///
    /// Returns `NoUsableSolution` when the status carries no solution.
    pub fn solution(&self) -> Result<&Solution, LpError> {
        self.solution.as_ref().ok_or(LpError::NoUsableSolution {
            status: self.status,
        })
    }
}

/// Shared helpers for solvers holding an `Option<SolveOutcome>`.
pub fn recorded_status(outcome: Option<&SolveOutcome>) -> Result<Status, LpError> {
    outcome.map(SolveOutcome::status).ok_or(LpError::NoSolveYet)
}

pub fn recorded_solution(outcome: Option<&SolveOutcome>) -> Result<&Solution, LpError> {
    outcome.ok_or(LpError::NoSolveYet)?.solution()
}
