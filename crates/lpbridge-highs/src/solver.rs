//! HiGHS solver adapter.

use crate::handle::{HighsHandle, BACKEND};
use crate::status::{classify, is_limit};
use highs::{Col, HighsModelStatus, Model, RowProblem, Sense as HighsSense};
use lpbridge_core::{
    recorded_solution, recorded_status, verbosity_enables_output, ComparisonSense, LpError,
    LpHandle, LpSolver, Param, ParamSet, ParamValue, Sense, Solution, SolveOutcome, Status,
    VarKind,
};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, trace, warn};

const DEFAULT_FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Solver bound to the HiGHS backend.
///
/// Holds the applied parameter set and the outcome of the most recent
/// solve. The native problem object is rebuilt from the handle at each
/// `solve` call, so parameter changes take effect from the next solve.
#[derive(Debug, Default)]
pub struct HighsSolver {
    params: ParamSet,
    outcome: Option<SolveOutcome>,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn native_option(param: Param) -> &'static str {
        match param {
            Param::Threads => "threads",
            Param::Verbosity => "output_flag",
            Param::TimeLimit => "time_limit",
            Param::IterationLimit => "simplex_iteration_limit",
            Param::FeasibilityTolerance => "primal_feasibility_tolerance",
            Param::RandomSeed => "random_seed",
        }
    }

    fn apply_parameters(&self, model: &mut Model) {
        if verbosity_enables_output(&self.params) {
            model.set_option("output_flag", true);
        } else {
            model.make_quiet();
        }
        if let Some(threads) = self.params.int(Param::Threads) {
            model.set_option("threads", threads);
        }
        if let Some(limit) = self.params.float(Param::TimeLimit) {
            model.set_option("time_limit", limit);
        }
        if let Some(iterations) = self.params.int(Param::IterationLimit) {
            model.set_option("simplex_iteration_limit", iterations);
        }
        if let Some(tolerance) = self.params.float(Param::FeasibilityTolerance) {
            model.set_option("primal_feasibility_tolerance", tolerance);
            model.set_option("dual_feasibility_tolerance", tolerance);
        }
        if let Some(seed) = self.params.int(Param::RandomSeed) {
            model.set_option("random_seed", seed);
        }
    }

    fn feasibility_tolerance(&self) -> f64 {
        self.params
            .float(Param::FeasibilityTolerance)
            .unwrap_or(DEFAULT_FEASIBILITY_TOLERANCE)
    }
}

fn validate_handle(handle: &HighsHandle) -> Result<(), LpError> {
    if handle.num_variables() == 0 {
        return Err(LpError::BackendRejected {
            backend: BACKEND,
            reason: "model has no variables".to_string(),
        });
    }
    Ok(())
}

fn build_problem(handle: &HighsHandle) -> Result<RowProblem, LpError> {
    let mut objective_coeffs: BTreeMap<_, f64> = BTreeMap::new();
    for (var_id, coeff) in &handle.objective().terms {
        *objective_coeffs.entry(*var_id).or_insert(0.0) += *coeff;
    }

    let mut problem = RowProblem::default();
    let mut cols: Vec<Col> = Vec::with_capacity(handle.num_variables());
    for (var_id, var) in handle.variables() {
        let obj_coeff = objective_coeffs.get(&var_id).copied().unwrap_or(0.0);
        let col = match var.kind {
            VarKind::Continuous => {
                problem.add_column(obj_coeff, var.bounds.lower..=var.bounds.upper)
            }
            VarKind::Integer | VarKind::Binary => {
                problem.add_integer_column(obj_coeff, var.bounds.lower..=var.bounds.upper)
            }
        };
        trace!(
            component = "solver",
            operation = "add_column",
            status = "success",
            backend = BACKEND,
            var_id = var_id.inner(),
            lower = var.bounds.lower,
            upper = var.bounds.upper,
            obj_coeff,
            kind = var.kind.as_str(),
            "Added column to HiGHS problem"
        );
        cols.push(col);
    }

    for (constraint_id, constraint) in handle.constraints() {
        let mut factors = Vec::with_capacity(constraint.terms.len());
        for (var_id, coeff) in &constraint.terms {
            let col_idx = handle
                .native_col(*var_id)
                .ok_or(LpError::UnknownVariable(*var_id))?;
            factors.push((cols[col_idx], *coeff));
        }
        let (row_lower, row_upper) = match constraint.sense {
            ComparisonSense::LessEqual => (f64::NEG_INFINITY, constraint.rhs),
            ComparisonSense::GreaterEqual => (constraint.rhs, f64::INFINITY),
            ComparisonSense::Equal => (constraint.rhs, constraint.rhs),
        };
        problem.add_row(row_lower..=row_upper, factors);
        trace!(
            component = "solver",
            operation = "add_row",
            status = "success",
            backend = BACKEND,
            constraint_id = constraint_id.inner(),
            num_terms = constraint.terms.len(),
            sense = constraint.sense.as_str(),
            rhs = constraint.rhs,
            "Added row to HiGHS problem"
        );
    }

    Ok(problem)
}

/// Objective value of a primal point, including the constant offset. The
/// native objective value is not trusted across backends; recomputing from
/// the handle's own coefficients keeps the reported value uniform.
fn evaluate_objective(handle: &HighsHandle, values: &[f64]) -> f64 {
    let objective = handle.objective();
    let mut total = objective.constant;
    for (var_id, coeff) in &objective.terms {
        if let Some(col_idx) = handle.native_col(*var_id) {
            if let Some(value) = values.get(col_idx) {
                total += coeff * value;
            }
        }
    }
    total
}

/// Native column values rearranged into variable identifier order, the
/// layout `Solution` stores. Identity while HiGHS columns are assigned in
/// declaration order, but routed through the id-to-column table so a
/// reordering backend cannot skew lookups.
fn primal_in_id_order(handle: &HighsHandle, values: &[f64]) -> Vec<f64> {
    handle
        .variables()
        .map(|(var_id, _)| {
            handle
                .native_col(var_id)
                .and_then(|col| values.get(col).copied())
                .unwrap_or(f64::NAN)
        })
        .collect()
}

/// Verify an incumbent primal point: every value finite and within its
/// variable's bounds, every row satisfied within tolerance. Used to decide
/// whether a resource-limit termination left anything worth returning.
fn primal_is_usable(handle: &HighsHandle, values: &[f64], tolerance: f64) -> bool {
    if values.len() != handle.num_variables() {
        return false;
    }
    for (var_id, var) in handle.variables() {
        let Some(col_idx) = handle.native_col(var_id) else {
            return false;
        };
        let value = values[col_idx];
        if !value.is_finite()
            || value < var.bounds.lower - tolerance
            || value > var.bounds.upper + tolerance
        {
            return false;
        }
    }
    for (_, constraint) in handle.constraints() {
        let mut activity = 0.0;
        for (var_id, coeff) in &constraint.terms {
            match handle.native_col(*var_id) {
                Some(col_idx) => activity += coeff * values[col_idx],
                None => return false,
            }
        }
        let slack = tolerance * (1.0 + constraint.rhs.abs());
        let satisfied = match constraint.sense {
            ComparisonSense::LessEqual => activity <= constraint.rhs + slack,
            ComparisonSense::GreaterEqual => activity >= constraint.rhs - slack,
            ComparisonSense::Equal => (activity - constraint.rhs).abs() <= slack,
        };
        if !satisfied {
            return false;
        }
    }
    true
}

impl LpSolver for HighsSolver {
    type Handle = HighsHandle;

    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn set_parameter(&mut self, param: Param, value: ParamValue) -> Result<(), LpError> {
        if value.kind() != param.kind() {
            return Err(LpError::InvalidParameterType {
                param,
                expected: param.kind(),
                got: value.kind(),
            });
        }
        self.params.set(param, value)?;
        debug!(
            component = "solver",
            operation = "set_parameter",
            status = "success",
            backend = BACKEND,
            param = param.as_str(),
            native_option = Self::native_option(param),
            value = ?value,
            "Applied solver parameter"
        );
        Ok(())
    }

    fn parameters(&self) -> &ParamSet {
        &self.params
    }

    fn solve(&mut self, handle: &Self::Handle) -> Result<Status, LpError> {
        validate_handle(handle)?;

        let solve_started = Instant::now();
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            backend = BACKEND,
            variables = handle.num_variables() as u64,
            constraints = handle.num_constraints() as u64,
            "Starting HiGHS solve"
        );

        let problem = build_problem(handle)?;
        let highs_sense = match handle.objective_sense() {
            Sense::Minimize => HighsSense::Minimise,
            Sense::Maximize => HighsSense::Maximise,
        };
        let mut model = problem.optimise(highs_sense);
        self.apply_parameters(&mut model);

        let solved = model.solve();
        let native = solved.status();
        let solve_seconds = solve_started.elapsed().as_secs_f64();

        let values = if native == HighsModelStatus::Optimal || is_limit(native) {
            Some(solved.get_solution().columns().to_vec())
        } else {
            None
        };
        let usable = values
            .as_deref()
            .map(|v| primal_is_usable(handle, v, self.feasibility_tolerance()))
            .unwrap_or(false);
        let status = classify(native, usable);

        let solution = if status.has_solution() {
            values.map(|v| {
                let objective_value = evaluate_objective(handle, &v);
                Solution::new(
                    primal_in_id_order(handle, &v),
                    objective_value,
                    status,
                    solve_seconds,
                )
            })
        } else {
            None
        };

        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            backend = BACKEND,
            solver_status = ?native,
            uniform_status = status.as_str(),
            objective_value = solution.as_ref().map(Solution::objective_value),
            duration_ms = solve_seconds * 1000.0,
            "HiGHS solve completed"
        );
        if !status.has_solution() {
            warn!(
                component = "solver",
                operation = "solve",
                status = "warn",
                backend = BACKEND,
                solver_status = ?native,
                uniform_status = status.as_str(),
                "Solve terminated without a usable solution"
            );
        }

        self.outcome = Some(SolveOutcome::new(status, solution));
        Ok(status)
    }

    fn solution_status(&self) -> Result<Status, LpError> {
        recorded_status(self.outcome.as_ref())
    }

    fn solution(&self) -> Result<&Solution, LpError> {
        recorded_solution(self.outcome.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpbridge_core::{Bounds, ParamKind};

    fn two_var_handle() -> HighsHandle {
        let mut handle = HighsHandle::new();
        let x = handle
            .add_variable(Bounds::new(0.0, 10.0), VarKind::Continuous)
            .unwrap();
        let y = handle
            .add_variable(Bounds::new(0.0, 10.0), VarKind::Continuous)
            .unwrap();
        handle
            .add_constraint(&[(x, 1.0), (y, 1.0)], ComparisonSense::GreaterEqual, 5.0)
            .unwrap();
        handle.set_objective(&[(x, 2.0), (y, 3.0)], 0.0).unwrap();
        handle
    }

    #[test]
    fn test_objective_evaluation_includes_constant() {
        let mut handle = HighsHandle::new();
        let x = handle
            .add_variable(Bounds::new(0.0, 10.0), VarKind::Continuous)
            .unwrap();
        handle.set_objective(&[(x, 2.0)], 7.0).unwrap();
        assert!((evaluate_objective(&handle, &[3.0]) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_primal_usability_checks_rows_and_bounds() {
        let handle = two_var_handle();
        assert!(primal_is_usable(&handle, &[5.0, 0.0], 1e-6));
        // Row violated: x + y < 5.
        assert!(!primal_is_usable(&handle, &[1.0, 1.0], 1e-6));
        // Bound violated: x > 10.
        assert!(!primal_is_usable(&handle, &[11.0, 0.0], 1e-6));
        assert!(!primal_is_usable(&handle, &[f64::NAN, 5.0], 1e-6));
        assert!(!primal_is_usable(&handle, &[5.0], 1e-6));
    }

    #[test]
    fn test_primal_reordering_goes_through_the_column_table() {
        let handle = two_var_handle();
        let native = [5.0, 0.5];
        let ordered = primal_in_id_order(&handle, &native);
        for (var_id, _) in handle.variables() {
            let col = handle.native_col(var_id).unwrap();
            assert_eq!(ordered[var_id.inner() as usize], native[col]);
        }
        // A missing native value must not shift its neighbours.
        let truncated = primal_in_id_order(&handle, &native[..1]);
        assert_eq!(truncated[0], 5.0);
        assert!(truncated[1].is_nan());
    }

    #[test]
    fn test_type_mismatch_leaves_parameters_unchanged() {
        let mut solver = HighsSolver::new();
        solver
            .set_parameter(Param::Threads, ParamValue::Int(2))
            .unwrap();
        let err = solver
            .set_parameter(Param::Threads, ParamValue::Float(4.0))
            .unwrap_err();
        assert!(matches!(
            err,
            LpError::InvalidParameterType {
                param: Param::Threads,
                expected: ParamKind::Int,
                got: ParamKind::Float,
            }
        ));
        assert_eq!(solver.parameters().int(Param::Threads), Some(2));
    }

    #[test]
    fn test_empty_model_is_rejected_before_reaching_highs() {
        let handle = HighsHandle::new();
        let mut solver = HighsSolver::new();
        let err = solver.solve(&handle).unwrap_err();
        assert_eq!(err.code(), "BACKEND_REJECTED");
        assert!(matches!(
            solver.solution_status().unwrap_err(),
            LpError::NoSolveYet
        ));
    }
}
