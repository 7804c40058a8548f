//! Clarabel solver adapter.
//!
//! Clarabel solves `min q'x  s.t.  Ax + s = b, s in K`. Each uniform
//! constraint becomes one row of `A`: equalities go to the zero cone,
//! `a.x <= rhs` goes to the nonnegative cone as-is, and `a.x >= rhs` is
//! negated into `-a.x <= -rhs`. Finite variable bounds are appended as
//! extra nonnegative-cone rows. Maximization negates `q`; the reported
//! objective value is recomputed from the handle's own coefficients so the
//! sign convention never leaks out.

use crate::handle::{ClarabelHandle, BACKEND};
use crate::status::classify;
use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettings, DefaultSettingsBuilder, DefaultSolver, IPSolver, SupportedConeT,
};
use lpbridge_core::{
    recorded_solution, recorded_status, verbosity_enables_output, ComparisonSense, LpError,
    LpHandle, LpSolver, Param, ParamSet, ParamValue, Sense, Solution, SolveOutcome, Status,
};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Solver bound to the Clarabel backend.
///
/// Holds the applied parameter set and the outcome of the most recent
/// solve. The native conic problem is assembled from the handle at each
/// `solve` call.
#[derive(Debug, Default)]
pub struct ClarabelSolver {
    params: ParamSet,
    outcome: Option<SolveOutcome>,
}

impl ClarabelSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clarabel setting a parameter key translates to, if any. `RandomSeed`
    /// has no native counterpart.
    fn native_setting(param: Param) -> Option<&'static str> {
        match param {
            Param::Threads => Some("max_threads"),
            Param::Verbosity => Some("verbose"),
            Param::TimeLimit => Some("time_limit"),
            Param::IterationLimit => Some("max_iter"),
            Param::FeasibilityTolerance => Some("tol_feas"),
            Param::RandomSeed => None,
        }
    }

    fn build_settings(&self) -> Result<DefaultSettings<f64>, LpError> {
        let mut builder = DefaultSettingsBuilder::<f64>::default();
        builder.verbose(verbosity_enables_output(&self.params));
        if let Some(threads) = self.params.int(Param::Threads) {
            builder.max_threads(threads.max(0) as u32);
        }
        if let Some(limit) = self.params.float(Param::TimeLimit) {
            builder.time_limit(limit);
        }
        if let Some(iterations) = self.params.int(Param::IterationLimit) {
            builder.max_iter(iterations.max(0) as u32);
        }
        if let Some(tolerance) = self.params.float(Param::FeasibilityTolerance) {
            builder.tol_feas(tolerance);
        }
        builder.build().map_err(|err| LpError::BackendRejected {
            backend: BACKEND,
            reason: format!("invalid settings: {err}"),
        })
    }
}

/// Column-major accumulator for the constraint matrix. Rows are appended
/// top to bottom, so row indices within each column stay sorted, which is
/// what `CscMatrix` expects.
struct CscBuilder {
    rowval: Vec<Vec<usize>>,
    nzval: Vec<Vec<f64>>,
    n_rows: usize,
}

impl CscBuilder {
    fn new(n_cols: usize) -> Self {
        Self {
            rowval: vec![Vec::new(); n_cols],
            nzval: vec![Vec::new(); n_cols],
            n_rows: 0,
        }
    }

    fn push_row<I: IntoIterator<Item = (usize, f64)>>(&mut self, entries: I) {
        for (col, value) in entries {
            self.rowval[col].push(self.n_rows);
            self.nzval[col].push(value);
        }
        self.n_rows += 1;
    }

    fn build(self) -> CscMatrix<f64> {
        let n_cols = self.rowval.len();
        let mut colptr = Vec::with_capacity(n_cols + 1);
        let mut nnz = 0usize;
        colptr.push(0);
        for col in &self.rowval {
            nnz += col.len();
            colptr.push(nnz);
        }
        CscMatrix::new(
            self.n_rows,
            n_cols,
            colptr,
            self.rowval.into_iter().flatten().collect(),
            self.nzval.into_iter().flatten().collect(),
        )
    }
}

/// Conic form of one handle's model, normalized to minimization.
struct ConicForm {
    objective: Vec<f64>,
    matrix: CscMatrix<f64>,
    rhs: Vec<f64>,
    cones: Vec<SupportedConeT<f64>>,
}

fn push_cone(cones: &mut Vec<SupportedConeT<f64>>, equality: bool) {
    use clarabel::solver::SupportedConeT::{NonnegativeConeT, ZeroConeT};
    match (cones.last_mut(), equality) {
        (Some(ZeroConeT(n)), true) => *n += 1,
        (Some(NonnegativeConeT(n)), false) => *n += 1,
        _ => cones.push(if equality {
            ZeroConeT(1)
        } else {
            NonnegativeConeT(1)
        }),
    }
}

fn build_form(handle: &ClarabelHandle) -> Result<ConicForm, LpError> {
    let n = handle.num_variables();

    let mut objective = vec![0.0; n];
    for (var_id, coeff) in &handle.objective().terms {
        let col = handle
            .native_col(*var_id)
            .ok_or(LpError::UnknownVariable(*var_id))?;
        objective[col] += *coeff;
    }
    if handle.objective_sense() == Sense::Maximize {
        for coeff in &mut objective {
            *coeff = -*coeff;
        }
    }

    let mut builder = CscBuilder::new(n);
    let mut rhs = Vec::new();
    let mut cones = Vec::new();

    for (constraint_id, constraint) in handle.constraints() {
        let flip = constraint.sense == ComparisonSense::GreaterEqual;
        let sign = if flip { -1.0 } else { 1.0 };
        let mut entries = Vec::with_capacity(constraint.terms.len());
        for (var_id, coeff) in &constraint.terms {
            let col = handle
                .native_col(*var_id)
                .ok_or(LpError::UnknownVariable(*var_id))?;
            entries.push((col, sign * coeff));
        }
        builder.push_row(entries);
        rhs.push(sign * constraint.rhs);
        push_cone(&mut cones, constraint.sense == ComparisonSense::Equal);
        trace!(
            component = "solver",
            operation = "add_row",
            status = "success",
            backend = BACKEND,
            constraint_id = constraint_id.inner(),
            num_terms = constraint.terms.len(),
            sense = constraint.sense.as_str(),
            rhs = constraint.rhs,
            "Added constraint row to conic form"
        );
    }

    // Finite bounds become nonnegative-cone rows of their own.
    for (var_id, var) in handle.variables() {
        let col = handle
            .native_col(var_id)
            .ok_or(LpError::UnknownVariable(var_id))?;
        if var.bounds.lower.is_finite() {
            builder.push_row([(col, -1.0)]);
            rhs.push(-var.bounds.lower);
            push_cone(&mut cones, false);
        }
        if var.bounds.upper.is_finite() {
            builder.push_row([(col, 1.0)]);
            rhs.push(var.bounds.upper);
            push_cone(&mut cones, false);
        }
    }

    Ok(ConicForm {
        objective,
        matrix: builder.build(),
        rhs,
        cones,
    })
}

/// Native column values rearranged into variable identifier order, the
/// layout `Solution` stores. Identity while columns are assigned in
/// declaration order, but routed through the id-to-column table so a
/// reordering backend cannot skew lookups.
fn primal_in_id_order(handle: &ClarabelHandle, values: &[f64]) -> Vec<f64> {
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

/// Objective value of a primal point against the handle's own coefficients
/// and constant, in the handle's declared sense.
fn evaluate_objective(handle: &ClarabelHandle, values: &[f64]) -> f64 {
    let objective = handle.objective();
    let mut total = objective.constant;
    for (var_id, coeff) in &objective.terms {
        if let Some(col) = handle.native_col(*var_id) {
            if let Some(value) = values.get(col) {
                total += coeff * value;
            }
        }
    }
    total
}

impl LpSolver for ClarabelSolver {
    type Handle = ClarabelHandle;

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
        let Some(native_setting) = Self::native_setting(param) else {
            return Err(LpError::UnknownParameter {
                backend: BACKEND,
                param,
            });
        };
        self.params.set(param, value)?;
        debug!(
            component = "solver",
            operation = "set_parameter",
            status = "success",
            backend = BACKEND,
            param = param.as_str(),
            native_setting,
            value = ?value,
            "Applied solver parameter"
        );
        Ok(())
    }

    fn parameters(&self) -> &ParamSet {
        &self.params
    }

    fn solve(&mut self, handle: &Self::Handle) -> Result<Status, LpError> {
        if handle.num_variables() == 0 {
            return Err(LpError::BackendRejected {
                backend: BACKEND,
                reason: "model has no variables".to_string(),
            });
        }

        let solve_started = Instant::now();
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            backend = BACKEND,
            variables = handle.num_variables() as u64,
            constraints = handle.num_constraints() as u64,
            "Starting Clarabel solve"
        );

        let form = build_form(handle)?;
        let settings = self.build_settings()?;
        let n = handle.num_variables();
        let quadratic = CscMatrix::zeros((n, n));

        let mut native_solver = DefaultSolver::new(
            &quadratic,
            &form.objective,
            &form.matrix,
            &form.rhs,
            &form.cones,
            settings,
        )
        .map_err(|err| LpError::BackendRejected {
            backend: BACKEND,
            reason: format!("{err:?}"),
        })?;
        native_solver.solve();

        let native = native_solver.solution.status;
        let solve_seconds = solve_started.elapsed().as_secs_f64();
        let values = native_solver.solution.x.clone();
        let finite_iterate = values.len() == n && values.iter().all(|v| v.is_finite());
        let status = classify(native, finite_iterate);

        let solution = if status.has_solution() && finite_iterate {
            let objective_value = evaluate_objective(handle, &values);
            Some(Solution::new(
                primal_in_id_order(handle, &values),
                objective_value,
                status,
                solve_seconds,
            ))
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
            "Clarabel solve completed"
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
