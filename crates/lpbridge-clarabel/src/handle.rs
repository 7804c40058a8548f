//! Clarabel-side model handle.

use lpbridge_core::{
    Bounds, ComparisonSense, Constraint, ConstraintId, LpError, LpHandle, ModelStore, Objective,
    Sense, VarKind, Variable, VariableId,
};
use std::collections::BTreeMap;
use tracing::trace;

pub(crate) const BACKEND: &str = "clarabel";

/// Model handle bound to the Clarabel backend.
///
/// Clarabel is a continuous conic solver, so integer and binary variables
/// are rejected at declaration time. The paired solver assembles the conic
/// form (objective vector, CSC constraint matrix, cone list) from this
/// handle at each solve.
#[derive(Debug, Clone)]
pub struct ClarabelHandle {
    store: ModelStore,
    native_cols: BTreeMap<VariableId, usize>,
}

impl ClarabelHandle {
    pub fn new() -> Self {
        Self {
            store: ModelStore::new(BACKEND),
            native_cols: BTreeMap::new(),
        }
    }

    /// Native column index assigned to a variable, if the handle issued it.
    pub fn native_col(&self, id: VariableId) -> Option<usize> {
        self.native_cols.get(&id).copied()
    }

    pub fn objective(&self) -> &Objective {
        self.store.objective()
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.store.variable(id)
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.store.constraint(id)
    }

    /// Variables in identifier order, which matches native column order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.store.variables()
    }

    /// Constraints in identifier order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.store.constraints()
    }
}

impl Default for ClarabelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LpHandle for ClarabelHandle {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn add_variable(&mut self, bounds: Bounds, kind: VarKind) -> Result<VariableId, LpError> {
        if kind != VarKind::Continuous {
            return Err(LpError::BackendRejected {
                backend: BACKEND,
                reason: format!("{} variables are not supported", kind.as_str()),
            });
        }
        let id = self.store.add_variable(bounds, kind)?;
        let col = self.native_cols.len();
        self.native_cols.insert(id, col);
        trace!(
            component = "handle",
            operation = "add_variable",
            status = "success",
            backend = BACKEND,
            var_id = id.inner(),
            col,
            "Mapped variable to Clarabel column"
        );
        Ok(id)
    }

    fn add_constraint(
        &mut self,
        terms: &[(VariableId, f64)],
        sense: ComparisonSense,
        rhs: f64,
    ) -> Result<ConstraintId, LpError> {
        self.store.add_constraint(terms, sense, rhs)
    }

    fn set_objective(
        &mut self,
        terms: &[(VariableId, f64)],
        constant: f64,
    ) -> Result<(), LpError> {
        self.store.set_objective(terms, constant)
    }

    fn set_objective_sense(&mut self, sense: Sense) {
        self.store.set_objective_sense(sense);
    }

    fn num_variables(&self) -> usize {
        self.store.num_variables()
    }

    fn num_constraints(&self) -> usize {
        self.store.num_constraints()
    }

    fn objective_sense(&self) -> Sense {
        self.store.sense()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_kinds_are_rejected_without_consuming_an_id() {
        let mut handle = ClarabelHandle::new();
        for kind in [VarKind::Integer, VarKind::Binary] {
            let err = handle.add_variable(Bounds::new(0.0, 1.0), kind).unwrap_err();
            assert_eq!(err.code(), "BACKEND_REJECTED");
        }
        assert_eq!(handle.num_variables(), 0);

        let x = handle
            .add_variable(Bounds::new(0.0, 1.0), VarKind::Continuous)
            .unwrap();
        assert_eq!(x.inner(), 0);
        assert_eq!(handle.native_col(x), Some(0));
    }

    #[test]
    fn test_invalid_bounds_still_fail_before_kind_validation_matters() {
        let mut handle = ClarabelHandle::new();
        let err = handle
            .add_variable(Bounds::new(2.0, 1.0), VarKind::Continuous)
            .unwrap_err();
        assert_eq!(err.code(), "BOUNDS_INVALID");
    }
}
