//! HiGHS-side model handle.

use lpbridge_core::{
    Bounds, ComparisonSense, Constraint, ConstraintId, LpError, LpHandle, ModelStore, Objective,
    Sense, VarKind, Variable, VariableId,
};
use std::collections::BTreeMap;
use tracing::trace;

pub(crate) const BACKEND: &str = "highs";

/// Model handle bound to the HiGHS backend.
///
/// HiGHS builds its problem object in one shot, so the handle keeps the
/// validated model in memory together with an explicit identifier-to-column
/// table; the paired solver materializes the native problem at each solve.
#[derive(Debug, Clone)]
pub struct HighsHandle {
    store: ModelStore,
    native_cols: BTreeMap<VariableId, usize>,
}

impl HighsHandle {
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

    /// Constraints in identifier order, which matches native row order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.store.constraints()
    }
}

impl Default for HighsHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl LpHandle for HighsHandle {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    fn add_variable(&mut self, bounds: Bounds, kind: VarKind) -> Result<VariableId, LpError> {
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
            "Mapped variable to HiGHS column"
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
    fn test_columns_follow_variable_ids() {
        let mut handle = HighsHandle::new();
        let a = handle
            .add_variable(Bounds::new(0.0, 1.0), VarKind::Continuous)
            .unwrap();
        let b = handle
            .add_variable(Bounds::free(), VarKind::Continuous)
            .unwrap();
        assert_eq!(handle.native_col(a), Some(0));
        assert_eq!(handle.native_col(b), Some(1));
        assert_eq!(handle.native_col(VariableId::new(7)), None);
    }

    #[test]
    fn test_rejected_variable_gets_no_column() {
        let mut handle = HighsHandle::new();
        let err = handle
            .add_variable(Bounds::new(3.0, -3.0), VarKind::Continuous)
            .unwrap_err();
        assert_eq!(err.code(), "BOUNDS_INVALID");
        assert_eq!(handle.num_variables(), 0);
        assert!(handle.native_col(VariableId::new(0)).is_none());
    }

    #[test]
    fn test_constraint_rejects_foreign_variable() {
        let mut handle = HighsHandle::new();
        let x = handle
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();
        let foreign = VariableId::new(99);
        let err = handle
            .add_constraint(&[(x, 1.0), (foreign, 2.0)], ComparisonSense::LessEqual, 4.0)
            .unwrap_err();
        assert!(matches!(err, LpError::UnknownVariable(id) if id == foreign));
        assert_eq!(handle.num_constraints(), 0);
    }
}
