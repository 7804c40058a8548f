//! Validated in-memory model bookkeeping shared by handle adapters.
//!
//! Concrete handles embed a [`ModelStore`] for the abstract side of the
//! model (identifier issuance, validation, objective replacement) and keep
//! their backend-native index tables next to it. All operations mutate
//! in-memory state only; rejected operations leave the store unchanged.

use crate::error::LpError;
use crate::ids::{ConstraintId, VariableId};
use crate::param::sense_str;
use crate::types::{Bounds, ComparisonSense, Constraint, Objective, Sense, VarKind, Variable};
use std::collections::{BTreeMap, BTreeSet};

/// Owned model state: variables, constraints, one objective, one sense.
///
/// Identifiers are monotonically assigned and never reused within the
/// store's lifetime.
#[derive(Debug, Clone)]
pub struct ModelStore {
    backend: &'static str,
    variables: BTreeMap<VariableId, Variable>,
    constraints: BTreeMap<ConstraintId, Constraint>,
    objective: Objective,
    sense: Sense,
    next_variable_id: u32,
    next_constraint_id: u32,
}

impl ModelStore {
    /// Create an empty store tagged with the owning adapter's backend name.
    pub fn new(backend: &'static str) -> Self {
        Self {
            backend,
            variables: BTreeMap::new(),
            constraints: BTreeMap::new(),
            objective: Objective::new(),
            sense: Sense::Minimize,
            next_variable_id: 0,
            next_constraint_id: 0,
        }
    }

    /// Backend name this store was created for.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Add a variable.
    ///
    /// Binary variables have their bounds intersected with [0, 1].
    ///
    /// # Errors
    ///
    /// Returns `InvalidBounds` when `lower > upper` or either side is NaN.
    pub fn add_variable(&mut self, bounds: Bounds, kind: VarKind) -> Result<VariableId, LpError> {
        if !bounds.is_valid() {
            return Err(LpError::InvalidBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        let bounds = match kind {
            VarKind::Binary => Bounds::new(bounds.lower.max(0.0), bounds.upper.min(1.0)),
            _ => bounds,
        };
        if !bounds.is_valid() {
            return Err(LpError::InvalidBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }

        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;
        self.variables.insert(id, Variable { bounds, kind });

        tracing::trace!(
            component = "model",
            operation = "add_variable",
            status = "success",
            backend = self.backend,
            var_id = id.inner(),
            lower = bounds.lower,
            upper = bounds.upper,
            kind = kind.as_str(),
            "Added variable"
        );
        Ok(id)
    }

    /// Add a constraint row.
    ///
    /// # Errors
    ///
    /// Returns `UnknownVariable` when any term references an identifier not
    /// issued by this store, and `BackendRejected` when a variable appears
    /// in more than one term of the row.
    pub fn add_constraint(
        &mut self,
        terms: &[(VariableId, f64)],
        sense: ComparisonSense,
        rhs: f64,
    ) -> Result<ConstraintId, LpError> {
        let mut seen = BTreeSet::new();
        for (var_id, _) in terms {
            self.ensure_variable_exists(*var_id)?;
            if !seen.insert(*var_id) {
                return Err(LpError::BackendRejected {
                    backend: self.backend,
                    reason: format!("duplicate term for variable {var_id} in constraint row"),
                });
            }
        }

        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        self.constraints.insert(
            id,
            Constraint {
                terms: terms.to_vec(),
                sense,
                rhs,
            },
        );

        tracing::trace!(
            component = "model",
            operation = "add_constraint",
            status = "success",
            backend = self.backend,
            constraint_id = id.inner(),
            num_terms = terms.len(),
            sense = sense.as_str(),
            rhs,
            "Added constraint"
        );
        Ok(id)
    }

    /// Replace the objective's linear terms and constant in full.
    ///
    /// Does not alter the objective sense.
    ///
    /// # Errors
    ///
    /// Returns `UnknownVariable` when any term references a foreign
    /// identifier; the prior objective stays in effect.
    pub fn set_objective(
        &mut self,
        terms: &[(VariableId, f64)],
        constant: f64,
    ) -> Result<(), LpError> {
        for (var_id, _) in terms {
            self.ensure_variable_exists(*var_id)?;
        }
        self.objective = Objective {
            terms: terms.to_vec(),
            constant,
        };

        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            backend = self.backend,
            num_terms = terms.len(),
            constant,
            "Replaced objective function"
        );
        Ok(())
    }

    /// Set minimize/maximize independently of the objective coefficients.
    pub fn set_objective_sense(&mut self, sense: Sense) {
        self.sense = sense;
        tracing::debug!(
            component = "model",
            operation = "set_objective_sense",
            status = "success",
            backend = self.backend,
            sense = sense_str(sense),
            "Set objective sense"
        );
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variable(&self, id: VariableId) -> Option<&Variable> {
        self.variables.get(&id)
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(&id)
    }

    /// Variables in identifier order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables.iter().map(|(id, var)| (*id, var))
    }

    /// Constraints in identifier order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints.iter().map(|(id, con)| (*id, con))
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), LpError> {
        if self.variables.contains_key(&id) {
            Ok(())
        } else {
            Err(LpError::UnknownVariable(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ModelStore {
        ModelStore::new("test")
    }

    #[test]
    fn test_variable_ids_are_monotonic_and_unique() {
        let mut model = store();
        let a = model
            .add_variable(Bounds::new(0.0, 1.0), VarKind::Continuous)
            .unwrap();
        let b = model
            .add_variable(Bounds::free(), VarKind::Continuous)
            .unwrap();
        let c = model
            .add_variable(Bounds::non_negative(), VarKind::Integer)
            .unwrap();
        assert_eq!(a.inner(), 0);
        assert_eq!(b.inner(), 1);
        assert_eq!(c.inner(), 2);
    }

    #[test]
    fn test_rejected_variable_does_not_consume_id() {
        let mut model = store();
        let err = model
            .add_variable(Bounds::new(5.0, 1.0), VarKind::Continuous)
            .unwrap_err();
        assert_eq!(err.code(), "BOUNDS_INVALID");
        assert_eq!(model.num_variables(), 0);

        let id = model
            .add_variable(Bounds::new(0.0, 1.0), VarKind::Continuous)
            .unwrap();
        assert_eq!(id.inner(), 0);
    }

    #[test]
    fn test_nan_bounds_rejected() {
        let mut model = store();
        assert!(model
            .add_variable(Bounds::new(f64::NAN, 1.0), VarKind::Continuous)
            .is_err());
    }

    #[test]
    fn test_binary_bounds_clamped() {
        let mut model = store();
        let id = model
            .add_variable(Bounds::new(-3.0, 7.0), VarKind::Binary)
            .unwrap();
        let var = model.variable(id).unwrap();
        assert_eq!(var.bounds, Bounds::new(0.0, 1.0));
    }

    #[test]
    fn test_constraint_with_foreign_variable_rejected() {
        let mut model = store();
        let x = model
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();
        let foreign = VariableId::new(99);

        let err = model
            .add_constraint(&[(x, 1.0), (foreign, 2.0)], ComparisonSense::LessEqual, 5.0)
            .unwrap_err();
        assert_eq!(err, LpError::UnknownVariable(foreign));
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_constraint_duplicate_terms_rejected() {
        let mut model = store();
        let x = model
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();
        let err = model
            .add_constraint(&[(x, 1.0), (x, 2.0)], ComparisonSense::Equal, 1.0)
            .unwrap_err();
        assert_eq!(err.code(), "BACKEND_REJECTED");
        assert_eq!(model.num_constraints(), 0);
    }

    #[test]
    fn test_objective_replacement_no_accumulation() {
        let mut model = store();
        let x = model
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();
        let y = model
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();

        model.set_objective(&[(x, 2.0), (y, 3.0)], 1.0).unwrap();
        model.set_objective(&[(y, 5.0)], 0.0).unwrap();

        let objective = model.objective();
        assert_eq!(objective.terms, vec![(y, 5.0)]);
        assert_eq!(objective.constant, 0.0);
    }

    #[test]
    fn test_objective_with_foreign_variable_keeps_prior() {
        let mut model = store();
        let x = model
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();
        model.set_objective(&[(x, 1.0)], 0.5).unwrap();

        let err = model
            .set_objective(&[(VariableId::new(7), 1.0)], 0.0)
            .unwrap_err();
        assert_eq!(err, LpError::UnknownVariable(VariableId::new(7)));
        assert_eq!(model.objective().terms, vec![(x, 1.0)]);
        assert_eq!(model.objective().constant, 0.5);
    }

    #[test]
    fn test_sense_independent_of_objective() {
        let mut model = store();
        let x = model
            .add_variable(Bounds::non_negative(), VarKind::Continuous)
            .unwrap();
        assert_eq!(model.sense(), Sense::Minimize);

        model.set_objective_sense(Sense::Maximize);
        model.set_objective(&[(x, 1.0)], 0.0).unwrap();
        assert_eq!(model.sense(), Sense::Maximize);
    }
}
