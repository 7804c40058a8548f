//! Uniform error taxonomy.
//!
//! Adapters classify every native failure into one of these kinds at the
//! adapter boundary; no backend-specific error type crosses the abstraction.

use crate::ids::VariableId;
use crate::param::{Param, ParamKind};
use crate::status::Status;

/// Error type for handle and solver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LpError {
    /// Variable or constraint bounds with lower > upper (or NaN).
    InvalidBounds { lower: f64, upper: f64 },
    /// A term referenced an identifier not issued by this handle.
    UnknownVariable(VariableId),
    /// The backend has no native counterpart for this parameter key.
    UnknownParameter {
        backend: &'static str,
        param: Param,
    },
    /// Parameter value kind does not match the key's declared kind.
    InvalidParameterType {
        param: Param,
        expected: ParamKind,
        got: ParamKind,
    },
    /// The native backend rejected an operation; the native cause is
    /// captured as text only.
    BackendRejected {
        backend: &'static str,
        reason: String,
    },
    /// `solution_status` or solution retrieval before any `solve` call.
    NoSolveYet,
    /// Solution retrieval when the recorded status carries no usable solution.
    NoUsableSolution { status: Status },
}

impl LpError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LpError::InvalidBounds { .. } => "BOUNDS_INVALID",
            LpError::UnknownVariable(_) => "VARIABLE_UNKNOWN",
            LpError::UnknownParameter { .. } => "PARAMETER_UNKNOWN",
            LpError::InvalidParameterType { .. } => "PARAMETER_INVALID_TYPE",
            LpError::BackendRejected { .. } => "BACKEND_REJECTED",
            LpError::NoSolveYet => "SOLVE_NOT_CALLED",
            LpError::NoUsableSolution { .. } => "SOLUTION_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for LpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LpError::InvalidBounds { lower, upper } => write!(
                f,
                "[{}] Bounds invalid: lower ({}) must not exceed upper ({})",
                self.code(),
                lower,
                upper
            ),
            LpError::UnknownVariable(id) => write!(
                f,
                "[{}] Variable ID {} was not issued by this handle",
                self.code(),
                id
            ),
            LpError::UnknownParameter { backend, param } => write!(
                f,
                "[{}] Parameter {} is not supported by the {} backend",
                self.code(),
                param,
                backend
            ),
            LpError::InvalidParameterType {
                param,
                expected,
                got,
            } => write!(
                f,
                "[{}] Parameter {} requires a {} value, got {}",
                self.code(),
                param,
                expected,
                got
            ),
            LpError::BackendRejected { backend, reason } => {
                write!(f, "[{}] {} rejected operation: {}", self.code(), backend, reason)
            }
            LpError::NoSolveYet => {
                write!(f, "[{}] No solve has been performed yet", self.code())
            }
            LpError::NoUsableSolution { status } => write!(
                f,
                "[{}] No usable solution for status {}",
                self.code(),
                status
            ),
        }
    }
}

impl std::error::Error for LpError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_bounds() {
        let err = LpError::InvalidBounds {
            lower: 2.0,
            upper: 1.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("BOUNDS_INVALID"));
        assert!(msg.contains('2'));
        assert!(msg.contains('1'));
    }

    #[test]
    fn test_error_display_unknown_variable() {
        let err = LpError::UnknownVariable(VariableId::new(42));
        let msg = format!("{err}");
        assert!(msg.contains("VARIABLE_UNKNOWN"));
        assert!(msg.contains("42"));
    }

    #[test]
    fn test_error_display_unknown_parameter() {
        let err = LpError::UnknownParameter {
            backend: "clarabel",
            param: Param::RandomSeed,
        };
        let msg = format!("{err}");
        assert!(msg.contains("PARAMETER_UNKNOWN"));
        assert!(msg.contains("random_seed"));
        assert!(msg.contains("clarabel"));
    }

    #[test]
    fn test_error_display_invalid_parameter_type() {
        let err = LpError::InvalidParameterType {
            param: Param::TimeLimit,
            expected: ParamKind::Float,
            got: ParamKind::Int,
        };
        let msg = format!("{err}");
        assert!(msg.contains("PARAMETER_INVALID_TYPE"));
        assert!(msg.contains("time_limit"));
        assert!(msg.contains("float"));
    }

    #[test]
    fn test_error_display_no_usable_solution() {
        let err = LpError::NoUsableSolution {
            status: Status::Infeasible,
        };
        let msg = format!("{err}");
        assert!(msg.contains("SOLUTION_UNAVAILABLE"));
        assert!(msg.contains("infeasible"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LpError::NoSolveYet.code(), "SOLVE_NOT_CALLED");
        assert_eq!(
            LpError::BackendRejected {
                backend: "highs",
                reason: String::new()
            }
            .code(),
            "BACKEND_REJECTED"
        );
    }
}
