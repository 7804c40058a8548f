//! Uniform solve-outcome classification.
//!
//! Every backend adapter maps its native termination codes into this
//! enumeration through an exhaustive translation table. A native code with
//! no listed counterpart becomes [`Status::UnknownBackendStatus`]; it is
//! never coerced to `Optimal`.

/// Uniform status of a solve attempt, identical in meaning across backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Optimal solution found.
    Optimal,
    /// Problem proven infeasible.
    Infeasible,
    /// Problem proven unbounded.
    Unbounded,
    /// Stopped on an iteration or time limit with a usable solution.
    SuboptimalWithinTimeLimit,
    /// Stopped on an iteration or time limit with no usable solution.
    TimeLimitNoSolution,
    /// Backend reported an unrecoverable numerical failure.
    NumericalError,
    /// Backend returned a code this adapter does not recognize.
    UnknownBackendStatus,
}

impl Status {
    /// Check if the status indicates an optimal solution.
    pub fn is_optimal(self) -> bool {
        matches!(self, Status::Optimal)
    }

    /// Check if a solution may be retrieved for this status.
    pub fn has_solution(self) -> bool {
        matches!(self, Status::Optimal | Status::SuboptimalWithinTimeLimit)
    }

    /// Check if the status indicates infeasibility.
    pub fn is_infeasible(self) -> bool {
        matches!(self, Status::Infeasible)
    }

    /// Check if the status indicates unboundedness.
    pub fn is_unbounded(self) -> bool {
        matches!(self, Status::Unbounded)
    }

    /// Get a human-readable string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Optimal => "optimal",
            Status::Infeasible => "infeasible",
            Status::Unbounded => "unbounded",
            Status::SuboptimalWithinTimeLimit => "suboptimal_within_time_limit",
            Status::TimeLimitNoSolution => "time_limit_no_solution",
            Status::NumericalError => "numerical_error",
            Status::UnknownBackendStatus => "unknown_backend_status",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_optimal() {
        assert!(Status::Optimal.is_optimal());
        assert!(!Status::Infeasible.is_optimal());
        assert!(!Status::SuboptimalWithinTimeLimit.is_optimal());
        assert!(!Status::UnknownBackendStatus.is_optimal());
    }

    #[test]
    fn test_status_has_solution() {
        assert!(Status::Optimal.has_solution());
        assert!(Status::SuboptimalWithinTimeLimit.has_solution());
        assert!(!Status::TimeLimitNoSolution.has_solution());
        assert!(!Status::Infeasible.has_solution());
        assert!(!Status::Unbounded.has_solution());
        assert!(!Status::NumericalError.has_solution());
        assert!(!Status::UnknownBackendStatus.has_solution());
    }

    #[test]
    fn test_status_is_infeasible() {
        assert!(Status::Infeasible.is_infeasible());
        assert!(!Status::Optimal.is_infeasible());
    }

    #[test]
    fn test_status_is_unbounded() {
        assert!(Status::Unbounded.is_unbounded());
        assert!(!Status::Optimal.is_unbounded());
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(Status::Optimal.as_str(), "optimal");
        assert_eq!(Status::Infeasible.as_str(), "infeasible");
        assert_eq!(Status::Unbounded.as_str(), "unbounded");
        assert_eq!(
            Status::SuboptimalWithinTimeLimit.as_str(),
            "suboptimal_within_time_limit"
        );
        assert_eq!(
            Status::TimeLimitNoSolution.as_str(),
            "time_limit_no_solution"
        );
        assert_eq!(Status::NumericalError.as_str(), "numerical_error");
        assert_eq!(
            Status::UnknownBackendStatus.as_str(),
            "unknown_backend_status"
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", Status::Optimal), "optimal");
        assert_eq!(format!("{}", Status::NumericalError), "numerical_error");
    }
}
