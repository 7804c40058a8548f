//! Clarabel status translation.

use clarabel::solver::SolverStatus;
use lpbridge_core::Status;

/// Map a native Clarabel termination status onto the uniform vocabulary.
///
/// `finite_iterate` reports whether the final iterate's primal values were
/// all finite; it decides whether a resource-limit termination still
/// carries something usable. Clarabel's dual infeasibility certificate is
/// the unbounded case for a feasible primal. Statuses with no table entry
/// come back as `UnknownBackendStatus`.
pub(crate) fn classify(native: SolverStatus, finite_iterate: bool) -> Status {
    match native {
        SolverStatus::Solved => Status::Optimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            Status::Infeasible
        }
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => Status::Unbounded,
        SolverStatus::AlmostSolved => Status::SuboptimalWithinTimeLimit,
        SolverStatus::MaxIterations | SolverStatus::MaxTime => {
            if finite_iterate {
                Status::SuboptimalWithinTimeLimit
            } else {
                Status::TimeLimitNoSolution
            }
        }
        SolverStatus::NumericalError | SolverStatus::InsufficientProgress => {
            Status::NumericalError
        }
        _ => Status::UnknownBackendStatus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses_translate_directly() {
        assert_eq!(classify(SolverStatus::Solved, false), Status::Optimal);
        assert_eq!(
            classify(SolverStatus::PrimalInfeasible, false),
            Status::Infeasible
        );
        assert_eq!(
            classify(SolverStatus::DualInfeasible, false),
            Status::Unbounded
        );
        assert_eq!(
            classify(SolverStatus::AlmostSolved, true),
            Status::SuboptimalWithinTimeLimit
        );
    }

    #[test]
    fn test_limit_statuses_split_on_finite_iterate() {
        assert_eq!(
            classify(SolverStatus::MaxIterations, true),
            Status::SuboptimalWithinTimeLimit
        );
        assert_eq!(
            classify(SolverStatus::MaxIterations, false),
            Status::TimeLimitNoSolution
        );
        assert_eq!(
            classify(SolverStatus::MaxTime, true),
            Status::SuboptimalWithinTimeLimit
        );
        assert_eq!(
            classify(SolverStatus::MaxTime, false),
            Status::TimeLimitNoSolution
        );
    }

    #[test]
    fn test_failures_and_unknowns() {
        assert_eq!(
            classify(SolverStatus::NumericalError, true),
            Status::NumericalError
        );
        assert_eq!(
            classify(SolverStatus::InsufficientProgress, true),
            Status::NumericalError
        );
        assert_eq!(
            classify(SolverStatus::Unsolved, true),
            Status::UnknownBackendStatus
        );
    }
}
