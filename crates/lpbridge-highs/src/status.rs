//! HiGHS status translation.

use highs::HighsModelStatus;
use lpbridge_core::Status;

/// Map a native HiGHS model status onto the uniform status vocabulary.
///
/// `usable_primal` reports whether the incumbent primal point was verified
/// finite and feasible; it only matters for resource-limit terminations.
/// Statuses with no entry in the table, including `UnboundedOrInfeasible`,
/// come back as `UnknownBackendStatus` rather than being coerced to a
/// nearby meaning.
pub(crate) fn classify(native: HighsModelStatus, usable_primal: bool) -> Status {
    match native {
        HighsModelStatus::Optimal => Status::Optimal,
        HighsModelStatus::Infeasible => Status::Infeasible,
        HighsModelStatus::Unbounded => Status::Unbounded,
        HighsModelStatus::ReachedTimeLimit | HighsModelStatus::ReachedIterationLimit => {
            if usable_primal {
                Status::SuboptimalWithinTimeLimit
            } else {
                Status::TimeLimitNoSolution
            }
        }
        HighsModelStatus::SolveError
        | HighsModelStatus::PresolveError
        | HighsModelStatus::PostsolveError => Status::NumericalError,
        _ => Status::UnknownBackendStatus,
    }
}

/// True when the native status is a resource-limit termination whose
/// incumbent point must be inspected before classification.
pub(crate) fn is_limit(native: HighsModelStatus) -> bool {
    matches!(
        native,
        HighsModelStatus::ReachedTimeLimit | HighsModelStatus::ReachedIterationLimit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses_translate_directly() {
        assert_eq!(classify(HighsModelStatus::Optimal, false), Status::Optimal);
        assert_eq!(
            classify(HighsModelStatus::Infeasible, false),
            Status::Infeasible
        );
        assert_eq!(
            classify(HighsModelStatus::Unbounded, false),
            Status::Unbounded
        );
    }

    #[test]
    fn test_limit_statuses_split_on_usable_primal() {
        assert_eq!(
            classify(HighsModelStatus::ReachedTimeLimit, true),
            Status::SuboptimalWithinTimeLimit
        );
        assert_eq!(
            classify(HighsModelStatus::ReachedTimeLimit, false),
            Status::TimeLimitNoSolution
        );
        assert_eq!(
            classify(HighsModelStatus::ReachedIterationLimit, true),
            Status::SuboptimalWithinTimeLimit
        );
        assert_eq!(
            classify(HighsModelStatus::ReachedIterationLimit, false),
            Status::TimeLimitNoSolution
        );
    }

    #[test]
    fn test_ambiguous_status_is_never_coerced() {
        assert_eq!(
            classify(HighsModelStatus::UnboundedOrInfeasible, true),
            Status::UnknownBackendStatus
        );
        assert_eq!(
            classify(HighsModelStatus::NotSet, false),
            Status::UnknownBackendStatus
        );
    }

    #[test]
    fn test_solver_failures_map_to_numerical_error() {
        assert_eq!(
            classify(HighsModelStatus::SolveError, false),
            Status::NumericalError
        );
        assert_eq!(
            classify(HighsModelStatus::PresolveError, false),
            Status::NumericalError
        );
    }
}
