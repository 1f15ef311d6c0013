use super::models::AppointmentStatus;
use super::models::AppointmentStatus::*;

/// Outcome of checking a requested status transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionCheck {
    /// Move to the target state and record an audit entry
    Allowed,
    /// Target equals current state; succeed without writing anything
    NoOp,
    /// Transition is not permitted from the current state
    Rejected,
}

/// Check whether an appointment may move from `from` to `to`.
///
/// The forward path is pending -> confirmed -> in-progress -> completed.
/// Any non-terminal state may be cancelled. Terminal states accept no
/// transition, and re-requesting the current state is an idempotent no-op.
pub fn check_transition(from: AppointmentStatus, to: AppointmentStatus) -> TransitionCheck {
    if from == to {
        return TransitionCheck::NoOp;
    }
    let allowed = matches!(
        (from, to),
        (Pending, Confirmed)
            | (Confirmed, InProgress)
            | (InProgress, Completed)
            | (Pending, Cancelled)
            | (Confirmed, Cancelled)
            | (InProgress, Cancelled)
    );
    if allowed {
        TransitionCheck::Allowed
    } else {
        TransitionCheck::Rejected
    }
}

/// States reachable from `from` in a single step, excluding the no-op
pub fn allowed_targets(from: AppointmentStatus) -> Vec<AppointmentStatus> {
    [Pending, Confirmed, InProgress, Completed, Cancelled]
        .into_iter()
        .filter(|to| check_transition(from, *to) == TransitionCheck::Allowed)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path_is_allowed() {
        assert_eq!(check_transition(Pending, Confirmed), TransitionCheck::Allowed);
        assert_eq!(
            check_transition(Confirmed, InProgress),
            TransitionCheck::Allowed
        );
        assert_eq!(
            check_transition(InProgress, Completed),
            TransitionCheck::Allowed
        );
    }

    #[test]
    fn test_cancellation_from_live_states() {
        for from in [Pending, Confirmed, InProgress] {
            assert_eq!(check_transition(from, Cancelled), TransitionCheck::Allowed);
        }
    }

    #[test]
    fn test_skipping_states_is_rejected() {
        assert_eq!(
            check_transition(Pending, InProgress),
            TransitionCheck::Rejected
        );
        assert_eq!(
            check_transition(Pending, Completed),
            TransitionCheck::Rejected
        );
        assert_eq!(
            check_transition(Confirmed, Completed),
            TransitionCheck::Rejected
        );
    }

    #[test]
    fn test_backward_moves_are_rejected() {
        assert_eq!(
            check_transition(Confirmed, Pending),
            TransitionCheck::Rejected
        );
        assert_eq!(
            check_transition(InProgress, Confirmed),
            TransitionCheck::Rejected
        );
        assert_eq!(
            check_transition(Completed, InProgress),
            TransitionCheck::Rejected
        );
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for to in [Pending, Confirmed, InProgress, Cancelled] {
            assert_eq!(check_transition(Completed, to), TransitionCheck::Rejected);
        }
        for to in [Pending, Confirmed, InProgress, Completed] {
            assert_eq!(check_transition(Cancelled, to), TransitionCheck::Rejected);
        }
    }

    #[test]
    fn test_same_status_is_noop() {
        for status in [Pending, Confirmed, InProgress, Completed, Cancelled] {
            assert_eq!(check_transition(status, status), TransitionCheck::NoOp);
        }
    }

    #[test]
    fn test_allowed_targets() {
        assert_eq!(allowed_targets(Pending), vec![Confirmed, Cancelled]);
        assert_eq!(allowed_targets(Confirmed), vec![InProgress, Cancelled]);
        assert_eq!(allowed_targets(InProgress), vec![Completed, Cancelled]);
        assert!(allowed_targets(Completed).is_empty());
        assert!(allowed_targets(Cancelled).is_empty());
    }
}
