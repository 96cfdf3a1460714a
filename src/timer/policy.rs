//! Give-up / cancel / commit decisions for a running session.
//!
//! Every function here is pure; the controller re-evaluates them on each tick
//! and on each press of the action button.

/// Cancelling within this many elapsed seconds (inclusive) is free.
pub const GRACE_SECONDS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Committed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Aborted,
    Committed,
}

pub fn phase(_total_secs: u64, elapsed_secs: u64) -> Phase {
    if elapsed_secs > GRACE_SECONDS {
        Phase::Committed
    } else {
        Phase::Early
    }
}

/// Action button text. A `None` phase means no session is running.
pub fn display_label(phase: Option<Phase>, elapsed_secs: u64) -> String {
    match phase {
        None => "Paint".to_string(),
        Some(Phase::Committed) => "Give up".to_string(),
        Some(Phase::Early) => format!("Cancel ({elapsed_secs})"),
    }
}

pub fn resolve_cancellation(total_secs: u64, elapsed_secs: u64) -> Outcome {
    match phase(total_secs, elapsed_secs) {
        Phase::Early => Outcome::Aborted,
        Phase::Committed => Outcome::Committed,
    }
}

/// The grace window only governs early cancellation; running to zero always
/// commits.
pub fn resolve_natural_expiry() -> Outcome {
    Outcome::Committed
}

/// `MM:SS`, zero padded. Minutes are not wrapped into hours.
pub fn format_countdown(remaining_secs: u64) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grace_boundary() {
        for elapsed in 0..=GRACE_SECONDS {
            assert_eq!(phase(1500, elapsed), Phase::Early, "elapsed {elapsed}");
        }
        assert_eq!(phase(1500, 10), Phase::Early);
        assert_eq!(phase(1500, 11), Phase::Committed);
        assert_eq!(phase(1500, 1499), Phase::Committed);
    }

    #[test]
    fn test_cancellation_outcome_follows_phase() {
        assert_eq!(resolve_cancellation(1500, 5), Outcome::Aborted);
        assert_eq!(resolve_cancellation(1500, 10), Outcome::Aborted);
        assert_eq!(resolve_cancellation(1500, 11), Outcome::Committed);
        assert_eq!(resolve_cancellation(1500, 15), Outcome::Committed);
    }

    #[test]
    fn test_natural_expiry_always_commits() {
        assert_eq!(resolve_natural_expiry(), Outcome::Committed);
    }

    #[test]
    fn test_labels() {
        assert_eq!(display_label(None, 0), "Paint");
        for elapsed in [0, 10, 11] {
            let label = display_label(Some(phase(1500, elapsed)), elapsed);
            let expected = if elapsed <= GRACE_SECONDS {
                format!("Cancel ({elapsed})")
            } else {
                "Give up".to_string()
            };
            assert_eq!(label, expected);
        }
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(9), "00:09");
        assert_eq!(format_countdown(25 * 60), "25:00");
        assert_eq!(format_countdown(125), "02:05");
        assert_eq!(format_countdown(240 * 60), "240:00");
    }
}
