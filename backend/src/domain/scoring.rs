//! Points accounting for submissions.
//!
//! The formula is `base reward + people_connected * 10`, plus a one-time
//! +25 bonus once proof files accompany a submission. The bonus latches:
//! it is granted at most once per (user, task) and survives resubmission,
//! whether or not the resubmission carries new files.

/// Points credited per person connected.
pub const REFERRAL_POINTS: i32 = 10;

/// One-time bonus for attaching proof files.
pub const PROOF_BONUS_POINTS: i32 = 25;

/// Outcome of scoring a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    /// Total points for the submission, including any proof bonus.
    pub points: i32,
    /// Whether the proof bonus is (now) granted for this submission.
    pub proof_bonus_awarded: bool,
}

/// Score a submission.
///
/// `bonus_already_awarded` carries the latch from the existing submission
/// row, if any; `has_proof_files` reports whether this submission attaches
/// at least one new proof artifact.
#[must_use]
pub fn score(
    points_reward: i32,
    people_connected: i32,
    has_proof_files: bool,
    bonus_already_awarded: bool,
) -> Score {
    let proof_bonus_awarded = bonus_already_awarded || has_proof_files;
    let mut points = points_reward.saturating_add(people_connected.saturating_mul(REFERRAL_POINTS));
    if proof_bonus_awarded {
        points = points.saturating_add(PROOF_BONUS_POINTS);
    }
    Score {
        points,
        proof_bonus_awarded,
    }
}

/// Deltas applied to a user's running totals for a resubmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalsDelta {
    /// Change to `total_points`.
    pub points: i32,
    /// Change to `total_referrals`.
    pub referrals: i32,
}

/// Compute the totals adjustment for a submission replacing an earlier one.
///
/// For a first submission pass `None`; the full new values apply.
#[must_use]
pub fn totals_delta(
    new_points: i32,
    new_people_connected: i32,
    previous: Option<(i32, i32)>,
) -> TotalsDelta {
    match previous {
        Some((old_points, old_people)) => TotalsDelta {
            points: new_points - old_points,
            referrals: new_people_connected - old_people,
        },
        None => TotalsDelta {
            points: new_points,
            referrals: new_people_connected,
        },
    }
}
