//! Participation eligibility evaluation.
//!
//! `evaluate` computes which single action a participant screen should offer
//! for a given user and hackathon. The rules are ordered and the order is the
//! contract: time windows can overlap (e.g. a misconfigured hackathon whose
//! start date is in the future while its submission deadline has already
//! passed), and first-match-wins resolves every such overlap deterministically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hackathon_status::HackathonStatus;

/// The single action a participant-facing surface should offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "PascalCase")]
pub enum ParticipantAction {
    Register,
    SubmissionOpensSoon,
    SubmitProject,
    EditSubmission,
    ViewSubmission,
    SubmissionDeadlinePassed,
    ViewResults,
    ManageAsOrganizer,
    None,
}

/// The slice of a hackathon the evaluator needs.
#[derive(Clone, Copy, Debug)]
pub struct HackathonSnapshot {
    pub organizer_id: i32,
    pub status: HackathonStatus,
    pub registration_end: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub submission_deadline: DateTime<Utc>,
}

/// The slice of a submission the evaluator needs.
#[derive(Clone, Copy, Debug)]
pub struct SubmissionSnapshot {
    pub is_draft: bool,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Compute the action to offer `user_id` for this hackathon at `now`.
///
/// First match wins:
/// 1. The organizer always manages their own event and never sees
///    participant actions for it.
/// 2. Unregistered + visible + registration window open -> `Register`.
/// 3. Completed -> `ViewResults`.
/// 4. Registered, before the start date -> `SubmissionOpensSoon`.
/// 5. Registered, window open, nothing submitted -> `SubmitProject`.
/// 6. Submission exists, deadline not passed -> `EditSubmission`.
/// 7. Submission exists, deadline passed -> `ViewSubmission` (read-only).
/// 8. Nothing submitted, deadline passed -> `SubmissionDeadlinePassed`.
/// 9. Otherwise -> `None`.
pub fn evaluate(
    hackathon: &HackathonSnapshot,
    user_id: i32,
    registered: bool,
    submission: Option<&SubmissionSnapshot>,
    now: DateTime<Utc>,
) -> ParticipantAction {
    if user_id == hackathon.organizer_id {
        return ParticipantAction::ManageAsOrganizer;
    }
    if !registered
        && matches!(
            hackathon.status,
            HackathonStatus::Published | HackathonStatus::Live
        )
        && now <= hackathon.registration_end
    {
        return ParticipantAction::Register;
    }
    if hackathon.status == HackathonStatus::Completed {
        return ParticipantAction::ViewResults;
    }
    if registered && now < hackathon.start_date {
        return ParticipantAction::SubmissionOpensSoon;
    }
    if registered
        && submission.is_none()
        && hackathon.start_date <= now
        && now <= hackathon.submission_deadline
    {
        return ParticipantAction::SubmitProject;
    }
    if submission.is_some() && now <= hackathon.submission_deadline {
        return ParticipantAction::EditSubmission;
    }
    if submission.is_some() && now > hackathon.submission_deadline {
        return ParticipantAction::ViewSubmission;
    }
    if submission.is_none() && now > hackathon.submission_deadline {
        return ParticipantAction::SubmissionDeadlinePassed;
    }
    ParticipantAction::None
}

/// Returns true while submissions may be created: `[start_date, submission_deadline]`.
pub fn submission_window_open(hackathon: &HackathonSnapshot, now: DateTime<Utc>) -> bool {
    hackathon.start_date <= now && now <= hackathon.submission_deadline
}

/// Returns true if an existing submission may still be edited.
///
/// Inside the window, always. After the deadline, only a draft that was
/// never finalized before the deadline remains editable.
pub fn may_edit_submission(
    hackathon: &HackathonSnapshot,
    submission: &SubmissionSnapshot,
    now: DateTime<Utc>,
) -> bool {
    if now <= hackathon.submission_deadline {
        return true;
    }
    submission.is_draft && submission.submitted_at.is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const ORGANIZER_ID: i32 = 1;
    const USER_ID: i32 = 2;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// registration_end = T, start = T+1d, deadline = T+3d.
    fn hackathon(status: HackathonStatus) -> HackathonSnapshot {
        HackathonSnapshot {
            organizer_id: ORGANIZER_ID,
            status,
            registration_end: t0(),
            start_date: t0() + Duration::days(1),
            submission_deadline: t0() + Duration::days(3),
        }
    }

    fn draft_submission() -> SubmissionSnapshot {
        SubmissionSnapshot {
            is_draft: true,
            submitted_at: None,
        }
    }

    fn final_submission() -> SubmissionSnapshot {
        SubmissionSnapshot {
            is_draft: false,
            submitted_at: Some(t0() + Duration::days(2)),
        }
    }

    #[test]
    fn organizer_always_manages_regardless_of_status() {
        for &status in HackathonStatus::ALL {
            let h = hackathon(status);
            let action = evaluate(&h, ORGANIZER_ID, false, None, t0());
            assert_eq!(
                action,
                ParticipantAction::ManageAsOrganizer,
                "organizer action for {status}"
            );
        }
    }

    #[test]
    fn unregistered_user_may_register_while_window_open() {
        let h = hackathon(HackathonStatus::Published);
        assert_eq!(
            evaluate(&h, USER_ID, false, None, t0()),
            ParticipantAction::Register
        );
        let h = hackathon(HackathonStatus::Live);
        assert_eq!(
            evaluate(&h, USER_ID, false, None, t0()),
            ParticipantAction::Register
        );
    }

    #[test]
    fn registration_closes_after_registration_end() {
        let h = hackathon(HackathonStatus::Published);
        let action = evaluate(&h, USER_ID, false, None, t0() + Duration::hours(1));
        assert_ne!(action, ParticipantAction::Register);
    }

    #[test]
    fn no_register_action_for_invisible_hackathon() {
        for status in [HackathonStatus::Draft, HackathonStatus::Upcoming] {
            let h = hackathon(status);
            assert_ne!(
                evaluate(&h, USER_ID, false, None, t0()),
                ParticipantAction::Register
            );
        }
    }

    #[test]
    fn completed_shows_results() {
        let h = hackathon(HackathonStatus::Completed);
        assert_eq!(
            evaluate(&h, USER_ID, true, None, t0() + Duration::days(5)),
            ParticipantAction::ViewResults
        );
        // Also for users who never registered.
        assert_eq!(
            evaluate(&h, USER_ID, false, None, t0() + Duration::days(5)),
            ParticipantAction::ViewResults
        );
    }

    #[test]
    fn registered_before_start_waits() {
        let h = hackathon(HackathonStatus::Live);
        assert_eq!(
            evaluate(&h, USER_ID, true, None, t0()),
            ParticipantAction::SubmissionOpensSoon
        );
    }

    #[test]
    fn registered_in_window_submits() {
        let h = hackathon(HackathonStatus::Live);
        assert_eq!(
            evaluate(&h, USER_ID, true, None, t0() + Duration::days(2)),
            ParticipantAction::SubmitProject
        );
    }

    #[test]
    fn submit_does_not_depend_on_status() {
        // Rule 5 has no status condition: a registered user inside the
        // window gets SubmitProject even when the hackathon is Published,
        // and whatever serves the POST must accept what this offers.
        let h = hackathon(HackathonStatus::Published);
        assert_eq!(
            evaluate(&h, USER_ID, true, None, t0() + Duration::days(2)),
            ParticipantAction::SubmitProject
        );
    }

    #[test]
    fn deadline_passed_without_submission() {
        let h = hackathon(HackathonStatus::Live);
        assert_eq!(
            evaluate(&h, USER_ID, true, None, t0() + Duration::days(4)),
            ParticipantAction::SubmissionDeadlinePassed
        );
    }

    #[test]
    fn submission_editable_until_deadline_then_locked() {
        let h = hackathon(HackathonStatus::Live);
        let s = final_submission();
        assert_eq!(
            evaluate(&h, USER_ID, true, Some(&s), t0() + Duration::days(2)),
            ParticipantAction::EditSubmission
        );
        assert_eq!(
            evaluate(&h, USER_ID, true, Some(&s), t0() + Duration::days(4)),
            ParticipantAction::ViewSubmission
        );
    }

    #[test]
    fn before_start_wins_over_deadline_passed() {
        // Misconfigured dates: start in the future, deadline already past.
        let h = HackathonSnapshot {
            organizer_id: ORGANIZER_ID,
            status: HackathonStatus::Live,
            registration_end: t0() - Duration::days(10),
            start_date: t0() + Duration::days(1),
            submission_deadline: t0() - Duration::days(1),
        };
        assert_eq!(
            evaluate(&h, USER_ID, true, None, t0()),
            ParticipantAction::SubmissionOpensSoon
        );
    }

    #[test]
    fn unregistered_after_everything_gets_none() {
        let h = hackathon(HackathonStatus::Upcoming);
        assert_eq!(
            evaluate(&h, USER_ID, false, None, t0() + Duration::days(2)),
            ParticipantAction::None
        );
    }

    #[test]
    fn draft_never_finalized_stays_editable_after_deadline() {
        let h = hackathon(HackathonStatus::Live);
        let after = t0() + Duration::days(4);
        assert!(may_edit_submission(&h, &draft_submission(), after));
        assert!(!may_edit_submission(&h, &final_submission(), after));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let h = hackathon(HackathonStatus::Live);
        assert!(submission_window_open(&h, h.start_date));
        assert!(submission_window_open(&h, h.submission_deadline));
        assert!(!submission_window_open(&h, h.start_date - Duration::seconds(1)));
        assert!(!submission_window_open(
            &h,
            h.submission_deadline + Duration::seconds(1)
        ));
    }
}
