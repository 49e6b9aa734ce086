//! Hackathon status state machine.
//!
//! `transition` is the single source of truth for which status changes a
//! hackathon may undergo and who may perform them. It returns the new status
//! and performs no side effects; callers persist the result.

use crate::actor::Actor;
use crate::hackathon_status::HackathonStatus;

/// Presence of the content a hackathon must carry before it may be shown
/// to participants.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContentChecklist {
    pub has_banner: bool,
    pub has_logo: bool,
    pub has_rules: bool,
    pub track_count: usize,
}

impl ContentChecklist {
    /// Names of the mandatory fields that are still missing.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_banner {
            missing.push("banner");
        }
        if !self.has_logo {
            missing.push("logo");
        }
        if !self.has_rules {
            missing.push("rules");
        }
        if self.track_count == 0 {
            missing.push("tracks");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// Actor is neither the owning organizer nor an administrator.
    #[error("only the owning organizer or an administrator may change this hackathon")]
    Forbidden,
    /// The requested edge is not in the transition table.
    #[error("cannot transition hackathon from {from} to {to}")]
    InvalidTransition {
        from: HackathonStatus,
        to: HackathonStatus,
    },
    /// Mandatory content is missing before publication.
    #[error("hackathon is missing required content: {}", missing.join(", "))]
    IncompleteHackathon { missing: Vec<&'static str> },
}

/// Returns true if the edge `from -> to` exists in the transition table.
///
/// Cancellation and rejection are only reachable before a hackathon goes
/// live, so in-flight participants are never stranded. Published/Live may
/// step back to Upcoming (unpublish), returning visibility to the organizer.
pub fn is_allowed_edge(from: HackathonStatus, to: HackathonStatus) -> bool {
    use HackathonStatus::*;
    matches!(
        (from, to),
        (Draft, Upcoming)
            | (Draft, Published)
            | (Draft, Live)
            | (Draft, Cancelled)
            | (Draft, Rejected)
            | (Upcoming, Published)
            | (Upcoming, Live)
            | (Upcoming, Cancelled)
            | (Upcoming, Rejected)
            | (Published, Completed)
            | (Published, Upcoming)
            | (Live, Completed)
            | (Live, Upcoming)
    )
}

/// Compute the result of transitioning a hackathon to `target`.
///
/// Guards, in order:
/// 1. `actor` must own the hackathon or be an administrator.
/// 2. `Rejected` is platform moderation and requires an administrator.
/// 3. The edge must exist in the transition table.
/// 4. Entering `Published` or `Live` requires the content checklist complete.
pub fn transition(
    current: HackathonStatus,
    target: HackathonStatus,
    actor: &Actor,
    organizer_id: i32,
    content: &ContentChecklist,
) -> Result<HackathonStatus, LifecycleError> {
    if !actor.is_admin() && actor.user_id != organizer_id {
        return Err(LifecycleError::Forbidden);
    }
    if target == HackathonStatus::Rejected && !actor.is_admin() {
        return Err(LifecycleError::Forbidden);
    }
    if !is_allowed_edge(current, target) {
        return Err(LifecycleError::InvalidTransition {
            from: current,
            to: target,
        });
    }
    if matches!(target, HackathonStatus::Published | HackathonStatus::Live)
        && !content.is_complete()
    {
        return Err(LifecycleError::IncompleteHackathon {
            missing: content.missing(),
        });
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorRole;
    use HackathonStatus::*;

    const ORGANIZER_ID: i32 = 7;

    fn organizer() -> Actor {
        Actor::new(ORGANIZER_ID, ActorRole::Host)
    }

    fn admin() -> Actor {
        Actor::new(99, ActorRole::Admin)
    }

    fn complete_content() -> ContentChecklist {
        ContentChecklist {
            has_banner: true,
            has_logo: true,
            has_rules: true,
            track_count: 2,
        }
    }

    /// The full transition table. Any (from, to) pair not listed here must
    /// be rejected with `InvalidTransition`.
    const ALLOWED: &[(HackathonStatus, HackathonStatus)] = &[
        (Draft, Upcoming),
        (Draft, Published),
        (Draft, Live),
        (Draft, Cancelled),
        (Draft, Rejected),
        (Upcoming, Published),
        (Upcoming, Live),
        (Upcoming, Cancelled),
        (Upcoming, Rejected),
        (Published, Completed),
        (Published, Upcoming),
        (Live, Completed),
        (Live, Upcoming),
    ];

    #[test]
    fn exhaustive_transition_table() {
        let content = complete_content();
        for &from in HackathonStatus::ALL {
            for &to in HackathonStatus::ALL {
                let result = transition(from, to, &admin(), ORGANIZER_ID, &content);
                if ALLOWED.contains(&(from, to)) {
                    assert_eq!(result, Ok(to), "expected {from} -> {to} to be allowed");
                } else {
                    assert_eq!(
                        result,
                        Err(LifecycleError::InvalidTransition { from, to }),
                        "expected {from} -> {to} to be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn terminal_states_admit_no_edges() {
        for &from in &[Completed, Cancelled, Rejected] {
            for &to in HackathonStatus::ALL {
                assert!(!is_allowed_edge(from, to), "{from} must be absorbing");
            }
        }
    }

    #[test]
    fn live_cannot_be_cancelled() {
        let result = transition(Live, Cancelled, &organizer(), ORGANIZER_ID, &complete_content());
        assert_eq!(
            result,
            Err(LifecycleError::InvalidTransition {
                from: Live,
                to: Cancelled,
            })
        );
    }

    #[test]
    fn stranger_is_forbidden() {
        let stranger = Actor::new(1234, ActorRole::Participant);
        let result = transition(Draft, Upcoming, &stranger, ORGANIZER_ID, &complete_content());
        assert_eq!(result, Err(LifecycleError::Forbidden));
    }

    #[test]
    fn organizer_may_transition_own_hackathon() {
        let result = transition(Draft, Upcoming, &organizer(), ORGANIZER_ID, &complete_content());
        assert_eq!(result, Ok(Upcoming));
    }

    #[test]
    fn organizer_cannot_reject_own_hackathon() {
        let result = transition(Draft, Rejected, &organizer(), ORGANIZER_ID, &complete_content());
        assert_eq!(result, Err(LifecycleError::Forbidden));
    }

    #[test]
    fn admin_may_reject_before_live() {
        assert_eq!(
            transition(Upcoming, Rejected, &admin(), ORGANIZER_ID, &complete_content()),
            Ok(Rejected)
        );
    }

    #[test]
    fn publishing_requires_complete_content() {
        let content = ContentChecklist {
            has_banner: true,
            has_logo: false,
            has_rules: true,
            track_count: 0,
        };
        let result = transition(Draft, Published, &organizer(), ORGANIZER_ID, &content);
        assert_eq!(
            result,
            Err(LifecycleError::IncompleteHackathon {
                missing: vec!["logo", "tracks"],
            })
        );
    }

    #[test]
    fn going_live_directly_from_draft_skips_upcoming() {
        let result = transition(Draft, Live, &organizer(), ORGANIZER_ID, &complete_content());
        assert_eq!(result, Ok(Live));
    }

    #[test]
    fn unpublish_returns_to_upcoming_without_content_check() {
        // Content guard applies only when entering Published/Live.
        let empty = ContentChecklist::default();
        assert_eq!(
            transition(Live, Upcoming, &organizer(), ORGANIZER_ID, &empty),
            Ok(Upcoming)
        );
    }
}
