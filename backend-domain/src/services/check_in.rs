// Check-in state machine
//
// `evaluate` decides; it never touches the store. The caller applies the
// returned mutation as a conditional update and, if the guard did not match,
// re-fetches and evaluates again.

use chrono::{DateTime, Utc};

use crate::entities::{CheckInOutcome, Rsvp};
use crate::error::CheckInError;
use crate::value_objects::CheckInState;

#[derive(Debug, Clone)]
pub struct ScanContext {
    pub event_id: String,
    pub now: DateTime<Utc>,
}

impl ScanContext {
    pub fn new(event_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            event_id: event_id.into(),
            now,
        }
    }
}

/// Store write for a `Pending -> CheckedIn` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInMutation {
    pub rsvp_id: String,
    pub event_id: String,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Apply {
        mutation: CheckInMutation,
        guest_name: String,
    },
    Settled(CheckInOutcome),
}

pub fn evaluate(record: Option<&Rsvp>, ctx: &ScanContext) -> Decision {
    let Some(rsvp) = record else {
        return Decision::Settled(CheckInError::GuestNotFound.into());
    };
    if !rsvp.belongs_to(&ctx.event_id) {
        return Decision::Settled(CheckInError::WrongEvent.into());
    }
    match rsvp.state() {
        CheckInState::CheckedIn { at } => Decision::Settled(CheckInOutcome::AlreadyCheckedIn {
            rsvp_id: rsvp.id.clone(),
            guest_name: rsvp.guest_name.clone(),
            checked_in_at: at,
        }),
        CheckInState::Pending => Decision::Apply {
            mutation: CheckInMutation {
                rsvp_id: rsvp.id.clone(),
                event_id: rsvp.event_id.clone(),
                checked_in_at: ctx.now,
            },
            guest_name: rsvp.guest_name.clone(),
        },
    }
}

/// Outcome once the store confirmed the conditional write.
pub fn confirm(updated: &Rsvp, mutation: &CheckInMutation) -> CheckInOutcome {
    CheckInOutcome::CheckedIn {
        rsvp_id: updated.id.clone(),
        guest_name: updated.guest_name.clone(),
        checked_in_at: updated.checked_in_at.unwrap_or(mutation.checked_in_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rsvp(event_id: &str, checked_in: bool) -> Rsvp {
        Rsvp {
            id: "r1".to_string(),
            event_id: event_id.to_string(),
            guest_name: "Amina".to_string(),
            guest_email: None,
            guest_phone: None,
            num_guests: 2,
            status: "yes".to_string(),
            checked_in,
            checked_in_at: checked_in.then(|| Utc.with_ymd_and_hms(2025, 3, 1, 18, 0, 0).unwrap()),
            submitted_at: None,
        }
    }

    fn ctx() -> ScanContext {
        ScanContext::new("e1", Utc.with_ymd_and_hms(2025, 3, 1, 19, 30, 0).unwrap())
    }

    #[test]
    fn pending_guest_yields_mutation_stamped_with_now() {
        let decision = evaluate(Some(&rsvp("e1", false)), &ctx());
        match decision {
            Decision::Apply {
                mutation,
                guest_name,
            } => {
                assert_eq!(guest_name, "Amina");
                assert_eq!(mutation.rsvp_id, "r1");
                assert_eq!(mutation.event_id, "e1");
                assert_eq!(mutation.checked_in_at, ctx().now);
            }
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn checked_in_guest_is_a_no_op() {
        let record = rsvp("e1", true);
        let decision = evaluate(Some(&record), &ctx());
        assert_eq!(
            decision,
            Decision::Settled(CheckInOutcome::AlreadyCheckedIn {
                rsvp_id: "r1".to_string(),
                guest_name: "Amina".to_string(),
                checked_in_at: record.checked_in_at,
            })
        );
    }

    #[test]
    fn other_event_is_refused_in_either_state() {
        for checked_in in [false, true] {
            let decision = evaluate(Some(&rsvp("e2", checked_in)), &ctx());
            assert_eq!(
                decision,
                Decision::Settled(CheckInOutcome::Rejected(CheckInError::WrongEvent))
            );
        }
    }

    #[test]
    fn ticket_holder_is_admitted_whatever_the_rsvp_answer() {
        for status in ["no", "maybe", ""] {
            let mut record = rsvp("e1", false);
            record.status = status.to_string();
            assert!(
                matches!(evaluate(Some(&record), &ctx()), Decision::Apply { .. }),
                "{status:?}"
            );
        }
    }

    #[test]
    fn missing_record_is_guest_not_found() {
        assert_eq!(
            evaluate(None, &ctx()),
            Decision::Settled(CheckInOutcome::Rejected(CheckInError::GuestNotFound))
        );
    }

    #[test]
    fn confirm_prefers_the_stored_timestamp() {
        let mut updated = rsvp("e1", true);
        let stored_at = updated.checked_in_at;
        let mutation = CheckInMutation {
            rsvp_id: "r1".to_string(),
            event_id: "e1".to_string(),
            checked_in_at: ctx().now,
        };
        assert!(matches!(
            confirm(&updated, &mutation),
            CheckInOutcome::CheckedIn { checked_in_at, .. } if Some(checked_in_at) == stored_at
        ));
        updated.checked_in_at = None;
        assert!(matches!(
            confirm(&updated, &mutation),
            CheckInOutcome::CheckedIn { checked_in_at, .. } if checked_in_at == mutation.checked_in_at
        ));
    }
}
