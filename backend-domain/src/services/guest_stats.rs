use serde::Serialize;

use crate::entities::Rsvp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GuestStats {
    pub total_guests: u64,
    pub checked_in_count: u64,
    pub pending_count: u64,
}

impl GuestStats {
    /// Headcounts weighted by party size. Always computed from a full fetch.
    pub fn from_rsvps(rsvps: &[Rsvp]) -> Self {
        let total_guests = rsvps
            .iter()
            .filter(|rsvp| rsvp.status().is_attending())
            .map(|rsvp| u64::from(rsvp.num_guests))
            .sum::<u64>();
        let checked_in_count = rsvps
            .iter()
            .filter(|rsvp| rsvp.checked_in)
            .map(|rsvp| u64::from(rsvp.num_guests))
            .sum::<u64>();
        Self {
            total_guests,
            checked_in_count,
            pending_count: total_guests.saturating_sub(checked_in_count),
        }
    }
}

/// Rows matching the operator's search term. Does not change the stats.
pub fn filter_guests<'a>(rsvps: &'a [Rsvp], term: &str) -> Vec<&'a Rsvp> {
    let raw = term.trim();
    if raw.is_empty() {
        return rsvps.iter().collect();
    }
    let lowered = raw.to_lowercase();
    rsvps
        .iter()
        .filter(|rsvp| rsvp.matches_search(&lowered, raw))
        .collect()
}

/// The check-in table lists attending guests only.
pub fn guest_list<'a>(rsvps: &'a [Rsvp], term: &str) -> Vec<&'a Rsvp> {
    filter_guests(rsvps, term)
        .into_iter()
        .filter(|rsvp| rsvp.status().is_attending())
        .collect()
}
