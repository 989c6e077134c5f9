//! Fairness tracking for rotation balance.
//!
//! Tracks how often, and how recently, each member has served each
//! role. Fairness is local to a role: a member who plays piano every
//! week is not penalized in the drum rotation. Candidate ranking is
//! fully deterministic so that identical inputs always produce
//! identical rosters.
//!
//! # Recency Model
//! Dates are opaque labels, so recency ordering uses a monotonically
//! increasing commit sequence number alongside the recorded date. The
//! sequence gives a total order over "last served" across seeded
//! history and the live run without parsing date strings.

use std::collections::HashMap;

use crate::models::Roster;

/// Per-(member, role) service bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRecord {
    /// Times the member has served the role.
    pub count: u32,
    /// Date of the most recent service. `None` = never served.
    pub last_date: Option<String>,
    /// Commit sequence number of the most recent service; orders
    /// recency without interpreting date labels.
    pub last_served: Option<u64>,
}

/// Assignment counters used to bias selection toward under-served members.
///
/// A plain value: callers own one per run and clone it when they need
/// an independent run over the same history. Mutated only through
/// [`commit`](FairnessTracker::commit) and
/// [`seed_from_roster`](FairnessTracker::seed_from_roster).
#[derive(Debug, Clone, Default)]
pub struct FairnessTracker {
    // role id → member → record
    records: HashMap<String, HashMap<String, ServiceRecord>>,
    clock: u64,
}

impl FairnessTracker {
    /// Creates a tracker with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record for a (member, role) pair; zeroed if never committed.
    pub fn record(&self, member: &str, role: &str) -> ServiceRecord {
        self.records
            .get(role)
            .and_then(|by_member| by_member.get(member))
            .cloned()
            .unwrap_or_default()
    }

    /// How many times a member has served a role.
    pub fn count(&self, member: &str, role: &str) -> u32 {
        self.rank_key(member, role).0
    }

    /// Records a committed assignment on a date.
    pub fn commit(&mut self, member: &str, role: &str, date: &str) {
        self.clock += 1;
        let record = self
            .records
            .entry(role.to_string())
            .or_default()
            .entry(member.to_string())
            .or_default();
        record.count += 1;
        record.last_date = Some(date.to_string());
        record.last_served = Some(self.clock);
    }

    /// Replays a prior roster, day by day in chronological order, so
    /// counts and recency carry into the next run.
    pub fn seed_from_roster(&mut self, roster: &Roster) {
        for day in &roster.days {
            for slot in &day.slots {
                if let Some(member) = &slot.member {
                    self.commit(member, &slot.role, &day.date);
                }
            }
        }
    }

    /// Ranks candidates for a role, best pick first.
    ///
    /// Ascending by assignment count, then by least-recent service
    /// (never-served members first within a count tier), then by member
    /// name as the final deterministic tiebreak.
    pub fn rank<'a>(&self, candidates: &[&'a str], role: &str) -> Vec<&'a str> {
        let mut ranked = candidates.to_vec();
        ranked.sort_by_key(|member| {
            let (count, last_served) = self.rank_key(member, role);
            (count, last_served, *member)
        });
        ranked
    }

    fn rank_key(&self, member: &str, role: &str) -> (u32, Option<u64>) {
        self.records
            .get(role)
            .and_then(|by_member| by_member.get(member))
            .map(|r| (r.count, r.last_served))
            .unwrap_or((0, None))
    }
}
