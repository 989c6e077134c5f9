//! Greedy roster generation engine.
//!
//! # Algorithm
//!
//! 1. Process dates strictly in horizon order.
//! 2. Per date, process roles strictly in catalog priority order.
//! 3. Per role, candidates = qualified ∩ available − already serving
//!    that date. Empty candidates leave the slot open.
//! 4. Otherwise pick the top-ranked candidate from the fairness
//!    tracker and commit the pick.
//!
//! Strict ordering matters: fairness state mutates between steps, and
//! the priority order is the policy that lets a high-priority role
//! claim a member before a lower-priority role can. The engine never
//! errors — every data gap degrades to an open slot the caller
//! surfaces to a human.
//!
//! # Complexity
//! O(dates × roles × members log members) comparisons; a run is a
//! single synchronous call with no I/O.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::RoleCatalog;
use crate::fairness::FairnessTracker;
use crate::models::{AvailabilityTable, Roster, ServiceDay, SlotAssignment};

/// Date-by-date, role-by-role greedy solver.
///
/// Holds no state of its own: the caller owns the availability table,
/// the catalog, and the fairness tracker. Concurrent runs need
/// independent tracker clones — the tracker is mutated in place, so
/// two runs over the same instance would see each other's commits.
///
/// # Example
///
/// ```
/// use roster_engine::catalog::{Role, RoleCatalog};
/// use roster_engine::engine::RosterEngine;
/// use roster_engine::fairness::FairnessTracker;
/// use roster_engine::models::AvailabilityTable;
///
/// let catalog = RoleCatalog::builder()
///     .with_role(Role::new("piano"))
///     .with_pool("piano", ["Alice"])
///     .build()
///     .unwrap();
///
/// let mut availability = AvailabilityTable::new().with_dates(["07/04"]);
/// availability.mark_available("Alice", "07/04");
///
/// let mut tracker = FairnessTracker::new();
/// let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);
/// assert_eq!(roster.assignment("07/04", "piano"), Some("Alice"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterEngine;

impl RosterEngine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self
    }

    /// Generates a roster over the availability table's horizon.
    ///
    /// The tracker is updated with every committed pick, so passing a
    /// tracker seeded from a prior roster continues that rotation.
    pub fn generate(
        &self,
        availability: &AvailabilityTable,
        catalog: &RoleCatalog,
        tracker: &mut FairnessTracker,
    ) -> Roster {
        debug!(
            dates = availability.dates().len(),
            roles = catalog.roles().len(),
            members = availability.members().len(),
            "generating roster"
        );

        let mut roster = Roster::new();

        for date in availability.dates() {
            let available = availability.available_on(date);
            let mut serving_today: HashSet<&str> = HashSet::new();
            let mut day = ServiceDay::new(date);

            for role in catalog.roles() {
                let pool = catalog.qualified_members(role);
                let candidates: Vec<&str> = available
                    .iter()
                    .copied()
                    .filter(|m| pool.contains(*m) && !serving_today.contains(m))
                    .collect();

                match tracker.rank(&candidates, &role.id).first().copied() {
                    Some(member) => {
                        tracker.commit(member, &role.id, date);
                        serving_today.insert(member);
                        day.push(SlotAssignment::assigned(&role.id, member));
                    }
                    None => day.push(SlotAssignment::open(&role.id)),
                }
            }

            debug!(
                date = %day.date,
                filled = day.assigned_members().len(),
                open = day.slots.iter().filter(|s| !s.is_filled()).count(),
                "scheduled date"
            );
            roster.push_day(day);
        }

        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Role;
    use crate::validation::validate_roster;

    fn piano_catalog() -> RoleCatalog {
        RoleCatalog::builder()
            .with_role(Role::new("piano"))
            .with_pool("piano", ["Alice", "Bob"])
            .build()
            .unwrap()
    }

    fn full_catalog(members: &[&str]) -> RoleCatalog {
        RoleCatalog::worship_team()
            .with_pool("vocal_main", members.to_vec())
            .with_pool("vocal_sub", members.to_vec())
            .with_pool("piano", members.to_vec())
            .with_pool("drum", members.to_vec())
            .with_pool("bass", members.to_vec())
            .with_pool("pa", members.to_vec())
            .with_pool("ppt", members.to_vec())
            .build()
            .unwrap()
    }

    fn all_available(members: &[&str], dates: &[&str]) -> AvailabilityTable {
        let mut table = AvailabilityTable::new().with_dates(dates.to_vec());
        for member in members {
            for date in dates {
                table.mark_available(*member, *date);
            }
        }
        table
    }

    #[test]
    fn test_alice_bob_piano_scenario() {
        // Alice available all three dates, Bob only on the first and last.
        let catalog = piano_catalog();
        let mut availability =
            AvailabilityTable::new().with_dates(["07/04", "14/04", "21/04"]);
        availability.mark_available("Alice", "07/04");
        availability.mark_available("Alice", "14/04");
        availability.mark_available("Alice", "21/04");
        availability.mark_available("Bob", "07/04");
        availability.mark_unavailable("Bob", "14/04");
        availability.mark_available("Bob", "21/04");

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        // Date 1: zero counts, name tiebreak picks Alice.
        assert_eq!(roster.assignment("07/04", "piano"), Some("Alice"));
        // Date 2: Bob unavailable, Alice serves again.
        assert_eq!(roster.assignment("14/04", "piano"), Some("Alice"));
        // Date 3: Bob (0) ranks ahead of Alice (2).
        assert_eq!(roster.assignment("21/04", "piano"), Some("Bob"));

        // Counts end 2/1, never 3/0.
        assert_eq!(tracker.count("Alice", "piano"), 2);
        assert_eq!(tracker.count("Bob", "piano"), 1);
    }

    #[test]
    fn test_zero_qualified_members_stays_open() {
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("drum"))
            .with_pool("drum", Vec::<String>::new())
            .build()
            .unwrap();
        let availability = all_available(&["Alice"], &["07/04", "14/04"]);

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        assert_eq!(roster.open_slots(), [("07/04", "drum"), ("14/04", "drum")]);
        assert_eq!(tracker.count("Alice", "drum"), 0);
    }

    #[test]
    fn test_priority_order_claims_shared_member() {
        // Carol is the best main-vocal candidate and also the only
        // pianist; main vocal must claim her and piano stays open.
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("vocal_main"))
            .with_role(Role::new("piano"))
            .with_pool("vocal_main", ["Carol"])
            .with_pool("piano", ["Carol"])
            .build()
            .unwrap();
        let availability = all_available(&["Carol"], &["07/04"]);

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        assert_eq!(roster.assignment("07/04", "vocal_main"), Some("Carol"));
        assert_eq!(roster.assignment("07/04", "piano"), None);
    }

    #[test]
    fn test_no_member_serves_two_roles_on_one_date() {
        let members = ["Alice", "Bob", "Carol"];
        let catalog = full_catalog(&members);
        let availability = all_available(&members, &["07/04"]);

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        let day = &roster.days[0];
        let assigned = day.assigned_members();
        let unique: HashSet<&&str> = assigned.iter().collect();
        assert_eq!(assigned.len(), unique.len());
        // Three members, eight slots: exactly three filled.
        assert_eq!(assigned.len(), 3);
    }

    #[test]
    fn test_vocal_trio_pairwise_distinct() {
        let members = ["Alice", "Bob", "Carol", "Dave", "Eve"];
        let catalog = full_catalog(&members);
        let availability = all_available(&members, &["07/04", "14/04", "21/04"]);

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        for day in &roster.days {
            let trio: Vec<&str> = ["vocal_main", "vocal_sub1", "vocal_sub2"]
                .iter()
                .filter_map(|r| day.member_for(r))
                .collect();
            let unique: HashSet<&&str> = trio.iter().collect();
            assert_eq!(trio.len(), 3);
            assert_eq!(trio.len(), unique.len());
        }
    }

    #[test]
    fn test_determinism_identical_inputs() {
        let members = ["Alice", "Bob", "Carol", "Dave"];
        let catalog = full_catalog(&members);
        let availability = all_available(&members, &["07/04", "14/04", "21/04", "28/04"]);

        let mut t1 = FairnessTracker::new();
        let mut t2 = FairnessTracker::new();
        let engine = RosterEngine::new();
        let r1 = engine.generate(&availability, &catalog, &mut t1);
        let r2 = engine.generate(&availability, &catalog, &mut t2);

        let j1 = serde_json::to_string(&r1).unwrap();
        let j2 = serde_json::to_string(&r2).unwrap();
        assert_eq!(j1, j2);
    }

    #[test]
    fn test_fairness_monotonicity_single_role() {
        // One role, four always-available members, nine dates:
        // max count must not exceed min count by more than 1.
        let catalog = RoleCatalog::builder()
            .with_role(Role::new("pa"))
            .with_pool("pa", ["Alice", "Bob", "Carol", "Dave"])
            .build()
            .unwrap();
        let dates: Vec<String> = (1..=9).map(|d| format!("{d:02}/06")).collect();
        let date_refs: Vec<&str> = dates.iter().map(String::as_str).collect();
        let availability = all_available(&["Alice", "Bob", "Carol", "Dave"], &date_refs);

        let mut tracker = FairnessTracker::new();
        RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        let counts: Vec<u32> = ["Alice", "Bob", "Carol", "Dave"]
            .iter()
            .map(|m| tracker.count(m, "pa"))
            .collect();
        let min = *counts.iter().min().unwrap();
        let max = *counts.iter().max().unwrap();
        assert!(max - min <= 1, "counts {counts:?} drifted apart");
    }

    #[test]
    fn test_seeded_history_biases_selection() {
        let catalog = piano_catalog();
        let availability = all_available(&["Alice", "Bob"], &["07/04"]);

        // History where Alice already played twice.
        let mut prior_tracker = FairnessTracker::new();
        prior_tracker.commit("Alice", "piano", "24/03");
        prior_tracker.commit("Alice", "piano", "31/03");

        let roster =
            RosterEngine::new().generate(&availability, &catalog, &mut prior_tracker);
        assert_eq!(roster.assignment("07/04", "piano"), Some("Bob"));
    }

    #[test]
    fn test_empty_horizon() {
        let catalog = piano_catalog();
        let availability = AvailabilityTable::new();
        let mut tracker = FairnessTracker::new();

        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);
        assert!(roster.days.is_empty());
    }

    #[test]
    fn test_nobody_available_leaves_day_open() {
        let catalog = piano_catalog();
        let mut availability = AvailabilityTable::new().with_dates(["07/04"]);
        availability.mark_unavailable("Alice", "07/04");
        availability.mark_unavailable("Bob", "07/04");

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);
        assert_eq!(roster.open_slots(), [("07/04", "piano")]);
    }

    #[test]
    fn test_generated_roster_passes_validation() {
        let members = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"];
        let catalog = full_catalog(&members);
        let mut availability =
            all_available(&members, &["07/04", "14/04", "21/04", "28/04"]);
        // Punch some gaps into the table.
        availability.mark_unavailable("Alice", "14/04");
        availability.mark_unavailable("Bob", "14/04");
        availability.mark_unavailable("Eve", "28/04");

        let mut tracker = FairnessTracker::new();
        let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);

        assert!(validate_roster(&roster, &catalog, &availability).is_ok());
    }
}
