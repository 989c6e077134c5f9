//! Roster (solution) model.
//!
//! A roster is the sole output of an engine run: an ordered sequence of
//! service days, each mapping every catalog role to an assigned member
//! or an open slot. Rosters are plain data — the caller persists and
//! renders them; the engine never reads one back except to seed
//! fairness history.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One role slot on one service day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    /// Role identifier.
    pub role: String,
    /// Assigned member, or `None` when the slot could not be filled.
    pub member: Option<String>,
}

impl SlotAssignment {
    /// Creates a filled slot.
    pub fn assigned(role: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            member: Some(member.into()),
        }
    }

    /// Creates an open (unfilled) slot.
    pub fn open(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            member: None,
        }
    }

    /// Whether the slot is filled.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.member.is_some()
    }
}

/// All slot assignments for a single date, in role priority order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDay {
    /// The service date.
    pub date: String,
    /// Slots in the catalog's priority order.
    pub slots: Vec<SlotAssignment>,
}

impl ServiceDay {
    /// Creates an empty day.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            slots: Vec::new(),
        }
    }

    /// Appends a slot.
    pub fn push(&mut self, slot: SlotAssignment) {
        self.slots.push(slot);
    }

    /// The member filling a role, if any.
    pub fn member_for(&self, role: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.role == role)
            .and_then(|s| s.member.as_deref())
    }

    /// All members serving on this day, in slot order.
    pub fn assigned_members(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter_map(|s| s.member.as_deref())
            .collect()
    }

    /// Whether a member is already serving on this day.
    pub fn is_serving(&self, member: &str) -> bool {
        self.slots.iter().any(|s| s.member.as_deref() == Some(member))
    }
}

/// A complete generated roster.
///
/// Days appear in horizon order; within a day, slots appear in the
/// catalog's role priority order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    /// Service days in chronological order.
    pub days: Vec<ServiceDay>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a service day.
    pub fn push_day(&mut self, day: ServiceDay) {
        self.days.push(day);
    }

    /// The member assigned to a role on a date, if any.
    pub fn assignment(&self, date: &str, role: &str) -> Option<&str> {
        self.days
            .iter()
            .find(|d| d.date == date)
            .and_then(|d| d.member_for(role))
    }

    /// All (date, role) pairs a member is assigned to, in roster order.
    pub fn assignments_for_member(&self, member: &str) -> Vec<(&str, &str)> {
        self.days
            .iter()
            .flat_map(|day| {
                day.slots
                    .iter()
                    .filter(move |s| s.member.as_deref() == Some(member))
                    .map(move |s| (day.date.as_str(), s.role.as_str()))
            })
            .collect()
    }

    /// Per-(member, role) assignment counts across the roster.
    pub fn assignment_counts(&self) -> BTreeMap<(String, String), u32> {
        let mut counts = BTreeMap::new();
        for day in &self.days {
            for slot in &day.slots {
                if let Some(member) = &slot.member {
                    *counts
                        .entry((member.clone(), slot.role.clone()))
                        .or_insert(0) += 1;
                }
            }
        }
        counts
    }

    /// Open slots as (date, role) pairs, in roster order.
    pub fn open_slots(&self) -> Vec<(&str, &str)> {
        self.days
            .iter()
            .flat_map(|day| {
                day.slots
                    .iter()
                    .filter(|s| !s.is_filled())
                    .map(move |s| (day.date.as_str(), s.role.as_str()))
            })
            .collect()
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.slots.len()).sum()
    }

    /// Number of filled slots.
    pub fn filled_count(&self) -> usize {
        self.days
            .iter()
            .map(|d| d.slots.iter().filter(|s| s.is_filled()).count())
            .sum()
    }

    /// Fraction of slots that are filled (1.0 for an empty roster).
    pub fn fill_rate(&self) -> f64 {
        let total = self.slot_count();
        if total == 0 {
            return 1.0;
        }
        self.filled_count() as f64 / total as f64
    }

    /// Whether every slot is filled.
    pub fn is_fully_staffed(&self) -> bool {
        self.open_slots().is_empty()
    }
}
