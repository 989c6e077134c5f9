//! Availability table model.
//!
//! Maps (member, date) pairs to a two-valued availability state. Dates
//! form the scheduling horizon: their insertion order is chronological
//! order, and the engine processes them in exactly that order.
//!
//! # Data Contract
//! Cell values come from spreadsheet-style sources. Any spelling of
//! "yes" (case-insensitive, surrounding whitespace ignored) means
//! available; every other value, and every missing cell, means
//! unavailable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Availability state for one member on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// Member can serve on the date.
    Available,
    /// Member cannot serve (also the default for unknown data).
    Unavailable,
}

impl Availability {
    /// Parses a raw spreadsheet cell.
    ///
    /// "yes" in any casing maps to `Available`; everything else
    /// (including empty strings) maps to `Unavailable`.
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().eq_ignore_ascii_case("yes") {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }

    /// Whether this state means the member can serve.
    #[inline]
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

/// Per-member, per-date availability over an ordered scheduling horizon.
///
/// Members and dates are kept in insertion order so that every query
/// over them is deterministic. Missing cells read as unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityTable {
    members: Vec<String>,
    dates: Vec<String>,
    cells: HashMap<String, HashMap<String, Availability>>,
}

impl AvailabilityTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scheduling horizon (chronologically ordered dates).
    pub fn with_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for date in dates {
            self.register_date(date.into());
        }
        self
    }

    /// Sets one availability cell, registering member and date on first use.
    pub fn set(&mut self, member: impl Into<String>, date: impl Into<String>, state: Availability) {
        let member = member.into();
        let date = date.into();
        self.register_member(member.clone());
        self.register_date(date.clone());
        self.cells.entry(member).or_default().insert(date, state);
    }

    /// Sets one cell from a raw spreadsheet value (see [`Availability::from_cell`]).
    pub fn set_cell(&mut self, member: impl Into<String>, date: impl Into<String>, cell: &str) {
        self.set(member, date, Availability::from_cell(cell));
    }

    /// Marks a member available on a date.
    pub fn mark_available(&mut self, member: impl Into<String>, date: impl Into<String>) {
        self.set(member, date, Availability::Available);
    }

    /// Marks a member unavailable on a date.
    pub fn mark_unavailable(&mut self, member: impl Into<String>, date: impl Into<String>) {
        self.set(member, date, Availability::Unavailable);
    }

    /// Whether a member is available on a date.
    ///
    /// Unknown members, unknown dates, and missing cells all read as
    /// unavailable.
    pub fn is_available(&self, member: &str, date: &str) -> bool {
        self.cells
            .get(member)
            .and_then(|row| row.get(date))
            .map(|state| state.is_available())
            .unwrap_or(false)
    }

    /// The scheduling horizon, in chronological order.
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// All known members, in insertion order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Members available on a date, in member insertion order.
    pub fn available_on(&self, date: &str) -> Vec<&str> {
        self.members
            .iter()
            .filter(|m| self.is_available(m, date))
            .map(String::as_str)
            .collect()
    }

    /// Number of dates a member is available for.
    pub fn available_day_count(&self, member: &str) -> usize {
        self.dates
            .iter()
            .filter(|d| self.is_available(member, d))
            .count()
    }

    /// Whether a member appears in the table.
    pub fn contains_member(&self, member: &str) -> bool {
        self.cells.contains_key(member)
    }

    fn register_member(&mut self, member: String) {
        if !self.cells.contains_key(&member) {
            self.members.push(member);
        }
    }

    fn register_date(&mut self, date: String) {
        if !self.dates.contains(&date) {
            self.dates.push(date);
        }
    }
}
