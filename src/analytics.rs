//! Roster and availability analytics.
//!
//! Computes distribution and fairness indicators from a generated
//! roster, and demand-side statistics from an availability table. The
//! surrounding application renders these; the library only produces
//! the numbers.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Share | Member's fraction of all filled slots |
//! | Deviation | Member count minus the per-member expected count |
//! | Gini coefficient | Inequality of the assignment distribution |
//! | Fairness score | 0–100, 100 = perfectly even distribution |
//! | Difficulty | Fraction of members unavailable on a date |

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{AvailabilityTable, Roster};

/// Assignment load for one member.
#[derive(Debug, Clone, Serialize)]
pub struct MemberLoad {
    /// Member name.
    pub member: String,
    /// Total assignments across all roles.
    pub count: u32,
    /// Fraction of all filled slots (0.0..1.0).
    pub share: f64,
    /// Count minus the expected per-member count.
    pub deviation: f64,
    /// Number of distinct roles served.
    pub unique_roles: usize,
}

/// Distribution and fairness indicators for a roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    /// Total filled slots.
    pub total_assignments: u32,
    /// Per-member loads, heaviest first (name breaks ties).
    pub member_loads: Vec<MemberLoad>,
    /// Filled-slot counts per role, in first-seen slot order.
    pub role_counts: Vec<(String, u32)>,
    /// Expected assignments per member under a perfectly even split.
    pub expected_per_member: f64,
    /// Population standard deviation of member counts.
    pub std_deviation: f64,
    /// Largest absolute deviation from the expected count.
    pub max_deviation: f64,
    /// Gini coefficient of member counts (0.0 = perfectly even).
    pub gini_coefficient: f64,
    /// Fairness score, 0–100 (100 = perfectly even).
    pub fairness_score: f64,
}

impl RosterReport {
    /// Computes the report from a roster.
    pub fn calculate(roster: &Roster) -> Self {
        let mut member_counts: BTreeMap<&str, u32> = BTreeMap::new();
        let mut member_roles: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        let mut role_counts: Vec<(String, u32)> = Vec::new();

        for day in &roster.days {
            for slot in &day.slots {
                let Some(member) = slot.member.as_deref() else {
                    continue;
                };
                *member_counts.entry(member).or_insert(0) += 1;
                member_roles
                    .entry(member)
                    .or_default()
                    .insert(slot.role.as_str());

                match role_counts.iter_mut().find(|(r, _)| r == &slot.role) {
                    Some((_, n)) => *n += 1,
                    None => role_counts.push((slot.role.clone(), 1)),
                }
            }
        }

        let total: u32 = member_counts.values().sum();
        let member_total = member_counts.len();
        let expected = if member_total == 0 {
            0.0
        } else {
            total as f64 / member_total as f64
        };

        let mut member_loads: Vec<MemberLoad> = member_counts
            .iter()
            .map(|(member, &count)| MemberLoad {
                member: member.to_string(),
                count,
                share: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
                deviation: count as f64 - expected,
                unique_roles: member_roles.get(member).map_or(0, |r| r.len()),
            })
            .collect();
        member_loads.sort_by(|a, b| b.count.cmp(&a.count).then(a.member.cmp(&b.member)));

        let counts: Vec<u32> = member_counts.values().copied().collect();
        let std_deviation = population_std(&counts, expected);
        let max_deviation = member_loads
            .iter()
            .map(|l| l.deviation.abs())
            .fold(0.0, f64::max);
        let fairness_score = if expected == 0.0 {
            100.0
        } else {
            (100.0 * (1.0 - max_deviation / expected)).clamp(0.0, 100.0)
        };

        Self {
            total_assignments: total,
            member_loads,
            role_counts,
            expected_per_member: expected,
            std_deviation,
            max_deviation,
            gini_coefficient: gini(&counts),
            fairness_score,
        }
    }
}

/// Gini coefficient of a count distribution.
///
/// 0.0 = perfectly even, approaching 1.0 as one member absorbs all
/// assignments. Zero for empty or all-zero input.
fn gini(counts: &[u32]) -> f64 {
    let n = counts.len();
    let total: u64 = counts.iter().map(|&c| c as u64).sum();
    if n == 0 || total == 0 {
        return 0.0;
    }

    let mut sorted: Vec<u32> = counts.to_vec();
    sorted.sort_unstable();

    let weighted: u64 = sorted
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as u64 + 1) * v as u64)
        .sum();

    let n = n as f64;
    (2.0 * weighted as f64) / (n * total as f64) - (n + 1.0) / n
}

fn population_std(counts: &[u32], mean: f64) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let variance = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / counts.len() as f64;
    variance.sqrt()
}

/// Availability of one date.
#[derive(Debug, Clone, Serialize)]
pub struct DateAvailability {
    /// The date.
    pub date: String,
    /// Members available on the date.
    pub available: usize,
    /// Fraction of members unavailable (0.0 = everyone can serve).
    pub difficulty: f64,
}

/// Availability of one member across the horizon.
#[derive(Debug, Clone, Serialize)]
pub struct MemberAvailability {
    /// Member name.
    pub member: String,
    /// Dates the member is available for.
    pub available_days: usize,
    /// Fraction of the horizon the member is available (0.0..1.0).
    pub rate: f64,
}

/// Demand-side statistics over an availability table.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReport {
    /// Per-date availability, in horizon order.
    pub dates: Vec<DateAvailability>,
    /// Per-member availability, most available first (name breaks ties).
    pub members: Vec<MemberAvailability>,
}

impl AvailabilityReport {
    /// Computes the report from an availability table.
    pub fn calculate(table: &AvailabilityTable) -> Self {
        let member_total = table.members().len();
        let horizon = table.dates().len();

        let dates = table
            .dates()
            .iter()
            .map(|date| {
                let available = table.available_on(date).len();
                DateAvailability {
                    date: date.clone(),
                    available,
                    difficulty: if member_total == 0 {
                        0.0
                    } else {
                        (member_total - available) as f64 / member_total as f64
                    },
                }
            })
            .collect();

        let mut members: Vec<MemberAvailability> = table
            .members()
            .iter()
            .map(|member| {
                let available_days = table.available_day_count(member);
                MemberAvailability {
                    member: member.clone(),
                    available_days,
                    rate: if horizon == 0 {
                        0.0
                    } else {
                        available_days as f64 / horizon as f64
                    },
                }
            })
            .collect();
        members.sort_by(|a, b| {
            b.available_days
                .cmp(&a.available_days)
                .then(a.member.cmp(&b.member))
        });

        Self { dates, members }
    }

    /// Dates sorted hardest-to-staff first.
    pub fn hardest_dates(&self) -> Vec<&DateAvailability> {
        let mut sorted: Vec<&DateAvailability> = self.dates.iter().collect();
        sorted.sort_by(|a, b| {
            b.difficulty
                .partial_cmp(&a.difficulty)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.date.cmp(&b.date))
        });
        sorted
    }
}
