//! Coverage checks over availability and qualification data.
//!
//! Answers "who could serve this role on this date" before any roster
//! is generated, so thin dates can be flagged to organizers while there
//! is still time to recruit. Pure queries; nothing here mutates state
//! or commits assignments.

use serde::Serialize;

use crate::catalog::{Role, RoleCatalog};
use crate::models::AvailabilityTable;

/// Severity of a per-date, per-role coverage problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageIssueKind {
    /// No qualified member is available.
    NoOneAvailable,
    /// Fewer eligible members than the configured threshold.
    LimitedAvailability,
}

/// A flagged coverage problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageIssue {
    /// Affected date.
    pub date: String,
    /// Affected role id.
    pub role: String,
    /// Problem severity.
    pub kind: CoverageIssueKind,
    /// Number of eligible members found.
    pub eligible: usize,
}

/// Read-only coverage queries over an availability table and catalog.
#[derive(Debug, Clone)]
pub struct CoverageChecker<'a> {
    availability: &'a AvailabilityTable,
    catalog: &'a RoleCatalog,
    limited_threshold: usize,
}

impl<'a> CoverageChecker<'a> {
    /// Creates a checker with the default limited-availability
    /// threshold of 2 eligible members.
    pub fn new(availability: &'a AvailabilityTable, catalog: &'a RoleCatalog) -> Self {
        Self {
            availability,
            catalog,
            limited_threshold: 2,
        }
    }

    /// Sets the minimum eligible-member count below which a role is
    /// flagged as limited.
    pub fn with_limited_threshold(mut self, threshold: usize) -> Self {
        self.limited_threshold = threshold;
        self
    }

    /// Members both qualified for the role and available on the date,
    /// in deterministic (sorted) order.
    pub fn eligible_for(&self, date: &str, role: &Role) -> Vec<&str> {
        self.catalog
            .qualified_members(role)
            .iter()
            .filter(|m| self.availability.is_available(m, date))
            .map(String::as_str)
            .collect()
    }

    /// Eligible members for every role on a date, in priority order.
    pub fn role_availability(&self, date: &str) -> Vec<(&str, Vec<&str>)> {
        self.catalog
            .roles()
            .iter()
            .map(|role| (role.id.as_str(), self.eligible_for(date, role)))
            .collect()
    }

    /// Coverage problems on one date, in role priority order.
    pub fn coverage_issues(&self, date: &str) -> Vec<CoverageIssue> {
        let mut issues = Vec::new();
        for role in self.catalog.roles() {
            let eligible = self.eligible_for(date, role).len();
            let kind = if eligible == 0 {
                CoverageIssueKind::NoOneAvailable
            } else if eligible < self.limited_threshold {
                CoverageIssueKind::LimitedAvailability
            } else {
                continue;
            };
            issues.push(CoverageIssue {
                date: date.to_string(),
                role: role.id.clone(),
                kind,
                eligible,
            });
        }
        issues
    }

    /// Coverage problems across the whole horizon, in date order.
    pub fn all_issues(&self) -> Vec<CoverageIssue> {
        self.availability
            .dates()
            .iter()
            .flat_map(|date| self.coverage_issues(date))
            .collect()
    }

    /// Eligible-member counts per date per role (date order, then
    /// priority order).
    pub fn coverage_calendar(&self) -> Vec<(&str, Vec<(&str, usize)>)> {
        self.availability
            .dates()
            .iter()
            .map(|date| {
                let counts = self
                    .catalog
                    .roles()
                    .iter()
                    .map(|role| (role.id.as_str(), self.eligible_for(date, role).len()))
                    .collect();
                (date.as_str(), counts)
            })
            .collect()
    }
}
