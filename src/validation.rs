//! Independent roster validation.
//!
//! Re-checks the roster invariants without reusing any engine logic,
//! so a future change to the generation algorithm cannot silently
//! break them. A violation indicates an engine defect (or a roster
//! edited outside the engine), not an expected runtime condition.
//!
//! Checks:
//! 1. No member occupies two roles on the same date.
//! 2. Every filled slot holds a qualified member.
//! 3. Every filled slot holds a member available on that date.
//! 4. Main vocal and the two sub-vocal slots are pairwise distinct.
//! 5. A slot is open only when no eligible unused member existed.

use std::collections::HashMap;

use crate::catalog::RoleCatalog;
use crate::models::{AvailabilityTable, Roster};

/// Validation result.
pub type ValidationResult = Result<(), Vec<RosterViolation>>;

/// A roster invariant violation.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterViolation {
    /// Violation category.
    pub kind: RosterViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of roster violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterViolationKind {
    /// A member fills two roles on the same date.
    DoubleBooking,
    /// A filled slot holds a member outside the role's pool.
    NotQualified,
    /// A filled slot holds a member who was unavailable that date.
    NotAvailable,
    /// Two of the three vocal slots share a member.
    VocalOverlap,
    /// A slot is open although an eligible unused member existed.
    UnexplainedGap,
}

impl RosterViolation {
    fn new(kind: RosterViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The vocal roles whose pairwise distinctness is checked explicitly.
const VOCAL_ROLES: [&str; 3] = ["vocal_main", "vocal_sub1", "vocal_sub2"];

/// Validates a roster against its inputs.
///
/// Collects all violations instead of stopping at the first one.
/// Returns `Ok(())` when every invariant holds.
pub fn validate_roster(
    roster: &Roster,
    catalog: &RoleCatalog,
    availability: &AvailabilityTable,
) -> ValidationResult {
    let mut violations = Vec::new();

    for day in &roster.days {
        let date = day.date.as_str();

        // Invariant 1: one role per member per date.
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for slot in &day.slots {
            if let Some(member) = slot.member.as_deref() {
                if let Some(earlier_role) = seen.insert(member, &slot.role) {
                    violations.push(RosterViolation::new(
                        RosterViolationKind::DoubleBooking,
                        format!(
                            "{date}: '{member}' fills both '{earlier_role}' and '{}'",
                            slot.role
                        ),
                    ));
                }
            }
        }

        // Invariants 2 and 3: qualification and availability.
        for slot in &day.slots {
            let Some(member) = slot.member.as_deref() else {
                continue;
            };
            if let Some(role) = catalog.role(&slot.role) {
                if !catalog.is_qualified(member, role) {
                    violations.push(RosterViolation::new(
                        RosterViolationKind::NotQualified,
                        format!("{date}: '{member}' is not qualified for '{}'", slot.role),
                    ));
                }
            }
            if !availability.is_available(member, date) {
                violations.push(RosterViolation::new(
                    RosterViolationKind::NotAvailable,
                    format!("{date}: '{member}' was not available for '{}'", slot.role),
                ));
            }
        }

        // Invariant 4: vocal trio pairwise distinct.
        for (i, a) in VOCAL_ROLES.iter().enumerate() {
            for b in &VOCAL_ROLES[i + 1..] {
                if let (Some(m1), Some(m2)) = (day.member_for(a), day.member_for(b)) {
                    if m1 == m2 {
                        violations.push(RosterViolation::new(
                            RosterViolationKind::VocalOverlap,
                            format!("{date}: '{m1}' fills both '{a}' and '{b}'"),
                        ));
                    }
                }
            }
        }

        // Invariant 5: open slots must be unavoidable.
        for slot in &day.slots {
            if slot.is_filled() {
                continue;
            }
            let Some(role) = catalog.role(&slot.role) else {
                continue;
            };
            let missed = catalog
                .qualified_members(role)
                .iter()
                .find(|m| availability.is_available(m, date) && !day.is_serving(m));
            if let Some(member) = missed {
                violations.push(RosterViolation::new(
                    RosterViolationKind::UnexplainedGap,
                    format!("{date}: '{}' is open but '{member}' was eligible", slot.role),
                ));
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
