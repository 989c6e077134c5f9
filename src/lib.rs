//! Service roster generation.
//!
//! Assigns members to recurring service roles across a sequence of
//! dates, respecting per-member availability, per-role qualification,
//! and fairness of rotation. The engine is a single deterministic
//! greedy pass: no global optimization, no randomness, no I/O — the
//! surrounding application owns storage and presentation and feeds the
//! engine plain data.
//!
//! # Modules
//!
//! - **`models`**: Data contracts — `AvailabilityTable`, `Roster`,
//!   `ServiceDay`, `SlotAssignment`
//! - **`catalog`**: Role definitions, priority order, qualification pools
//! - **`fairness`**: Per-role assignment counters and candidate ranking
//! - **`engine`**: The date-by-date, role-by-role greedy solver
//! - **`validation`**: Independent invariant checks over a roster
//! - **`coverage`**: Pre-generation "who could serve" queries
//! - **`analytics`**: Distribution, fairness, and availability metrics
//!
//! # Example
//!
//! ```
//! use roster_engine::catalog::RoleCatalog;
//! use roster_engine::engine::RosterEngine;
//! use roster_engine::fairness::FairnessTracker;
//! use roster_engine::models::AvailabilityTable;
//! use roster_engine::validation::validate_roster;
//!
//! let catalog = RoleCatalog::worship_team()
//!     .with_pool("vocal_main", ["Alice", "Bob"])
//!     .with_pool("vocal_sub", ["Alice", "Bob", "Dave", "Eve"])
//!     .with_pool("piano", ["Carol"])
//!     .with_pool("drum", ["Dave"])
//!     .with_pool("bass", ["Eve"])
//!     .with_pool("pa", ["Frank"])
//!     .with_pool("ppt", ["Frank", "Eve"])
//!     .build()
//!     .expect("catalog misconfigured");
//!
//! let mut availability = AvailabilityTable::new().with_dates(["07/04", "14/04"]);
//! for member in ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"] {
//!     availability.mark_available(member, "07/04");
//!     availability.mark_available(member, "14/04");
//! }
//!
//! let mut tracker = FairnessTracker::new();
//! let roster = RosterEngine::new().generate(&availability, &catalog, &mut tracker);
//!
//! assert!(validate_roster(&roster, &catalog, &availability).is_ok());
//! assert_eq!(roster.assignment("07/04", "piano"), Some("Carol"));
//! ```

pub mod analytics;
pub mod catalog;
pub mod coverage;
pub mod engine;
pub mod fairness;
pub mod models;
pub mod validation;
