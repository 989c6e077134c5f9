//! Roster domain models.
//!
//! Plain-data contracts between the engine and the surrounding
//! application: who is available when, and who ended up serving where.
//! Nothing here performs I/O; availability rows typically originate in
//! a spreadsheet and rosters are handed back for persistence, but the
//! models only know about the data shapes.

mod availability;
mod roster;

pub use availability::{Availability, AvailabilityTable};
pub use roster::{Roster, ServiceDay, SlotAssignment};
