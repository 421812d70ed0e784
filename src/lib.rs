//! # Course Sheet
//!
//! Reads, edits and writes course schedule workbooks: sheets with a free-form
//! title block, a header row, and schedule rows grouped under college headers,
//! each row carrying two independent room/day/time slots.
//!
//! ## Features
//!
//! - **File formats**: Office Open XML workbooks (`.xlsx`, `.xlsm`) and CSV
//! - **Schedule model**: typed entries behind one named-column mapping
//! - **Course grouping**: sections of one course are kept next to each other
//!   across add, edit and delete
//! - **Conflict detection**: same room, same day, overlapping times, per slot
//! - **Section merging**: suggestions below a capacity threshold and merging
//!   two sections of a course into one
//!
//! ## Example
//!
//! ```no_run
//! use course_sheet::config::ScheduleConfig;
//! use course_sheet::schedule::{find_conflicts, ScheduleBook};
//!
//! # fn main() -> Result<(), course_sheet::error::CourseSheetError> {
//! let book = ScheduleBook::open("Schedule.xlsx", &ScheduleConfig::default())?;
//! for conflict in find_conflicts(book.store().snapshot()).conflicts {
//!     println!("{} conflicts with {} in {}", conflict.first, conflict.second, conflict.slot);
//! }
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod error;
mod helpers;
pub mod presentation;
pub mod schedule;
pub mod spreadsheet;

pub use config::ScheduleConfig;
pub use error::CourseSheetError;
pub use schedule::ScheduleBook;
pub use schedule::ScheduleEntry;
pub use schedule::ScheduleStore;
