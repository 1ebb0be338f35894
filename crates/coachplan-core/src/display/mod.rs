//! Markdown rendering for plans, templates and drafts.
//!
//! Domain models implement `Display` directly; views that combine several
//! values (a draft next to its source plan) are small wrapper types holding
//! references.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Plan, Template)│───▶│ (DraftOverview, │───▶│     Output      │
//! │                 │    │  LocalDateTime) │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`models`]: Display implementations for plans, items and templates
//! - [`draft`]: Draft overview, commit plan and metadata diff rendering
//! - [`datetime`]: Timestamp and time-of-day formatting
//! - [`status`]: Commit outcome lines (OperationStatus)
//!
//! ```rust
//! use coachplan_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Committed 3 changes");
//! assert_eq!(status.to_string(), "Success: Committed 3 changes\n");
//! ```

pub mod datetime;
pub mod draft;
pub mod models;
pub mod status;

pub use datetime::{ClockTime, LocalDateTime};
pub use draft::DraftOverview;
pub use status::{OperationStatus, Outcome};
