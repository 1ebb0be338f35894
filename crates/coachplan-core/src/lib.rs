//! Core library for editing coaching plans offline and committing them.
//!
//! A coaching plan is a titled list of recurring items (meals, workouts,
//! recovery habits) owned by a remote plan store. This crate keeps a local
//! draft of one plan, tracks which items were created, modified or deleted,
//! and reconciles those changes with the store in a single ordered commit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   DraftStore    │    │     tracker     │    │   Reconciler    │
//! │ (local edits)   │───▶│ (dirty, commit  │───▶│ (PlanStore I/O, │
//! │                 │    │  plan, diff)    │    │  reseed)        │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`draft`]: the working copy and its per-item change states
//! - [`tracker`]: pure derivation of dirtiness and the commit plan
//! - [`reconciler`]: executing a commit plan against a [`store::PlanStore`]
//! - [`templates`]: capturing drafts as templates and replaying them
//! - [`session`]: an [`EditSession`] tying all of the above to a store
//! - [`display`]: markdown rendering for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use coachplan_core::{
//!     draft::ItemKey,
//!     models::{Category, Frequency, PlanItemContent},
//!     MemoryStore, SessionBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::new());
//! let plan = store.create_plan("Week 1", None).await;
//!
//! let mut session = SessionBuilder::new()
//!     .with_plan_id(Some(plan.id))
//!     .build(Arc::clone(&store))
//!     .await?;
//!
//! let draft = session.draft_mut();
//! draft.set_title("Week 1 Revised");
//! let walk = draft.add_item(
//!     PlanItemContent::new("Walk after lunch", Category::Fitness, Frequency::Weekdays)
//!         .with_duration_minutes(20),
//! )?;
//! draft.edit_item(
//!     ItemKey::Draft(walk),
//!     PlanItemContent::new("Walk after dinner", Category::Fitness, Frequency::Weekdays),
//! )?;
//!
//! println!("{}", session.overview());
//!
//! let report = session.commit().await?;
//! assert_eq!(report.progress.created, 1);
//! assert!(!session.is_dirty());
//! # Ok(())
//! # }
//! ```

pub mod display;
pub mod draft;
pub mod error;
pub mod models;
pub mod params;
pub mod reconciler;
pub mod session;
pub mod store;
pub mod templates;
pub mod tracker;

// Re-export commonly used types
pub use display::{DraftOverview, LocalDateTime, OperationStatus};
pub use draft::{ChangeState, DraftId, DraftItem, DraftStore, ItemKey};
pub use error::{CommitPhase, CommitProgress, DraftError, Result};
pub use models::{
    Category, Frequency, ItemId, Plan, PlanItem, PlanItemContent, SavedTemplate, Template,
};
pub use params::{EditOp, ItemInput, ItemRef};
pub use reconciler::{CommitReport, Reconciler};
pub use session::{EditSession, SessionBuilder};
pub use store::{MemoryStore, PlanStore, TemplateStore};
pub use tracker::{CommitPlan, MetadataDiff};
