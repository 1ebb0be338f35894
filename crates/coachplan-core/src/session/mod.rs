//! Editing sessions tying a draft to the plan store.
//!
//! An [`EditSession`] owns one [`DraftStore`], the plan it was last seeded
//! from, and a [`Reconciler`] for the store. It is the single writer for its
//! draft: every mutation and every commit goes through `&mut self`, so two
//! commits on the same draft can never overlap.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    EditOp /     │    │   EditSession   │    │    PlanStore    │
//! │  direct calls   │───▶│ (draft, source) │───▶│ (via Reconciler)│
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!    Local edits          Dirty tracking          Remote writes
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Loads the source plan and creates sessions
//! - [`edit_ops`]: Applying [`crate::params::EditOp`] scripts
//! - [`template_ops`]: Saving and replaying stored templates
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use coachplan_core::{
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
//!     .build(store)
//!     .await?;
//!
//! session.draft_mut().add_item(PlanItemContent::new(
//!     "Lights out by 22:30",
//!     Category::Recovery,
//!     Frequency::Daily,
//! ))?;
//! assert!(session.is_dirty());
//!
//! session.commit().await?;
//! assert!(!session.is_dirty());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::info;

use crate::{
    display::DraftOverview,
    draft::DraftStore,
    error::{DraftError, Result, StoreResultExt},
    models::Plan,
    reconciler::{self, CommitReport, Reconciler},
    store::PlanStore,
    tracker::{self, CommitPlan, MetadataDiff},
};

pub mod builder;
pub mod edit_ops;
pub mod template_ops;

#[cfg(test)]
mod tests;

pub use builder::SessionBuilder;

/// A draft of one plan together with the store it commits to.
#[derive(Debug)]
pub struct EditSession<S: ?Sized> {
    draft: DraftStore,
    source: Option<Plan>,
    reconciler: Reconciler<S>,
}

impl<S: PlanStore + ?Sized> EditSession<S> {
    pub(crate) fn new(reconciler: Reconciler<S>, source: Option<Plan>) -> Self {
        let draft = source.as_ref().map(DraftStore::from_plan).unwrap_or_default();
        Self {
            draft,
            source,
            reconciler,
        }
    }

    pub fn draft(&self) -> &DraftStore {
        &self.draft
    }

    /// Mutable access to the draft for direct edits.
    pub fn draft_mut(&mut self) -> &mut DraftStore {
        &mut self.draft
    }

    /// The plan as last fetched from the store.
    pub fn source(&self) -> Option<&Plan> {
        self.source.as_ref()
    }

    pub fn store(&self) -> &Arc<S> {
        self.reconciler.store()
    }

    pub fn is_dirty(&self) -> bool {
        tracker::is_dirty(&self.draft, self.source.as_ref())
    }

    /// Item operations a commit would issue right now.
    pub fn commit_plan(&self) -> CommitPlan {
        tracker::build_commit_plan(&self.draft)
    }

    pub fn metadata_diff(&self) -> MetadataDiff {
        tracker::metadata_diff(&self.draft, self.source.as_ref())
    }

    /// Markdown-renderable summary of the draft and its pending changes.
    pub fn overview(&self) -> DraftOverview<'_> {
        DraftOverview::new(&self.draft, self.source.as_ref())
    }

    /// Writes pending changes to the store and reseeds the draft.
    ///
    /// See [`Reconciler::commit`] for the failure semantics.
    pub async fn commit(&mut self) -> Result<CommitReport> {
        self.reconciler.commit(&mut self.draft, &mut self.source).await
    }

    /// Drops every pending change.
    pub fn discard(&mut self) {
        reconciler::discard(&mut self.draft, self.source.as_ref());
    }

    /// Refetches the source plan and reseeds the draft from it.
    ///
    /// Pending changes are dropped.
    ///
    /// # Errors
    ///
    /// * `DraftError::NoActivePlan` - When the session has no backing plan
    /// * `DraftError::Store` - When the fetch fails; the draft is untouched
    pub async fn refresh(&mut self) -> Result<()> {
        let plan_id = self
            .draft
            .source_plan_id()
            .ok_or(DraftError::NoActivePlan)?;
        let fresh = self
            .reconciler
            .fetch_snapshot(plan_id)
            .await
            .store_context(&format!("Failed to refresh plan {plan_id}"))?;
        info!("Refreshed plan {plan_id} ({} items)", fresh.items.len());
        self.draft.seed(&fresh);
        self.source = Some(fresh);
        Ok(())
    }
}
