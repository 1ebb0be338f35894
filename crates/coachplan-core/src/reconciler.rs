//! Executing commit plans against the plan store, and discarding drafts.
//!
//! A commit runs in fixed phases: metadata, deletes, creates, updates, then a
//! refetch that reseeds the draft. The first failing remote call aborts the
//! commit; calls that already landed are not rolled back. Whatever the
//! outcome, the reconciler tries to leave the draft seeded from the remote
//! state so that stale change flags never survive a commit attempt.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    draft::DraftStore,
    error::{CommitPhase, CommitProgress, DraftError, Result},
    models::{ItemId, Plan},
    store::PlanStore,
    tracker::{self, CommitPlan, MetadataDiff},
};

/// Outcome of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub plan_id: u64,

    /// Remote calls issued, all of which succeeded
    pub progress: CommitProgress,

    /// Identities the store assigned to created items, in creation order
    pub created_ids: Vec<ItemId>,
}

impl CommitReport {
    /// Returns true if the commit issued no writes.
    pub fn is_noop(&self) -> bool {
        !self.progress.is_partial()
    }
}

/// Applies draft changes to a [`PlanStore`].
#[derive(Debug)]
pub struct Reconciler<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PlanStore + ?Sized> Reconciler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Fetches a plan together with its current items.
    pub async fn fetch_snapshot(&self, plan_id: u64) -> anyhow::Result<Plan> {
        debug!("Fetching plan {plan_id}");
        let mut plan = self.store.fetch_plan(plan_id).await?;
        plan.items = self.store.fetch_items_for_plan(plan_id).await?;
        Ok(plan)
    }

    /// Writes every pending change in `draft` to the store.
    ///
    /// On success `draft` is reseeded from a fresh fetch and `source` is
    /// replaced with that fetch.
    ///
    /// # Errors
    ///
    /// * `DraftError::NoActivePlan` - When the draft has no backing plan or
    ///   `source` holds no snapshot to diff against
    /// * `DraftError::Validation` - When the title was changed to a blank one;
    ///   nothing is written
    /// * `DraftError::Commit` - When a remote call fails. The error records
    ///   the failing phase, the calls that landed before it, and whether the
    ///   draft could be reseeded from the store afterwards. If the reseed
    ///   also fails the draft and `source` are left as they were.
    pub async fn commit(
        &self,
        draft: &mut DraftStore,
        source: &mut Option<Plan>,
    ) -> Result<CommitReport> {
        let plan_id = match (draft.source_plan_id(), source.as_ref()) {
            (Some(plan_id), Some(_)) => plan_id,
            _ => return Err(DraftError::NoActivePlan),
        };

        let diff = tracker::metadata_diff(draft, source.as_ref());
        if diff.title_changed && draft.title().trim().is_empty() {
            return Err(DraftError::validation("title").with_reason("Plan title cannot be empty"));
        }
        let plan = tracker::build_commit_plan(draft);
        info!(
            "Committing plan {plan_id}: {} deletes, {} creates, {} updates, metadata {}",
            plan.deletes.len(),
            plan.creates.len(),
            plan.updates.len(),
            if diff.has_changes() { "changed" } else { "unchanged" }
        );

        let mut progress = CommitProgress::default();
        let mut created_ids = Vec::with_capacity(plan.creates.len());
        if let Err((phase, err)) = self
            .execute(plan_id, &diff, &plan, &mut progress, &mut created_ids)
            .await
        {
            warn!("Commit of plan {plan_id} failed during {phase} ({progress}): {err:#}");
            let resynced = self.resync(plan_id, draft, source).await;
            return Err(DraftError::Commit {
                phase,
                progress,
                resynced,
                source: err,
            });
        }

        match self.fetch_snapshot(plan_id).await {
            Ok(fresh) => {
                draft.seed(&fresh);
                *source = Some(fresh);
            }
            Err(err) => {
                warn!("Refetch of plan {plan_id} after commit failed: {err:#}");
                return Err(DraftError::Commit {
                    phase: CommitPhase::Refresh,
                    progress,
                    resynced: false,
                    source: err,
                });
            }
        }

        info!("Committed plan {plan_id} ({progress})");
        Ok(CommitReport {
            plan_id,
            progress,
            created_ids,
        })
    }

    async fn execute(
        &self,
        plan_id: u64,
        diff: &MetadataDiff,
        plan: &CommitPlan,
        progress: &mut CommitProgress,
        created_ids: &mut Vec<ItemId>,
    ) -> std::result::Result<(), (CommitPhase, anyhow::Error)> {
        if diff.has_changes() {
            debug!("Updating metadata of plan {plan_id}");
            self.store
                .update_plan_metadata(plan_id, &diff.title, diff.description.as_deref())
                .await
                .map_err(|e| (CommitPhase::Metadata, e))?;
            progress.metadata_written = true;
        }

        for id in &plan.deletes {
            debug!("Deleting item {id}");
            self.store
                .delete_item(*id)
                .await
                .map_err(|e| (CommitPhase::Deletes, e))?;
            progress.deleted += 1;
        }

        for content in &plan.creates {
            debug!("Creating item '{}' in plan {plan_id}", content.title);
            let item = self
                .store
                .add_item(plan_id, content)
                .await
                .map_err(|e| (CommitPhase::Creates, e))?;
            created_ids.push(item.id);
            progress.created += 1;
        }

        for (id, content) in &plan.updates {
            debug!("Updating item {id}");
            self.store
                .update_item(*id, content)
                .await
                .map_err(|e| (CommitPhase::Updates, e))?;
            progress.updated += 1;
        }

        Ok(())
    }

    async fn resync(&self, plan_id: u64, draft: &mut DraftStore, source: &mut Option<Plan>) -> bool {
        match self.fetch_snapshot(plan_id).await {
            Ok(fresh) => {
                draft.seed(&fresh);
                *source = Some(fresh);
                info!("Draft resynchronized with plan {plan_id}");
                true
            }
            Err(err) => {
                warn!("Could not resynchronize draft with plan {plan_id}: {err:#}");
                false
            }
        }
    }
}

/// Throws away every pending change in `draft`.
///
/// Reseeds from `source` when there is one, otherwise clears the draft.
/// Calling it repeatedly with the same source yields the same draft.
pub fn discard(draft: &mut DraftStore, source: Option<&Plan>) {
    match source {
        Some(plan) => {
            info!("Discarding draft changes for plan {}", plan.id);
            draft.seed(plan);
        }
        None => {
            info!("Discarding draft with no backing plan");
            draft.clear();
        }
    }
}
