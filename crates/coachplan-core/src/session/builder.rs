//! Builder for creating and configuring EditSession instances.

use std::sync::Arc;

use log::debug;

use super::EditSession;
use crate::{
    error::{Result, StoreResultExt},
    reconciler::Reconciler,
    store::PlanStore,
};

/// Builder for creating and configuring EditSession instances.
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    plan_id: Option<u64>,
}

impl SessionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self { plan_id: None }
    }

    /// Sets the plan to edit.
    ///
    /// If not specified, the session starts from an empty draft with no
    /// backing plan; such a session can be edited and captured as a template
    /// but not committed.
    pub fn with_plan_id(mut self, plan_id: Option<u64>) -> Self {
        if let Some(id) = plan_id {
            self.plan_id = Some(id);
        }
        self
    }

    /// Builds the session, fetching the plan and its items first.
    ///
    /// # Errors
    ///
    /// Returns `DraftError::Store` if the plan or its items cannot be fetched
    pub async fn build<S: PlanStore + ?Sized>(self, store: Arc<S>) -> Result<EditSession<S>> {
        let reconciler = Reconciler::new(store);
        let source = match self.plan_id {
            Some(plan_id) => Some(
                reconciler
                    .fetch_snapshot(plan_id)
                    .await
                    .store_context(&format!("Failed to load plan {plan_id}"))?,
            ),
            None => None,
        };
        debug!(
            "Built edit session for {}",
            source
                .as_ref()
                .map_or_else(|| "a new draft".to_string(), |plan| format!("plan {}", plan.id))
        );
        Ok(EditSession::new(reconciler, source))
    }
}
