//! Collaborator interfaces for plan and template persistence.
//!
//! The core never talks to a database or network directly; it drives these
//! traits. Errors returned by implementations are opaque: the core only
//! distinguishes success from failure and wraps failures with context.
//!
//! [`MemoryStore`] is an in-process implementation of both traits used by
//! the CLI and the test suites.

use async_trait::async_trait;

use crate::models::{ItemId, Plan, PlanItem, PlanItemContent, SavedTemplate};

pub mod memory;

pub use memory::MemoryStore;

/// Remote owner of plans and their items.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Fetches a plan with its metadata.
    async fn fetch_plan(&self, plan_id: u64) -> anyhow::Result<Plan>;

    /// Fetches the current items of a plan.
    async fn fetch_items_for_plan(&self, plan_id: u64) -> anyhow::Result<Vec<PlanItem>>;

    async fn update_plan_metadata(
        &self,
        plan_id: u64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<()>;

    /// Creates an item and returns it with its assigned identity.
    async fn add_item(&self, plan_id: u64, content: &PlanItemContent) -> anyhow::Result<PlanItem>;

    async fn update_item(&self, id: ItemId, content: &PlanItemContent) -> anyhow::Result<()>;

    async fn delete_item(&self, id: ItemId) -> anyhow::Result<()>;
}

/// Remote owner of saved templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn fetch_templates(&self) -> anyhow::Result<Vec<SavedTemplate>>;

    async fn create_template(
        &self,
        name: &str,
        description: Option<&str>,
        items: &[PlanItemContent],
    ) -> anyhow::Result<SavedTemplate>;

    async fn delete_template(&self, id: u64) -> anyhow::Result<()>;
}
