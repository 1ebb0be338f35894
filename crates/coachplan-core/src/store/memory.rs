//! In-process plan and template store.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::Mutex;

use super::{PlanStore, TemplateStore};
use crate::models::{ItemId, Plan, PlanItem, PlanItemContent, SavedTemplate, Template};

/// Plan and template store held entirely in memory.
///
/// Identities are assigned from monotonically increasing counters, and new
/// items are appended after the plan's highest sort order, the way a
/// relational store with auto-increment keys would behave.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    plans: BTreeMap<u64, Plan>,
    items: BTreeMap<ItemId, PlanItem>,
    templates: BTreeMap<u64, SavedTemplate>,
    next_plan_id: u64,
    next_item_id: u64,
    next_template_id: u64,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with plan snapshots.
    ///
    /// Snapshot identities are kept; later identities continue after the
    /// highest imported one.
    pub fn with_plans(plans: impl IntoIterator<Item = Plan>) -> Self {
        let mut state = MemoryState::default();
        for mut plan in plans {
            for item in plan.items.drain(..) {
                state.next_item_id = state.next_item_id.max(item.id.0 + 1);
                state.items.insert(
                    item.id,
                    PlanItem {
                        plan_id: plan.id,
                        ..item
                    },
                );
            }
            state.next_plan_id = state.next_plan_id.max(plan.id + 1);
            state.plans.insert(plan.id, plan);
        }
        Self {
            state: Mutex::new(state),
        }
    }

    /// Creates a store preloaded with saved templates.
    pub fn with_templates(self, templates: impl IntoIterator<Item = SavedTemplate>) -> Self {
        let mut state = self.state.into_inner();
        for template in templates {
            state.next_template_id = state.next_template_id.max(template.id + 1);
            state.templates.insert(template.id, template);
        }
        Self {
            state: Mutex::new(state),
        }
    }

    /// Creates a new, empty plan.
    pub async fn create_plan(&self, title: &str, description: Option<&str>) -> Plan {
        let mut state = self.state.lock().await;
        let id = state.next_plan_id.max(1);
        state.next_plan_id = id + 1;
        let now = Timestamp::now();
        let plan = Plan {
            id,
            title: title.to_string(),
            description: description.map(String::from),
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        state.plans.insert(id, plan.clone());
        plan
    }
}

impl MemoryState {
    fn plan_mut(&mut self, plan_id: u64) -> anyhow::Result<&mut Plan> {
        self.plans
            .get_mut(&plan_id)
            .ok_or_else(|| anyhow!("Plan with ID {plan_id} not found"))
    }

    fn items_for(&self, plan_id: u64) -> Vec<PlanItem> {
        self.items
            .values()
            .filter(|item| item.plan_id == plan_id)
            .cloned()
            .collect()
    }

    fn touch(&mut self, plan_id: u64) {
        if let Some(plan) = self.plans.get_mut(&plan_id) {
            plan.updated_at = Timestamp::now();
        }
    }
}

#[async_trait]
impl PlanStore for MemoryStore {
    async fn fetch_plan(&self, plan_id: u64) -> anyhow::Result<Plan> {
        let state = self.state.lock().await;
        let plan = state
            .plans
            .get(&plan_id)
            .ok_or_else(|| anyhow!("Plan with ID {plan_id} not found"))?;
        Ok(Plan {
            items: state.items_for(plan_id),
            ..plan.clone()
        })
    }

    async fn fetch_items_for_plan(&self, plan_id: u64) -> anyhow::Result<Vec<PlanItem>> {
        let state = self.state.lock().await;
        if !state.plans.contains_key(&plan_id) {
            bail!("Plan with ID {plan_id} not found");
        }
        Ok(state.items_for(plan_id))
    }

    async fn update_plan_metadata(
        &self,
        plan_id: u64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        let plan = state.plan_mut(plan_id)?;
        plan.title = title.to_string();
        plan.description = description.map(String::from);
        plan.updated_at = Timestamp::now();
        Ok(())
    }

    async fn add_item(&self, plan_id: u64, content: &PlanItemContent) -> anyhow::Result<PlanItem> {
        let mut state = self.state.lock().await;
        state.plan_mut(plan_id)?;

        let sort_order = state
            .items
            .values()
            .filter(|item| item.plan_id == plan_id)
            .map(|item| item.sort_order + 1)
            .max()
            .unwrap_or(0);
        let id = ItemId(state.next_item_id.max(1));
        state.next_item_id = id.0 + 1;

        let item = PlanItem {
            id,
            plan_id,
            content: content.clone(),
            sort_order,
        };
        state.items.insert(id, item.clone());
        state.touch(plan_id);
        Ok(item)
    }

    async fn update_item(&self, id: ItemId, content: &PlanItemContent) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| anyhow!("Plan item with ID {id} not found"))?;
        item.content = content.clone();
        let plan_id = item.plan_id;
        state.touch(plan_id);
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        let item = state
            .items
            .remove(&id)
            .ok_or_else(|| anyhow!("Plan item with ID {id} not found"))?;
        state.touch(item.plan_id);
        Ok(())
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn fetch_templates(&self) -> anyhow::Result<Vec<SavedTemplate>> {
        let state = self.state.lock().await;
        Ok(state.templates.values().cloned().collect())
    }

    async fn create_template(
        &self,
        name: &str,
        description: Option<&str>,
        items: &[PlanItemContent],
    ) -> anyhow::Result<SavedTemplate> {
        let mut state = self.state.lock().await;
        let id = state.next_template_id.max(1);
        state.next_template_id = id + 1;
        let saved = SavedTemplate {
            id,
            template: Template {
                name: name.to_string(),
                description: description.map(String::from),
                items: items.to_vec(),
            },
            created_at: Timestamp::now(),
        };
        state.templates.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_template(&self, id: u64) -> anyhow::Result<()> {
        let mut state = self.state.lock().await;
        state
            .templates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| anyhow!("Template with ID {id} not found"))
    }
}
