#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use coachplan_core::{
    Category, EditSession, Frequency, ItemId, MemoryStore, Plan, PlanItem, PlanItemContent,
    PlanStore, SavedTemplate, SessionBuilder, TemplateStore,
};

/// A remote call as seen by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchPlan(u64),
    FetchItems(u64),
    UpdateMetadata(u64),
    AddItem(String),
    UpdateItem(ItemId),
    DeleteItem(ItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    FetchPlan,
    FetchItems,
    UpdateMetadata,
    AddItem,
    UpdateItem,
    DeleteItem,
}

impl Call {
    fn op(&self) -> Op {
        match self {
            Call::FetchPlan(_) => Op::FetchPlan,
            Call::FetchItems(_) => Op::FetchItems,
            Call::UpdateMetadata(_) => Op::UpdateMetadata,
            Call::AddItem(_) => Op::AddItem,
            Call::UpdateItem(_) => Op::UpdateItem,
            Call::DeleteItem(_) => Op::DeleteItem,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct FailRule {
    op: Op,
    nth: usize,
    repeat: bool,
}

/// Wraps a [`MemoryStore`], journaling every plan call and failing chosen
/// ones before they reach the inner store.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    rules: Mutex<Vec<FailRule>>,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Fails only the `nth` (1-based) call of `op`, counted from now.
    pub fn fail_at(&self, op: Op, nth: usize) {
        self.push_rule(op, nth, false);
    }

    /// Fails the `nth` (1-based) call of `op` and every later one.
    pub fn fail_from(&self, op: Op, nth: usize) {
        self.push_rule(op, nth, true);
    }

    pub fn heal(&self) {
        self.rules.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Journaled calls that write to the store.
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call.op(), Op::FetchPlan | Op::FetchItems))
            .collect()
    }

    fn push_rule(&self, op: Op, nth: usize, repeat: bool) {
        let seen = self
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.op() == op)
            .count();
        self.rules.lock().unwrap().push(FailRule {
            op,
            nth: seen + nth,
            repeat,
        });
    }

    fn record(&self, call: Call) -> anyhow::Result<()> {
        let op = call.op();
        let mut calls = self.calls.lock().unwrap();
        calls.push(call.clone());
        let count = calls.iter().filter(|c| c.op() == op).count();

        let failing = self.rules.lock().unwrap().iter().any(|rule| {
            rule.op == op && (count == rule.nth || (rule.repeat && count > rule.nth))
        });
        if failing {
            Err(anyhow!("injected failure on {call:?}"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PlanStore for FlakyStore {
    async fn fetch_plan(&self, plan_id: u64) -> anyhow::Result<Plan> {
        self.record(Call::FetchPlan(plan_id))?;
        self.inner.fetch_plan(plan_id).await
    }

    async fn fetch_items_for_plan(&self, plan_id: u64) -> anyhow::Result<Vec<PlanItem>> {
        self.record(Call::FetchItems(plan_id))?;
        self.inner.fetch_items_for_plan(plan_id).await
    }

    async fn update_plan_metadata(
        &self,
        plan_id: u64,
        title: &str,
        description: Option<&str>,
    ) -> anyhow::Result<()> {
        self.record(Call::UpdateMetadata(plan_id))?;
        self.inner.update_plan_metadata(plan_id, title, description).await
    }

    async fn add_item(&self, plan_id: u64, content: &PlanItemContent) -> anyhow::Result<PlanItem> {
        self.record(Call::AddItem(content.title.clone()))?;
        self.inner.add_item(plan_id, content).await
    }

    async fn update_item(&self, id: ItemId, content: &PlanItemContent) -> anyhow::Result<()> {
        self.record(Call::UpdateItem(id))?;
        self.inner.update_item(id, content).await
    }

    async fn delete_item(&self, id: ItemId) -> anyhow::Result<()> {
        self.record(Call::DeleteItem(id))?;
        self.inner.delete_item(id).await
    }
}

#[async_trait]
impl TemplateStore for FlakyStore {
    async fn fetch_templates(&self) -> anyhow::Result<Vec<SavedTemplate>> {
        self.inner.fetch_templates().await
    }

    async fn create_template(
        &self,
        name: &str,
        description: Option<&str>,
        items: &[PlanItemContent],
    ) -> anyhow::Result<SavedTemplate> {
        self.inner.create_template(name, description, items).await
    }

    async fn delete_template(&self, id: u64) -> anyhow::Result<()> {
        self.inner.delete_template(id).await
    }
}

pub fn content(title: &str, category: Category) -> PlanItemContent {
    PlanItemContent::new(title, category, Frequency::Daily)
}

/// Creates a plan "Week 1" holding items A, C, D and E, and a session on it
/// with an empty call journal.
pub async fn create_test_session() -> (Arc<FlakyStore>, EditSession<FlakyStore>) {
    let inner = MemoryStore::new();
    let plan = inner.create_plan("Week 1", None).await;
    for title in ["A", "C", "D", "E"] {
        inner
            .add_item(plan.id, &content(title, Category::Fitness))
            .await
            .expect("Failed to seed item");
    }

    let store = Arc::new(FlakyStore::new(inner));
    let session = SessionBuilder::new()
        .with_plan_id(Some(plan.id))
        .build(Arc::clone(&store))
        .await
        .expect("Failed to build session");
    store.clear_calls();
    (store, session)
}

/// Persisted id of the visible item titled `title`.
pub fn id_of<S: PlanStore + ?Sized>(session: &EditSession<S>, title: &str) -> ItemId {
    session
        .draft()
        .visible_items()
        .iter()
        .find(|item| item.content().title == title)
        .and_then(|item| item.remote_id())
        .expect("No persisted item with that title")
}
