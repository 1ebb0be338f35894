use std::sync::Arc;

use super::*;
use crate::{
    models::{Category, Frequency, PlanItemContent},
    params::{EditOp, ItemInput, ItemRef},
    store::{MemoryStore, TemplateStore},
};

fn item_input(title: &str, category: &str) -> ItemInput {
    ItemInput {
        title: title.to_string(),
        category: category.to_string(),
        frequency: "daily".to_string(),
        ..ItemInput::default()
    }
}

async fn create_test_session() -> (EditSession<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let plan = store.create_plan("Week 1", Some("Base block")).await;
    for title in ["Squats", "Pushups"] {
        store
            .add_item(
                plan.id,
                &PlanItemContent::new(title, Category::Fitness, Frequency::Weekly),
            )
            .await
            .unwrap();
    }

    let session = SessionBuilder::new()
        .with_plan_id(Some(plan.id))
        .build(Arc::clone(&store))
        .await
        .unwrap();
    (session, store)
}

#[tokio::test]
async fn test_builder_seeds_from_store() {
    let (session, _store) = create_test_session().await;

    assert!(!session.is_dirty());
    assert_eq!(session.draft().title(), "Week 1");
    assert_eq!(session.draft().description(), Some("Base block"));
    assert_eq!(session.draft().visible_count(), 2);
    assert_eq!(session.source().map(|p| p.items.len()), Some(2));
}

#[tokio::test]
async fn test_builder_without_plan_gives_empty_draft() {
    let session = SessionBuilder::new()
        .build(Arc::new(MemoryStore::new()))
        .await
        .unwrap();

    assert!(session.source().is_none());
    assert_eq!(session.draft(), &DraftStore::new());
}

#[tokio::test]
async fn test_builder_reports_missing_plan() {
    let result = SessionBuilder::new()
        .with_plan_id(Some(99))
        .build(Arc::new(MemoryStore::new()))
        .await;

    match result {
        Err(DraftError::Store { message, .. }) => assert!(message.contains("99")),
        other => panic!("Expected Store error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_apply_script_then_commit() {
    let (mut session, store) = create_test_session().await;
    let squats = session.source().unwrap().items[0].id;

    let applied = session
        .apply_all(vec![
            EditOp::SetTitle {
                title: "Week 2".to_string(),
            },
            EditOp::Add {
                item: item_input("Meal prep", "nutrition"),
            },
            EditOp::Edit {
                target: ItemRef::Draft(0),
                item: item_input("Sunday meal prep", "nutrition"),
            },
            EditOp::Delete {
                target: ItemRef::Id(squats.0),
            },
        ])
        .unwrap();
    assert_eq!(applied, 4);

    let pending = session.commit_plan();
    assert_eq!(pending.deletes, vec![squats]);
    assert_eq!(pending.creates.len(), 1);
    assert!(session.metadata_diff().title_changed);

    let report = session.commit().await.unwrap();
    assert_eq!(report.progress.created, 1);
    assert!(!session.is_dirty());

    let remote = store.fetch_plan(report.plan_id).await.unwrap();
    assert_eq!(remote.title, "Week 2");
    let titles: Vec<&str> = remote.items.iter().map(|i| i.content.title.as_str()).collect();
    assert_eq!(titles, vec!["Pushups", "Sunday meal prep"]);
}

#[tokio::test]
async fn test_invalid_edit_leaves_draft_untouched() {
    let (mut session, _store) = create_test_session().await;
    let before = session.draft().clone();

    let err = session
        .apply(EditOp::Add {
            item: item_input("Foam roll", "stretching"),
        })
        .unwrap_err();

    assert!(matches!(err, DraftError::Validation { ref field, .. } if field == "category"));
    assert_eq!(session.draft(), &before);
}

#[tokio::test]
async fn test_apply_all_stops_at_first_failure() {
    let (mut session, _store) = create_test_session().await;

    let result = session.apply_all(vec![
        EditOp::SetTitle {
            title: "Week 2".to_string(),
        },
        EditOp::Delete {
            target: ItemRef::Draft(5),
        },
        EditOp::SetDescription {
            description: "never applied".to_string(),
        },
    ]);

    assert!(matches!(result, Err(DraftError::NotFound { .. })));
    assert_eq!(session.draft().title(), "Week 2");
    assert_eq!(session.draft().description(), Some("Base block"));
}

#[tokio::test]
async fn test_discard_op_restores_source() {
    let (mut session, _store) = create_test_session().await;
    let clean = session.draft().clone();

    session
        .apply(EditOp::Add {
            item: item_input("Walk", "fitness"),
        })
        .unwrap();
    session.apply(EditOp::Discard).unwrap();

    assert_eq!(session.draft(), &clean);
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn test_refresh_picks_up_remote_changes() {
    let (mut session, store) = create_test_session().await;
    let plan_id = session.source().unwrap().id;
    store
        .update_plan_metadata(plan_id, "Renamed remotely", None)
        .await
        .unwrap();

    session.refresh().await.unwrap();

    assert_eq!(session.draft().title(), "Renamed remotely");
    assert_eq!(session.draft().description(), None);
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn test_refresh_without_plan_fails() {
    let mut session = SessionBuilder::new()
        .build(Arc::new(MemoryStore::new()))
        .await
        .unwrap();

    assert!(matches!(
        session.refresh().await,
        Err(DraftError::NoActivePlan)
    ));
}

#[tokio::test]
async fn test_save_and_apply_saved_template() {
    let (session, store) = create_test_session().await;

    let saved = session
        .save_template("Strength basics", Some("Two lifts".to_string()))
        .await
        .unwrap();
    assert_eq!(saved.template.items.len(), 2);

    let other = store.create_plan("Week 3", None).await;
    let mut target = SessionBuilder::new()
        .with_plan_id(Some(other.id))
        .build(Arc::clone(&store))
        .await
        .unwrap();

    let ids = target.apply_saved_template(saved.id).await.unwrap();
    assert_eq!(ids.len(), 2);
    assert!(target.is_dirty());
    assert_eq!(target.commit_plan().creates, saved.template.items);
}

#[tokio::test]
async fn test_save_template_requires_name() {
    let (session, store) = create_test_session().await;

    let err = session.save_template("  ", None).await.unwrap_err();

    assert!(matches!(err, DraftError::Validation { ref field, .. } if field == "name"));
    assert!(store.fetch_templates().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_apply_unknown_template() {
    let (mut session, _store) = create_test_session().await;

    let err = session.apply_saved_template(12).await.unwrap_err();

    assert!(matches!(err, DraftError::TemplateNotFound { id: 12 }));
    assert!(!session.is_dirty());
}

#[tokio::test]
async fn test_delete_template() {
    let (session, _store) = create_test_session().await;
    let saved = session.save_template("Temp", None).await.unwrap();

    session.delete_template(saved.id).await.unwrap();

    assert!(session.list_templates().await.unwrap().is_empty());
    assert!(matches!(
        session.delete_template(saved.id).await,
        Err(DraftError::Store { .. })
    ));
}
