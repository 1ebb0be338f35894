//! Dirty-state detection and commit planning.
//!
//! Everything here is a pure function of a [`DraftStore`] (and, where
//! metadata is concerned, the plan it was seeded from). Executing the result
//! is the job of [`crate::reconciler`].

use crate::{
    draft::{ChangeState, DraftStore},
    models::{ItemId, Plan, PlanItemContent},
};

/// The remote item operations needed to make the store match a draft.
///
/// The reconciler executes `deletes` first, then `creates`, then `updates`.
/// Order within each list carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitPlan {
    /// Persisted items removed in the draft
    pub deletes: Vec<ItemId>,

    /// Content of items added in the draft, in the order they were added
    pub creates: Vec<PlanItemContent>,

    /// Persisted items whose content was edited
    pub updates: Vec<(ItemId, PlanItemContent)>,
}

impl CommitPlan {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.creates.is_empty() && self.updates.is_empty()
    }

    /// Total number of item operations.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.creates.len() + self.updates.len()
    }
}

/// Which plan metadata fields differ from the source plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataDiff {
    pub title_changed: bool,
    pub description_changed: bool,

    /// Title to write when `title_changed`
    pub title: String,

    /// Description to write when `description_changed`
    pub description: Option<String>,
}

impl MetadataDiff {
    pub fn has_changes(&self) -> bool {
        self.title_changed || self.description_changed
    }
}

/// Returns true if committing `draft` would change anything.
///
/// Without a source plan only the presence of visible items counts.
pub fn is_dirty(draft: &DraftStore, source: Option<&Plan>) -> bool {
    let Some(source) = source else {
        return draft.visible_count() > 0;
    };

    metadata_diff(draft, Some(source)).has_changes()
        || draft
            .items()
            .iter()
            .any(|item| item.change_state().is_pending())
}

/// Derives the item operations pending in `draft`.
pub fn build_commit_plan(draft: &DraftStore) -> CommitPlan {
    let mut plan = CommitPlan::default();

    for item in draft.items() {
        match (item.change_state(), item.remote_id()) {
            (ChangeState::Deleted, Some(id)) => plan.deletes.push(id),
            (ChangeState::Created, _) => plan.creates.push(item.content().clone()),
            (ChangeState::Modified, Some(id)) => plan.updates.push((id, item.content().clone())),
            _ => {}
        }
    }

    plan
}

/// Compares the draft's title and description against `source`.
///
/// With no source every non-empty field counts as changed.
pub fn metadata_diff(draft: &DraftStore, source: Option<&Plan>) -> MetadataDiff {
    let (title_changed, description_changed) = match source {
        Some(plan) => (
            draft.title() != plan.title,
            draft.description() != plan.description.as_deref(),
        ),
        None => (!draft.title().is_empty(), draft.description().is_some()),
    };

    MetadataDiff {
        title_changed,
        description_changed,
        title: draft.title().to_string(),
        description: draft.description().map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        draft::ItemKey,
        models::{Category, Frequency, PlanItem},
    };

    fn content(title: &str) -> PlanItemContent {
        PlanItemContent::new(title, Category::Habits, Frequency::Daily)
    }

    fn item(id: u64, title: &str) -> PlanItem {
        PlanItem {
            id: ItemId(id),
            plan_id: 1,
            content: content(title),
            sort_order: id as i32,
        }
    }

    fn create_test_plan() -> Plan {
        Plan {
            id: 1,
            title: "Week 1".to_string(),
            description: None,
            items: vec![item(10, "A"), item(11, "C"), item(12, "D"), item(13, "E")],
            created_at: Timestamp::from_second(1_700_000_000).unwrap(),
            updated_at: Timestamp::from_second(1_700_000_000).unwrap(),
        }
    }

    #[test]
    fn test_fresh_seed_is_clean() {
        let plan = create_test_plan();
        let draft = DraftStore::from_plan(&plan);

        assert!(!is_dirty(&draft, Some(&plan)));
        assert!(build_commit_plan(&draft).is_empty());
        assert!(!metadata_diff(&draft, Some(&plan)).has_changes());
    }

    #[test]
    fn test_each_mutation_makes_draft_dirty() {
        let plan = create_test_plan();
        let mutations: Vec<Box<dyn Fn(&mut DraftStore)>> = vec![
            Box::new(|d: &mut DraftStore| {
                d.add_item(content("B")).unwrap();
            }),
            Box::new(|d: &mut DraftStore| d.edit_item(ItemKey::Persisted(ItemId(10)), content("A2")).unwrap()),
            Box::new(|d: &mut DraftStore| d.delete_item(ItemKey::Persisted(ItemId(11))).unwrap()),
            Box::new(|d: &mut DraftStore| d.set_title("Week 1 Revised")),
            Box::new(|d: &mut DraftStore| d.set_description("Focus on sleep")),
        ];

        for mutate in &mutations {
            let mut draft = DraftStore::from_plan(&plan);
            mutate(&mut draft);
            assert!(is_dirty(&draft, Some(&plan)));

            draft.seed(&plan);
            assert!(!is_dirty(&draft, Some(&plan)));
        }
    }

    #[test]
    fn test_setting_same_title_is_clean() {
        let plan = create_test_plan();
        let mut draft = DraftStore::from_plan(&plan);
        draft.set_title("Week 1");
        draft.set_description("");

        assert!(!is_dirty(&draft, Some(&plan)));
    }

    #[test]
    fn test_added_then_deleted_item_is_clean() {
        let plan = create_test_plan();
        let mut draft = DraftStore::from_plan(&plan);
        let id = draft.add_item(content("X")).unwrap();
        draft.delete_item(id.into()).unwrap();

        assert!(!is_dirty(&draft, Some(&plan)));
        assert!(build_commit_plan(&draft).is_empty());
    }

    #[test]
    fn test_without_source_dirty_tracks_visible_items() {
        let mut draft = DraftStore::new();
        assert!(!is_dirty(&draft, None));

        let id = draft.add_item(content("First")).unwrap();
        assert!(is_dirty(&draft, None));

        draft.delete_item(id.into()).unwrap();
        assert!(!is_dirty(&draft, None));
    }

    #[test]
    fn test_commit_plan_counts_match_changes() {
        let plan = create_test_plan();
        let mut draft = DraftStore::from_plan(&plan);

        for title in ["N1", "N2", "N3"] {
            draft.add_item(content(title)).unwrap();
        }
        draft.edit_item(ItemKey::Persisted(ItemId(10)), content("A2")).unwrap();
        draft.edit_item(ItemKey::Persisted(ItemId(11)), content("C2")).unwrap();
        draft.delete_item(ItemKey::Persisted(ItemId(12))).unwrap();

        let commit = build_commit_plan(&draft);

        assert_eq!(commit.creates.len(), 3);
        assert_eq!(commit.updates.len(), 2);
        assert_eq!(commit.deletes, vec![ItemId(12)]);
        assert_eq!(commit.len(), 6);
        assert_eq!(
            commit.creates.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
            vec!["N1", "N2", "N3"]
        );
    }

    #[test]
    fn test_modified_then_deleted_is_only_a_delete() {
        let plan = create_test_plan();
        let mut draft = DraftStore::from_plan(&plan);
        let key = ItemKey::Persisted(ItemId(13));
        draft.edit_item(key, content("E2")).unwrap();
        draft.delete_item(key).unwrap();

        let commit = build_commit_plan(&draft);

        assert_eq!(commit.deletes, vec![ItemId(13)]);
        assert!(commit.updates.is_empty());
    }

    #[test]
    fn test_edited_new_item_is_a_create_not_an_update() {
        let mut draft = DraftStore::from_plan(&create_test_plan());
        let id = draft.add_item(content("New")).unwrap();
        draft.edit_item(id.into(), content("Renamed")).unwrap();

        let commit = build_commit_plan(&draft);

        assert_eq!(commit.creates, vec![content("Renamed")]);
        assert!(commit.updates.is_empty());
    }

    #[test]
    fn test_metadata_diff_reports_changed_fields_only() {
        let plan = create_test_plan();
        let mut draft = DraftStore::from_plan(&plan);
        draft.set_description("Sleep first");

        let diff = metadata_diff(&draft, Some(&plan));

        assert!(!diff.title_changed);
        assert!(diff.description_changed);
        assert_eq!(diff.description.as_deref(), Some("Sleep first"));
        assert_eq!(diff.title, "Week 1");
    }

    #[test]
    fn test_metadata_diff_without_source() {
        let mut draft = DraftStore::new();
        assert!(!metadata_diff(&draft, None).has_changes());

        draft.set_title("Fresh plan");
        let diff = metadata_diff(&draft, None);
        assert!(diff.title_changed);
        assert!(!diff.description_changed);
    }

    #[test]
    fn test_week_one_scenario() {
        let plan = Plan {
            items: vec![item(1, "A")],
            ..create_test_plan()
        };
        let mut draft = DraftStore::from_plan(&plan);

        draft.add_item(content("B")).unwrap();
        draft.delete_item(ItemKey::Persisted(ItemId(1))).unwrap();
        draft.set_title("Week 1 Revised");

        assert!(is_dirty(&draft, Some(&plan)));
        let visible: Vec<&str> = draft
            .visible_items()
            .iter()
            .map(|i| i.content().title.as_str())
            .collect();
        assert_eq!(visible, vec!["B"]);
        assert_eq!(
            build_commit_plan(&draft),
            CommitPlan {
                deletes: vec![ItemId(1)],
                creates: vec![content("B")],
                updates: vec![],
            }
        );
        assert!(metadata_diff(&draft, Some(&plan)).title_changed);

        draft.seed(&plan);
        let visible: Vec<&str> = draft
            .visible_items()
            .iter()
            .map(|i| i.content().title.as_str())
            .collect();
        assert_eq!(visible, vec!["A"]);
        assert_eq!(draft.title(), "Week 1");
        assert!(!is_dirty(&draft, Some(&plan)));
    }
}
