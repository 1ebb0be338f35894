//! Rendering of drafts and their pending changes.

use std::fmt;

use super::models::fmt_item_details;
use crate::{
    draft::{ChangeState, DraftStore},
    models::Plan,
    tracker::{self, CommitPlan, MetadataDiff},
};

impl fmt::Display for CommitPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No pending item changes.");
        }

        for id in &self.deletes {
            writeln!(f, "- Delete item {id}")?;
        }
        for content in &self.creates {
            writeln!(
                f,
                "- Create \"{}\" ({})",
                content.title,
                content.category.label()
            )?;
        }
        for (id, content) in &self.updates {
            writeln!(f, "- Update item {id} as \"{}\"", content.title)?;
        }
        Ok(())
    }
}

impl fmt::Display for MetadataDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_changes() {
            return writeln!(f, "No metadata changes.");
        }

        if self.title_changed {
            writeln!(f, "- Title: {}", self.title)?;
        }
        if self.description_changed {
            match &self.description {
                Some(desc) => writeln!(f, "- Description: {desc}")?,
                None => writeln!(f, "- Description: (cleared)")?,
            }
        }
        Ok(())
    }
}

/// Markdown view of a draft next to the plan it was seeded from.
///
/// Shows the visible items grouped by category with a change marker per
/// item (`+` created, `~` modified), followed by the pending commit plan and
/// metadata diff when the draft is dirty.
pub struct DraftOverview<'a> {
    draft: &'a DraftStore,
    source: Option<&'a Plan>,
}

impl<'a> DraftOverview<'a> {
    pub fn new(draft: &'a DraftStore, source: Option<&'a Plan>) -> Self {
        Self { draft, source }
    }
}

impl fmt::Display for DraftOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.draft.title().is_empty() {
            "Untitled plan"
        } else {
            self.draft.title()
        };
        writeln!(f, "# {title}")?;
        writeln!(f)?;

        match self.draft.source_plan_id() {
            Some(id) => writeln!(f, "- Plan: {id}")?,
            None => writeln!(f, "- Plan: not saved")?,
        }
        let dirty = tracker::is_dirty(self.draft, self.source);
        writeln!(
            f,
            "- Status: {}",
            if dirty { "unsaved changes" } else { "clean" }
        )?;
        writeln!(f, "- Items: {}", self.draft.visible_count())?;

        if let Some(desc) = self.draft.description() {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        let groups = self.draft.items_by_category();
        if groups.is_empty() {
            writeln!(f, "\nNo items in this draft.")?;
        }
        for (category, items) in groups {
            writeln!(f, "\n## {}", category.label())?;
            writeln!(f)?;
            for item in items {
                let marker = match item.change_state() {
                    ChangeState::Unchanged => String::new(),
                    state => format!("[{}] ", state.marker()),
                };
                writeln!(f, "### {marker}{} ({})", item.content().title, item.key())?;
                writeln!(f)?;
                fmt_item_details(f, item.content())?;
            }
        }

        if dirty {
            writeln!(f, "\n## Pending changes")?;
            writeln!(f)?;
            write!(f, "{}", tracker::build_commit_plan(self.draft))?;
            writeln!(f)?;
            write!(f, "{}", tracker::metadata_diff(self.draft, self.source))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        draft::ItemKey,
        models::{Category, Frequency, ItemId, PlanItem, PlanItemContent},
    };

    fn create_test_plan() -> Plan {
        Plan {
            id: 5,
            title: "Week 1".to_string(),
            description: None,
            items: vec![PlanItem {
                id: ItemId(1),
                plan_id: 5,
                content: PlanItemContent::new("A", Category::Habits, Frequency::Daily),
                sort_order: 0,
            }],
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_clean_overview() {
        let plan = create_test_plan();
        let draft = DraftStore::from_plan(&plan);

        let output = DraftOverview::new(&draft, Some(&plan)).to_string();

        assert!(output.starts_with("# Week 1\n"));
        assert!(output.contains("- Status: clean"));
        assert!(output.contains("### A (item-1)"));
        assert!(!output.contains("Pending changes"));
    }

    #[test]
    fn test_dirty_overview_lists_changes() {
        let plan = create_test_plan();
        let mut draft = DraftStore::from_plan(&plan);
        draft
            .add_item(PlanItemContent::new("B", Category::Nutrition, Frequency::Weekly))
            .unwrap();
        draft.delete_item(ItemKey::Persisted(ItemId(1))).unwrap();
        draft.set_title("Week 1 Revised");

        let output = DraftOverview::new(&draft, Some(&plan)).to_string();

        assert!(output.contains("- Status: unsaved changes"));
        assert!(output.contains("### [+] B (draft-0)"));
        assert!(!output.contains("### A"));
        assert!(output.contains("- Delete item 1"));
        assert!(output.contains("- Create \"B\" (Nutrition)"));
        assert!(output.contains("- Title: Week 1 Revised"));
    }

    #[test]
    fn test_new_draft_overview() {
        let draft = DraftStore::new();
        let output = DraftOverview::new(&draft, None).to_string();

        assert!(output.contains("# Untitled plan"));
        assert!(output.contains("- Plan: not saved"));
        assert!(output.contains("No items in this draft."));
    }

    #[test]
    fn test_metadata_diff_cleared_description() {
        let diff = MetadataDiff {
            title_changed: false,
            description_changed: true,
            title: "Week 1".to_string(),
            description: None,
        };
        assert_eq!(diff.to_string(), "- Description: (cleared)\n");
        assert_eq!(
            MetadataDiff::default().to_string(),
            "No metadata changes.\n"
        );
    }

    #[test]
    fn test_empty_commit_plan() {
        assert_eq!(
            CommitPlan::default().to_string(),
            "No pending item changes.\n"
        );
    }
}
