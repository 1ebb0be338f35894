//! Display implementations for domain models.
//!
//! Plans render as markdown with one section per category; items inside a
//! section follow their sort order.

use std::fmt;

use super::datetime::{ClockTime, LocalDateTime};
use crate::models::{Category, Plan, PlanItem, PlanItemContent, SavedTemplate, Template};

/// Writes the schedule line and description shared by every item view.
pub(crate) fn fmt_item_details(
    f: &mut fmt::Formatter<'_>,
    content: &PlanItemContent,
) -> fmt::Result {
    write!(f, "- Schedule: {}", content.frequency.label())?;
    if let Some(time) = &content.scheduled_time {
        write!(f, " at {}", ClockTime(time))?;
    }
    if let Some(minutes) = content.duration_minutes {
        write!(f, " for {minutes} min")?;
    }
    writeln!(f)?;

    if let Some(desc) = &content.description {
        writeln!(f)?;
        writeln!(f, "{desc}")?;
    }
    writeln!(f)
}

/// Groups `items` by category, each group ordered by sort order.
fn group_items(items: &[PlanItem]) -> Vec<(Category, Vec<&PlanItem>)> {
    let mut sorted: Vec<&PlanItem> = items.iter().collect();
    sorted.sort_by_key(|item| (item.content.category, item.sort_order));

    let mut groups: Vec<(Category, Vec<&PlanItem>)> = Vec::new();
    for item in sorted {
        match groups.last_mut() {
            Some((category, group)) if *category == item.content.category => group.push(item),
            _ => groups.push((item.content.category, vec![item])),
        }
    }
    groups
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Items: {}", self.items.len())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.items.is_empty() {
            return writeln!(f, "\nNo items in this plan.");
        }

        for (category, items) in group_items(&self.items) {
            writeln!(f, "\n## {}", category.label())?;
            writeln!(f)?;
            for item in items {
                write!(f, "{item}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.content.title)?;
        writeln!(f)?;
        fmt_item_details(f, &self.content)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Template: {}", self.name)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "{desc}")?;
            writeln!(f)?;
        }

        if self.items.is_empty() {
            return writeln!(f, "No items in this template.");
        }

        for (index, content) in self.items.iter().enumerate() {
            writeln!(
                f,
                "### {}. {} ({})",
                index + 1,
                content.title,
                content.category.label()
            )?;
            writeln!(f)?;
            fmt_item_details(f, content)?;
        }
        Ok(())
    }
}

impl fmt::Display for SavedTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)?;
        writeln!(f, "- Template ID: {}", self.id)?;
        writeln!(f, "- Saved: {}", LocalDateTime(&self.created_at))
    }
}
