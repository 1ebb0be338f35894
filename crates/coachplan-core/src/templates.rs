//! Capturing a draft as a reusable template and replaying templates.

use crate::{
    draft::{DraftId, DraftStore},
    error::Result,
    models::Template,
};

/// Builds a template from the visible items of `draft`.
///
/// Identities, change states and sort orders are dropped; items keep the
/// order [`DraftStore::visible_items`] presents them in.
pub fn capture(draft: &DraftStore, name: impl Into<String>, description: Option<String>) -> Template {
    Template {
        name: name.into(),
        description: description.filter(|text| !text.trim().is_empty()),
        items: draft
            .visible_items()
            .into_iter()
            .map(|item| item.content().clone())
            .collect(),
    }
}

/// Stages every item of `template` as new items in `draft`.
///
/// # Errors
///
/// * `DraftError::Validation` - When any template item is invalid; nothing
///   is staged
pub fn replay(template: &Template, draft: &mut DraftStore) -> Result<Vec<DraftId>> {
    draft.append_template_items(template)
}
