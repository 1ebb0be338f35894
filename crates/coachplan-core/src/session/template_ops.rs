//! Template persistence for sessions.

use log::info;

use super::EditSession;
use crate::{
    draft::DraftId,
    error::{DraftError, Result, StoreResultExt},
    models::SavedTemplate,
    store::{PlanStore, TemplateStore},
    templates,
};

impl<S: PlanStore + TemplateStore + ?Sized> EditSession<S> {
    /// Captures the visible draft items and saves them as a template.
    ///
    /// # Errors
    ///
    /// * `DraftError::Validation` - When the name is blank
    /// * `DraftError::Store` - When the template store rejects the template
    pub async fn save_template(
        &self,
        name: &str,
        description: Option<String>,
    ) -> Result<SavedTemplate> {
        if name.trim().is_empty() {
            return Err(DraftError::validation("name").with_reason("Template name cannot be empty"));
        }

        let template = templates::capture(&self.draft, name, description);
        let saved = self
            .store()
            .create_template(&template.name, template.description.as_deref(), &template.items)
            .await
            .store_context("Failed to save template")?;
        info!(
            "Saved template {} '{}' with {} items",
            saved.id,
            saved.template.name,
            saved.template.items.len()
        );
        Ok(saved)
    }

    /// Stored templates, in the order the store returns them.
    pub async fn list_templates(&self) -> Result<Vec<SavedTemplate>> {
        self.store()
            .fetch_templates()
            .await
            .store_context("Failed to fetch templates")
    }

    /// Replays a stored template onto the draft.
    ///
    /// # Errors
    ///
    /// * `DraftError::TemplateNotFound` - When no stored template has `id`
    /// * `DraftError::Validation` - When a template item is invalid
    /// * `DraftError::Store` - When templates cannot be fetched
    pub async fn apply_saved_template(&mut self, id: u64) -> Result<Vec<DraftId>> {
        let saved = self
            .list_templates()
            .await?
            .into_iter()
            .find(|saved| saved.id == id)
            .ok_or(DraftError::TemplateNotFound { id })?;
        templates::replay(&saved.template, &mut self.draft)
    }

    pub async fn delete_template(&self, id: u64) -> Result<()> {
        self.store()
            .delete_template(id)
            .await
            .store_context(&format!("Failed to delete template {id}"))
    }
}
