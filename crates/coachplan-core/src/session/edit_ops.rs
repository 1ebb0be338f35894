//! Applying edit scripts to a session.

use log::debug;

use super::EditSession;
use crate::{
    draft::DraftId,
    error::Result,
    models::PlanItemContent,
    params::EditOp,
    store::PlanStore,
    templates,
};

impl<S: PlanStore + ?Sized> EditSession<S> {
    /// Applies one edit to the draft.
    ///
    /// Returns the draft identities of any items the edit staged.
    ///
    /// # Errors
    ///
    /// * `DraftError::Validation` - When item input is invalid; the draft is
    ///   left untouched
    /// * `DraftError::NotFound` - When the edit targets an item that is not
    ///   visible
    pub fn apply(&mut self, op: EditOp) -> Result<Vec<DraftId>> {
        debug!("Applying {} edit", op.name());
        match op {
            EditOp::Add { item } => {
                let content = PlanItemContent::try_from(item)?;
                Ok(vec![self.draft.add_item(content)?])
            }
            EditOp::Edit { target, item } => {
                let content = PlanItemContent::try_from(item)?;
                self.draft.edit_item(target.into(), content)?;
                Ok(Vec::new())
            }
            EditOp::Delete { target } => {
                self.draft.delete_item(target.into())?;
                Ok(Vec::new())
            }
            EditOp::SetTitle { title } => {
                self.draft.set_title(title);
                Ok(Vec::new())
            }
            EditOp::SetDescription { description } => {
                self.draft.set_description(description);
                Ok(Vec::new())
            }
            EditOp::ApplyTemplate { template } => templates::replay(&template, &mut self.draft),
            EditOp::Discard => {
                self.discard();
                Ok(Vec::new())
            }
        }
    }

    /// Applies edits in order, stopping at the first failure.
    ///
    /// Edits before the failing one stay applied.
    pub fn apply_all(&mut self, ops: impl IntoIterator<Item = EditOp>) -> Result<usize> {
        let mut applied = 0;
        for op in ops {
            self.apply(op)?;
            applied += 1;
        }
        Ok(applied)
    }
}
