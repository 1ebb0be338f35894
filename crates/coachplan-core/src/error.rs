//! Error types for the draft reconciliation engine.

use std::fmt;

use thiserror::Error;

use crate::draft::ItemKey;

/// Comprehensive error type for all draft operations.
#[derive(Error, Debug)]
pub enum DraftError {
    /// Plan item content or plan metadata failed validation
    #[error("Invalid value for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// No visible draft item carries the given identity
    #[error("Plan item {key} not found in draft")]
    NotFound { key: ItemKey },
    /// Commit or refresh was requested for a draft with no backing plan
    #[error("No active plan to commit against")]
    NoActivePlan,
    /// The template store has no template with the given identity
    #[error("Template with ID {id} not found")]
    TemplateNotFound { id: u64 },
    /// A remote call failed part-way through a commit
    #[error("Commit failed during {phase} ({progress}); {}", resync_note(.resynced))]
    Commit {
        phase: CommitPhase,
        progress: CommitProgress,
        resynced: bool,
        #[source]
        source: anyhow::Error,
    },
    /// A plan or template store call failed outside of a commit
    #[error("Store error: {message}")]
    Store {
        message: String,
        #[source]
        source: anyhow::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

fn resync_note(resynced: &bool) -> &'static str {
    if *resynced {
        "draft resynchronized"
    } else {
        "draft not resynchronized"
    }
}

/// The phase of a commit in which a remote call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPhase {
    /// Writing changed plan title/description
    Metadata,
    /// Deleting removed items
    Deletes,
    /// Creating new items
    Creates,
    /// Updating modified items
    Updates,
    /// Refetching the plan after all writes landed
    Refresh,
}

impl CommitPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitPhase::Metadata => "metadata",
            CommitPhase::Deletes => "deletes",
            CommitPhase::Creates => "creates",
            CommitPhase::Updates => "updates",
            CommitPhase::Refresh => "refresh",
        }
    }
}

impl fmt::Display for CommitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counts of the remote calls that completed during a commit.
///
/// A commit is not transactional, so a failed commit reports how far it got
/// before the first failing call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitProgress {
    pub metadata_written: bool,
    pub deleted: usize,
    pub created: usize,
    pub updated: usize,
}

impl CommitProgress {
    /// Returns true if any remote write landed.
    pub fn is_partial(&self) -> bool {
        self.metadata_written || self.deleted > 0 || self.created > 0 || self.updated > 0
    }
}

impl fmt::Display for CommitProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "metadata {}, {} deleted, {} created, {} updated",
            if self.metadata_written { "written" } else { "untouched" },
            self.deleted,
            self.created,
            self.updated
        )
    }
}

/// Builder for creating validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> DraftError {
        DraftError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

/// Builder for creating store errors with context.
pub struct StoreErrorBuilder {
    message: String,
}

impl StoreErrorBuilder {
    /// Create a new store error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: anyhow::Error) -> DraftError {
        DraftError::Store {
            message: self.message,
            source,
        }
    }
}

impl DraftError {
    /// Creates a builder for validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    /// Creates a builder for store errors.
    pub fn store(message: impl Into<String>) -> StoreErrorBuilder {
        StoreErrorBuilder::new(message)
    }

    /// Returns true if the error left remote state partially updated.
    pub fn is_partial_commit(&self) -> bool {
        matches!(self, DraftError::Commit { progress, .. } if progress.is_partial())
    }
}

/// Extension trait for mapping opaque collaborator errors.
pub trait StoreResultExt<T> {
    /// Map store errors with a message.
    fn store_context(self, message: &str) -> Result<T>;
}

impl<T> StoreResultExt<T> for anyhow::Result<T> {
    fn store_context(self, message: &str) -> Result<T> {
        self.map_err(|e| DraftError::store(message).with_source(e))
    }
}

/// Result type alias for draft operations
pub type Result<T> = std::result::Result<T, DraftError>;
