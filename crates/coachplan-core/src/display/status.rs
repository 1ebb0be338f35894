//! One-line outcome messages for commits and other operations.

use std::fmt;

use crate::{error::DraftError, reconciler::CommitReport};

/// How an operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The operation failed after some remote writes had landed
    Partial,
    Failure,
}

impl Outcome {
    fn prefix(self) -> &'static str {
        match self {
            Outcome::Success => "Success:",
            Outcome::Partial => "Partial:",
            Outcome::Failure => "Error:",
        }
    }
}

/// Status line rendered as `Success: ...`, `Partial: ...` or `Error: ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    pub outcome: Outcome,
    pub message: String,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            message: message.into(),
        }
    }

    /// Summarizes a finished commit.
    pub fn committed(report: &CommitReport) -> Self {
        if report.is_noop() {
            Self::success(format!("Plan {} had no changes to commit", report.plan_id))
        } else {
            Self::success(format!(
                "Committed plan {} ({})",
                report.plan_id, report.progress
            ))
        }
    }

    /// Summarizes a rejected or failed commit.
    ///
    /// A commit that stopped after some writes landed is reported as partial.
    pub fn commit_failed(err: &DraftError) -> Self {
        let outcome = if err.is_partial_commit() {
            Outcome::Partial
        } else {
            Outcome::Failure
        };
        Self {
            outcome,
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.outcome.prefix(), self.message)
    }
}
