use clap::{Parser, Subcommand};

use crate::cli::{DraftCommands, PlanCommands, TemplateCommands};

/// Stage, preview and commit edits to coaching plans
///
/// Coachplan works on JSON plan snapshots. Edits are staged in a local draft
/// that tracks which items were created, modified or deleted, and a commit
/// applies them to the plan in one ordered pass: metadata, deletes, creates,
/// then updates.
#[derive(Parser)]
#[command(version, about, name = "coachplan")]
pub struct Args {
    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Coachplan CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect plan snapshots
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Stage edits against a plan and commit them
    #[command(alias = "d")]
    Draft {
        #[command(subcommand)]
        command: DraftCommands,
    },
    /// Capture and replay plan templates
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}
