//! Subcommand definitions and their handlers.
//!
//! Every command reads a plan snapshot from a JSON file, loads it into an
//! in-memory plan store, and drives an edit session over that store. Nothing
//! is written back unless `--output` is given.
//!
//! ```text
//! plan.json ──▶ MemoryStore ──▶ EditSession ──▶ markdown (stdout)
//!                                    │
//!                  edits.json ───────┘──▶ commit ──▶ --output plan.json
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use coachplan_core::{
    templates, DraftStore, EditOp, EditSession, MemoryStore, OperationStatus, Plan,
    SessionBuilder, Template,
};
use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::renderer::TerminalRenderer;

/// Render a plan snapshot
#[derive(Args)]
pub struct ShowPlanArgs {
    /// Plan snapshot file (JSON)
    #[arg(long, help = "Path to the plan snapshot JSON file")]
    pub plan: PathBuf,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Show a plan grouped by category
    #[command(alias = "s")]
    Show(ShowPlanArgs),
}

/// Apply an edit script to a plan's draft
#[derive(Args)]
pub struct EditScriptArgs {
    /// Plan snapshot file (JSON)
    #[arg(long, help = "Path to the plan snapshot JSON file")]
    pub plan: PathBuf,
    /// Edit script file (JSON array of edit operations)
    #[arg(long, help = "Path to a JSON array of edit operations")]
    pub edits: PathBuf,
}

/// Apply an edit script and commit the result
#[derive(Args)]
pub struct ApplyEditsArgs {
    #[command(flatten)]
    pub script: EditScriptArgs,
    /// Where to write the committed plan snapshot
    #[arg(short, long, help = "Write the committed plan snapshot to this file")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum DraftCommands {
    /// Show the draft an edit script produces, without committing
    #[command(alias = "p")]
    Preview(EditScriptArgs),
    /// Apply an edit script and commit the draft
    #[command(alias = "a")]
    Apply(ApplyEditsArgs),
}

/// Capture a plan's items as a template
#[derive(Args)]
pub struct CaptureTemplateArgs {
    /// Plan snapshot file (JSON)
    #[arg(long, help = "Path to the plan snapshot JSON file")]
    pub plan: PathBuf,
    /// Name of the template
    #[arg(short, long)]
    pub name: String,
    /// Optional description of what the template is for
    #[arg(short, long)]
    pub description: Option<String>,
    /// Where to write the template (JSON)
    #[arg(short, long, help = "Write the template JSON to this file")]
    pub output: Option<PathBuf>,
}

/// Replay a template onto a plan's draft
#[derive(Args)]
pub struct ApplyTemplateArgs {
    /// Plan snapshot file (JSON)
    #[arg(long, help = "Path to the plan snapshot JSON file")]
    pub plan: PathBuf,
    /// Template file (JSON)
    #[arg(long, help = "Path to the template JSON file")]
    pub template: PathBuf,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Capture the items of a plan into a template
    #[command(alias = "c")]
    Capture(CaptureTemplateArgs),
    /// Replay a template onto a plan and show the draft
    #[command(alias = "a")]
    Apply(ApplyTemplateArgs),
}

/// Command handlers sharing one renderer.
pub struct Cli {
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(renderer: TerminalRenderer) -> Self {
        Self { renderer }
    }

    pub fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Show(args) => {
                let plan: Plan = read_json(&args.plan)?;
                self.renderer.render(&plan.to_string())
            }
        }
    }

    pub async fn handle_draft_command(&self, command: DraftCommands) -> Result<()> {
        match command {
            DraftCommands::Preview(args) => {
                let session = scripted_session(&args).await?;
                self.renderer.render(&session.overview().to_string())
            }
            DraftCommands::Apply(args) => {
                let mut session = scripted_session(&args.script).await?;
                self.renderer.render(&session.overview().to_string())?;

                let report = match session.commit().await {
                    Ok(report) => report,
                    Err(err) => {
                        self.renderer
                            .render(&OperationStatus::commit_failed(&err).to_string())?;
                        return Err(err).context("Failed to commit draft");
                    }
                };
                self.renderer
                    .render(&OperationStatus::committed(&report).to_string())?;

                let committed = session
                    .source()
                    .context("Committed session has no plan")?;
                self.renderer.render(&committed.to_string())?;
                if let Some(path) = &args.output {
                    write_json(path, committed)?;
                    self.renderer.render(
                        &OperationStatus::success(format!("Wrote plan to {}", path.display()))
                            .to_string(),
                    )?;
                }
                Ok(())
            }
        }
    }

    pub async fn handle_template_command(&self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::Capture(args) => {
                let plan: Plan = read_json(&args.plan)?;
                let template =
                    templates::capture(&DraftStore::from_plan(&plan), args.name, args.description);
                self.renderer.render(&template.to_string())?;
                if let Some(path) = &args.output {
                    write_json(path, &template)?;
                    self.renderer.render(
                        &OperationStatus::success(format!(
                            "Wrote template with {} items to {}",
                            template.items.len(),
                            path.display()
                        ))
                        .to_string(),
                    )?;
                }
                Ok(())
            }
            TemplateCommands::Apply(args) => {
                let plan: Plan = read_json(&args.plan)?;
                let template: Template = read_json(&args.template)?;
                let mut session = open_session(plan).await?;
                let staged = session
                    .apply(EditOp::ApplyTemplate { template })
                    .context("Failed to apply template")?;
                debug!("Template staged {} items", staged.len());
                self.renderer.render(&session.overview().to_string())
            }
        }
    }
}

/// Opens a session on the plan file and applies the edit script to it.
async fn scripted_session(args: &EditScriptArgs) -> Result<EditSession<MemoryStore>> {
    let plan: Plan = read_json(&args.plan)?;
    let edits = EditOp::parse_script(&read_text(&args.edits)?)
        .with_context(|| format!("Failed to parse {}", args.edits.display()))?;
    let mut session = open_session(plan).await?;
    let count = edits.len();
    session
        .apply_all(edits)
        .with_context(|| format!("Failed to apply edit script {}", args.edits.display()))?;
    debug!("Applied {count} edits");
    Ok(session)
}

/// Loads `plan` into a fresh in-memory store and opens a session on it.
async fn open_session(plan: Plan) -> Result<EditSession<MemoryStore>> {
    let plan_id = plan.id;
    let store = Arc::new(MemoryStore::with_plans([plan]));
    SessionBuilder::new()
        .with_plan_id(Some(plan_id))
        .build(store)
        .await
        .context("Failed to open plan")
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = read_text(path)?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    fs::write(path, text + "\n").with_context(|| format!("Failed to write {}", path.display()))
}
