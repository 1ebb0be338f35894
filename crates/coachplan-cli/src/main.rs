//! Coachplan CLI Application
//!
//! Command-line front end for staging edits against coaching plan snapshots,
//! previewing the resulting draft, and committing it.

mod args;
mod cli;
mod renderer;

use anyhow::Result;
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { no_color, command } = Args::parse();
    let cli = Cli::new(TerminalRenderer::new(!no_color));

    info!("Coachplan started");

    match command {
        Plan { command } => cli.handle_plan_command(command),
        Draft { command } => cli.handle_draft_command(command).await,
        Template { command } => cli.handle_template_command(command).await,
    }
}
