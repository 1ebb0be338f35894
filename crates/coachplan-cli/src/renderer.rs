//! Terminal rendering for markdown output
//!
//! Rich mode colors headings with termimad and highlights the change markers
//! of draft items; plain mode prints the markdown untouched.

use anyhow::Result;
use termimad::{
    crossterm::style::{Color, Stylize},
    MadSkin,
};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("{}", line.with(heading_color(line)));
            } else if line.starts_with("Success:") {
                println!("{}", line.green());
            } else if line.starts_with("Partial:") {
                println!("{}", line.yellow());
            } else if line.starts_with("Error:") {
                println!("{}", line.red());
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
        Ok(())
    }
}

/// Headings of created items are green and of modified items yellow.
fn heading_color(line: &str) -> Color {
    let title = line.trim_start_matches('#').trim_start();
    if title.starts_with("[+]") {
        Color::Green
    } else if title.starts_with("[~]") {
        Color::Yellow
    } else {
        Color::Blue
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
