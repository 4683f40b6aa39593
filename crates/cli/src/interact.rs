//! How the CLI talks to the person at the terminal.
//!
//! Everything that depends on having an interactive terminal goes through the
//! [`Interaction`] trait: styling Markdown, showing a request preview, asking
//! for confirmation and showing a spinner. [`detect`] picks the implementation
//! once at start-up.

use crate::commands::request::RequestPreview;
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, InquireError};
use std::io::{BufRead, IsTerminal, Write};
use std::time::Duration;

pub trait Interaction {
    /// Turns a Markdown document into what should be written to stdout.
    fn render_markdown(&self, markdown: &str) -> String;

    /// Shows a request preview on stderr.
    fn show_preview(&self, preview: &RequestPreview);

    /// Asks a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// A spinner for a slow step. Hidden when there is nobody to see it.
    fn spinner(&self, message: &str) -> ProgressBar;
}

/// Picks [`RichTerminal`] when a person is at the keyboard, [`PlainTerminal`]
/// otherwise.
pub fn detect() -> Box<dyn Interaction> {
    if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() {
        tracing::debug!("Using rich terminal interaction");
        Box::new(RichTerminal {
            styled_stdout: std::io::stdout().is_terminal(),
        })
    } else {
        tracing::debug!("Using plain interaction");
        Box::new(PlainTerminal)
    }
}

/// Interactive terminal: coloured output, `inquire` prompts, spinners.
pub struct RichTerminal {
    styled_stdout: bool,
}

impl Interaction for RichTerminal {
    fn render_markdown(&self, markdown: &str) -> String {
        if self.styled_stdout && colored::control::SHOULD_COLORIZE.should_colorize() {
            style_markdown(markdown)
        } else {
            markdown.to_string()
        }
    }

    fn show_preview(&self, preview: &RequestPreview) {
        eprintln!("{} {}", "Endpoint:".bold(), preview.endpoint);
        eprintln!("{} {}", "Bearer:".bold(), preview.bearer);
        eprintln!("{}", "Query:".bold());
        eprintln!("{}", preview.query.trim_end().cyan());
        eprintln!("{}", "Variables:".bold());
        eprintln!("{}", preview.variables);
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        match Confirm::new(prompt).with_default(false).prompt() {
            Ok(answer) => Ok(answer),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(false),
            Err(e) => Err(e).context("Failed to read confirmation"),
        }
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        if is_ci() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}

/// Pipes and scripts: Markdown as-is, confirmation read as a line from stdin.
pub struct PlainTerminal;

impl Interaction for PlainTerminal {
    fn render_markdown(&self, markdown: &str) -> String {
        markdown.to_string()
    }

    fn show_preview(&self, preview: &RequestPreview) {
        eprintln!("{preview}");
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        eprint!("{prompt} [y/N] ");
        std::io::stderr().flush().ok();
        read_answer(std::io::stdin().lock())
    }

    fn spinner(&self, _message: &str) -> ProgressBar {
        ProgressBar::hidden()
    }
}

/// Reads one line and accepts `y` or `yes`. End of input declines.
fn read_answer(mut input: impl BufRead) -> Result<bool> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Detect if we're running in a CI environment
fn is_ci() -> bool {
    [
        "CI",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "CIRCLECI",
        "TRAVIS",
        "JENKINS_URL",
    ]
    .iter()
    .any(|var| std::env::var_os(var).is_some())
}

/// ANSI styling for the Markdown produced by the docs renderer.
fn style_markdown(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut in_table = false;

    for line in markdown.lines() {
        let styled = if let Some(title) = line.strip_prefix("# ") {
            title.bold().underline().cyan().to_string()
        } else if let Some(title) = line.strip_prefix("## ") {
            title.bold().to_string()
        } else if line.starts_with("| ----") {
            line.dimmed().to_string()
        } else if line.starts_with('|') {
            let row = line.replace("<br>", " ");
            let header = !in_table;
            in_table = true;
            if header {
                row.bold().to_string()
            } else {
                row
            }
        } else if line.len() > 1 && line.starts_with('_') && line.ends_with('_') {
            line[1..line.len() - 1].italic().to_string()
        } else {
            line.to_string()
        };

        if !line.starts_with('|') {
            in_table = false;
        }
        out.push_str(&styled);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markdown_is_unchanged() {
        let markdown = "# Type: Widget (OBJECT)\n\n_None_\n";
        assert_eq!(PlainTerminal.render_markdown(markdown), markdown);
    }

    #[test]
    fn test_read_answer_accepts_yes() {
        assert!(read_answer("y\n".as_bytes()).unwrap());
        assert!(read_answer("YES\n".as_bytes()).unwrap());
        assert!(read_answer("  yes  \n".as_bytes()).unwrap());
    }

    #[test]
    fn test_read_answer_declines_by_default() {
        assert!(!read_answer("\n".as_bytes()).unwrap());
        assert!(!read_answer("n\n".as_bytes()).unwrap());
        assert!(!read_answer("yep\n".as_bytes()).unwrap());
        assert!(!read_answer("".as_bytes()).unwrap());
    }

    #[test]
    fn test_style_markdown_keeps_text() {
        let styled = style_markdown(
            "# Type: Widget (OBJECT)\n\n_A widget_\n\n## Output\n\n| Name | Type | Description |\n| ---- | ---- | ----------- |\n| id | ID | a<br>b |\n",
        );

        assert!(styled.contains("Type: Widget (OBJECT)"));
        assert!(!styled.contains("# Type"));
        assert!(styled.contains("A widget"));
        assert!(!styled.contains("_A widget_"));
        assert!(styled.contains("| id | ID | a b |"));
    }

    #[test]
    fn test_plain_spinner_is_hidden() {
        assert!(PlainTerminal.spinner("Fetching").is_hidden());
    }
}

#[cfg(test)]
pub mod testing {
    //! A scripted [`Interaction`] for tests.

    use super::{Interaction, RequestPreview};
    use indicatif::ProgressBar;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Answers every question the same way and records what it was shown.
    #[derive(Clone, Default)]
    pub struct Scripted {
        answer: bool,
        previews: Rc<RefCell<Vec<String>>>,
        prompts: Rc<Cell<usize>>,
    }

    impl Scripted {
        pub fn accepting() -> Self {
            Self {
                answer: true,
                ..Self::default()
            }
        }

        pub fn declining() -> Self {
            Self::default()
        }

        pub fn previews(&self) -> Vec<String> {
            self.previews.borrow().clone()
        }

        pub fn prompts(&self) -> usize {
            self.prompts.get()
        }
    }

    impl Interaction for Scripted {
        fn render_markdown(&self, markdown: &str) -> String {
            markdown.to_string()
        }

        fn show_preview(&self, preview: &RequestPreview) {
            self.previews.borrow_mut().push(preview.to_string());
        }

        fn confirm(&self, _prompt: &str) -> anyhow::Result<bool> {
            self.prompts.set(self.prompts.get() + 1);
            Ok(self.answer)
        }

        fn spinner(&self, _message: &str) -> ProgressBar {
            ProgressBar::hidden()
        }
    }
}
