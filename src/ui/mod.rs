//! Terminal output helpers: status lines, menu text, progress bars.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::checker::RunSummary;

/// Check if stderr is a terminal.
pub fn is_terminal() -> bool {
    std::io::stderr().is_terminal()
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// A status line with a colored icon.
pub fn status_line(status: Status, msg: &str) -> String {
    let icon = status_icon(status);
    match status {
        Status::Success => format!("{} {}", icon.green().bold(), msg.green()),
        Status::Error => format!("{} {}", icon.red().bold(), msg),
        Status::Warning => format!("{} {}", icon.yellow().bold(), msg),
        Status::Info => format!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Main menu text.
pub fn menu_text() -> String {
    format!(
        "{}\n  {} DOI check on PubPeer\n  {} Journal check (SJR)\n  {} quit\n",
        "What should be checked? Enter a command:".bold(),
        "1".cyan().bold(),
        "2".cyan().bold(),
        "q".cyan().bold(),
    )
}

/// Prompt shown after choosing the DOI check.
pub fn doi_check_prompt() -> String {
    format!(
        "DOI check on PubPeer: put .txt files with one DOI per line next to this program. Enter {} to continue.",
        "1".cyan().bold()
    )
}

/// Prompt shown after choosing the journal check.
pub fn journal_check_prompt() -> String {
    format!(
        "Journal check (SJR): put files with ISSNs or journal titles next to this program. Enter {} to continue.",
        "2".cyan().bold()
    )
}

/// Files about to be processed.
pub fn file_list(files: &[std::path::PathBuf]) -> String {
    let names: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    status_line(Status::Info, &format!("Files: [{}]", names.join(", ")))
}

/// Completion message plus totals.
pub fn run_summary(summary: &RunSummary) -> String {
    let mut out = status_line(Status::Success, "Check complete!");
    out.push('\n');
    out.push_str(&format!(
        "  {} files, {} identifiers: {} with comments, {} without, {} errors",
        summary.files.len(),
        summary.identifiers(),
        summary.found().to_string().green(),
        summary.not_found(),
        if summary.errors() > 0 {
            summary.errors().to_string().red().to_string()
        } else {
            summary.errors().to_string()
        }
    ));
    for file in &summary.files {
        out.push_str(&format!(
            "\n  {} -> {}",
            file.input.display(),
            file.output.display().to_string().dimmed()
        ));
    }
    out
}

/// Progress bar for one input file, counting checked lines.
///
/// Returns a hidden bar when `enabled` is false or stderr is not a terminal.
pub fn file_progress(name: &str, enabled: bool) -> indicatif::ProgressBar {
    if !enabled || !is_terminal() {
        return indicatif::ProgressBar::hidden();
    }

    let pb = indicatif::ProgressBar::new_spinner();
    if let Ok(style) = indicatif::ProgressStyle::with_template(
        "{spinner:.cyan} {msg} [{pos} checked, {elapsed}]",
    ) {
        pb.set_style(style.tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "));
    }
    pb.set_message(name.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
