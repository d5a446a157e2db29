//! Colored terminal output utilities.

use std::path::Path;
use std::time::Duration;

use console::{Style, Term};
use ssg_server::ServerConfig;
use ssg_site::WriteSummary;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Print the result of `ssg build`.
    pub(crate) fn build_summary(&self, summary: &WriteSummary, target: &Path, elapsed: Duration) {
        self.styled(
            &self.green,
            &format!(
                "Built {} pages and {} static files into {} in {:.0?}",
                summary.pages,
                summary.static_files,
                target.display(),
                elapsed
            ),
        );
        if summary.skipped > 0 {
            self.styled(
                &self.yellow,
                &format!(
                    "Skipped {} static files with unpublished extensions",
                    summary.skipped
                ),
            );
        }
    }

    /// Print the startup banner of `ssg dev`.
    pub(crate) fn dev_banner(&self, config: &ServerConfig) {
        self.info(&format!("Source directory: {}", config.source_dir.display()));
        if config.build_drafts {
            self.info("Drafts: included");
        }
        self.info(if config.live_reload_enabled {
            "Live reload: enabled"
        } else {
            "Live reload: disabled"
        });
        self.styled(
            &self.cyan_bold,
            &format!("Serving at http://{}:{}", config.host, config.port),
        );
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
