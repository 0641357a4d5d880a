//! Terminal output

use crate::features::ScenarioEntry;
use console::{style, Style, Term};

/// Line-oriented reporter: data on stdout, status messages on stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    status: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            status: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.status.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.status.write_line(&format!("{prefix} {message}"));
    }

    /// Print raw text as-is (data output, shown even in quiet mode)
    pub fn data(&self, text: &str) {
        let _ = self.term.write_str(text);
        if !text.ends_with('\n') {
            let _ = self.term.write_line("");
        }
    }

    /// Print the scenario catalog
    pub fn catalog(&self, entries: &[ScenarioEntry]) {
        self.data(&render_catalog(entries, self.use_color));
    }
}

/// Scenario catalog grouped by feature, one line per scenario
#[must_use]
pub fn render_catalog(entries: &[ScenarioEntry], use_color: bool) -> String {
    let serial = Style::new().magenta().bold();
    let parallel = Style::new().cyan();
    let dim = Style::new().dim();

    let mut out = String::new();
    let mut current: Option<&std::path::Path> = None;
    for entry in entries {
        if current != Some(entry.path.as_path()) {
            current = Some(entry.path.as_path());
            let heading = format!("{} ({})", entry.feature, entry.path.display());
            if use_color {
                out.push_str(&style(heading).bold().underlined().to_string());
            } else {
                out.push_str(&heading);
            }
            out.push('\n');
        }

        let mode = format!("{:<8}", entry.mode);
        let mode = match (use_color, entry.is_serial()) {
            (false, _) => mode,
            (true, true) => serial.apply_to(mode).to_string(),
            (true, false) => parallel.apply_to(mode).to_string(),
        };
        let tags = entry
            .tags
            .iter()
            .map(|t| format!("@{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        let tags = if use_color {
            dim.apply_to(tags).to_string()
        } else {
            tags
        };
        out.push_str(&format!("  {:>4}  {mode}  {}  {tags}\n", entry.line, entry.name));
    }

    let serial_count = entries.iter().filter(|e| e.is_serial()).count();
    out.push_str(&format!(
        "{} scenario(s), {} serial, {} parallel\n",
        entries.len(),
        serial_count,
        entries.len() - serial_count
    ));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crmwright::ExecutionMode;
    use std::path::PathBuf;

    fn entry(name: &str, line: usize, mode: ExecutionMode, path: &str) -> ScenarioEntry {
        ScenarioEntry {
            feature: "Cases".to_string(),
            path: PathBuf::from(path),
            name: name.to_string(),
            line,
            tags: vec!["cases".to_string(), "mode:serial".to_string()],
            mode,
        }
    }

    #[test]
    fn test_plain_catalog() {
        let entries = vec![
            entry("Open a case", 4, ExecutionMode::Serial, "cases.feature"),
            entry("Close the case", 9, ExecutionMode::Serial, "cases.feature"),
            entry("Other", 3, ExecutionMode::Parallel, "other.feature"),
        ];
        let text = render_catalog(&entries, false);
        assert!(text.starts_with("Cases (cases.feature)\n"));
        assert!(text.contains("     4  serial    Open a case  @cases @mode:serial"));
        assert_eq!(text.matches("(cases.feature)").count(), 1);
        assert!(text.contains("(other.feature)"));
        assert!(text.ends_with("3 scenario(s), 2 serial, 1 parallel\n"));
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(render_catalog(&[], false), "0 scenario(s), 0 serial, 0 parallel\n");
    }

    #[test]
    fn test_reporter_flags() {
        let reporter = Reporter::new(false, true);
        assert!(reporter.quiet);
        assert!(!reporter.use_color);
        reporter.success("suppressed");
    }
}
