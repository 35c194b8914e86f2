use std::path::Path;

use langfix::{FixReport, LocaleReport, Reporter};
use serde_json::json;

use crate::config::Settings;

/// How the changes of a run are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    DryRun,
    Check,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Mode::Write => "write",
            Mode::DryRun => "dry_run",
            Mode::Check => "check",
        }
    }
}

fn file_name(locale: &str, extension: &str) -> String {
    format!("{}.{}", locale, extension)
}

/// Text block for one locale.
///
/// ```text
/// de_de.json: 2 changes
///   catchrate.ball.guaranteed_catch: "Sicherer Fang!" -> "Sicherer Fang"
///   catchrate.ball.lure.effective: "4x beim Angeln!" -> "Beim Angeln"
/// ```
pub fn render_locale(report: &LocaleReport, extension: &str, mode: Mode) -> String {
    let file = file_name(&report.locale, extension);
    if report.is_unchanged() {
        return format!("{}: OK (no further changes)", file);
    }

    let suffix = match mode {
        Mode::Write => "",
        Mode::DryRun => " (dry run, not written)",
        Mode::Check => " needed",
    };
    let mut lines = vec![format!("{}: {} changes{}", file, report.changes.len(), suffix)];
    for change in &report.changes {
        lines.push(format!("  {}", change));
    }
    lines.join("\n")
}

/// Closing summary line.
pub fn render_total(report: &FixReport) -> String {
    format!(
        "Total: {} changes across {} files",
        report.total_changes(),
        report.files_processed()
    )
}

/// Machine-readable report of a whole run.
pub fn render_json(report: &FixReport, settings: &Settings, mode: Mode) -> Result<String, String> {
    let locales_json: Vec<_> = report
        .locales
        .iter()
        .map(|locale| {
            json!({
                "locale": locale.locale,
                "file": file_name(&locale.locale, &settings.extension),
                "written": locale.written,
                "changes": locale.changes,
            })
        })
        .collect();

    let payload = json!({
        "dir": settings.dir.display().to_string(),
        "reference_locale": settings.reference_locale,
        "mode": mode.as_str(),
        "summary": {
            "files": report.files_processed(),
            "changed_files": report.changed_locales().count(),
            "changes": report.total_changes(),
        },
        "locales": locales_json,
    });

    serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))
}

pub fn write_report(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content)
        .map_err(|e| format!("Failed to write report '{}': {}", path.display(), e))
}

/// Prints each locale as soon as it is processed.
pub struct ConsoleReporter<'a> {
    extension: &'a str,
    mode: Mode,
}

impl<'a> ConsoleReporter<'a> {
    pub fn new(extension: &'a str, mode: Mode) -> Self {
        ConsoleReporter { extension, mode }
    }
}

impl Reporter for ConsoleReporter<'_> {
    fn report(&mut self, report: &LocaleReport) {
        if !report.is_unchanged() {
            println!();
        }
        println!("{}", render_locale(report, self.extension, self.mode));
    }
}
