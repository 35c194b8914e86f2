use std::path::PathBuf;

use langfix::{
    FixOptions, FixReport, LangDir, LocaleReport, Reporter, RuleCatalog, fix_locales,
    fix_locales_into,
};
use tracing::debug;

use crate::{
    config::Settings,
    report::{ConsoleReporter, Mode, render_json, render_total, write_report},
    validation::{
        validate_extension, validate_lang_dir, validate_locale_id, validate_output_dir,
        validate_output_path,
    },
};

#[derive(Debug, Clone)]
pub struct FixCommandOptions {
    pub settings: Settings,
    pub mode: Mode,
    /// Locales to restrict the run to. Empty means all.
    pub langs: Vec<String>,
    /// Write fixed tables here instead of back into `settings.dir`.
    pub out_dir: Option<PathBuf>,
    pub json: bool,
    pub report: Option<PathBuf>,
}

fn validate(opts: &FixCommandOptions) -> Result<(), String> {
    validate_lang_dir(&opts.settings.dir)?;
    validate_locale_id(&opts.settings.reference_locale)?;
    validate_extension(&opts.settings.extension)?;
    for lang in &opts.langs {
        validate_locale_id(lang)?;
    }
    if let Some(out_dir) = &opts.out_dir {
        validate_output_dir(out_dir)?;
    }
    if let Some(report) = &opts.report {
        validate_output_path(report)?;
    }
    Ok(())
}

/// Runs the catalog over a locale directory and prints the outcome.
pub fn run_fix_command(opts: FixCommandOptions) -> Result<FixReport, String> {
    validate(&opts)?;

    let settings = &opts.settings;
    let catalog = RuleCatalog::with_prefix(&settings.prefix);
    let options = FixOptions::new()
        .with_dry_run(opts.mode != Mode::Write)
        .with_locales(opts.langs.iter().cloned());
    debug!(dir = %settings.dir.display(), rules = catalog.len(), ?options, "starting run");

    let mut dir = LangDir::new(&settings.dir)
        .with_reference_locale(&settings.reference_locale)
        .with_extension(&settings.extension);

    let extension = dir.extension().to_string();
    let mut console = ConsoleReporter::new(&extension, opts.mode);
    let mut collected: Vec<LocaleReport> = Vec::new();
    let reporter: &mut dyn Reporter = if opts.json {
        &mut collected
    } else {
        &mut console
    };

    let report = match &opts.out_dir {
        Some(out_dir) => {
            let mut sink = LangDir::new(out_dir)
                .with_reference_locale(&settings.reference_locale)
                .with_extension(&settings.extension);
            fix_locales_into(&dir, &mut sink, &catalog, &options, reporter)
        }
        None => fix_locales(&mut dir, &catalog, &options, reporter),
    }
    .map_err(|e| e.to_string())?;

    if opts.json || opts.report.is_some() {
        let rendered = render_json(&report, settings, opts.mode)?;
        if let Some(path) = &opts.report {
            write_report(path, &rendered)?;
        }
        if opts.json {
            println!("{}", rendered);
        }
    }
    if !opts.json {
        println!("\n{}", render_total(&report));
        if let Some(path) = &opts.report {
            println!("Report written: {}", path.display());
        }
    }

    Ok(report)
}
