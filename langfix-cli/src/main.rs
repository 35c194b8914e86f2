use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use langfix::RuleCatalog;
use langfix_cli::{FixCommandOptions, Mode, Overrides, Settings, load_config, run_fix_command};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Where the locale files are and how to treat them.
#[derive(clap::Args, Debug, Clone)]
struct TargetArgs {
    /// Directory holding one <locale>.<ext> file per locale
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Reference locale that is never rewritten (default: en_us)
    #[arg(short, long)]
    reference: Option<String>,

    /// Locale file extension (default: json)
    #[arg(long)]
    ext: Option<String>,

    /// Key namespace the rules are bound under (default: catchrate.ball.)
    #[arg(long)]
    prefix: Option<String>,

    /// Only process these locales (repeatable)
    #[arg(short, long = "lang")]
    lang: Vec<String>,

    /// Config file (default: ./langfix.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Also write the JSON report to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite every non-reference locale file to the reference formatting.
    Fix {
        #[command(flatten)]
        target: TargetArgs,

        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Write fixed files into this directory instead of in place
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Report what `fix` would change; exit with status 1 if anything would.
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// List the keys of the rule catalog, in the order the rules run.
    Rules {
        /// Key namespace the rules are bound under
        #[arg(long, default_value = langfix::CATCHRATE_PREFIX)]
        prefix: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_settings(target: &TargetArgs) -> Result<Settings, String> {
    let file = load_config(target.config.as_deref())?;
    let overrides = Overrides {
        dir: target.dir.clone(),
        reference_locale: target.reference.clone(),
        extension: target.ext.clone(),
        prefix: target.prefix.clone(),
    };
    Ok(Settings::resolve(overrides, file))
}

fn run_target(
    target: TargetArgs,
    mode: Mode,
    out_dir: Option<PathBuf>,
) -> Result<langfix::FixReport, String> {
    let settings = resolve_settings(&target)?;
    run_fix_command(FixCommandOptions {
        settings,
        mode,
        langs: target.lang,
        out_dir,
        json: target.json,
        report: target.report,
    })
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.commands {
        Commands::Fix {
            target,
            dry_run,
            out_dir,
        } => {
            let mode = if dry_run { Mode::DryRun } else { Mode::Write };
            if let Err(e) = run_target(target, mode, out_dir) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Check { target } => match run_target(target, Mode::Check, None) {
            Ok(report) if report.is_clean() => {}
            Ok(report) => {
                eprintln!(
                    "{} locale files need changes. Run `langfix fix` to apply them.",
                    report.changed_locales().count()
                );
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Rules { prefix } => {
            for key in RuleCatalog::with_prefix(&prefix).keys() {
                println!("{}", key);
            }
        }
    }
}
