// cadence-modernizer-core/src/lib.rs

// declare modules
pub mod config;
pub mod legacy;
pub mod report;
pub mod sources;
pub mod utils;

// re-export key structs/functions for external use by other crates
pub use anyhow::{Context, Result}; // re-export for convenience
pub use clap::Parser; // re-export Parser for CLI crate
pub use console::style; // re-export for CLI/NAPI crates if they do printing
pub use dialoguer::{theme::ColorfulTheme, Confirm};
pub use dotenv::dotenv;
pub use indicatif::{ProgressBar, ProgressStyle};
pub use std::time::Duration;

pub use crate::config::Config;
pub use crate::legacy::{
    auto_modernize, create_fix_plan, detect_legacy_patterns, validate_cadence_code,
    validate_source, AutoModernizationOptions, FixPlan, LegacyPattern, ModernizationResult,
    ValidationResult,
};
pub use crate::sources::{collect_sources, SourceFile};

use clap::Subcommand;
use std::fs;
use std::path::PathBuf;

// argument parsing struct - shared by the CLI and anything else that wants to parse argv
#[derive(Parser, Debug, Clone)]
#[command(name = "cadence-modernizer")]
#[command(version, about = "find and rewrite legacy cadence syntax", long_about = None)]
pub struct CoreCliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// print results as json instead of styled text
    #[arg(long, global = true)]
    pub json: bool,

    /// path to a cadence-modernizer.toml file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// show debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// report legacy syntax; fails if any file contains a critical pattern
    Check {
        /// files or directories to scan (defaults to current directory)
        paths: Vec<PathBuf>,
    },
    /// print a prioritised, time-estimated fix plan
    Plan {
        /// files or directories to scan (defaults to current directory)
        paths: Vec<PathBuf>,
    },
    /// rewrite auto-fixable legacy syntax
    Fix {
        /// files or directories to scan (defaults to current directory)
        paths: Vec<PathBuf>,

        /// write the modernised code back to disk
        #[arg(short, long)]
        write: bool,

        /// don't ask before writing files
        #[arg(short = 'y', long)]
        yes: bool,

        /// also apply warning-level fixes
        #[arg(long)]
        warnings: bool,

        /// insert a comment above every modernised line
        #[arg(long)]
        explain: bool,

        /// rewrite matches inside comments too
        #[arg(long)]
        no_preserve_comments: bool,
    },
}

/// what a run did, so the binary can pick an exit status
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlowOutcome {
    pub files_scanned: usize,
    pub invalid_files: usize,
    pub files_rewritten: usize,
}

impl FlowOutcome {
    pub fn failed(&self, command: &Command) -> bool {
        matches!(command, Command::Check { .. }) && self.invalid_files > 0
    }
}

fn paths_or_cwd(paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    }
}

// the core scan/report/rewrite flow shared by the binaries
pub async fn execute_modernizer_flow(args: CoreCliArgs) -> Result<FlowOutcome> {
    dotenv().ok();
    let config = Config::load(args.config.as_deref()).context("failed to load configuration")?;

    let paths = match &args.command {
        Command::Check { paths } | Command::Plan { paths } | Command::Fix { paths, .. } => {
            paths_or_cwd(paths)
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["🔍 ⠋", "🔍 ⠙", "🔍 ⠹", "🔍 ⠸", "🔍 ⠼", "🔍 ⠴", "🔍 ⠦", "🔍 ⠧", "🔍 ⠇", "🔍 ⠏"])
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("collecting cadence sources...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let sources = collect_sources(&paths, &config.scan);
    spinner.finish_and_clear();
    let sources = sources.context("failed to collect cadence sources")?;

    if sources.is_empty() {
        return Err(anyhow::anyhow!("no cadence files found"));
    }

    let mut outcome = FlowOutcome {
        files_scanned: sources.len(),
        ..FlowOutcome::default()
    };
    let mut json_results = Vec::new();

    match &args.command {
        Command::Check { .. } => {
            for source in &sources {
                let file = source.path.display().to_string();
                let result = validate_cadence_code(Some(source.content.as_str())).await;
                if !result.is_valid {
                    outcome.invalid_files += 1;
                }
                if args.json {
                    json_results.push(serde_json::json!({ "file": file, "result": result }));
                } else {
                    print!("{}", report::render_validation(&file, &result));
                }
            }

            if !args.json {
                let summary = format!(
                    "\n{} file{} checked, {} with critical legacy syntax",
                    outcome.files_scanned,
                    if outcome.files_scanned == 1 { "" } else { "s" },
                    outcome.invalid_files
                );
                if outcome.invalid_files > 0 {
                    println!("{}", style(summary).red().bold());
                } else {
                    println!("{}", style(summary).green().bold());
                }
            }
        }
        Command::Plan { .. } => {
            for source in &sources {
                let file = source.path.display().to_string();
                let plan = create_fix_plan(&detect_legacy_patterns(&source.content));
                if args.json {
                    json_results.push(serde_json::json!({ "file": file, "plan": plan }));
                } else {
                    println!("{}", report::render_plan(&file, &plan));
                }
            }
        }
        Command::Fix {
            write,
            yes,
            warnings,
            explain,
            no_preserve_comments,
            ..
        } => {
            let mut options = config.modernization_options();
            options.auto_fix_warnings |= *warnings;
            options.add_explanation_comments |= *explain;
            if *no_preserve_comments {
                options.preserve_comments = false;
            }

            let mut pending = Vec::new();
            for source in &sources {
                let file = source.path.display().to_string();
                let patterns = detect_legacy_patterns(&source.content);
                let result = auto_modernize(&source.content, &patterns, &options);
                if args.json {
                    json_results.push(serde_json::json!({ "file": file, "modernization": result }));
                } else {
                    print!("{}", report::render_modernization(&file, &result));
                }
                if result.modernized_code != source.content {
                    pending.push((source.path.clone(), result.modernized_code));
                }
            }

            if *write && !pending.is_empty() {
                let confirmed = *yes
                    || Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt(format!("rewrite {} file(s) in place?", pending.len()))
                        .default(false)
                        .interact()?;

                if confirmed {
                    for (path, code) in &pending {
                        fs::write(path, code)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        outcome.files_rewritten += 1;
                    }
                    if !args.json {
                        println!(
                            "{}",
                            style(format!("✅ rewrote {} file(s)", outcome.files_rewritten)).green().bold()
                        );
                    }
                } else if !args.json {
                    println!("{}", style("no files were written").yellow());
                }
            } else if !args.json && !pending.is_empty() {
                println!(
                    "{}",
                    style("dry run - pass --write to apply these changes").dim()
                );
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    Ok(outcome)
}
