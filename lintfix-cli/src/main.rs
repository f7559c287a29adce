mod config;
mod explain;

use anyhow::Context;
use camino::Utf8PathBuf;
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use lintfix_core::adapters::FsSourceTree;
use lintfix_core::pipeline::run_rewrite;
use lintfix_types::report::{RunInfo, RunReport, ToolInfo};
use lintfix_types::summary::RunSummary;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lintfix",
    version,
    about = "Guarded bulk lint fixes for a web source tree.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Arguments for the default `run` command.
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite matching files in place (the default when no command is given).
    Run(RunArgs),
    /// List the built-in rules in application order.
    ListRules(ListRulesArgs),
    /// Explain what a rule rewrites, with an example.
    Explain(ExplainArgs),
}

#[derive(Debug, Parser)]
struct RunArgs {
    /// Project root; roots and reported paths are relative to it.
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Report what would change without writing any file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print a unified diff of every change.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Allowlist patterns for rule keys.
    #[arg(long)]
    allow: Vec<String>,

    /// Denylist patterns for rule keys.
    #[arg(long)]
    deny: Vec<String>,

    /// Log rule decisions at debug level (RUST_LOG takes precedence).
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule key to explain (e.g., "jsx.anchor_to_link" or "anchor-to-link").
    rule_key: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or(Command::Run(cli.run));

    let verbose = matches!(&cmd, Command::Run(args) if args.verbose);
    init_tracing(verbose);

    match cmd {
        Command::Run(args) => cmd_run(args),
        Command::ListRules(args) => cmd_list_rules(args),
        Command::Explain(args) => cmd_explain(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let project_root = args.project_root;

    // Load config file and merge with CLI arguments
    let file_config =
        config::load_or_default(&project_root).context("load lintfix.toml config")?;
    let mut settings = ConfigMerger::new(file_config).merge_run_args(&args.allow, &args.deny);
    settings.dry_run = args.dry_run;
    settings.collect_patch = args.diff;

    debug!(
        "merged config: roots={:?}, extensions={:?}, exclude={:?}, allow={:?}, deny={:?}",
        settings.roots, settings.extensions, settings.exclude, settings.allow, settings.deny
    );

    let started_at = Utc::now();
    let tree = FsSourceTree::new(project_root.clone());
    let outcome = run_rewrite(&settings, &tree, &tree).context("build rewrite rules")?;
    let ended_at = Utc::now();

    match args.format {
        OutputFormat::Text => {
            print_summary(&outcome.summary, settings.dry_run);
            if args.diff && !outcome.patch.is_empty() {
                println!();
                print!("{}", outcome.patch);
            }
        }
        OutputFormat::Json => {
            let report = RunReport::new(
                ToolInfo {
                    name: "lintfix".to_string(),
                    version: Some(env!("CARGO_PKG_VERSION").to_string()),
                },
                RunInfo {
                    started_at: Some(started_at),
                    ended_at: Some(ended_at),
                    dry_run: settings.dry_run,
                    project_root: Some(project_root.to_string()),
                },
                outcome.summary,
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    for path in summary.modified_paths() {
        if dry_run {
            println!("would modify {}", path);
        } else {
            println!("{}", path);
        }
    }
    for failure in &summary.errors {
        eprintln!("failed {}: {}", failure.path, failure.message);
    }

    let verb = if dry_run { "would modify" } else { "modified" };
    println!(
        "scanned {} files, {} {}, {} failed",
        summary.files_scanned, verb, summary.files_modified, summary.files_failed
    );
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    use explain::RULE_REGISTRY;

    match args.format {
        OutputFormat::Text => {
            println!("Built-in rules, in application order:\n");
            println!("  {:<44} {:<14} TITLE", "KEY", "KIND");
            println!("  {:<44} {:<14} -----", "---", "----");
            for rule in RULE_REGISTRY {
                println!("  {:<44} {:<14} {}", rule.key, rule.kind.as_str(), rule.title);
            }
            println!();
            println!("Use 'lintfix explain <key>' for details.");
        }
        OutputFormat::Json => {
            let rules: Vec<_> = RULE_REGISTRY
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "key": r.key,
                        "kind": r.kind.as_str(),
                        "title": r.title,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    use explain::{list_rule_keys, lookup_rule};

    let Some(rule) = lookup_rule(&args.rule_key) else {
        let available = list_rule_keys().join(", ");
        anyhow::bail!(
            "Unknown rule key: '{}'\n\nAvailable rules: {}",
            args.rule_key,
            available
        );
    };

    println!("================================================================================");
    println!("RULE: {}", rule.title);
    println!("================================================================================");
    println!();
    println!("Key:   {}", rule.key);
    println!("Kind:  {}", rule.kind.as_str());
    println!();

    println!("DESCRIPTION");
    println!("--------------------------------------------------------------------------------");
    println!("{}", rule.description);
    println!();

    println!("EXAMPLE");
    println!("--------------------------------------------------------------------------------");
    println!("Before:");
    for line in rule.before.lines() {
        println!("    {}", line);
    }
    println!("After:");
    for line in rule.after.lines() {
        println!("    {}", line);
    }
    println!();

    Ok(())
}
