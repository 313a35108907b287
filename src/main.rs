//! gitaudit - CLI entry point.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitaudit::audit::{AuditOutcome, AuditPipeline, CancellationToken, spawn_signal_listener};
use gitaudit::config::load_config;
use gitaudit::git::{GitCli, check_git_installed, enumerate_revisions};
use gitaudit::ollama::OllamaClient;
use gitaudit::report::{DEFAULT_REPORT_FILE, generate_summary, write_report};

/// Flags that historically took a single leading dash.
const LEGACY_FLAGS: &[&str] = &["repo", "commit", "output"];

/// Summarize every commit from HEAD back to a boundary commit using a local LLM.
#[derive(Parser, Debug)]
#[command(name = "gitaudit")]
#[command(about = "Summarize every commit from HEAD back to a boundary commit using a local LLM")]
#[command(version)]
struct Cli {
    /// Path to the Git repository
    #[arg(long, default_value = ".")]
    repo: PathBuf,

    /// The oldest commit ID to audit to (inclusive)
    #[arg(long)]
    commit: String,

    /// Path of the audit report
    #[arg(short = 'o', long, default_value = DEFAULT_REPORT_FILE)]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    println!("Repository Path: {}", cli.repo.display());
    println!("Commit ID: {}", cli.commit);

    // Step 1: Configuration
    let config = load_config().context("Error loading configuration")?;
    println!("Ollama Endpoint: {}", config.ollama_endpoint);
    println!("Ollama Model: {}", config.ollama_model);

    // Step 2: Cancellation on Ctrl+C / SIGTERM
    let cancel = CancellationToken::new();
    let _signals =
        spawn_signal_listener(cancel.clone()).context("Failed to install signal handlers")?;

    // Step 3: Enumerate commits
    check_git_installed().context("git is required")?;
    let revisions = enumerate_revisions(&cli.repo, &cli.commit)
        .context("Error getting commit hashes")?;

    println!("Commit hashes to process:");
    for id in &revisions {
        println!("{}", id);
    }

    // Step 4: Run the audit
    let client = OllamaClient::from_config(&config).context("Failed to set up Ollama client")?;
    let source = GitCli::new(&cli.repo);
    let mut pipeline = AuditPipeline::new(&source, &client, cancel);
    let outcome = pipeline.run(revisions).await;

    // Step 5: Write report
    let write_result = if outcome.entries.is_empty() {
        println!("\nNo audited commit data was successfully generated to write to file.");
        Ok(())
    } else {
        write_report(&cli.output, &outcome.entries)
            .map(|written| println!("\n{}", generate_summary(written, &cli.output)))
    };

    print_run_summary(&outcome);

    write_result.with_context(|| {
        format!(
            "Error writing audited commit data to file {}",
            cli.output.display()
        )
    })
}

/// Print the interruption notice and pending commits, or the success line.
fn print_run_summary(outcome: &AuditOutcome) {
    if !outcome.interrupted {
        println!("\nAll commits processed successfully.");
        return;
    }

    println!("\nProcess was interrupted.");
    let pending = outcome.unique_pending();
    if pending.is_empty() {
        println!("No commits were pending retry.");
    } else {
        println!(
            "The following {} commits were pending processing or retry:",
            pending.len()
        );
        for id in pending {
            println!("{}", id);
        }
    }
}

/// Rewrite `-repo x` / `-commit=x` style flags to their `--long` form.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
                return arg;
            };
            let name = rest.split('=').next().unwrap_or(rest);
            if LEGACY_FLAGS.contains(&name) {
                OsString::from(format!("-{}", s))
            } else {
                arg
            }
        })
        .collect()
}
