//! seo-audit main entry point
//!
//! This is the command-line front door: it audits one URL per invocation and
//! prints the result as JSON or markdown.

use anyhow::Context;
use clap::Parser;
use seo_audit::audit::AuditOrchestrator;
use seo_audit::config::{apply_api_keys, load_config, ApiKeys, Config};
use seo_audit::output::{render_error_json, write_report, ReportFormat};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// seo-audit: performance and on-page SEO audit for a single page
///
/// Queries PageSpeed Insights for a mobile performance score, analyzes the
/// page markup, and asks a language model to explain the results.
#[derive(Parser, Debug)]
#[command(name = "seo-audit")]
#[command(version)]
#[command(about = "Audit a web page for performance and on-page SEO", long_about = None)]
struct Cli {
    /// URL of the page to audit (http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report format: json or markdown
    #[arg(short, long, default_value = "json")]
    format: ReportFormat,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pagespeed_key: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_key: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    apply_api_keys(
        &mut config,
        ApiKeys {
            pagespeed: cli.pagespeed_key.clone(),
            openai: cli.openai_key.clone(),
        },
    );

    // Providers are built once, before the audit starts
    let orchestrator =
        AuditOrchestrator::from_config(&config).context("failed to build audit providers")?;

    handle_audit(&orchestrator, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout only carries the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("seo_audit=info,warn"),
            1 => EnvFilter::new("seo_audit=debug,info"),
            2 => EnvFilter::new("seo_audit=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the audit and reports the result or the error payload
async fn handle_audit(orchestrator: &AuditOrchestrator, cli: &Cli) -> anyhow::Result<ExitCode> {
    match orchestrator.perform_audit(&cli.url).await {
        Ok(result) => {
            write_report(&result, cli.format, cli.output.as_deref())
                .context("failed to write report")?;
            if let Some(path) = &cli.output {
                tracing::info!("Report written to: {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Audit failed: {}", e);
            match cli.format {
                ReportFormat::Json => println!("{}", render_error_json(&e)?),
                ReportFormat::Markdown => eprintln!("Error: {}", e.user_message()),
            }
            Ok(exit_code_for(e.status_code()))
        }
    }
}

/// Maps the HTTP-equivalent status of an audit error to a process exit code
fn exit_code_for(status: u16) -> ExitCode {
    match status {
        400 => ExitCode::from(2),
        429 => ExitCode::from(3),
        _ => ExitCode::FAILURE,
    }
}
