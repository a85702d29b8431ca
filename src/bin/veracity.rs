//! Command-line fact checker.
//!
//! ```text
//! veracity [--config PATH] [--report] <claim...>
//! ```
//!
//! Prints the verdict JSON on stdout. With `--report`, also prints the run's
//! stages and selected links. All tracing output goes to stderr.

use std::path::PathBuf;

use anyhow::Context;
use veracity::{FactCheckConfig, FactChecker};

const USAGE: &str = "usage: veracity [--config PATH] [--report] <claim...>";

struct Args {
    config: Option<PathBuf>,
    report: bool,
    claim: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut config = None;
    let mut report = false;
    let mut words = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--report" => report = true,
            "--help" | "-h" => anyhow::bail!(USAGE),
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        anyhow::bail!(USAGE);
    }
    Ok(Args {
        config,
        report,
        claim: words.join(" "),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("veracity=info,veracity_search=info")
            }),
        )
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let config =
        FactCheckConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let checker = FactChecker::from_config(&config).context("failed to start fact checker")?;

    let report = checker.run(&args.claim).await;
    tracing::info!(stage = ?report.terminal_stage(), "run finished");

    let output = if args.report {
        serde_json::json!({
            "result": report.result.to_json(),
            "stages": report.stages,
            "selected": report.selected.iter().map(|l| l.url.as_str()).collect::<Vec<_>>(),
        })
    } else {
        report.result.to_json()
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
