//! `ccta` - contact-center transcript analytics CLI.
//!
//! Works on text and JSON already fetched from the analytics backend: parses analysis reports,
//! formats transcripts, lists similarity search hits (optionally as an SVG graph) and aggregates
//! batch metrics. Any `PATH` argument may be `-` to read from stdin.
//!
//! # Environment Variables
//! - `CC_GRAPH_MAX_NODES`: number of result slots in the similarity graph (default: 8)
//! - `CC_GRAPH_RADIUS`: orbit radius of result nodes in pixels (default: 200)
//! - `RUST_LOG`: log filter (default: `ccta=info`)

use anyhow::Context;
use cc_core::config::{
    max_nodes_from_env_value, radius_from_env_value, GRAPH_MAX_NODES_ENV, GRAPH_RADIUS_ENV,
};
use cc_core::constants::DEFAULT_TOP_K;
use cc_core::{
    aggregate_reports, format_transcript, layout_graph, parse_report, parse_search_response,
    render_report, render_svg, render_transcript, CoreConfig, GraphConfig, SearchResponse,
    SearchResult,
};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ccta")]
#[command(about = "Contact-center transcript analytics CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an analysis report
    Analyse {
        /// Report text file, or `-` for stdin
        path: PathBuf,
        /// Print the parsed report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Attribute transcript lines to agent and customer
    Transcript {
        /// Transcript text file, or `-` for stdin
        path: PathBuf,
        /// Print attributed lines as JSON
        #[arg(long)]
        json: bool,
    },
    /// List similarity search results
    Search {
        /// Search response JSON file, or `-` for stdin
        path: PathBuf,
        /// Also write the similarity graph as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Print the request body for finding transcripts similar to result N (1-based)
        #[arg(long, value_name = "N")]
        similar: Option<usize>,
    },
    /// Aggregate metrics over a batch of analysis reports
    Metrics {
        /// Report text files
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ccta=info".parse()?)
                .add_directive("cc_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyse { path, json }) => {
            let raw = read_input(&path)?;
            print!("{}", analyse_output(&raw, json)?);
        }
        Some(Commands::Transcript { path, json }) => {
            let lines = format_transcript(&read_input(&path)?);
            if json {
                println!("{}", serde_json::to_string_pretty(&lines)?);
            } else {
                println!("{}", render_transcript(&lines));
            }
        }
        Some(Commands::Search { path, svg, similar }) => {
            let response = parse_search_response(&read_input(&path)?)?;
            print!("{}", search_listing(&response));
            if let Some(n) = similar {
                let result = nth_result(&response, n)?;
                println!("{}", serde_json::to_string_pretty(&result.similar_request())?);
            }
            if let Some(out) = svg {
                let cfg = core_config_from_env()?;
                write_graph(&response.results, &out, cfg.graph())?;
            }
        }
        Some(Commands::Metrics { paths, csv }) => {
            let reports = paths
                .iter()
                .map(|path| read_input(path).map(|raw| parse_report(&raw)))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let metrics = aggregate_reports(&reports);
            if csv {
                println!("{}", metrics.to_csv());
            } else {
                println!("{}", metrics.to_json()?);
            }
        }
        None => {
            println!("Use 'ccta --help' for commands");
        }
    }

    Ok(())
}

/// Parses a report and renders it as the text view, or as JSON.
fn analyse_output(raw: &str, json: bool) -> anyhow::Result<String> {
    let report = parse_report(raw);
    if report.is_unstructured() {
        tracing::info!("no issues or CSAT recognised in report");
    }
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(render_report(&report, raw))
    }
}

/// One row, preview and storage key per hit.
fn search_listing(response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return "No results.\n".to_string();
    }
    response
        .results
        .iter()
        .map(|result| {
            format!(
                "{}\n    {}\n    {}\n",
                result.list_row(),
                result.preview,
                result.s3_key
            )
        })
        .collect()
}

fn nth_result(response: &SearchResponse, n: usize) -> anyhow::Result<&SearchResult> {
    n.checked_sub(1)
        .and_then(|i| response.results.get(i))
        .with_context(|| {
            format!(
                "no result {} (response has {} of at most {})",
                n,
                response.results.len(),
                DEFAULT_TOP_K
            )
        })
}

fn write_graph(results: &[SearchResult], out: &Path, graph: &GraphConfig) -> anyhow::Result<()> {
    let svg = render_svg(&layout_graph(results, graph));
    std::fs::write(out, svg).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!("wrote similarity graph to {}", out.display());
    Ok(())
}

/// Resolves core configuration from the process environment.
///
/// Only commands that draw the similarity graph need it, so a bad graph setting does not break
/// the other commands.
fn core_config_from_env() -> anyhow::Result<CoreConfig> {
    let max_nodes = max_nodes_from_env_value(std::env::var(GRAPH_MAX_NODES_ENV).ok())?;
    let radius = radius_from_env_value(std::env::var(GRAPH_RADIUS_ENV).ok())?;
    Ok(CoreConfig::new(GraphConfig::with_overrides(radius, max_nodes)?))
}

/// Reads a whole input file, or stdin when `path` is `-`.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
