mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use text2visuals_core::{FlowchartRequest, Graph, InputError, MindmapRequest};
use text2visuals_llm::Visualizer;
use tracing::{error, info};

use config::{Overrides, Settings, load_settings};

// ── CLI ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "text2visuals",
    about = "Turn text into mindmap and flowchart graphs"
)]
struct Cli {
    /// Path to a TOML config file with [llm] and [flowchart] tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// OpenAI-compatible endpoint of the language model
    #[arg(long, env = "TEXT2VISUALS_BASE_URL", global = true)]
    base_url: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, env = "TEXT2VISUALS_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Model name
    #[arg(long, env = "TEXT2VISUALS_MODEL", global = true)]
    model: Option<String>,

    /// Also write JSON logs to a daily file in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Pretty-print the output JSON
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a mindmap from free-form text
    Mindmap {
        /// Source text
        #[arg(long, conflicts_with = "input")]
        text: Option<String>,

        /// JSON request file: {"text": "..."}
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Build a flowchart with time estimates from a problem statement
    Flowchart {
        /// Problem statement
        #[arg(long, conflicts_with = "input")]
        problem: Option<String>,

        /// beginner, intermediate, advanced or expert
        #[arg(long, conflicts_with = "input")]
        skill_level: Option<String>,

        /// JSON request file: {"problem": "...", "skillLevel": "..."}
        #[arg(long)]
        input: Option<PathBuf>,

        /// Estimate the root node as well as the steps
        #[arg(long)]
        estimate_root: bool,
    },
}

// ── Requests ────────────────────────────────────────────────────

fn read_request<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse request: {}", path.display()))
}

fn mindmap_request(text: Option<String>, input: Option<&Path>) -> Result<MindmapRequest> {
    match input {
        Some(path) => read_request(path),
        None => Ok(MindmapRequest::new(text.unwrap_or_default())),
    }
}

fn flowchart_request(
    problem: Option<String>,
    skill_level: Option<&str>,
    input: Option<&Path>,
) -> Result<FlowchartRequest> {
    match input {
        Some(path) => read_request(path),
        None => Ok(FlowchartRequest::new(problem.unwrap_or_default(), skill_level)),
    }
}

// ── Output ──────────────────────────────────────────────────────

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn input_error_json(err: &InputError) -> serde_json::Value {
    serde_json::json!({ "error": err.to_string() })
}

fn emit(result: Result<Graph, InputError>, pretty: bool) -> Result<ExitCode> {
    match result {
        Ok(graph) => {
            info!(
                nodes = graph.nodes.len(),
                edges = graph.edges.len(),
                total_minutes = graph.total_minutes(),
                "Graph ready"
            );
            println!("{}", to_json(&graph, pretty)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!("Rejected request: {}", err);
            println!("{}", to_json(&input_error_json(&err), pretty)?);
            Ok(ExitCode::from(2))
        }
    }
}

// ── Main ────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = logging::init(cli.log_dir.as_deref())?;

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let estimate_root = matches!(
        cli.command,
        Command::Flowchart {
            estimate_root: true,
            ..
        }
    );
    let (llm, options) = settings.resolve(Overrides {
        base_url: cli.base_url,
        api_key: cli.api_key,
        model: cli.model,
        estimate_root,
    });
    info!(endpoint = %llm.base_url, model = %llm.model, "Using language model");

    let visualizer = Visualizer::new(llm).with_options(options);

    let result = match cli.command {
        Command::Mindmap { text, input } => {
            let request = mindmap_request(text, input.as_deref())?;
            visualizer.mindmap(&request).await
        }
        Command::Flowchart {
            problem,
            skill_level,
            input,
            ..
        } => {
            let request = flowchart_request(problem, skill_level.as_deref(), input.as_deref())?;
            visualizer.flowchart(&request).await
        }
    };

    emit(result, cli.pretty)
}
