mod annotate;
mod flowchart;
mod mindmap;
mod parse;
mod prompt;


pub use annotate::annotate_tree;
pub use flowchart::generate_flowchart_tree;
pub use mindmap::generate_mindmap_tree;
pub use parse::{extract_fenced, extract_json_object, parse_oracle_object};

use crate::{ChatBackend, LlmClient, LlmConfig};
use text2visuals_core::text::TextAnalyzer;
use text2visuals_core::{Graph, validate_graph};
use thiserror::Error;
use tracing::{info, warn};

// ── Stage outcomes ──────────────────────────────────────────────

/// Why an oracle-backed stage could not produce a usable result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FallbackReason {
    #[error("oracle call failed: {0}")]
    Oracle(String),

    #[error("no JSON object found in oracle output")]
    NoJsonObject,

    #[error("oracle output is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("oracle output is missing required key '{0}'")]
    MissingKey(&'static str),
}

/// Result of an oracle-backed stage: either a usable value or an explicit
/// request to take the deterministic fallback path.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation<T> {
    Ready(T),
    NeedsFallback(FallbackReason),
}

impl<T> Generation<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Generation::Ready(_))
    }

    /// The ready value, or the fallback built from the failure reason.
    pub fn or_fallback(self, fallback: impl FnOnce(FallbackReason) -> T) -> T {
        match self {
            Generation::Ready(value) => value,
            Generation::NeedsFallback(reason) => fallback(reason),
        }
    }
}

impl<T> From<Result<T, FallbackReason>> for Generation<T> {
    fn from(result: Result<T, FallbackReason>) -> Self {
        match result {
            Ok(value) => Generation::Ready(value),
            Err(reason) => Generation::NeedsFallback(reason),
        }
    }
}

// ── Visualizer ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlowchartOptions {
    /// Also estimate the root task and put it on the root graph node.
    /// Off by default: the root stands for the whole task, not a step.
    pub estimate_root: bool,
}

/// Turns text into diagrams. Holds the process-wide collaborators, built
/// once at startup and shared read-only by every request.
pub struct Visualizer<B: ChatBackend = LlmClient> {
    backend: B,
    analyzer: TextAnalyzer,
    options: FlowchartOptions,
}

impl Visualizer {
    pub fn new(config: LlmConfig) -> Self {
        Self::with_backend(LlmClient::new(config), TextAnalyzer::default())
    }
}

impl<B: ChatBackend> Visualizer<B> {
    pub fn with_backend(backend: B, analyzer: TextAnalyzer) -> Self {
        Self {
            backend,
            analyzer,
            options: FlowchartOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FlowchartOptions) -> Self {
        self.options = options;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }
}

fn log_fallback(kind: &str, reason: &FallbackReason) {
    warn!(reason = %reason, "{} oracle unusable, using fallback {}", kind, kind.to_lowercase());
}

fn check_graph(kind: &str, graph: &Graph) {
    match validate_graph(graph) {
        Ok(()) => info!(
            "{} graph: {} nodes, {} edges",
            kind,
            graph.nodes.len(),
            graph.edges.len()
        ),
        Err(e) => warn!("{} graph failed validation: {}", kind, e),
    }
}
