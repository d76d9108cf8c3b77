use super::annotate::annotate_tree;
use super::parse::parse_oracle_object;
use super::prompt::flowchart_prompt;
use super::{FallbackReason, Generation, Visualizer, check_graph, log_fallback};
use crate::{ChatBackend, complete, estimate_step_duration};
use text2visuals_core::fallback::fallback_flowchart;
use text2visuals_core::labels::normalize_label_keys;
use text2visuals_core::{FlowchartRequest, Graph, InputError, TreeNode, flatten};
use tracing::{debug, info};

/// Ask the oracle for a flowchart tree of `problem`, repairing misspelled
/// label keys on the way.
pub async fn generate_flowchart_tree(
    backend: &impl ChatBackend,
    problem: &str,
) -> Generation<TreeNode> {
    let raw = match complete(backend, &flowchart_prompt(problem), None).await {
        Ok(raw) => raw,
        Err(e) => return Generation::NeedsFallback(FallbackReason::Oracle(format!("{:#}", e))),
    };
    debug!(raw_output = %raw, "Flowchart oracle raw output");

    parse_oracle_object(&raw)
        .map(|mut value| {
            normalize_label_keys(&mut value);
            debug!(cleaned = %value, "Flowchart oracle JSON");
            TreeNode::from_value(&value)
        })
        .into()
}

impl<B: ChatBackend> Visualizer<B> {
    /// Convert a problem statement into a flowchart graph with per-step
    /// duration estimates for the requested skill level.
    pub async fn flowchart(&self, request: &FlowchartRequest) -> Result<Graph, InputError> {
        let problem = request.problem()?;
        let skill = request.skill();

        info!(chars = problem.len(), %skill, "Generating flowchart");
        debug!(sentences = ?self.analyzer.sentences(problem), "Flowchart preprocessing");

        let mut tree = generate_flowchart_tree(&self.backend, problem)
            .await
            .or_fallback(|reason| {
                log_fallback("Flowchart", &reason);
                fallback_flowchart(problem, &self.analyzer)
            });

        annotate_tree(&self.backend, &mut tree, &skill).await;

        let root_estimate = match (self.options.estimate_root, tree.label()) {
            (true, Some(root)) => {
                Some(estimate_step_duration(&self.backend, root, &skill, None).await)
            }
            _ => None,
        };

        let graph = flatten(&tree, root_estimate);
        check_graph("Flowchart", &graph);
        Ok(graph)
    }
}
