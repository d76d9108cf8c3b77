use super::parse::parse_oracle_object;
use super::prompt::mindmap_prompt;
use super::{FallbackReason, Generation, Visualizer, check_graph, log_fallback};
use crate::{ChatBackend, complete};
use serde_json::Value;
use text2visuals_core::fallback::fallback_mindmap;
use text2visuals_core::{
    CHILDREN_KEY, Graph, InputError, LABEL_KEY, MindmapRequest, ROOT_KEY, TreeNode, flatten,
    scalar_text,
};
use tracing::{debug, info};

const MAIN_TOPIC_LIMIT: usize = 5;

/// Ask the oracle for a mindmap tree of `text`.
pub async fn generate_mindmap_tree(backend: &impl ChatBackend, text: &str) -> Generation<TreeNode> {
    let raw = match complete(backend, &mindmap_prompt(text), None).await {
        Ok(raw) => raw,
        Err(e) => return Generation::NeedsFallback(FallbackReason::Oracle(format!("{:#}", e))),
    };
    debug!(raw_output = %raw, "Mindmap oracle raw output");

    parse_oracle_object(&raw)
        .and_then(|value| {
            check_mindmap_shape(&value)?;
            debug!(cleaned = %value, "Mindmap oracle JSON");
            Ok(TreeNode::from_value(&value))
        })
        .into()
}

/// The mindmap path has no key repair: the root needs a label and every
/// structured topic needs a `label`, otherwise the reply is unusable.
fn check_mindmap_shape(value: &Value) -> Result<(), FallbackReason> {
    let has_title = [ROOT_KEY, LABEL_KEY]
        .iter()
        .any(|key| value.get(*key).and_then(scalar_text).is_some());
    if !has_title {
        return Err(FallbackReason::MissingKey(ROOT_KEY));
    }

    let topics = value
        .get(CHILDREN_KEY)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for topic in topics.iter().filter(|t| t.is_object()) {
        if topic.get(LABEL_KEY).and_then(scalar_text).is_none() {
            return Err(FallbackReason::MissingKey(LABEL_KEY));
        }
    }
    Ok(())
}

impl<B: ChatBackend> Visualizer<B> {
    /// Convert free-form text into a mindmap graph.
    ///
    /// Only empty input is an error; any oracle problem is absorbed by the
    /// deterministic fallback.
    pub async fn mindmap(&self, request: &MindmapRequest) -> Result<Graph, InputError> {
        let text = request.text()?;

        info!(chars = text.len(), "Generating mindmap");
        debug!(
            main_topics = ?self.analyzer.main_topics(text, MAIN_TOPIC_LIMIT),
            sentences = ?self.analyzer.sentences(text),
            "Mindmap preprocessing"
        );

        let tree = generate_mindmap_tree(&self.backend, text)
            .await
            .or_fallback(|reason| {
                log_fallback("Mindmap", &reason);
                fallback_mindmap(text, &self.analyzer)
            });

        let graph = flatten(&tree, None);
        check_graph("Mindmap", &graph);
        Ok(graph)
    }
}
