use crate::text::TextAnalyzer;
use crate::tree::{Branch, TreeNode};
use tracing::debug;

pub const DEFAULT_MINDMAP_ROOT: &str = "Main Topic";
pub const DEFAULT_FLOWCHART_ROOT: &str = "Start";

const MINDMAP_TOPICS: usize = 3;
const MINDMAP_POINTS_PER_TOPIC: usize = 2;
const FLOWCHART_STEPS: usize = 2;

/// Deterministic mindmap built from extracted phrases and sentences.
///
/// Root is the best phrase; the next two phrases become topics, topic `i`
/// (1-based) taking sentences `[i, i + 2)` as its points.
pub fn fallback_mindmap(text: &str, analyzer: &TextAnalyzer) -> TreeNode {
    let mut topics = analyzer.ranked_phrases(text);
    topics.truncate(MINDMAP_TOPICS);
    let sentences = analyzer.sentences(text);

    let root = topics
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_MINDMAP_ROOT.to_string());

    let children: Vec<TreeNode> = topics
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, topic)| {
            let points: Vec<TreeNode> = sentences
                .iter()
                .skip(i)
                .take(MINDMAP_POINTS_PER_TOPIC)
                .map(TreeNode::leaf)
                .collect();
            TreeNode::from(Branch::labeled(topic.as_str()).with_subchildren(points))
        })
        .collect();

    debug!(root = %root, topics = children.len(), "Built fallback mindmap");
    Branch::root(root, children).into()
}

/// Deterministic flowchart: first sentence as the task, the next two as
/// numbered steps holding one sentence each.
pub fn fallback_flowchart(problem: &str, analyzer: &TextAnalyzer) -> TreeNode {
    let sentences = analyzer.sentences(problem);

    let root = sentences
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_FLOWCHART_ROOT.to_string());

    let children: Vec<TreeNode> = sentences
        .iter()
        .skip(1)
        .take(FLOWCHART_STEPS)
        .enumerate()
        .map(|(i, sentence)| {
            TreeNode::from(
                Branch::labeled(format!("Step {}", i + 1))
                    .with_subchildren(vec![TreeNode::leaf(sentence.as_str())]),
            )
        })
        .collect();

    debug!(root = %root, steps = children.len(), "Built fallback flowchart");
    Branch::root(root, children).into()
}
