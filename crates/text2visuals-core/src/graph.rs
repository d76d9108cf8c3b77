use crate::clean::clean_phrase;
use crate::tree::{DEFAULT_STEP_LABEL, TreeNode};
use serde::{Deserialize, Serialize};

/// Flat node/edge document handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_estimate: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl Graph {
    pub fn find_node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.first()
    }

    /// Direct children of `id`, in insertion order.
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphNode> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .filter_map(move |e| self.find_node(&e.to))
    }

    /// Sum of all time estimates present on the graph.
    pub fn total_minutes(&self) -> u64 {
        self.nodes
            .iter()
            .filter_map(|n| n.time_estimate)
            .map(u64::from)
            .sum()
    }
}

/// Flatten a tree into a graph by depth-first pre-order traversal.
///
/// IDs are `"0"`, `"1"`, ... in visiting order; every non-root node gets one
/// edge from its parent. `root_estimate` only applies to the root and only
/// when the root carries no estimate of its own.
pub fn flatten(tree: &TreeNode, root_estimate: Option<u32>) -> Graph {
    let mut builder = GraphBuilder {
        graph: Graph::default(),
        next_id: 0,
        root_estimate,
    };
    builder.visit(tree, None, 0);
    builder.graph
}

struct GraphBuilder {
    graph: Graph,
    next_id: usize,
    root_estimate: Option<u32>,
}

impl GraphBuilder {
    fn visit(&mut self, node: &TreeNode, parent: Option<&str>, depth: usize) {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let label = node.label().unwrap_or(DEFAULT_STEP_LABEL);
        let own_estimate = node.as_branch().and_then(|b| b.time_estimate);
        let time_estimate = match (own_estimate, depth) {
            (Some(minutes), _) => Some(minutes),
            (None, 0) => self.root_estimate,
            (None, _) => None,
        };

        self.graph.nodes.push(GraphNode {
            id: id.clone(),
            label: clean_phrase(label),
            depth,
            time_estimate,
        });

        if let Some(parent) = parent {
            self.graph.edges.push(GraphEdge {
                from: parent.to_string(),
                to: id.clone(),
            });
        }

        for child in node.children() {
            self.visit(child, Some(&id), depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Branch;
    use serde_json::json;

    fn sample_tree() -> TreeNode {
        TreeNode::from_value(&json!({
            "root": "Central  Topic",
            "children": [
                {"label": "A", "subchildren": ["a1", "a2"]},
                {"label": "B", "children": [{"label": "b1", "children": ["deep"]}]},
                "C"
            ]
        }))
    }

    #[test]
    fn ids_are_sequential_in_preorder() {
        let graph = flatten(&sample_tree(), None);
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["0", "1", "2", "3", "4", "5", "6", "7"]);

        let labels: Vec<_> = graph.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Central Topic", "A", "a1", "a2", "B", "b1", "deep", "C"]
        );
    }

    #[test]
    fn depths_and_edges_follow_nesting() {
        let graph = flatten(&sample_tree(), None);
        let depths: Vec<_> = graph.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, [0, 1, 2, 2, 1, 2, 3, 1]);

        let edges: Vec<_> = graph
            .edges
            .iter()
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(
            edges,
            [
                ("0", "1"),
                ("1", "2"),
                ("1", "3"),
                ("0", "4"),
                ("4", "5"),
                ("5", "6"),
                ("0", "7"),
            ]
        );
        assert_eq!(graph.edges.len(), graph.nodes.len() - 1);
    }

    #[test]
    fn bare_string_root_is_a_single_node() {
        let graph = flatten(&TreeNode::leaf(" only\nroot "), None);
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].label, "only root");
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn unlabeled_branch_defaults_to_step() {
        let tree = TreeNode::from_value(&json!({"root": "R", "children": [{"subchildren": ["x"]}]}));
        let graph = flatten(&tree, None);
        assert_eq!(graph.nodes[1].label, DEFAULT_STEP_LABEL);
    }

    #[test]
    fn root_estimate_only_fills_the_root() {
        let mut step = Branch::labeled("Step 1");
        step.time_estimate = Some(20);
        let tree: TreeNode = Branch::root(
            "Task",
            vec![step.into(), Branch::labeled("Step 2").into()],
        )
        .into();

        let graph = flatten(&tree, Some(90));
        assert_eq!(graph.nodes[0].time_estimate, Some(90));
        assert_eq!(graph.nodes[1].time_estimate, Some(20));
        assert_eq!(graph.nodes[2].time_estimate, None);
        assert_eq!(graph.total_minutes(), 110);
    }

    #[test]
    fn own_root_estimate_beats_external_one() {
        let mut root = Branch::root("Task", vec![]);
        root.time_estimate = Some(5);
        let graph = flatten(&root.into(), Some(90));
        assert_eq!(graph.nodes[0].time_estimate, Some(5));
    }

    #[test]
    fn serializes_with_camel_case_and_omits_missing_estimates() {
        let mut step = Branch::labeled("s");
        step.time_estimate = Some(12);
        let tree: TreeNode = Branch::root("r", vec![step.into()]).into();
        let value = serde_json::to_value(flatten(&tree, None)).unwrap();
        assert_eq!(
            value,
            json!({
                "nodes": [
                    {"id": "0", "label": "r", "depth": 0},
                    {"id": "1", "label": "s", "depth": 1, "timeEstimate": 12}
                ],
                "edges": [{"from": "0", "to": "1"}]
            })
        );
    }

    #[test]
    fn children_of_lists_direct_descendants() {
        let graph = flatten(&sample_tree(), None);
        let kids: Vec<_> = graph.children_of("0").map(|n| n.label.as_str()).collect();
        assert_eq!(kids, ["A", "B", "C"]);
        assert_eq!(graph.root().map(|n| n.id.as_str()), Some("0"));
    }
}
