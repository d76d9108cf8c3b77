use crate::Graph;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Graph has no nodes")]
    NoNodes,

    #[error("Expected {expected} edges for {nodes} nodes, found {found}")]
    EdgeCountMismatch {
        nodes: usize,
        expected: usize,
        found: usize,
    },

    #[error("Node id {0} is used more than once")]
    DuplicateId(String),

    #[error("Edge {from} -> {to} references an unknown node")]
    UnknownEndpoint { from: String, to: String },

    #[error("Node {0} has more than one parent")]
    MultipleParents(String),

    #[error("Root node {0} has an incoming edge")]
    RootHasParent(String),

    #[error("Node {0} is not connected to the root (cycle detected)")]
    CycleDetected(String),
}

/// Check that a flattened graph is a single rooted tree.
pub fn validate_graph(graph: &Graph) -> Result<(), GraphError> {
    let Some(root) = graph.nodes.first() else {
        return Err(GraphError::NoNodes);
    };

    let expected = graph.nodes.len() - 1;
    if graph.edges.len() != expected {
        return Err(GraphError::EdgeCountMismatch {
            nodes: graph.nodes.len(),
            expected,
            found: graph.edges.len(),
        });
    }

    let mut ids = HashSet::new();
    for node in &graph.nodes {
        if !ids.insert(node.id.as_str()) {
            return Err(GraphError::DuplicateId(node.id.clone()));
        }
    }

    let mut parents: HashMap<&str, &str> = HashMap::new();
    for edge in &graph.edges {
        if !ids.contains(edge.from.as_str()) || !ids.contains(edge.to.as_str()) {
            return Err(GraphError::UnknownEndpoint {
                from: edge.from.clone(),
                to: edge.to.clone(),
            });
        }
        if edge.to == root.id {
            return Err(GraphError::RootHasParent(root.id.clone()));
        }
        if parents.insert(edge.to.as_str(), edge.from.as_str()).is_some() {
            return Err(GraphError::MultipleParents(edge.to.clone()));
        }
    }

    // Every node must reach the root by following parent links.
    let mut reaches_root: HashSet<&str> = HashSet::from([root.id.as_str()]);
    for node in &graph.nodes {
        let mut path = Vec::new();
        let mut current = node.id.as_str();
        while !reaches_root.contains(current) {
            if path.contains(&current) {
                return Err(GraphError::CycleDetected(node.id.clone()));
            }
            path.push(current);
            match parents.get(current) {
                Some(&parent) => current = parent,
                None => return Err(GraphError::CycleDetected(node.id.clone())),
            }
        }
        reaches_root.extend(path);
    }

    Ok(())
}
