use crate::{ChatBackend, estimate_step_duration};
use text2visuals_core::{Skill, TreeNode};
use tracing::debug;

/// One labeled node awaiting an estimate, in pre-order.
struct EstimateJob<'a> {
    step: &'a str,
    parent_topic: Option<&'a str>,
}

/// Attach a duration estimate to every labeled structured node below the
/// root. Each step is estimated in the context of its nearest labeled
/// ancestor; the root itself is left unestimated. Bare-string leaves have
/// nowhere to store an estimate and are skipped.
pub async fn annotate_tree(backend: &impl ChatBackend, tree: &mut TreeNode, skill: &Skill) {
    let estimates = {
        let mut jobs = Vec::new();
        collect_jobs(tree, None, 0, &mut jobs);
        debug!(steps = jobs.len(), %skill, "Annotating tree with duration estimates");

        let mut estimates = Vec::with_capacity(jobs.len());
        for job in &jobs {
            estimates
                .push(estimate_step_duration(backend, job.step, skill, job.parent_topic).await);
        }
        estimates
    };

    apply_estimates(tree, 0, &mut estimates.into_iter());
}

fn collect_jobs<'a>(
    node: &'a TreeNode,
    parent_topic: Option<&'a str>,
    depth: usize,
    jobs: &mut Vec<EstimateJob<'a>>,
) {
    let TreeNode::Branch(branch) = node else {
        return;
    };
    let label = branch.label.as_deref();
    if let Some(step) = label
        && depth > 0
    {
        jobs.push(EstimateJob { step, parent_topic });
    }
    let topic = label.or(parent_topic);
    for child in &branch.children {
        collect_jobs(child, topic, depth + 1, jobs);
    }
}

/// Visits nodes in the same order and with the same filter as `collect_jobs`.
fn apply_estimates(node: &mut TreeNode, depth: usize, estimates: &mut impl Iterator<Item = u32>) {
    let TreeNode::Branch(branch) = node else {
        return;
    };
    if branch.label.is_some() && depth > 0 {
        branch.time_estimate = estimates.next();
    }
    for child in &mut branch.children {
        apply_estimates(child, depth + 1, estimates);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockBackend;
    use serde_json::json;
    use text2visuals_core::SkillLevel;

    #[tokio::test]
    async fn estimates_labeled_nodes_below_root() {
        let mut tree = TreeNode::from_value(&json!({
            "root": "Launch app",
            "children": [
                {"label": "Design UI", "subchildren": ["wireframes", {"label": "Pick colors"}]},
                {"subchildren": ["unlabeled step"]}
            ]
        }));
        let mock = MockBackend::new(vec!["10", "20"]);

        annotate_tree(&mock, &mut tree, &SkillLevel::Intermediate.into()).await;

        let root = tree.as_branch().unwrap();
        assert_eq!(root.time_estimate, None);

        let design = root.children[0].as_branch().unwrap();
        assert_eq!(design.time_estimate, Some(10));
        assert_eq!(design.children[0], TreeNode::leaf("wireframes"));
        assert_eq!(design.children[1].as_branch().unwrap().time_estimate, Some(20));

        assert_eq!(root.children[1].as_branch().unwrap().time_estimate, None);
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn children_are_estimated_in_their_parent_context() {
        let mut tree = TreeNode::from_value(&json!({
            "root": "Launch app",
            "children": [
                {"label": "Design UI", "subchildren": [{"label": "Pick colors"}]},
                {"children": [{"label": "Orphan"}]}
            ]
        }));
        let mock = MockBackend::always("5");

        annotate_tree(&mock, &mut tree, &SkillLevel::Expert.into()).await;

        assert!(mock.prompt(0).contains("main topic 'Launch app'"));
        assert!(mock.prompt(1).contains("main topic 'Design UI'"));
        // An unlabeled parent passes its own context through.
        assert!(mock.prompt(2).contains("main topic 'Launch app'"));
        assert!(mock.prompt(2).contains("Task: Orphan"));
    }

    #[tokio::test]
    async fn bare_string_root_needs_no_estimates() {
        let mut tree = TreeNode::leaf("just a root");
        let mock = MockBackend::always("5");
        annotate_tree(&mock, &mut tree, &SkillLevel::Beginner.into()).await;
        assert_eq!(mock.call_count(), 0);
        assert_eq!(tree, TreeNode::leaf("just a root"));
    }
}
