use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

pub const ROOT_KEY: &str = "root";
pub const LABEL_KEY: &str = "label";
pub const CHILDREN_KEY: &str = "children";
pub const SUBCHILDREN_KEY: &str = "subchildren";
pub const TIME_ESTIMATE_KEY: &str = "timeEstimate";

/// Label used when a structured node carries neither `label` nor `root`.
pub const DEFAULT_STEP_LABEL: &str = "Step";

/// Which key a branch's child list was read from (or will be written to).
///
/// Only meaningful at the JSON boundary; traversal treats both the same.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildKey {
    #[default]
    Children,
    Subchildren,
}

impl ChildKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildKey::Children => CHILDREN_KEY,
            ChildKey::Subchildren => SUBCHILDREN_KEY,
        }
    }
}

/// Which key a branch's label was read from (or will be written to).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleKey {
    #[default]
    Label,
    Root,
}

impl TitleKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKey::Label => LABEL_KEY,
            TitleKey::Root => ROOT_KEY,
        }
    }
}

/// Intermediate hierarchical shape produced by the oracle or the fallback
/// builders, consumed by the annotator and the flattener.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// A bare string: a leaf with only a label.
    Leaf(String),
    Branch(Branch),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
    pub label: Option<String>,
    pub title_key: TitleKey,
    pub time_estimate: Option<u32>,
    pub children: Vec<TreeNode>,
    pub child_key: ChildKey,
}

impl Branch {
    /// A top-level node whose label lives under `root`.
    pub fn root(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: Some(label.into()),
            title_key: TitleKey::Root,
            children,
            ..Default::default()
        }
    }

    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self.child_key = ChildKey::Children;
        self
    }

    pub fn with_subchildren(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self.child_key = ChildKey::Subchildren;
        self
    }
}

impl From<Branch> for TreeNode {
    fn from(branch: Branch) -> Self {
        TreeNode::Branch(branch)
    }
}

impl TreeNode {
    pub fn leaf(label: impl Into<String>) -> Self {
        TreeNode::Leaf(label.into())
    }

    /// The raw label, before cleaning. `None` for a branch with no label.
    pub fn label(&self) -> Option<&str> {
        match self {
            TreeNode::Leaf(label) => Some(label),
            TreeNode::Branch(branch) => branch.label.as_deref(),
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Leaf(_) => &[],
            TreeNode::Branch(branch) => &branch.children,
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            TreeNode::Branch(branch) => Some(branch),
            TreeNode::Leaf(_) => None,
        }
    }

    /// Number of nodes in the tree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::count).sum::<usize>()
    }

    /// Interpret an arbitrary JSON value as a tree.
    ///
    /// Objects become branches (label from `label`, else `root`); strings
    /// become leaves; any other value becomes a leaf holding its JSON text.
    /// When both `children` and `subchildren` are present, `children` wins.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => TreeNode::Branch(branch_from_map(map)),
            Value::String(s) => TreeNode::Leaf(s.clone()),
            other => TreeNode::Leaf(other.to_string()),
        }
    }

    pub fn to_value(&self) -> Value {
        // Serializing plain strings, maps and integers cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn branch_from_map(map: &Map<String, Value>) -> Branch {
    let (label, title_key) = match map.get(LABEL_KEY).and_then(scalar_text) {
        Some(label) => (Some(label), TitleKey::Label),
        None => match map.get(ROOT_KEY).and_then(scalar_text) {
            Some(root) => (Some(root), TitleKey::Root),
            None => (None, TitleKey::Label),
        },
    };

    let (children, child_key) = if let Some(list) = map.get(CHILDREN_KEY) {
        (child_list(list), ChildKey::Children)
    } else if let Some(list) = map.get(SUBCHILDREN_KEY) {
        (child_list(list), ChildKey::Subchildren)
    } else {
        (Vec::new(), ChildKey::Children)
    };

    Branch {
        label,
        title_key,
        time_estimate: map.get(TIME_ESTIMATE_KEY).and_then(minutes_value),
        children,
        child_key,
    }
}

fn child_list(value: &Value) -> Vec<TreeNode> {
    match value {
        Value::Array(items) => items.iter().map(TreeNode::from_value).collect(),
        Value::Null => Vec::new(),
        single => vec![TreeNode::from_value(single)],
    }
}

/// Text of a scalar JSON value; `None` for null, arrays and objects.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn minutes_value(value: &Value) -> Option<u32> {
    let minutes = value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))?;
    u32::try_from(minutes).ok()
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TreeNode::Leaf(label) => serializer.serialize_str(label),
            TreeNode::Branch(branch) => {
                let mut map = serializer.serialize_map(None)?;
                if let Some(label) = &branch.label {
                    map.serialize_entry(branch.title_key.as_str(), label)?;
                }
                if let Some(minutes) = branch.time_estimate {
                    map.serialize_entry(TIME_ESTIMATE_KEY, &minutes)?;
                }
                if !branch.children.is_empty() || branch.child_key == ChildKey::Subchildren {
                    map.serialize_entry(branch.child_key.as_str(), &branch.children)?;
                }
                map.end()
            }
        }
    }
}
