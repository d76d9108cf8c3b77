use crate::tree::{CHILDREN_KEY, LABEL_KEY, SUBCHILDREN_KEY};
use serde_json::Value;

/// Whether `key` carries a node label: anything starting with `label` in
/// any case (`label`, `Label3.`, `label_1`, `Label 1`, `labels`).
pub fn is_label_key(key: &str) -> bool {
    key.get(..LABEL_KEY.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(LABEL_KEY))
}

/// A label key other than the canonical `label`.
pub fn is_label_variant(key: &str) -> bool {
    key != LABEL_KEY && is_label_key(key)
}

/// Move misspelled label keys onto the canonical `label` key, recursively.
///
/// Label keys are applied in document order, so the last one wins, the
/// canonical `label` included. Variant keys are removed. Nodes without any
/// label key stay unlabeled.
pub fn normalize_label_keys(node: &mut Value) {
    let Value::Object(map) = node else {
        return;
    };

    let label = map
        .iter()
        .rev()
        .find(|(key, _)| is_label_key(key))
        .map(|(_, value)| value.clone());
    if let Some(label) = label {
        map.insert(LABEL_KEY.to_string(), label);
        map.retain(|key, _| !is_label_variant(key));
    }

    if let Some(Value::Array(children)) = map.get_mut(CHILDREN_KEY) {
        children.iter_mut().for_each(normalize_label_keys);
    }
    if let Some(Value::Array(subchildren)) = map.get_mut(SUBCHILDREN_KEY) {
        subchildren
            .iter_mut()
            .filter(|c| c.is_object())
            .for_each(normalize_label_keys);
    }
}
