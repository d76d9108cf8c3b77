/// Prompt asking the oracle for a mindmap of `text`.
pub(crate) fn mindmap_prompt(text: &str) -> String {
    format!(
        r#"You are an AI assistant that converts text into a hierarchical mindmap structure.
Input text: {text}

Requirements:
1. Identify the main central topic.
2. Identify 3-5 subtopics.
3. For each subtopic, summarize 2-5 concise points.
4. Output ONLY valid JSON in this format:

{{
  "root": "Central Topic",
  "children": [
    {{"label": "Subtopic 1", "subchildren": ["Point 1", "Point 2"]}},
    {{"label": "Subtopic 2", "subchildren": ["Point 1", "Point 2"]}}
  ]
}}
"#
    )
}

/// Prompt asking the oracle for an implementation flowchart of `problem`.
pub(crate) fn flowchart_prompt(problem: &str) -> String {
    format!(
        r#"You are an AI assistant that converts a problem statement into a detailed implementation flowchart.
Problem statement: {problem}

Requirements:
1. Identify the central task.
2. Break down the implementation into steps, substeps if needed.
3. Do not include decision points.
4. Number everything consistently with steps and substeps (e.g., 1, 1.1, 1.2) to keep the hierarchy clear.
5. Always use the key "label" for every node. Do not use variations like "label3", "label.", or anything else.
6. Output ONLY hierarchical JSON in this format:

{{
  "root": "Central Task",
  "children": [
    {{"label": "Step 1", "subchildren": ["Substep 1", "Substep 2"]}},
    {{"label": "Step 2", "subchildren": ["Substep 1", "Substep 2"]}}
  ]
}}
Ensure all nodes are concise, clear, and professional.
"#
    )
}
