use crate::Skill;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only failures a caller ever sees: there was nothing to visualise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Empty text")]
    EmptyText,

    #[error("Empty problem statement")]
    EmptyProblem,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MindmapRequest {
    #[serde(default)]
    pub text: String,
}

impl MindmapRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The trimmed source text, or an error if nothing is left.
    pub fn text(&self) -> Result<&str, InputError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyText);
        }
        Ok(text)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowchartRequest {
    #[serde(default)]
    pub problem: String,
    #[serde(default, rename = "skillLevel")]
    pub skill_level: Option<String>,
}

impl FlowchartRequest {
    pub fn new(problem: impl Into<String>, skill_level: Option<&str>) -> Self {
        Self {
            problem: problem.into(),
            skill_level: skill_level.map(String::from),
        }
    }

    pub fn problem(&self) -> Result<&str, InputError> {
        let problem = self.problem.trim();
        if problem.is_empty() {
            return Err(InputError::EmptyProblem);
        }
        Ok(problem)
    }

    /// The requested skill; missing means intermediate.
    pub fn skill(&self) -> Skill {
        self.skill_level
            .as_deref()
            .map(Skill::parse)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SkillLevel;

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(MindmapRequest::new("   \n").text(), Err(InputError::EmptyText));
        assert_eq!(MindmapRequest::default().text(), Err(InputError::EmptyText));
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(MindmapRequest::new("  hello ").text(), Ok("hello"));
    }

    #[test]
    fn flowchart_request_reads_json_body() {
        let req: FlowchartRequest =
            serde_json::from_str(r#"{"problem": " Ship it. ", "skillLevel": "EXPERT"}"#).unwrap();
        assert_eq!(req.problem(), Ok("Ship it."));
        assert_eq!(req.skill().level(), SkillLevel::Expert);
        assert_eq!(req.skill().as_str(), "expert");
    }

    #[test]
    fn missing_fields_default() {
        let req: FlowchartRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.problem(), Err(InputError::EmptyProblem));
        assert_eq!(req.skill().level(), SkillLevel::Intermediate);

        let req: MindmapRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.text(), Err(InputError::EmptyText));
    }

    #[test]
    fn error_messages_match_user_facing_text() {
        assert_eq!(InputError::EmptyText.to_string(), "Empty text");
        assert_eq!(InputError::EmptyProblem.to_string(), "Empty problem statement");
    }
}
