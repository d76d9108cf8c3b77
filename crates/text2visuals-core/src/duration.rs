use serde::{Deserialize, Serialize};
use std::fmt;

/// Base estimate when neither the oracle nor any keyword gives a better one.
pub const DEFAULT_BASE_MINUTES: u32 = 30;

/// Keyword categories in precedence order; the first category with any
/// keyword contained in the step text decides the base.
const KEYWORD_CATEGORIES: &[(&[&str], u32)] = &[
    (&["research", "learn", "study", "understand"], 45),
    (&["implement", "code", "develop", "build"], 60),
    (&["test", "debug", "validate"], 40),
    (&["deploy", "release", "publish"], 35),
    (&["design", "plan", "architect"], 50),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    /// Case-insensitive; anything unrecognised is treated as intermediate.
    pub fn parse_lenient(level: &str) -> Self {
        match level.trim().to_lowercase().as_str() {
            "beginner" => SkillLevel::Beginner,
            "advanced" => SkillLevel::Advanced,
            "expert" => SkillLevel::Expert,
            _ => SkillLevel::Intermediate,
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            SkillLevel::Beginner => 1.5,
            SkillLevel::Intermediate => 1.0,
            SkillLevel::Advanced => 0.7,
            SkillLevel::Expert => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested skill level as the caller wrote it (lowercased), together
/// with the level it maps to. Prompts quote the wording; scaling uses the
/// level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    text: String,
    level: SkillLevel,
}

impl Skill {
    /// Blank input means the default level.
    pub fn parse(text: &str) -> Self {
        let text = text.trim().to_lowercase();
        if text.is_empty() {
            return SkillLevel::default().into();
        }
        let level = SkillLevel::parse_lenient(&text);
        Self { text, level }
    }

    pub fn level(&self) -> SkillLevel {
        self.level
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Skill {
    fn default() -> Self {
        SkillLevel::default().into()
    }
}

impl From<SkillLevel> for Skill {
    fn from(level: SkillLevel) -> Self {
        Self {
            text: level.as_str().to_string(),
            level,
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Keyword-driven base estimate for a step, used when the oracle gives none.
pub fn heuristic_base_minutes(step_text: &str) -> u32 {
    let lowered = step_text.to_lowercase();
    KEYWORD_CATEGORIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, minutes)| *minutes)
        .unwrap_or(DEFAULT_BASE_MINUTES)
}

/// First run of ASCII digits anywhere in `text`, as minutes.
///
/// Returns `None` when there are no digits. A run too large for `u32`
/// saturates to `u32::MAX`.
pub fn first_minutes(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    // A non-empty digit run only fails to parse on overflow.
    Some(digits[..end].parse().unwrap_or(u32::MAX))
}

/// Apply the skill multiplier, truncating toward zero.
pub fn scale_minutes(base: u32, skill: SkillLevel) -> u32 {
    (f64::from(base) * skill.multiplier()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_skill_levels_case_insensitively() {
        assert_eq!(SkillLevel::parse_lenient("BEGINNER"), SkillLevel::Beginner);
        assert_eq!(SkillLevel::parse_lenient(" Advanced "), SkillLevel::Advanced);
        assert_eq!(SkillLevel::parse_lenient("expert"), SkillLevel::Expert);
        assert_eq!(SkillLevel::parse_lenient("wizard"), SkillLevel::Intermediate);
        assert_eq!(SkillLevel::parse_lenient(""), SkillLevel::Intermediate);
    }

    #[test]
    fn unknown_level_uses_unit_multiplier() {
        assert_eq!(SkillLevel::parse_lenient("guru").multiplier(), 1.0);
    }

    #[test]
    fn keyword_categories_follow_precedence() {
        assert_eq!(heuristic_base_minutes("Research the API"), 45);
        assert_eq!(heuristic_base_minutes("Implement validation"), 60);
        assert_eq!(heuristic_base_minutes("Debug the flow"), 40);
        assert_eq!(heuristic_base_minutes("Deploy to prod"), 35);
        assert_eq!(heuristic_base_minutes("Design the form"), 50);
        assert_eq!(heuristic_base_minutes("Go for a walk"), DEFAULT_BASE_MINUTES);
        // Research outranks implementation even when both appear.
        assert_eq!(heuristic_base_minutes("Build after you study it"), 45);
    }

    #[test]
    fn first_minutes_takes_the_first_digit_run() {
        assert_eq!(first_minutes("About 25 minutes, maybe 40"), Some(25));
        assert_eq!(first_minutes("90"), Some(90));
        assert_eq!(first_minutes("no idea"), None);
    }

    #[test]
    fn oversized_digit_run_saturates() {
        assert_eq!(first_minutes("99999999999999 minutes"), Some(u32::MAX));
        assert_eq!(scale_minutes(u32::MAX, SkillLevel::Beginner), u32::MAX);
    }

    #[test]
    fn skill_keeps_the_callers_wording() {
        let skill = Skill::parse(" Grandmaster ");
        assert_eq!(skill.as_str(), "grandmaster");
        assert_eq!(skill.level(), SkillLevel::Intermediate);

        let expert = Skill::parse("EXPERT");
        assert_eq!(expert.to_string(), "expert");
        assert_eq!(expert.level(), SkillLevel::Expert);

        assert_eq!(Skill::parse("  "), Skill::default());
        assert_eq!(Skill::default().as_str(), "intermediate");
    }

    #[test]
    fn scaling_truncates() {
        assert_eq!(scale_minutes(45, SkillLevel::Beginner), 67);
        assert_eq!(scale_minutes(35, SkillLevel::Expert), 17);
        assert_eq!(scale_minutes(60, SkillLevel::Advanced), 42);
        assert_eq!(scale_minutes(30, SkillLevel::Intermediate), 30);
    }
}
