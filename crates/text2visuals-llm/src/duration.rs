use crate::{ChatBackend, complete};
use text2visuals_core::{Skill, first_minutes, heuristic_base_minutes, scale_minutes};
use tracing::{debug, warn};

/// Token budget for the numeric duration answer.
pub const DURATION_MAX_TOKENS: u32 = 10;

pub(crate) fn duration_prompt(
    step_text: &str,
    skill: &Skill,
    parent_topic: Option<&str>,
) -> String {
    let task = match parent_topic {
        Some(topic) => format!(
            "Estimate the time in minutes required to complete the following task/subtask for the main topic '{}'. \nTask: {}",
            topic, step_text
        ),
        None => format!(
            "Estimate the time in minutes required to complete the following task.\nTask: {}",
            step_text
        ),
    };
    format!(
        "{}\n\nConsider that this is for a {} level user.\n\n\
         Respond with ONLY a number representing the estimated time in minutes.",
        task, skill
    )
}

/// Estimate how many minutes a step takes for the given skill.
///
/// The oracle's first number is the base; if it gives none or fails, the
/// keyword heuristic is used instead. Either way the base is scaled by the
/// skill multiplier. The prompt quotes the skill as the caller wrote it.
/// Never fails.
pub async fn estimate_step_duration(
    backend: &impl ChatBackend,
    step_text: &str,
    skill: &Skill,
    parent_topic: Option<&str>,
) -> u32 {
    let parent_topic = parent_topic.filter(|t| !t.trim().is_empty());
    let prompt = duration_prompt(step_text, skill, parent_topic);

    let base = match complete(backend, &prompt, Some(DURATION_MAX_TOKENS)).await {
        Ok(answer) => match first_minutes(&answer) {
            Some(minutes) => minutes,
            None => {
                debug!(answer = %answer.trim(), "Duration answer had no number, using keywords");
                heuristic_base_minutes(step_text)
            }
        },
        Err(e) => {
            warn!("Duration estimate failed, using keywords: {:#}", e);
            heuristic_base_minutes(step_text)
        }
    };

    let minutes = scale_minutes(base, skill.level());
    debug!(step = step_text, base, minutes, %skill, "Estimated step duration");
    minutes
}
