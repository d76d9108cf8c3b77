use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use text2visuals_llm::{FlowchartOptions, LlmConfig};

// ── Config file types ───────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LlmSection,
    pub flowchart: FlowchartSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FlowchartSection {
    pub estimate_root: bool,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub estimate_root: bool,
}

// ── Loading ─────────────────────────────────────────────────────

pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse_settings(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml_edit::de::from_str(content)?)
}

impl Settings {
    /// Layer defaults, then this file, then command-line overrides.
    pub fn resolve(self, overrides: Overrides) -> (LlmConfig, FlowchartOptions) {
        let defaults = LlmConfig::default();
        let llm = LlmConfig {
            base_url: overrides
                .base_url
                .or(self.llm.endpoint)
                .unwrap_or(defaults.base_url),
            api_key: overrides.api_key.or(self.llm.api_key),
            model: overrides.model.or(self.llm.model).unwrap_or(defaults.model),
            temperature: self.llm.temperature.or(defaults.temperature),
            max_tokens: self.llm.max_tokens.or(defaults.max_tokens),
        };
        let options = FlowchartOptions {
            estimate_root: overrides.estimate_root || self.flowchart.estimate_root,
        };
        (llm, options)
    }
}
