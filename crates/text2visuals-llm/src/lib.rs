mod client;
mod duration;
mod types;

pub mod pipeline;

#[cfg(test)]
mod mock;

use anyhow::Result;
use std::future::Future;

pub use client::*;
pub use duration::*;
pub use pipeline::{FallbackReason, FlowchartOptions, Generation, Visualizer};
pub use types::*;

/// The generative oracle seam. `LlmClient` talks HTTP; tests script it.
pub trait ChatBackend: Send + Sync {
    fn model_name(&self) -> &str;

    /// Run one chat completion. `max_tokens` overrides the configured limit.
    fn chat(
        &self,
        messages: Vec<Message>,
        max_tokens: Option<u32>,
    ) -> impl Future<Output = Result<ChatResponse>> + Send;
}
