use crate::{ChatBackend, ChatResponse, Choice, Message};
use std::sync::Mutex;

/// Scripted oracle: replies with queued responses in order, then with
/// `default_reply`. A failing mock errors on every call.
pub(crate) struct MockBackend {
    responses: Mutex<Vec<String>>,
    default_reply: Option<String>,
    calls: Mutex<Vec<(Vec<Message>, Option<u32>)>>,
}

impl MockBackend {
    pub(crate) fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            default_reply: Some(String::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers every call with `reply`.
    pub(crate) fn always(reply: &str) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            default_reply: Some(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call, as an unreachable service would.
    pub(crate) fn unavailable() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            default_reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The user prompt of the `n`th call.
    pub(crate) fn prompt(&self, n: usize) -> String {
        let calls = self.calls.lock().unwrap();
        calls[n].0[0].content.clone().unwrap_or_default()
    }

    pub(crate) fn max_tokens(&self, n: usize) -> Option<u32> {
        self.calls.lock().unwrap()[n].1
    }
}

impl ChatBackend for MockBackend {
    fn model_name(&self) -> &str {
        "mock"
    }

    async fn chat(
        &self,
        messages: Vec<Message>,
        max_tokens: Option<u32>,
    ) -> anyhow::Result<ChatResponse> {
        self.calls.lock().unwrap().push((messages, max_tokens));
        let mut responses = self.responses.lock().unwrap();
        let text = if responses.is_empty() {
            match &self.default_reply {
                Some(reply) => reply.clone(),
                None => anyhow::bail!("connection refused"),
            }
        } else {
            responses.remove(0)
        };
        Ok(ChatResponse {
            id: "mock".to_string(),
            choices: vec![Choice {
                index: 0,
                message: Message::assistant(&text),
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        })
    }
}
