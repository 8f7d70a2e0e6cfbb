//! Prompt-template agents.
//!
//! An agent is a named instruction string bound to a remote model call,
//! optionally with the web-search tool attached. Every agent reply must be a
//! single JSON object (markdown fences tolerated); [`invoke`] parses it into
//! the stage's typed output at the boundary where text arrives from the
//! model, so nothing loosely-typed escapes this module.

pub mod intent;
pub mod location;
pub mod product;
pub mod prompts;
pub mod reply;
pub mod synthesis;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::llm::{CompletionRequest, LlmProvider, ProviderError};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
    /// The model reply failed JSON parsing even after fence stripping.
    /// Handled locally — never surfaced as a crash.
    #[error("agent '{agent}' returned malformed output: {detail}")]
    Malformed { agent: &'static str, detail: String },
}

// ── Agent spec ────────────────────────────────────────────────────────────────

/// A named prompt template bound to a remote model call.
#[derive(Debug, Clone, Copy)]
pub struct AgentSpec {
    pub name: &'static str,
    pub instructions: &'static str,
    /// Whether the call carries the provider's web-search tool.
    pub web_search: bool,
}

/// Run one agent: a single provider round-trip, then parse the reply into
/// the stage's output type.
pub async fn invoke<T: DeserializeOwned>(
    provider: &LlmProvider,
    agent: &AgentSpec,
    input: &str,
) -> Result<T, AgentError> {
    debug!(agent = agent.name, web_search = agent.web_search, "invoking agent");

    let request = CompletionRequest {
        system: Some(agent.instructions.to_string()),
        user: input.to_string(),
        web_search: agent.web_search,
    };

    let text = provider.complete(&request).await?;
    reply::parse_json(&text).map_err(|detail| {
        debug!(agent = agent.name, %detail, "agent reply failed to parse");
        AgentError::Malformed { agent: agent.name, detail }
    })
}
