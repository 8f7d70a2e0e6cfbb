//! Dummy LLM provider — replays a scripted queue of canned replies.
//!
//! Used for testing the full pipeline round-trip without a real API key.
//! With an empty script it echoes input back prefixed with `[echo]`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::llm::{CompletionRequest, ProviderError};

#[derive(Debug, Clone, Default)]
pub struct DummyProvider {
    script: Arc<Mutex<VecDeque<String>>>,
    calls: Arc<AtomicUsize>,
}

impl DummyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider that answers with `replies` in order, then falls back to echo.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let p = Self::default();
        p.push_replies(replies);
        p
    }

    /// Queue more canned replies. Clones share the queue, so a test can keep
    /// a handle and extend the script between pipeline calls.
    pub fn push_replies<I, S>(&self, replies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Ok(mut q) = self.script.lock() {
            q.extend(replies.into_iter().map(Into::into));
        }
    }

    /// Number of `complete` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .script
            .lock()
            .map_err(|_| ProviderError::Request("dummy script mutex poisoned".into()))?
            .pop_front();
        Ok(next.unwrap_or_else(|| format!("[echo] {}", request.user)))
    }
}
