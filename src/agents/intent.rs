//! Intent parsing stage — classify the query, extract entities. No tools.

use serde::Deserialize;

use super::{AgentError, AgentSpec, invoke, prompts};
use crate::llm::LlmProvider;

const AGENT: AgentSpec = AgentSpec {
    name: "intent",
    instructions: prompts::INTENT,
    web_search: false,
};

/// Typed output of the intent stage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ParsedIntent {
    pub intent: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

impl ParsedIntent {
    pub fn is_recycling_query(&self) -> bool {
        self.intent == "recycling_query"
    }
}

pub async fn classify(provider: &LlmProvider, query: &str) -> Result<ParsedIntent, AgentError> {
    invoke(provider, &AGENT, query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::providers::dummy::DummyProvider;

    #[tokio::test]
    async fn parses_typed_reply() {
        let dummy = DummyProvider::scripted([
            r#"{"intent": "recycling_query", "product_name": "soda bottle", "zip_code": "94102"}"#,
        ]);
        let provider = LlmProvider::Dummy(dummy);
        let parsed = classify(&provider, "Can I recycle a soda bottle in 94102?")
            .await
            .unwrap();
        assert!(parsed.is_recycling_query());
        assert_eq!(parsed.product_name.as_deref(), Some("soda bottle"));
        assert_eq!(parsed.zip_code.as_deref(), Some("94102"));
    }

    #[tokio::test]
    async fn null_entities_deserialize() {
        let dummy = DummyProvider::scripted([
            r#"{"intent": "other", "product_name": null, "zip_code": null}"#,
        ]);
        let provider = LlmProvider::Dummy(dummy);
        let parsed = classify(&provider, "what's the weather").await.unwrap();
        assert!(!parsed.is_recycling_query());
        assert!(parsed.product_name.is_none());
    }

    #[tokio::test]
    async fn malformed_reply_is_structured_failure() {
        let provider = LlmProvider::Dummy(DummyProvider::scripted(["I cannot do that"]));
        let err = classify(&provider, "hm").await.unwrap_err();
        match err {
            AgentError::Malformed { agent, .. } => assert_eq!(agent, "intent"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
