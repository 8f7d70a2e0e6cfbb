//! Product lookup stage — material identification with web search.

use serde::{Deserialize, Serialize};

use super::{AgentError, AgentSpec, invoke, prompts};
use crate::llm::LlmProvider;

const AGENT: AgentSpec = AgentSpec {
    name: "product",
    instructions: prompts::PRODUCT,
    web_search: true,
};

/// Typed output of the product stage. Serialized back out as the `product`
/// half of the synthesis input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInfo {
    pub product_name: String,
    pub material: String,
    #[serde(default)]
    pub ric_code: String,
    #[serde(default)]
    pub confidence: f64,
}

pub async fn lookup(provider: &LlmProvider, product_name: &str) -> Result<ProductInfo, AgentError> {
    invoke(provider, &AGENT, product_name).await
}
