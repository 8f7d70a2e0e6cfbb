//! Synthesis stage — reconcile product material against local acceptance
//! rules and produce the final recommendation. No tools.

use serde::Deserialize;
use serde_json::json;

use super::location::LocationInfo;
use super::product::ProductInfo;
use super::{AgentError, AgentSpec, invoke, prompts};
use crate::llm::LlmProvider;

const AGENT: AgentSpec = AgentSpec {
    name: "synthesis",
    instructions: prompts::SYNTHESIS,
    web_search: false,
};

/// Typed output of the synthesis stage.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Recommendation {
    pub is_recyclable: bool,
    #[serde(default)]
    pub confidence: f64,
    pub reason: String,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// One synthesis round-trip. The caller normalizes `product.ric_code`
/// beforehand so the model compares like against like.
pub async fn recommend(
    provider: &LlmProvider,
    product: &ProductInfo,
    location: &LocationInfo,
) -> Result<Recommendation, AgentError> {
    let input = json!({ "product": product, "location": location }).to_string();
    invoke(provider, &AGENT, &input).await
}
