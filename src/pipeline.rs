//! Sequential four-agent pipeline.
//!
//! Strictly ordered: intent → product → location → synthesis → render, each
//! step consuming the previous step's output. One logical request at a time;
//! no fan-out, no retries. Any malformed reply or transport failure
//! short-circuits and is mapped to a friendly message by the caller.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use crate::agents::intent::{self, ParsedIntent};
use crate::agents::location::{self, LocationInfo};
use crate::agents::product;
use crate::agents::synthesis;
use crate::agents::AgentError;
use crate::error::AppError;
use crate::llm::LlmProvider;
use crate::memory::{MemoryEntry, MemoryStore};
use crate::render;
use crate::ric;
use crate::session::SessionContext;

/// How many recent entries are scanned when resolving a location, unless
/// config says otherwise.
pub const DEFAULT_SCAN_LIMIT: usize = 50;

const META_ZIP: &str = "zip_code";
const META_KIND: &str = "kind";
const META_SESSION: &str = "session_id";

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("no location on file and none in the query")]
    MissingLocation,
    #[error(transparent)]
    Memory(#[from] AppError),
}

impl PipelineError {
    /// Message suitable for showing directly in the chat window.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::MissingLocation => {
                "I don't have a location for you yet. Please tell me your 5-digit ZIP code \
                 so I can check the local rules."
                    .to_string()
            }
            PipelineError::Agent(AgentError::Malformed { agent, .. }) => format!(
                "Sorry — I couldn't make sense of the {agent} lookup. \
                 Please try rephrasing your question."
            ),
            PipelineError::Agent(AgentError::Provider(_)) => {
                "Sorry — I couldn't reach the recycling knowledge service. \
                 Please try again in a moment."
                    .to_string()
            }
            PipelineError::Memory(_) => {
                "Sorry — something went wrong reading your saved location data.".to_string()
            }
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

pub struct Pipeline {
    provider: LlmProvider,
    store: MemoryStore,
    scan_limit: usize,
}

impl Pipeline {
    pub fn new(provider: LlmProvider, store: MemoryStore) -> Self {
        Self { provider, store, scan_limit: DEFAULT_SCAN_LIMIT }
    }

    pub fn with_scan_limit(mut self, scan_limit: usize) -> Self {
        self.scan_limit = scan_limit;
        self
    }

    /// Drive one query through the four agents and return the markdown
    /// answer.
    pub async fn process(
        &self,
        session: &SessionContext,
        query: &str,
    ) -> Result<String, PipelineError> {
        let parsed = intent::classify(&self.provider, query).await?;
        debug!(
            intent = %parsed.intent,
            product = ?parsed.product_name,
            zip = ?parsed.zip_code,
            "query classified"
        );

        if !parsed.is_recycling_query() {
            return Ok(
                "I can help with recycling questions. Ask me whether a specific item \
                 is recyclable in your area."
                    .to_string(),
            );
        }

        let ParsedIntent { product_name, zip_code, .. } = parsed;
        let Some(product_name) = product_name.filter(|p| !p.trim().is_empty()) else {
            return Ok(
                "I can check whether a specific item is recyclable in your area. \
                 What product would you like me to look up?"
                    .to_string(),
            );
        };

        let mut product = product::lookup(&self.provider, &product_name).await?;
        if !product.ric_code.is_empty() {
            product.ric_code = ric::normalize(&product.ric_code);
        }
        debug!(material = %product.material, ric = %product.ric_code, "product identified");

        let zip = zip_code
            .as_deref()
            .filter(|z| crate::session::is_valid_zip(z))
            .or(session.zip_code())
            .ok_or(PipelineError::MissingLocation)?
            .to_string();

        let location = self.resolve_location(session, &zip).await?;
        let rec = synthesis::recommend(&self.provider, &product, &location).await?;
        info!(zip = %zip, recyclable = rec.is_recyclable, "recommendation produced");

        Ok(render::recommendation(&product, &location, &rec))
    }

    /// The most recent stored entry for this ZIP wins; a miss triggers one
    /// remote lookup whose result is appended for the next call.
    async fn resolve_location(
        &self,
        session: &SessionContext,
        zip: &str,
    ) -> Result<LocationInfo, PipelineError> {
        let recent = self.store.get_recent(self.scan_limit, session.user_id())?;
        let hit = recent
            .into_iter()
            .find(|e| e.metadata.get(META_ZIP).is_some_and(|z| z == zip));

        if let Some(entry) = hit {
            match serde_json::from_value::<LocationInfo>(entry.payload) {
                Ok(location) => {
                    debug!(%zip, "location resolved from memory");
                    return Ok(location);
                }
                Err(e) => {
                    // Stored payload no longer matches the schema — fall
                    // through to a fresh lookup.
                    debug!(%zip, error = %e, "stored location unusable");
                }
            }
        }

        info!(%zip, "location not in memory, querying remote");
        let location = location::lookup(&self.provider, zip).await?;

        let payload = serde_json::to_value(&location)
            .map_err(|e| AppError::Memory(format!("serialise location: {e}")))?;
        let mut metadata = BTreeMap::new();
        metadata.insert(META_ZIP.to_string(), zip.to_string());
        metadata.insert(META_KIND.to_string(), "location_lookup".to_string());
        metadata.insert(META_SESSION.to_string(), session.session_id().to_string());
        self.store
            .append(MemoryEntry::new(session.user_id(), payload, metadata))?;

        Ok(location)
    }
}
