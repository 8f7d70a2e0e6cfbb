//! curbsort — recycling guidance over a hosted LLM.
//!
//! A user query is driven through four prompt-template agents in fixed order
//! (intent → product → location → synthesis) and the JSON replies are folded
//! into one markdown answer. Location lookups are remembered in a flat JSON
//! file so repeat questions for the same ZIP skip the remote call.

pub mod agents;
pub mod blocking;
pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod memory;
pub mod pipeline;
pub mod render;
pub mod ric;
pub mod session;
