//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `CURBSORT_WORK_DIR` and `CURBSORT_LOG_LEVEL` env overrides.
//! The LLM API key comes from the `LLM_API_KEY` env var only — never TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// Gemini provider configuration (`[llm.gemini]` in the TOML).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API base URL, without the `/models/...` suffix.
    pub api_base_url: String,
    /// Model name spliced into the request path.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (e.g. `"dummy"`, `"gemini"`).
    /// Maps to `default` in `[llm]` TOML.
    pub provider: String,
    pub gemini: GeminiConfig,
}

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub assistant_name: String,
    /// Working directory for all persistent data (already expanded, no `~`).
    pub work_dir: PathBuf,
    pub log_level: String,
    pub llm: LlmConfig,
    /// API key from `LLM_API_KEY` env var — `None` for the dummy provider.
    pub llm_api_key: Option<String>,
    /// Memory store filename, relative to `work_dir`.
    pub memory_file: String,
    /// How many recent entries the pipeline scans when resolving a location.
    pub recent_scan_limit: usize,
}

impl Config {
    /// Absolute path of the memory store file.
    pub fn memory_path(&self) -> PathBuf {
        self.work_dir.join(&self.memory_file)
    }
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    assistant: RawAssistant,
    #[serde(default)]
    llm: RawLlm,
    #[serde(default)]
    memory: RawMemory,
}

#[derive(Deserialize)]
struct RawAssistant {
    name: String,
    work_dir: String,
    log_level: String,
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default)]
    gemini: RawGeminiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), gemini: RawGeminiConfig::default() }
    }
}

#[derive(Deserialize)]
struct RawGeminiConfig {
    #[serde(default = "default_gemini_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_gemini_model")]
    model: String,
    #[serde(default = "default_gemini_temperature")]
    temperature: f32,
    #[serde(default = "default_gemini_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawGeminiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_gemini_api_base_url(),
            model: default_gemini_model(),
            temperature: default_gemini_temperature(),
            timeout_seconds: default_gemini_timeout_seconds(),
        }
    }
}

#[derive(Deserialize)]
struct RawMemory {
    #[serde(default = "default_memory_file")]
    file: String,
    #[serde(default = "default_recent_scan_limit")]
    recent_scan_limit: usize,
}

impl Default for RawMemory {
    fn default() -> Self {
        Self { file: default_memory_file(), recent_scan_limit: default_recent_scan_limit() }
    }
}

fn default_llm_provider() -> String { "dummy".to_string() }
fn default_gemini_api_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_gemini_model() -> String { "gemini-2.0-flash".to_string() }
fn default_gemini_temperature() -> f32 { 0.2 }
fn default_gemini_timeout_seconds() -> u64 { 60 }
fn default_memory_file() -> String { "memory.json".to_string() }
fn default_recent_scan_limit() -> usize { 50 }

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<Config, AppError> {
    let work_dir_override = env::var("CURBSORT_WORK_DIR").ok();
    let log_level_override = env::var("CURBSORT_LOG_LEVEL").ok();
    load_from(
        Path::new("config/default.toml"),
        work_dir_override.as_deref(),
        log_level_override.as_deref(),
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    work_dir_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    let a = parsed.assistant;
    let work_dir_str = work_dir_override.unwrap_or(&a.work_dir).to_string();
    let work_dir = expand_home(&work_dir_str);
    let log_level = log_level_override.unwrap_or(&a.log_level).to_string();

    if parsed.memory.recent_scan_limit == 0 {
        return Err(AppError::Config("memory.recent_scan_limit must be > 0".into()));
    }

    Ok(Config {
        assistant_name: a.name,
        work_dir,
        log_level,
        llm: LlmConfig {
            provider: parsed.llm.provider,
            gemini: GeminiConfig {
                api_base_url: parsed.llm.gemini.api_base_url,
                model: parsed.llm.gemini.model,
                temperature: parsed.llm.gemini.temperature,
                timeout_seconds: parsed.llm.gemini.timeout_seconds,
            },
        },
        llm_api_key: env::var("LLM_API_KEY").ok(),
        memory_file: parsed.memory.file,
        recent_scan_limit: parsed.memory.recent_scan_limit,
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API keys, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default(work_dir: &Path) -> Self {
        Self {
            assistant_name: "test".into(),
            work_dir: work_dir.to_path_buf(),
            log_level: "info".into(),
            llm: LlmConfig {
                provider: "dummy".into(),
                gemini: GeminiConfig {
                    api_base_url: "http://localhost:0/v1beta".into(),
                    model: "test-model".into(),
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            llm_api_key: None,
            memory_file: "memory.json".into(),
            recent_scan_limit: 50,
        }
    }
}
