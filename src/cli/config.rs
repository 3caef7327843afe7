use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::llm::prompts::{LocatorKinds, PromptSettings};
use crate::locator::config::Preset;
use crate::store::DEFAULT_SESSION;

pub const DEFAULT_CONFIG_PATH: &str = "locator-forge.yaml";
pub const DEFAULT_STORE_PATH: &str = "locator-forge.json";
pub const DEFAULT_TRACE_PATH: &str = "locator-forge-trace.jsonl";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "locator-forge",
    version,
    about = "Locator and Page Object generation from captured pages"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: locator-forge.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the collected-element store
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Collection session name
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Generation provider
    #[arg(long, value_enum, global = true)]
    pub provider: Option<Provider>,

    /// Model name for the generation provider
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Endpoint URL for the generation provider
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the descriptor of the snapshot's target element (no generation)
    Locate {
        /// Snapshot JSON or bare HTML file
        snapshot: String,

        /// Locator preset (default from config, else extended)
        #[arg(long, value_enum)]
        preset: Option<Preset>,
    },

    /// Generate framework-specific locators for the target element
    GenerateLocators {
        /// Snapshot JSON or bare HTML file
        snapshot: String,
    },

    /// Add the target element to the Page Object session
    Add {
        /// Snapshot JSON or bare HTML file
        snapshot: String,
    },

    /// Add every element intersecting a rectangle to the session
    Region {
        /// Snapshot JSON with layout boxes
        snapshot: String,

        #[arg(long, allow_hyphen_values = true)]
        left: f64,

        #[arg(long, allow_hyphen_values = true)]
        top: f64,

        #[arg(long, allow_hyphen_values = true)]
        right: f64,

        #[arg(long, allow_hyphen_values = true)]
        bottom: f64,
    },

    /// List collected elements
    List {
        /// List every session instead of the current one
        #[arg(long)]
        all: bool,
    },

    /// Generate a Page Object from the session's elements
    PageObject,

    /// Refine the last generated result
    Refine {
        /// Free-form refinement instructions
        instructions: String,
    },

    /// Show the last generated results
    Show,

    /// Clear stored elements and results
    Clear {
        /// Only drop the current session's elements
        #[arg(long)]
        session_only: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI-compatible chat completions
    #[default]
    #[value(name = "openai")]
    OpenAi,
    /// Local Ollama server
    Ollama,
    /// Offline canned replies
    Mock,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `locator-forge.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub locators: LocatorsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default = "default_framework")]
    pub framework: String,

    pub api_key: Option<String>,

    /// Natural language for generated answers
    pub answer_language: Option<String>,

    #[serde(default)]
    pub locator_kinds: LocatorKinds,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            framework: default_framework(),
            api_key: None,
            answer_language: None,
            locator_kinds: LocatorKinds::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: Provider,
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocatorsConfig {
    #[serde(default)]
    pub preset: Preset,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,

    #[serde(default = "default_trace_path")]
    pub trace: String,

    #[serde(default = "default_session")]
    pub session: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            trace: default_trace_path(),
            session: default_session(),
        }
    }
}

// Serde default helpers
fn default_language() -> String { "Java".to_string() }
fn default_framework() -> String { "Selenide".to_string() }
fn default_store_path() -> String { DEFAULT_STORE_PATH.to_string() }
fn default_trace_path() -> String { DEFAULT_TRACE_PATH.to_string() }
fn default_session() -> String { DEFAULT_SESSION.to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "malformed config, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Resolution (merge CLI args with config file)
// ============================================================================

/// Everything a command needs, with precedence CLI > config file > env >
/// defaults already applied.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub store_path: String,
    pub trace_path: String,
    pub session: String,
    pub preset: Preset,
    pub prompt: PromptSettings,
    pub provider: Provider,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

pub fn resolve(cli: &Cli, config: &AppConfig, env_api_key: Option<String>) -> RuntimeConfig {
    RuntimeConfig {
        store_path: cli.store.clone().unwrap_or_else(|| config.store.path.clone()),
        trace_path: config.store.trace.clone(),
        session: cli.session.clone().unwrap_or_else(|| config.store.session.clone()),
        preset: config.locators.preset,
        prompt: build_prompt_settings(&config.settings),
        provider: cli.provider.unwrap_or(config.llm.provider),
        endpoint: cli.endpoint.clone().or_else(|| config.llm.endpoint.clone()),
        model: cli.model.clone().or_else(|| config.llm.model.clone()),
        api_key: config
            .settings
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or(env_api_key.filter(|key| !key.trim().is_empty())),
    }
}

pub fn build_prompt_settings(settings: &SettingsConfig) -> PromptSettings {
    PromptSettings {
        language: settings.language.clone(),
        framework: settings.framework.clone(),
        answer_language: settings.answer_language.clone(),
        kinds: settings.locator_kinds,
    }
}
