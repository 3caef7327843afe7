use std::path::Path;

use crate::cli::config::{Provider, RuntimeConfig};
use crate::dom::rect::Rect;
use crate::dom::snapshot::PageSnapshot;
use crate::error::WorkflowError;
use crate::llm::backend::{ChatCompletionsBackend, OllamaBackend};
use crate::llm::chat::{MockBackend, TextGeneration};
use crate::locator::config::Preset;
use crate::report::console::{format_results, format_session, format_session_index};
use crate::store::CollectionStore;
use crate::trace::TraceLogger;
use crate::workflow::Workflow;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Reply of the offline provider.
pub const MOCK_REPLY: &str = "// mock provider: no code generated";

// ============================================================================
// Backend / workflow construction
// ============================================================================

/// Build the generation backend. `None` when the hosted provider has no API
/// key, which generation actions report as a missing key.
pub fn build_backend(config: &RuntimeConfig) -> Option<Box<dyn TextGeneration>> {
    match config.provider {
        Provider::OpenAi => {
            let api_key = config.api_key.clone()?;
            let defaults = ChatCompletionsBackend::default();
            Some(Box::new(ChatCompletionsBackend::new(
                config.endpoint.as_deref().unwrap_or(&defaults.endpoint),
                config.model.as_deref().unwrap_or(&defaults.model),
                Some(api_key),
            )))
        }
        Provider::Ollama => {
            let defaults = OllamaBackend::default();
            Some(Box::new(OllamaBackend::new(
                config.endpoint.as_deref().unwrap_or(&defaults.endpoint),
                config.model.as_deref().unwrap_or(&defaults.model),
            )))
        }
        Provider::Mock => Some(Box::new(MockBackend::replying(MOCK_REPLY))),
    }
}

pub fn build_workflow(config: &RuntimeConfig) -> Result<Workflow, WorkflowError> {
    let store = CollectionStore::open(&config.store_path)?;
    let workflow = Workflow::new(store, config.prompt.clone())
        .with_tracer(TraceLogger::new(&config.trace_path));

    Ok(match build_backend(config) {
        Some(backend) => workflow.with_backend(backend),
        None => workflow,
    })
}

fn load_snapshot(path: &str) -> Result<PageSnapshot, Box<dyn std::error::Error>> {
    Ok(PageSnapshot::load(Path::new(path))?)
}

// ============================================================================
// Subcommands
// ============================================================================

pub fn cmd_locate(config: &RuntimeConfig, snapshot_path: &str, preset: Option<Preset>) -> CmdResult {
    let snapshot = load_snapshot(snapshot_path)?;
    let descriptor =
        crate::locate(&snapshot, preset.unwrap_or(config.preset)).ok_or(WorkflowError::TargetNotFound)?;
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

pub fn cmd_generate_locators(config: &RuntimeConfig, snapshot_path: &str) -> CmdResult {
    let snapshot = load_snapshot(snapshot_path)?;
    let mut workflow = build_workflow(config)?;

    let code = workflow.generate_locators(&snapshot)?;
    println!("=== Generated Locators ===\n{}", code.trim_end());
    Ok(())
}

pub fn cmd_add(config: &RuntimeConfig, snapshot_path: &str) -> CmdResult {
    let snapshot = load_snapshot(snapshot_path)?;
    let mut workflow = build_workflow(config)?;

    let notice = workflow.add_element(&snapshot, &config.session)?;
    println!("{}", notice);
    Ok(())
}

pub fn cmd_region(config: &RuntimeConfig, snapshot_path: &str, rect: Rect) -> CmdResult {
    let snapshot = load_snapshot(snapshot_path)?;
    let mut workflow = build_workflow(config)?;

    let notice = workflow.collect_region(&snapshot, &rect, &config.session)?;
    println!("{} ({} in session '{}')", notice, notice.total, config.session);
    Ok(())
}

pub fn cmd_list(config: &RuntimeConfig, all: bool) -> CmdResult {
    let store = CollectionStore::open(&config.store_path)?;
    if all {
        print!("{}", format_session_index(&store));
    } else {
        print!("{}", format_session(&store, &config.session));
    }
    Ok(())
}

pub fn cmd_page_object(config: &RuntimeConfig) -> CmdResult {
    let mut workflow = build_workflow(config)?;

    let code = workflow.generate_page_object(&config.session)?;
    println!("=== Generated Page Object ===\n{}", code.trim_end());
    Ok(())
}

pub fn cmd_refine(config: &RuntimeConfig, instructions: &str) -> CmdResult {
    let mut workflow = build_workflow(config)?;

    let (kind, code) = workflow.refine(instructions)?;
    println!("=== Refined {} ===\n{}", kind, code.trim_end());
    Ok(())
}

pub fn cmd_show(config: &RuntimeConfig) -> CmdResult {
    let store = CollectionStore::open(&config.store_path)?;
    print!("{}", format_results(&store));
    Ok(())
}

pub fn cmd_clear(config: &RuntimeConfig, session_only: bool) -> CmdResult {
    let mut store = CollectionStore::open(&config.store_path)?;
    if session_only {
        store.clear_session(&config.session)?;
        println!("Session '{}' cleared.", config.session);
    } else {
        store.clear_all()?;
        println!("Results cleared!");
    }
    Ok(())
}
