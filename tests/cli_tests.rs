mod common;

use clap::Parser;
use common::login_descriptor;
use locator_forge::cli::commands::{MOCK_REPLY, build_backend};
use locator_forge::cli::config::{
    AppConfig, Cli, Commands, DEFAULT_STORE_PATH, Provider, load_config, resolve,
};
use locator_forge::error::LlmError;
use locator_forge::llm::backend::{ChatCompletionsBackend, OllamaBackend};
use locator_forge::llm::chat::{ChatMessage, TextGeneration};
use locator_forge::locator::config::Preset;
use locator_forge::report::console::{format_results, format_session, format_session_index};
use locator_forge::store::{CollectionStore, ResultKind};

// =========================================================================
// Argument parsing
// =========================================================================

#[test]
fn parses_locate_with_preset() {
    let cli = Cli::parse_from(["locator-forge", "locate", "page.json", "--preset", "page-object"]);
    match cli.command {
        Commands::Locate { snapshot, preset } => {
            assert_eq!(snapshot, "page.json");
            assert_eq!(preset, Some(Preset::PageObject));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn parses_region_with_negative_coordinates() {
    let cli = Cli::parse_from([
        "locator-forge", "region", "page.json", "--left", "-10", "--top", "5.5", "--right", "100",
        "--bottom", "200",
    ]);
    match cli.command {
        Commands::Region { left, top, right, bottom, .. } => {
            assert_eq!((left, top, right, bottom), (-10.0, 5.5, 100.0, 200.0));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn global_flags_work_after_subcommand() {
    let cli = Cli::parse_from([
        "locator-forge", "page-object", "--session", "checkout", "--provider", "mock", "-vv",
    ]);
    assert!(matches!(cli.command, Commands::PageObject));
    assert_eq!(cli.session.as_deref(), Some("checkout"));
    assert_eq!(cli.provider, Some(Provider::Mock));
    assert_eq!(cli.verbose, 2);
}

#[test]
fn provider_value_names() {
    let cli = Cli::parse_from(["locator-forge", "show", "--provider", "openai"]);
    assert_eq!(cli.provider, Some(Provider::OpenAi));
}

// =========================================================================
// Config file and resolution
// =========================================================================

#[test]
fn missing_config_file_gives_defaults() {
    let config = load_config(Some("/nonexistent/locator-forge.yaml"));
    assert_eq!(config.settings.language, "Java");
    assert_eq!(config.settings.framework, "Selenide");
    assert_eq!(config.store.path, DEFAULT_STORE_PATH);
    assert_eq!(config.llm.provider, Provider::OpenAi);
}

#[test]
fn config_file_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.yaml");
    std::fs::write(
        &path,
        "settings:\n  language: Python\n  framework: Playwright\n  answer_language: French\n  \
         locator_kinds:\n    use_css: false\nllm:\n  provider: ollama\nlocators:\n  preset: basic\n",
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.settings.framework, "Playwright");
    assert_eq!(config.settings.answer_language.as_deref(), Some("French"));
    assert!(!config.settings.locator_kinds.use_css);
    assert!(config.settings.locator_kinds.use_xpath);
    assert_eq!(config.llm.provider, Provider::Ollama);
    assert_eq!(config.locators.preset, Preset::Basic);
    assert_eq!(config.store.session, "default", "unset sections default");
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.yaml");
    std::fs::write(&path, "settings: [unclosed").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.settings.language, "Java");
}

#[test]
fn cli_flags_beat_config() {
    let cli = Cli::parse_from([
        "locator-forge", "list", "--store", "cli.json", "--session", "s1", "--model", "m-cli",
    ]);
    let mut config = AppConfig::default();
    config.store.path = "cfg.json".into();
    config.llm.model = Some("m-cfg".into());
    config.llm.endpoint = Some("http://cfg".into());

    let runtime = resolve(&cli, &config, None);
    assert_eq!(runtime.store_path, "cli.json");
    assert_eq!(runtime.session, "s1");
    assert_eq!(runtime.model.as_deref(), Some("m-cli"));
    assert_eq!(runtime.endpoint.as_deref(), Some("http://cfg"));
}

#[test]
fn config_api_key_beats_environment() {
    let cli = Cli::parse_from(["locator-forge", "show"]);
    let mut config = AppConfig::default();

    let runtime = resolve(&cli, &config, Some("env-key".into()));
    assert_eq!(runtime.api_key.as_deref(), Some("env-key"));

    config.settings.api_key = Some("cfg-key".into());
    let runtime = resolve(&cli, &config, Some("env-key".into()));
    assert_eq!(runtime.api_key.as_deref(), Some("cfg-key"));

    config.settings.api_key = Some("   ".into());
    let runtime = resolve(&cli, &config, Some(String::new()));
    assert_eq!(runtime.api_key, None, "blank keys are ignored");
}

// =========================================================================
// Backends
// =========================================================================

#[test]
fn hosted_provider_without_key_has_no_backend() {
    let cli = Cli::parse_from(["locator-forge", "show"]);
    let runtime = resolve(&cli, &AppConfig::default(), None);
    assert!(build_backend(&runtime).is_none());

    let runtime = resolve(&cli, &AppConfig::default(), Some("sk-test".into()));
    assert!(build_backend(&runtime).is_some());
}

#[test]
fn mock_provider_replies_offline() {
    let cli = Cli::parse_from(["locator-forge", "show", "--provider", "mock"]);
    let runtime = resolve(&cli, &AppConfig::default(), None);
    let backend = build_backend(&runtime).expect("mock backend");
    assert_eq!(backend.complete(&[ChatMessage::user("x")], None).unwrap(), MOCK_REPLY);
}

#[test]
fn unreachable_endpoint_is_a_request_error() {
    let backend = ChatCompletionsBackend::new("http://127.0.0.1:1/v1/chat/completions", "m", None);
    let err = backend.complete(&[ChatMessage::user("x")], None).unwrap_err();
    assert!(matches!(err, LlmError::Request { .. }));
}

#[test]
fn ollama_flattens_conversation() {
    let prompt = OllamaBackend::flatten_messages(&[
        ChatMessage::system("be terse "),
        ChatMessage::user("hello"),
    ]);
    assert_eq!(prompt, "SYSTEM:\nbe terse\n\nUSER:\nhello");
}

// =========================================================================
// Console output
// =========================================================================

#[test]
fn results_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CollectionStore::open(dir.path().join("s.json")).unwrap();
    assert!(format_results(&store).starts_with("No results yet."));

    store.set_result(ResultKind::PageObject, "class P {}\n").unwrap();
    assert_eq!(format_results(&store), "=== Generated Page Object ===\nclass P {}\n");
}

#[test]
fn session_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CollectionStore::open(dir.path().join("s.json")).unwrap();
    assert_eq!(format_session(&store, "x"), "=== Session: x (0 elements) ===\n");
    assert_eq!(format_session_index(&store), "No sessions.\n");

    store.append("x", login_descriptor("button")).unwrap();
    assert_eq!(
        format_session(&store, "x"),
        "=== Session: x (1 element) ===\n1. button (ID: submit, Text: Sign in)\n"
    );
    assert_eq!(format_session_index(&store), "Sessions:\n  x (1)\n");
}
