mod common;

use common::login_descriptor;
use locator_forge::llm::chat::{ChatMessage, MockBackend, Role, TextGeneration};
use locator_forge::llm::prompts::{
    LocatorKinds, PromptSettings, locator_messages, locator_payload, page_object_messages,
    refine_messages,
};

fn settings() -> PromptSettings {
    PromptSettings {
        language: "Python".to_string(),
        framework: "Playwright".to_string(),
        answer_language: None,
        kinds: LocatorKinds::default(),
    }
}

// =========================================================================
// Payload filtering
// =========================================================================

#[test]
fn all_kinds_enabled_keeps_every_field() {
    let payload = locator_payload(&login_descriptor("button"), &LocatorKinds::default()).unwrap();
    for key in ["id", "classes", "cssSelector", "nestedDivSelector", "xPath", "byTextXPath"] {
        assert!(payload.get(key).is_some(), "missing {}", key);
    }
}

#[test]
fn disabled_kinds_are_stripped() {
    let kinds = LocatorKinds {
        use_id: false,
        use_class: true,
        use_css: false,
        use_xpath: false,
    };
    let payload = locator_payload(&login_descriptor("button"), &kinds).unwrap();

    for key in ["id", "cssSelector", "nestedDivSelector", "xPath", "byTextXPath"] {
        assert!(payload.get(key).is_none(), "{} should be stripped", key);
    }
    assert!(payload.get("classes").is_some());
    assert!(payload.get("tagName").is_some(), "metadata always kept");
}

#[test]
fn locator_kinds_default_to_enabled_in_yaml() {
    let kinds: LocatorKinds = serde_yaml::from_str("use_xpath: false").unwrap();
    assert!(kinds.use_id && kinds.use_class && kinds.use_css);
    assert!(!kinds.use_xpath);
}

// =========================================================================
// Message construction
// =========================================================================

#[test]
fn locator_prompt_names_framework_and_language() {
    let messages = locator_messages(&login_descriptor("button"), &settings()).unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1].role, Role::User);
    let user = &messages[1].content;
    assert!(user.starts_with("Optimize the following locators for use in Playwright with Python:"));
    assert!(user.contains(r#""cssSelector":"button#submit""#));
    assert!(!user.contains("has to be in"));
}

#[test]
fn answer_language_is_appended() {
    let settings = PromptSettings {
        answer_language: Some("German".to_string()),
        ..settings()
    };
    let messages = locator_messages(&login_descriptor("a"), &settings).unwrap();
    assert!(messages[1].content.ends_with("\nThe answer has to be in German language."));
}

#[test]
fn page_object_prompt_lists_every_element() {
    let elements = vec![login_descriptor("button"), login_descriptor("input[name=email]")];
    let messages = page_object_messages(&elements, &settings()).unwrap();

    let user = &messages[1].content;
    assert!(user.contains("1. Use the 'id' if it exists and is unique."));
    assert!(user.contains(r#""tagName": "button""#));
    assert!(user.contains(r#""tagName": "input""#));
    assert!(user.ends_with("Provide the results as code (not JSON) for the specified test Playwright with Python."));
}

#[test]
fn refine_prompt_includes_only_present_results() {
    let both = refine_messages(Some("by id"), Some("class P {}"), "use data-testid", &settings());
    let user = &both[1].content;
    assert!(user.starts_with("Locators:\nby id\nPage Object:\nclass P {}"));
    assert!(user.ends_with("Refine the results based on the following instructions:\nuse data-testid"));

    let none = refine_messages(None, None, "shorter", &settings());
    assert_eq!(
        none[1].content,
        "\n\nRefine the results based on the following instructions:\nshorter"
    );
}

// =========================================================================
// Mock backend
// =========================================================================

#[test]
fn mock_backend_records_calls() {
    let mock = MockBackend::replying("ok");
    let calls = mock.calls();

    let reply = mock.complete(&[ChatMessage::user("hi")], None).unwrap();
    assert_eq!(reply, "ok");
    assert_eq!(calls.lock().unwrap().len(), 1);
    assert_eq!(calls.lock().unwrap()[0][0].content, "hi");
}

#[test]
fn failing_mock_returns_error() {
    let mock = MockBackend::failing();
    assert!(mock.complete(&[ChatMessage::user("hi")], Some(10)).is_err());
    assert_eq!(mock.calls().lock().unwrap().len(), 1);
}

#[test]
fn chat_message_serializes_lowercase_role() {
    let json = serde_json::to_value(ChatMessage::system("s")).unwrap();
    assert_eq!(json, serde_json::json!({"role": "system", "content": "s"}));
}
