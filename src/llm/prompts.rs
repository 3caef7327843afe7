use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::llm::chat::ChatMessage;
use crate::locator::descriptor::ElementDescriptor;

/// Token cap for refinement requests.
pub const REFINE_MAX_TOKENS: u32 = 1000;

/// Which locator kinds the locator prompt may mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorKinds {
    #[serde(default = "default_true")]
    pub use_id: bool,
    #[serde(default = "default_true")]
    pub use_class: bool,
    #[serde(default = "default_true")]
    pub use_css: bool,
    #[serde(default = "default_true")]
    pub use_xpath: bool,
}

impl Default for LocatorKinds {
    fn default() -> Self {
        Self {
            use_id: true,
            use_class: true,
            use_css: true,
            use_xpath: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Target stack for generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    pub language: String,
    pub framework: String,
    /// Natural language the model should answer in, if any.
    pub answer_language: Option<String>,
    pub kinds: LocatorKinds,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            language: "Java".to_string(),
            framework: "Selenide".to_string(),
            answer_language: None,
            kinds: LocatorKinds::default(),
        }
    }
}

impl PromptSettings {
    fn answer_language_line(&self) -> String {
        match &self.answer_language {
            Some(lang) => format!("\nThe answer has to be in {} language.", lang),
            None => String::new(),
        }
    }
}

/// Descriptor JSON with disabled locator kinds removed.
pub fn locator_payload(descriptor: &ElementDescriptor, kinds: &LocatorKinds) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(descriptor)?;

    if let Value::Object(fields) = &mut value {
        if !kinds.use_id {
            fields.remove("id");
        }
        if !kinds.use_class {
            fields.remove("classes");
        }
        if !kinds.use_css {
            fields.remove("cssSelector");
            fields.remove("nestedDivSelector");
        }
        if !kinds.use_xpath {
            fields.remove("xPath");
            fields.remove("byTextXPath");
        }
    }
    Ok(value)
}

pub fn locator_messages(
    descriptor: &ElementDescriptor,
    settings: &PromptSettings,
) -> Result<Vec<ChatMessage>, serde_json::Error> {
    let payload = serde_json::to_string(&locator_payload(descriptor, &settings.kinds)?)?;
    let (framework, language) = (&settings.framework, &settings.language);

    let user = format!(
        r#"Optimize the following locators for use in {framework} with {language}:
Locators: {payload}
Provide the results as code, not JSON, for use in {framework} with {language} for each optimized locator type (you can provide several results for one type as well if you can).
You don't need to provide explanations or text, only code.{answer}"#,
        answer = settings.answer_language_line(),
    );

    Ok(vec![
        ChatMessage::system(
            "You are an assistant that generates UI locators for automated testing frameworks.",
        ),
        ChatMessage::user(user),
    ])
}

pub fn page_object_messages(
    elements: &[ElementDescriptor],
    settings: &PromptSettings,
) -> Result<Vec<ChatMessage>, serde_json::Error> {
    let properties = serde_json::to_string_pretty(elements)?;
    let (framework, language) = (&settings.framework, &settings.language);

    let user = format!(
        r#"Based on the provided element properties, generate the most appropriate locator for each element in the following priority:
1. Use the 'id' if it exists and is unique.
2. If 'id' is not available, use the 'name' attribute if it exists.
3. If 'name' is not available, use any unique attribute like 'placeholder' or 'type' or others if available.
4. If no unique attributes are available, use the element's text.
5. If none of the above options are available, generate a CSS selector based on div nesting (up to 3 levels).

Ensure that:
- Locators with dynamic values (e.g., containing numbers like 'data-v-1f99f73c') are excluded.
- The final result includes optimized locators and methods to interact with each element to use it for use in {framework} with {language}.

Properties:
{properties}
Provide the results as code (not JSON) for the specified test {framework} with {language}.{answer}"#,
        answer = settings.answer_language_line(),
    );

    Ok(vec![
        ChatMessage::system("You are an assistant that generates Page Object classes for test automation."),
        ChatMessage::user(user),
    ])
}

/// Refinement request over whatever results were stored last.
pub fn refine_messages(
    locators: Option<&str>,
    page_object: Option<&str>,
    instructions: &str,
    settings: &PromptSettings,
) -> Vec<ChatMessage> {
    let mut base = Vec::new();
    if let Some(locators) = locators {
        base.push(format!("Locators:\n{}", locators));
    }
    if let Some(page_object) = page_object {
        base.push(format!("Page Object:\n{}", page_object));
    }

    let user = format!(
        "{}\n\nRefine the results based on the following instructions:\n{}{}",
        base.join("\n"),
        instructions,
        settings.answer_language_line(),
    );

    vec![
        ChatMessage::system("You are an assistant that generates and refines test automation."),
        ChatMessage::user(user),
    ]
}
