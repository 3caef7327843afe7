use crate::store::{CollectionStore, ResultKind};
use crate::workflow::notice::element_listing;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format stored generation results for terminal output.
///
/// Produces output like:
/// ```text
/// === Generated Locators ===
/// $("#login-button")
/// ```
pub fn format_results(store: &CollectionStore) -> String {
    let mut out = String::new();

    for kind in [ResultKind::Locators, ResultKind::PageObject] {
        if let Some(text) = store.result(kind) {
            out.push_str(&format!("=== Generated {} ===\n{}\n", kind, text.trim_end()));
        }
    }

    if out.is_empty() {
        out.push_str("No results yet. Generate locators or a Page Object first.\n");
    }
    out
}

/// Format the elements collected in one session.
///
/// ```text
/// === Session: default (2 elements) ===
/// 1. input (ID: email, Text: N/A)
/// 2. button (ID: N/A, Text: Sign in)
/// ```
pub fn format_session(store: &CollectionStore, session: &str) -> String {
    let elements = store.elements(session);
    let mut out = format!(
        "=== Session: {} ({} element{}) ===\n",
        session,
        elements.len(),
        if elements.len() == 1 { "" } else { "s" }
    );

    if !elements.is_empty() {
        out.push_str(&element_listing(elements));
        out.push('\n');
    }
    out
}

/// One line per stored session with its element count.
pub fn format_session_index(store: &CollectionStore) -> String {
    let lines: Vec<String> = store
        .sessions()
        .map(|(name, count)| format!("  {} ({})", name, count))
        .collect();

    if lines.is_empty() {
        "No sessions.\n".to_string()
    } else {
        format!("Sessions:\n{}\n", lines.join("\n"))
    }
}
