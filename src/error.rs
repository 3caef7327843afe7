use thiserror::Error;

/// Failures raised while loading or querying a page document.
///
/// The locator builders themselves never fail; these only surface from
/// snapshot loading and from explicit selector queries.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// Snapshot file could not be read
    #[error("Failed to read snapshot '{path}': {source}")]
    SnapshotRead { path: String, source: std::io::Error },

    /// Snapshot JSON could not be parsed
    #[error("Invalid snapshot JSON ({context}): {source}")]
    SnapshotParse { context: String, source: serde_json::Error },

    /// Selector string rejected by the CSS parser
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store '{path}': {source}")]
    Read { path: String, source: std::io::Error },

    #[error("Failed to write store '{path}': {source}")]
    Write { path: String, source: std::io::Error },

    /// Store file exists but is not valid store JSON
    #[error("Corrupt store '{path}': {source}")]
    Corrupt { path: String, source: serde_json::Error },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure talking to the generation service
    #[error("Request to {endpoint} failed: {source}")]
    Request { endpoint: String, source: reqwest::Error },

    /// Service answered with a non-success HTTP status
    #[error("{endpoint} returned {status}: {body}")]
    Status { endpoint: String, status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response from {endpoint}: {reason}")]
    Response { endpoint: String, reason: String },

    /// Service answered but produced no text
    #[error("No generated text in response")]
    EmptyResponse,
}

/// Errors from a user-facing workflow action.
///
/// All of these are non-fatal notices for the caller to show the user.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Element not found or text selection cannot be resolved")]
    TargetNotFound,

    #[error("No API key found. Set it in the config file or OPENAI_API_KEY")]
    MissingApiKey,

    #[error("No elements added for Page Object generation in session '{session}'")]
    NoElements { session: String },

    #[error("Please provide instructions for refinement")]
    EmptyInstructions,

    #[error("Failed to serialize element data: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Llm(#[from] LlmError),
}
