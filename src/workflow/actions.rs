use tracing::{info, warn};

use crate::dom::rect::Rect;
use crate::dom::snapshot::PageSnapshot;
use crate::error::WorkflowError;
use crate::llm::chat::TextGeneration;
use crate::llm::prompts::{
    PromptSettings, REFINE_MAX_TOKENS, locator_messages, page_object_messages, refine_messages,
};
use crate::locator::config::Preset;
use crate::locator::descriptor::{ElementDescriptor, describe};
use crate::locator::region::collect_region;
use crate::store::{CollectionStore, ResultKind};
use crate::trace::{TraceAction, TraceEvent, TraceLogger};
use crate::workflow::notice::{CollectionNotice, RegionNotice, element_listing};

/// The four user actions: locate one element, collect elements (one at a
/// time or by region), generate a Page Object, refine the last result.
///
/// Each call runs to completion synchronously and writes one trace event.
pub struct Workflow {
    settings: PromptSettings,
    store: CollectionStore,
    backend: Option<Box<dyn TextGeneration>>,
    tracer: TraceLogger,
}

impl Workflow {
    pub fn new(store: CollectionStore, settings: PromptSettings) -> Self {
        Self {
            settings,
            store,
            backend: None,
            tracer: TraceLogger::disabled(),
        }
    }

    /// Without a backend, generation actions fail with
    /// [`WorkflowError::MissingApiKey`].
    pub fn with_backend(mut self, backend: Box<dyn TextGeneration>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Describe the snapshot's target element and ask the backend for
    /// framework-specific locators. The answer replaces stored results.
    pub fn generate_locators(&mut self, snapshot: &PageSnapshot) -> Result<String, WorkflowError> {
        let event = TraceEvent::now(TraceAction::GenerateLocators)
            .with_page(snapshot.digest())
            .with_result(ResultKind::Locators);

        let result = self.try_generate_locators(snapshot);
        self.finish(event.with_elements(usize::from(result.is_ok())), result)
    }

    fn try_generate_locators(&mut self, snapshot: &PageSnapshot) -> Result<String, WorkflowError> {
        let document = snapshot.to_document();
        let descriptor =
            describe(&document, &Preset::Extended.config()).ok_or(WorkflowError::TargetNotFound)?;

        let messages = locator_messages(&descriptor, &self.settings).map_err(WorkflowError::Serialize)?;
        let code = self.backend()?.complete(&messages, None)?;

        self.store.set_result(ResultKind::Locators, code.clone())?;
        info!(tag = %descriptor.tag_name, "locators generated");
        Ok(code)
    }

    /// Describe the snapshot's target element for Page Object use and
    /// append it to `session`.
    pub fn add_element(&mut self, snapshot: &PageSnapshot, session: &str) -> Result<CollectionNotice, WorkflowError> {
        let event = TraceEvent::now(TraceAction::AddElement)
            .with_session(session)
            .with_page(snapshot.digest());

        let result = self.try_add_element(snapshot, session);
        self.finish(event.with_elements(usize::from(result.is_ok())), result)
    }

    fn try_add_element(&mut self, snapshot: &PageSnapshot, session: &str) -> Result<CollectionNotice, WorkflowError> {
        let document = snapshot.to_document();
        let descriptor =
            describe(&document, &Preset::PageObject.config()).ok_or(WorkflowError::TargetNotFound)?;

        let total = self.store.append(session, descriptor.clone())?;
        info!(session, total, tag = %descriptor.tag_name, "element added");

        Ok(CollectionNotice {
            added: descriptor,
            listing: element_listing(self.store.elements(session)),
            total,
        })
    }

    /// Append every element intersecting `rect` to `session`. An empty region
    /// is not an error.
    pub fn collect_region(
        &mut self,
        snapshot: &PageSnapshot,
        rect: &Rect,
        session: &str,
    ) -> Result<RegionNotice, WorkflowError> {
        let event = TraceEvent::now(TraceAction::CollectRegion)
            .with_session(session)
            .with_page(snapshot.digest());

        let document = snapshot.to_document();
        let descriptors = collect_region(&document, rect);
        let collected = descriptors.len();

        let result = if descriptors.is_empty() {
            Ok(RegionNotice {
                collected,
                total: self.store.elements(session).len(),
            })
        } else {
            self.store
                .extend(session, descriptors)
                .map(|total| RegionNotice { collected, total })
                .map_err(WorkflowError::from)
        };
        self.finish(event.with_elements(collected), result)
    }

    /// Generate a Page Object from everything collected in `session`.
    pub fn generate_page_object(&mut self, session: &str) -> Result<String, WorkflowError> {
        let elements: Vec<ElementDescriptor> = self.store.elements(session).to_vec();
        let event = TraceEvent::now(TraceAction::GeneratePageObject)
            .with_session(session)
            .with_elements(elements.len())
            .with_result(ResultKind::PageObject);

        let result = self.try_generate_page_object(&elements, session);
        self.finish(event, result)
    }

    fn try_generate_page_object(
        &mut self,
        elements: &[ElementDescriptor],
        session: &str,
    ) -> Result<String, WorkflowError> {
        if elements.is_empty() {
            return Err(WorkflowError::NoElements {
                session: session.to_string(),
            });
        }

        let messages = page_object_messages(elements, &self.settings).map_err(WorkflowError::Serialize)?;
        let code = self.backend()?.complete(&messages, None)?;

        self.store.set_result(ResultKind::PageObject, code.clone())?;
        info!(session, elements = elements.len(), "page object generated");
        Ok(code)
    }

    /// Rework the stored results following free-form `instructions`.
    ///
    /// The refined text is stored as a Page Object only when the previous
    /// results held a Page Object and no locators; otherwise as locators.
    pub fn refine(&mut self, instructions: &str) -> Result<(ResultKind, String), WorkflowError> {
        let event = TraceEvent::now(TraceAction::Refine);
        let result = self.try_refine(instructions);

        let event = match &result {
            Ok((kind, _)) => event.with_result(*kind),
            Err(_) => event,
        };
        self.finish(event, result)
    }

    fn try_refine(&mut self, instructions: &str) -> Result<(ResultKind, String), WorkflowError> {
        let instructions = instructions.trim();
        if instructions.is_empty() {
            return Err(WorkflowError::EmptyInstructions);
        }

        let locators = self.store.result(ResultKind::Locators).map(str::to_string);
        let page_object = self.store.result(ResultKind::PageObject).map(str::to_string);

        let messages = refine_messages(
            locators.as_deref(),
            page_object.as_deref(),
            instructions,
            &self.settings,
        );
        let refined = self.backend()?.complete(&messages, Some(REFINE_MAX_TOKENS))?;

        let kind = if locators.is_none() && page_object.is_some() {
            ResultKind::PageObject
        } else {
            ResultKind::Locators
        };

        self.store.set_result(kind, refined.clone())?;
        info!(%kind, "results refined");
        Ok((kind, refined))
    }

    fn backend(&self) -> Result<&dyn TextGeneration, WorkflowError> {
        self.backend.as_deref().ok_or(WorkflowError::MissingApiKey)
    }

    fn finish<T>(&self, event: TraceEvent, result: Result<T, WorkflowError>) -> Result<T, WorkflowError> {
        let event = match &result {
            Ok(_) => event,
            Err(e) => {
                warn!(action = ?event.action, error = %e, "action failed");
                event.with_error(e)
            }
        };
        self.tracer.log(&event);
        result
    }
}
