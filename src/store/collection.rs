use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreError;
use crate::locator::descriptor::ElementDescriptor;

pub const DEFAULT_SESSION: &str = "default";

/// The two kinds of generated output kept between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResultKind {
    Locators,
    PageObject,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::Locators => write!(f, "Locators"),
            ResultKind::PageObject => write!(f, "Page Object"),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreData {
    #[serde(default)]
    sessions: BTreeMap<String, Vec<ElementDescriptor>>,
    #[serde(default)]
    locators: Option<String>,
    #[serde(default)]
    page_object: Option<String>,
}

/// Collected elements (per session) and the latest generated results,
/// persisted as one JSON file.
///
/// Every mutation rewrites the whole file. There is no locking: concurrent
/// writers race and the last write wins.
pub struct CollectionStore {
    path: PathBuf,
    data: StoreData,
}

impl CollectionStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => StoreData::default(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                source: e,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };
        Ok(Self { path, data })
    }

    pub fn elements(&self, session: &str) -> &[ElementDescriptor] {
        self.data
            .sessions
            .get(session)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn sessions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.data
            .sessions
            .iter()
            .map(|(name, elements)| (name.as_str(), elements.len()))
    }

    /// Append one element; returns the session's new length.
    pub fn append(&mut self, session: &str, descriptor: ElementDescriptor) -> Result<usize, StoreError> {
        self.extend(session, std::iter::once(descriptor))
    }

    /// Append elements in order; returns the session's new length.
    pub fn extend(
        &mut self,
        session: &str,
        descriptors: impl IntoIterator<Item = ElementDescriptor>,
    ) -> Result<usize, StoreError> {
        let list = self.data.sessions.entry(session.to_string()).or_default();
        list.extend(descriptors);
        let len = list.len();
        self.save()?;
        Ok(len)
    }

    pub fn clear_session(&mut self, session: &str) -> Result<(), StoreError> {
        self.data.sessions.remove(session);
        self.save()
    }

    /// Drop every session and every stored result.
    pub fn clear_all(&mut self) -> Result<(), StoreError> {
        self.data = StoreData::default();
        self.save()
    }

    pub fn result(&self, kind: ResultKind) -> Option<&str> {
        match kind {
            ResultKind::Locators => self.data.locators.as_deref(),
            ResultKind::PageObject => self.data.page_object.as_deref(),
        }
    }

    /// Replace stored results: both kinds are removed, then `text` is kept
    /// under `kind`.
    pub fn set_result(&mut self, kind: ResultKind, text: impl Into<String>) -> Result<(), StoreError> {
        self.data.locators = None;
        self.data.page_object = None;
        match kind {
            ResultKind::Locators => self.data.locators = Some(text.into()),
            ResultKind::PageObject => self.data.page_object = Some(text.into()),
        }
        self.save()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.data).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: self.path.display().to_string(),
                source: e,
            })?;
        }

        std::fs::write(&self.path, json).map_err(|e| StoreError::Write {
            path: self.path.display().to_string(),
            source: e,
        })?;

        debug!(path = %self.path.display(), "store saved");
        Ok(())
    }
}
