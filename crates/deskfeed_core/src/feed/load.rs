//! Bulk-load boundary between the feed store and its data source.
//!
//! # Responsibility
//! - Define the `FeedSource` contract implemented by data-access collaborators.
//! - Provide in-memory and JSON sources for demos, tests and fixtures.
//! - Define tickets used to suppress stale or post-teardown load results.
//!
//! # Invariants
//! - Sources never retry; retry policy belongs to the caller.
//! - A `LoadTicket` is only honored by the store that issued it, and only
//!   while it is the latest ticket issued.

use crate::model::feed_item::{FeedItem, FeedItemId, FeedItemValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type LoadResult<T> = Result<T, LoadError>;

/// Bulk-load failure surfaced to the store caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Source could not be reached or read.
    Unavailable(String),
    /// Source payload could not be decoded.
    InvalidData(String),
    /// Two records share one id.
    DuplicateId(FeedItemId),
    /// One record violates item-level invariants.
    InvalidItem(FeedItemValidationError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "feed source unavailable: {message}"),
            Self::InvalidData(message) => write!(f, "invalid feed data: {message}"),
            Self::DuplicateId(id) => write!(f, "duplicate feed item id: {id}"),
            Self::InvalidItem(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidItem(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FeedItemValidationError> for LoadError {
    fn from(value: FeedItemValidationError) -> Self {
        Self::InvalidItem(value)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// External data source consumed by `FeedStore::load`.
///
/// Items are returned in source order, newest first.
pub trait FeedSource {
    fn fetch(&self) -> LoadResult<Vec<FeedItem>>;
}

/// In-memory source returning a fixed item list.
#[derive(Debug, Clone, Default)]
pub struct StaticFeedSource {
    items: Vec<FeedItem>,
    unreachable: Option<String>,
}

impl StaticFeedSource {
    pub fn new(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            unreachable: None,
        }
    }

    /// Source that always fails with `LoadError::Unavailable`.
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            unreachable: Some(reason.into()),
        }
    }
}

impl FeedSource for StaticFeedSource {
    fn fetch(&self) -> LoadResult<Vec<FeedItem>> {
        match &self.unreachable {
            Some(reason) => Err(LoadError::Unavailable(reason.clone())),
            None => Ok(self.items.clone()),
        }
    }
}

/// Source decoding a JSON array of feed items.
#[derive(Debug, Clone)]
pub enum JsonFeedSource {
    Text(String),
    File(PathBuf),
}

impl JsonFeedSource {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

impl FeedSource for JsonFeedSource {
    fn fetch(&self) -> LoadResult<Vec<FeedItem>> {
        match self {
            Self::Text(text) => Ok(serde_json::from_str(text)?),
            Self::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|err| {
                    LoadError::Unavailable(format!("failed to read `{}`: {err}", path.display()))
                })?;
                Ok(serde_json::from_str(&text)?)
            }
        }
    }
}

/// Handle for one in-flight load, issued by `FeedStore::begin_load`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub(crate) store_id: u64,
    pub(crate) generation: u64,
}

/// What `FeedStore::complete_load` did with a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items were replaced; carries the new item count.
    Applied(usize),
    /// A newer load was started after this ticket; result dropped.
    Superseded,
    /// The store was torn down; result dropped.
    Disposed,
}
