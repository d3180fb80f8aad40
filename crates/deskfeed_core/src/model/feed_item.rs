//! Feed item domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by the notification and message feeds.
//! - Provide the read-state and status transitions the store is allowed to make.
//!
//! # Invariants
//! - `id` is stable and never blank.
//! - `read` only moves from `false` to `true`.
//! - Status changes are only valid for message items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier of one feed item, unique within a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItemId(String);

impl FeedItemId {
    /// Wraps an existing identifier without validation.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh UUID v4 identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for FeedItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FeedItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for FeedItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind tag of a feed item.
///
/// Notification subtypes and message statuses share one tag space so a
/// single tab predicate can address either feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedKind {
    TaskAssigned,
    CommentAdded,
    ProjectCompleted,
    UserMentioned,
    TaskDueSoon,
    Pending,
    Accepted,
    Declined,
}

impl FeedKind {
    pub const ALL: [FeedKind; 8] = [
        FeedKind::TaskAssigned,
        FeedKind::CommentAdded,
        FeedKind::ProjectCompleted,
        FeedKind::UserMentioned,
        FeedKind::TaskDueSoon,
        FeedKind::Pending,
        FeedKind::Accepted,
        FeedKind::Declined,
    ];

    /// Stable snake_case name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::CommentAdded => "comment_added",
            Self::ProjectCompleted => "project_completed",
            Self::UserMentioned => "user_mentioned",
            Self::TaskDueSoon => "task_due_soon",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Parses a kind from its snake_case name.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Returns the message status for message kinds, `None` for notifications.
    pub fn message_status(self) -> Option<MessageStatus> {
        match self {
            Self::Pending => Some(MessageStatus::Pending),
            Self::Accepted => Some(MessageStatus::Accepted),
            Self::Declined => Some(MessageStatus::Declined),
            _ => None,
        }
    }

    pub fn is_message(self) -> bool {
        self.message_status().is_some()
    }
}

/// Invitation status carried by message items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    Pending,
    Accepted,
    Declined,
}

impl MessageStatus {
    pub fn as_str(self) -> &'static str {
        FeedKind::from(self).as_str()
    }

    pub fn parse(value: &str) -> Option<Self> {
        FeedKind::parse(value).and_then(FeedKind::message_status)
    }
}

impl From<MessageStatus> for FeedKind {
    fn from(value: MessageStatus) -> Self {
        match value {
            MessageStatus::Pending => Self::Pending,
            MessageStatus::Accepted => Self::Accepted,
            MessageStatus::Declined => Self::Declined,
        }
    }
}

/// Entity category a feed item navigates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    Task,
    Comment,
    User,
}

impl EntityType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Task => "task",
            Self::Comment => "comment",
            Self::User => "user",
        }
    }
}

/// Navigation target of a feed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntity {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[serde(rename = "id")]
    pub entity_id: String,
}

impl RelatedEntity {
    pub fn new(entity_type: EntityType, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type,
            entity_id: entity_id.into(),
        }
    }
}

/// Validation failure for a feed item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedItemValidationError {
    BlankId,
    BlankText { id: FeedItemId },
}

impl Display for FeedItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "feed item id must not be blank"),
            Self::BlankText { id } => write!(f, "feed item `{id}` has blank text"),
        }
    }
}

impl Error for FeedItemValidationError {}

/// One notification or message invitation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: FeedItemId,
    pub kind: FeedKind,
    pub created_at: DateTime<Utc>,
    /// Only the owning store flips this, and only to `true`.
    #[serde(default)]
    pub read: bool,
    pub related_entity: RelatedEntity,
    pub text: String,
    /// Denormalized actor name, searched alongside `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Denormalized project name, searched alongside `text`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

impl FeedItem {
    /// Creates an unread item with a generated id.
    pub fn new(
        kind: FeedKind,
        created_at: DateTime<Utc>,
        related_entity: RelatedEntity,
        text: impl Into<String>,
    ) -> Self {
        Self::with_id(FeedItemId::generate(), kind, created_at, related_entity, text)
    }

    /// Creates an unread item with a caller-provided id.
    ///
    /// Used by sources where identity already exists externally.
    pub fn with_id(
        id: FeedItemId,
        kind: FeedKind,
        created_at: DateTime<Utc>,
        related_entity: RelatedEntity,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            created_at,
            read: false,
            related_entity,
            text: text.into(),
            sender: None,
            project: None,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn marked_read(mut self) -> Self {
        self.read = true;
        self
    }

    /// Checks the record-level invariants.
    ///
    /// # Errors
    /// - `BlankId` when `id` is empty or whitespace.
    /// - `BlankText` when `text` is empty or whitespace.
    pub fn validate(&self) -> Result<(), FeedItemValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(FeedItemValidationError::BlankId);
        }
        if self.text.trim().is_empty() {
            return Err(FeedItemValidationError::BlankText {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Marks this item read. Returns whether the state changed.
    pub(crate) fn mark_read(&mut self) -> bool {
        let changed = !self.read;
        self.read = true;
        changed
    }

    /// Applies a status transition to a message item and marks it read.
    ///
    /// Returns `false` without touching the item when it is a notification.
    pub(crate) fn apply_status(&mut self, status: MessageStatus) -> bool {
        if !self.kind.is_message() {
            return false;
        }
        self.kind = status.into();
        self.read = true;
        true
    }
}
