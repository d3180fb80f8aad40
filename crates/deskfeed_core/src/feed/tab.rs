//! Tab predicates for feed filtering.

use crate::model::feed_item::{FeedItem, FeedKind};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Named filter predicate applied to a feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FeedTab {
    /// Every item.
    #[default]
    All,
    /// Items not yet read.
    Unread,
    /// Items already read.
    Read,
    /// Items whose kind tag equals the given kind.
    Kind(FeedKind),
}

impl FeedTab {
    /// Tabs shown above the notification feed.
    pub const NOTIFICATION_TABS: [FeedTab; 2] = [FeedTab::All, FeedTab::Unread];

    /// Tabs shown above the message feed.
    pub const MESSAGE_TABS: [FeedTab; 4] = [
        FeedTab::All,
        FeedTab::Kind(FeedKind::Pending),
        FeedTab::Kind(FeedKind::Accepted),
        FeedTab::Kind(FeedKind::Declined),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Kind(kind) => kind.as_str(),
        }
    }

    /// Returns whether `item` belongs to this tab.
    pub fn matches(self, item: &FeedItem) -> bool {
        match self {
            Self::All => true,
            Self::Unread => !item.read,
            Self::Read => item.read,
            Self::Kind(kind) => item.kind == kind,
        }
    }
}

impl Display for FeedTab {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedTab {
    type Err = FeedTabParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => Err(FeedTabParseError::Empty),
            "all" => Ok(Self::All),
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            other => FeedKind::parse(other)
                .map(Self::Kind)
                .ok_or_else(|| FeedTabParseError::Unknown(other.to_string())),
        }
    }
}

impl From<FeedKind> for FeedTab {
    fn from(value: FeedKind) -> Self {
        Self::Kind(value)
    }
}

/// Tab name parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedTabParseError {
    Empty,
    Unknown(String),
}

impl Display for FeedTabParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "tab name must not be empty"),
            Self::Unknown(value) => write!(
                f,
                "unknown tab `{value}`; expected all|unread|read or an item kind"
            ),
        }
    }
}

impl Error for FeedTabParseError {}
