//! Search-term normalization and item matching.
//!
//! # Invariants
//! - An empty normalized term matches every item.
//! - Matching is a case-insensitive substring test over text, sender and
//!   project name.

use crate::model::feed_item::FeedItem;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Normalized search term, ready for repeated matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    needle: String,
}

impl SearchTerm {
    /// Trims, collapses inner whitespace and lowercases the raw input.
    pub fn new(raw: &str) -> Self {
        let collapsed = WHITESPACE_RE.replace_all(raw.trim(), " ");
        Self {
            needle: collapsed.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.needle.as_str()
    }

    /// Returns whether `item` matches this term.
    pub fn matches(&self, item: &FeedItem) -> bool {
        if self.is_empty() {
            return true;
        }
        let haystacks = [
            Some(item.text.as_str()),
            item.sender.as_deref(),
            item.project.as_deref(),
        ];
        haystacks
            .into_iter()
            .flatten()
            .any(|value| contains_folded(value, self.needle.as_str()))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    let normalized = WHITESPACE_RE.replace_all(haystack, " ");
    normalized.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::SearchTerm;
    use crate::model::feed_item::{EntityType, FeedItem, FeedKind, RelatedEntity};
    use chrono::{TimeZone, Utc};

    fn item() -> FeedItem {
        FeedItem::new(
            FeedKind::CommentAdded,
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            RelatedEntity::new(EntityType::Task, "t-7"),
            "New comment on\nLanding page copy",
        )
        .with_sender("Sarah Chen")
        .with_project("Website Redesign")
    }

    #[test]
    fn new_normalizes_whitespace_and_case() {
        assert_eq!(SearchTerm::new("  Landing \t PAGE ").as_str(), "landing page");
        assert!(SearchTerm::new(" \n ").is_empty());
    }

    #[test]
    fn matches_text_sender_and_project() {
        let item = item();
        assert!(SearchTerm::new("landing page").matches(&item));
        assert!(SearchTerm::new("sarah").matches(&item));
        assert!(SearchTerm::new("REDESIGN").matches(&item));
        assert!(!SearchTerm::new("mobile app").matches(&item));
    }

    #[test]
    fn empty_term_matches_everything() {
        assert!(SearchTerm::default().matches(&item()));
    }
}
