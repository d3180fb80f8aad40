//! Core feed logic for DeskFeed.
//! This crate is the single source of truth for notification/message feed
//! invariants.

pub mod feed;
pub mod fixtures;
pub mod logging;
pub mod model;

pub use feed::load::{
    FeedSource, JsonFeedSource, LoadError, LoadOutcome, LoadResult, LoadTicket, StaticFeedSource,
};
pub use feed::relative_time::relative_time;
pub use feed::search::SearchTerm;
pub use feed::store::FeedStore;
pub use feed::tab::{FeedTab, FeedTabParseError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::feed_item::{
    EntityType, FeedItem, FeedItemId, FeedItemValidationError, FeedKind, MessageStatus,
    RelatedEntity,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
