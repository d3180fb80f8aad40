//! Domain model for the notification and message feeds.
//!
//! # Responsibility
//! - Define canonical data structures used by the feed store.
//! - Keep one item shape for both dashboard feeds.
//!
//! # Invariants
//! - Every item is identified by a stable `FeedItemId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod feed_item;
