//! Demo feeds used by the CLI probe, the FFI shell and tests.
//!
//! Timestamps are anchored at the caller's `now` so relative-time labels stay
//! meaningful whenever the demo runs.

use crate::feed::load::StaticFeedSource;
use crate::model::feed_item::{EntityType, FeedItem, FeedKind, RelatedEntity};
use chrono::{DateTime, Duration, Utc};

/// Demo notification feed, newest first, one item per notification kind.
pub fn demo_notifications(now: DateTime<Utc>) -> Vec<FeedItem> {
    vec![
        FeedItem::new(
            FeedKind::TaskAssigned,
            now - Duration::minutes(5),
            RelatedEntity::new(EntityType::Task, "task-101"),
            "Sarah Chen assigned you \"Update landing page copy\"",
        )
        .with_sender("Sarah Chen")
        .with_project("Website Redesign"),
        FeedItem::new(
            FeedKind::CommentAdded,
            now - Duration::hours(2),
            RelatedEntity::new(EntityType::Comment, "comment-88"),
            "Mike Johnson commented on \"API rate limits\"",
        )
        .with_sender("Mike Johnson")
        .with_project("Mobile App"),
        FeedItem::new(
            FeedKind::UserMentioned,
            now - Duration::hours(26),
            RelatedEntity::new(EntityType::Task, "task-117"),
            "Priya Patel mentioned you in \"Sprint retro notes\"",
        )
        .with_sender("Priya Patel")
        .with_project("Website Redesign")
        .marked_read(),
        FeedItem::new(
            FeedKind::TaskDueSoon,
            now - Duration::days(3),
            RelatedEntity::new(EntityType::Task, "task-124"),
            "\"Prepare Q2 roadmap\" is due tomorrow",
        )
        .with_project("Planning"),
        FeedItem::new(
            FeedKind::ProjectCompleted,
            now - Duration::days(12),
            RelatedEntity::new(EntityType::Project, "project-9"),
            "Project \"Brand Refresh\" was marked complete",
        )
        .with_sender("Alex Rivera")
        .with_project("Brand Refresh")
        .marked_read(),
    ]
}

/// Demo message feed: one pending, one accepted and one declined invitation.
pub fn demo_messages(now: DateTime<Utc>) -> Vec<FeedItem> {
    vec![
        FeedItem::new(
            FeedKind::Pending,
            now - Duration::minutes(30),
            RelatedEntity::new(EntityType::Project, "project-12"),
            "Invitation to join \"Mobile App\"",
        )
        .with_sender("Mike Johnson")
        .with_project("Mobile App"),
        FeedItem::new(
            FeedKind::Accepted,
            now - Duration::days(1),
            RelatedEntity::new(EntityType::Project, "project-4"),
            "Invitation to join \"Website Redesign\"",
        )
        .with_sender("Sarah Chen")
        .with_project("Website Redesign")
        .marked_read(),
        FeedItem::new(
            FeedKind::Declined,
            now - Duration::days(9),
            RelatedEntity::new(EntityType::Project, "project-7"),
            "Invitation to join \"Data Migration\"",
        )
        .with_sender("Alex Rivera")
        .with_project("Data Migration")
        .marked_read(),
    ]
}

/// Source serving `demo_notifications(now)`.
pub fn demo_notification_source(now: DateTime<Utc>) -> StaticFeedSource {
    StaticFeedSource::new(demo_notifications(now))
}

/// Source serving `demo_messages(now)`.
pub fn demo_message_source(now: DateTime<Utc>) -> StaticFeedSource {
    StaticFeedSource::new(demo_messages(now))
}
