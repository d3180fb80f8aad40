use chrono::{Duration, TimeZone, Utc};
use deskfeed_core::fixtures::{demo_messages, demo_notification_source, demo_notifications};
use deskfeed_core::{
    EntityType, FeedItem, FeedItemId, FeedKind, FeedStore, FeedTab, MessageStatus, RelatedEntity,
};

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 9, 30, 0).unwrap()
}

fn message(id: &str, kind: FeedKind, read: bool, sender: &str) -> FeedItem {
    let item = FeedItem::with_id(
        FeedItemId::from(id),
        kind,
        base_time(),
        RelatedEntity::new(EntityType::Project, format!("project-{id}")),
        format!("Invitation to join project {id}"),
    )
    .with_sender(sender);
    if read {
        item.marked_read()
    } else {
        item
    }
}

fn ids(items: &[&FeedItem]) -> Vec<String> {
    items.iter().map(|item| item.id.to_string()).collect()
}

#[test]
fn load_returns_items_in_source_order() {
    let now = base_time();
    let expected = demo_notifications(now)
        .iter()
        .map(|item| item.kind)
        .collect::<Vec<_>>();

    let mut store = FeedStore::new();
    let loaded = store.load(&demo_notification_source(now)).unwrap();
    let kinds = loaded.iter().map(|item| item.kind).collect::<Vec<_>>();
    assert_eq!(kinds, expected);
}

#[test]
fn mark_read_is_idempotent() {
    let mut store = FeedStore::from_items(demo_notifications(base_time())).unwrap();
    let target = store.items()[0].id.clone();

    assert!(store.mark_read(&target));
    let once = store.items().to_vec();
    assert!(store.mark_read(&target));
    assert_eq!(store.items(), once.as_slice());
    assert!(store.get(&target).unwrap().read);
}

#[test]
fn mutations_on_absent_id_are_silent_no_ops() {
    let mut store = FeedStore::from_items(demo_messages(base_time())).unwrap();
    let before = store.items().to_vec();
    let missing = FeedItemId::from("missing");

    assert!(!store.mark_read(&missing));
    assert!(!store.delete(&missing));
    assert!(!store.set_status(&missing, MessageStatus::Declined));
    assert_eq!(store.items(), before.as_slice());
}

#[test]
fn mark_all_read_empties_unread_tab() {
    let mut store = FeedStore::from_items(demo_notifications(base_time())).unwrap();
    assert!(!store.filter(FeedTab::Unread, "").is_empty());

    let changed = store.mark_all_read();
    assert_eq!(changed, 3);
    assert!(store.filter(FeedTab::Unread, "").is_empty());
    assert_eq!(store.unread_count(), 0);
    assert_eq!(store.mark_all_read(), 0);
}

#[test]
fn deleted_item_never_reappears_in_any_tab() {
    let mut store = FeedStore::from_items(demo_messages(base_time())).unwrap();
    let target = store.items()[1].id.clone();
    assert!(store.delete(&target));

    let mut tabs = FeedTab::MESSAGE_TABS.to_vec();
    tabs.extend([FeedTab::Unread, FeedTab::Read]);
    for tab in tabs {
        assert!(store.filter(tab, "").iter().all(|item| item.id != target));
    }
    assert_eq!(store.len(), 2);
}

#[test]
fn all_tab_without_term_returns_full_set_in_order() {
    let items = demo_notifications(base_time());
    let store = FeedStore::from_items(items.clone()).unwrap();
    let filtered = store.filter(FeedTab::All, "");
    let expected = items.iter().collect::<Vec<_>>();
    assert_eq!(filtered, expected);
}

#[test]
fn search_term_only_narrows_the_tab() {
    let store = FeedStore::from_items(demo_notifications(base_time())).unwrap();
    for tab in [FeedTab::All, FeedTab::Unread, FeedTab::Read] {
        let by_tab = ids(&store.filter(tab, ""));
        for term in ["sarah", "WEBSITE", "roadmap", "nothing matches"] {
            let narrowed = ids(&store.filter(tab, term));
            assert!(narrowed.iter().all(|id| by_tab.contains(id)));
        }
    }
}

#[test]
fn search_matches_sender_and_project_case_insensitively() {
    let store = FeedStore::from_items(demo_notifications(base_time())).unwrap();

    let by_sender = store.filter(FeedTab::All, "  MIKE   johnson ");
    assert_eq!(by_sender.len(), 1);
    assert_eq!(by_sender[0].kind, FeedKind::CommentAdded);

    let by_project = store.filter(FeedTab::All, "website redesign");
    let kinds = by_project.iter().map(|item| item.kind).collect::<Vec<_>>();
    assert_eq!(kinds, vec![FeedKind::TaskAssigned, FeedKind::UserMentioned]);

    let unread_by_project = store.filter(FeedTab::Unread, "website redesign");
    assert_eq!(unread_by_project.len(), 1);
}

#[test]
fn accepting_pending_invitation_moves_it_between_tabs() {
    let mut store = FeedStore::from_items(vec![
        message("m1", FeedKind::Pending, false, "Mike Johnson"),
        message("m2", FeedKind::Accepted, true, "Sarah Chen"),
        message("m3", FeedKind::Declined, true, "Alex Rivera"),
    ])
    .unwrap();
    let pending_id = FeedItemId::from("m1");

    assert!(store.set_status(&pending_id, MessageStatus::Accepted));

    let accepted = store.filter(FeedTab::Kind(FeedKind::Accepted), "");
    assert_eq!(ids(&accepted), vec!["m1".to_string(), "m2".to_string()]);
    assert!(store.filter(FeedTab::Kind(FeedKind::Pending), "").is_empty());
    assert!(store.get(&pending_id).unwrap().read);
}

#[test]
fn kind_tabs_filter_notification_subtypes() {
    let store = FeedStore::from_items(demo_notifications(base_time())).unwrap();
    let due = store.filter("task_due_soon".parse().unwrap(), "");
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].kind, FeedKind::TaskDueSoon);
    assert!(store.filter(FeedTab::Kind(FeedKind::Pending), "").is_empty());
}

#[test]
fn demo_feeds_are_newest_first() {
    let now = base_time();
    for feed in [demo_notifications(now), demo_messages(now)] {
        assert!(feed
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
        assert!(feed.iter().all(|item| item.created_at <= now - Duration::minutes(1)));
    }
}
