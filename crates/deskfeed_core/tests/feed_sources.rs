use deskfeed_core::{
    FeedItemId, FeedItemValidationError, FeedKind, FeedSource, FeedStore, FeedTab, JsonFeedSource,
    LoadError, LoadOutcome, StaticFeedSource,
};
use std::io::Write;

const MESSAGES_JSON: &str = r#"[
  {
    "id": "msg-1",
    "kind": "pending",
    "created_at": "2026-04-10T09:00:00Z",
    "related_entity": { "type": "project", "id": "project-12" },
    "text": "Invitation to join \"Mobile App\"",
    "sender": "Mike Johnson",
    "project": "Mobile App"
  },
  {
    "id": "msg-2",
    "kind": "accepted",
    "created_at": "2026-04-09T09:00:00Z",
    "read": true,
    "related_entity": { "type": "project", "id": "project-4" },
    "text": "Invitation to join \"Website Redesign\""
  }
]"#;

#[test]
fn json_text_source_decodes_wire_fields() {
    let items = JsonFeedSource::from_text(MESSAGES_JSON).fetch().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, FeedItemId::from("msg-1"));
    assert_eq!(items[0].kind, FeedKind::Pending);
    assert!(!items[0].read);
    assert_eq!(items[0].sender.as_deref(), Some("Mike Johnson"));
    assert_eq!(items[0].related_entity.entity_id, "project-12");
    assert!(items[1].read);
    assert_eq!(items[1].project, None);
}

#[test]
fn serialized_item_uses_snake_case_tags() {
    let items = JsonFeedSource::from_text(MESSAGES_JSON).fetch().unwrap();
    let json = serde_json::to_value(&items[1]).unwrap();
    assert_eq!(json["kind"], "accepted");
    assert_eq!(json["related_entity"]["type"], "project");
    assert_eq!(json["read"], true);
    assert!(json.get("sender").is_none());
}

#[test]
fn json_file_source_feeds_the_store() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MESSAGES_JSON.as_bytes()).unwrap();

    let mut store = FeedStore::new();
    let loaded = store.load(&JsonFeedSource::from_file(file.path())).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(store.filter(FeedTab::Unread, "").len(), 1);
}

#[test]
fn unknown_kind_is_invalid_data() {
    let payload = MESSAGES_JSON.replace("\"pending\"", "\"archived\"");
    let err = JsonFeedSource::from_text(payload).fetch().unwrap_err();
    assert!(matches!(err, LoadError::InvalidData(_)));
}

#[test]
fn load_rejects_duplicate_and_blank_records() {
    let duplicated = MESSAGES_JSON.replace("msg-2", "msg-1");
    let mut store = FeedStore::new();
    let err = store
        .load(&JsonFeedSource::from_text(duplicated))
        .unwrap_err();
    assert_eq!(err, LoadError::DuplicateId(FeedItemId::from("msg-1")));

    let blank = MESSAGES_JSON.replace("\"msg-2\"", "\"  \"");
    let err = store.load(&JsonFeedSource::from_text(blank)).unwrap_err();
    assert_eq!(
        err,
        LoadError::InvalidItem(FeedItemValidationError::BlankId)
    );
    assert!(store.is_empty());
}

#[test]
fn unreachable_source_surfaces_load_error() {
    let mut store = FeedStore::new();
    let err = store
        .load(&StaticFeedSource::unreachable("connection refused"))
        .unwrap_err();
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn reload_replaces_previous_items() {
    let mut store = FeedStore::new();
    store.load(&JsonFeedSource::from_text(MESSAGES_JSON)).unwrap();
    store.delete(&FeedItemId::from("msg-1"));
    assert_eq!(store.len(), 1);

    let ticket = store.begin_load();
    let fetched = JsonFeedSource::from_text(MESSAGES_JSON).fetch();
    let outcome = store.complete_load(ticket, fetched).unwrap();
    assert_eq!(outcome, LoadOutcome::Applied(2));
    assert!(store.get(&FeedItemId::from("msg-1")).is_some());
}
