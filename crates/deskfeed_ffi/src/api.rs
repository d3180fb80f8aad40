//! FFI use-case API for the dashboard UI shell.
//!
//! # Responsibility
//! - Expose feed sessions (one per mounted feed view) to Dart via FRB.
//! - Flatten core types into plain envelopes with relative-time labels.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - A session's store lives from `feed_open` until `feed_close`.
//! - Calls addressed to a closed or unknown session fail with `ok=false`.

use chrono::{DateTime, Utc};
use deskfeed_core::fixtures::{demo_message_source, demo_notification_source};
use deskfeed_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    relative_time, FeedItem, FeedItemId, FeedSource, FeedStore, FeedTab, JsonFeedSource,
    MessageStatus,
};
use log::{info, warn};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

const FIXTURE_DIR_ENV: &str = "DESKFEED_FIXTURE_DIR";
static FIXTURE_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);
static SESSIONS: Lazy<Mutex<HashMap<u64, FeedSession>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Which dashboard feed a session shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedName {
    Notifications,
    Messages,
}

impl FeedName {
    fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "notifications" => Ok(Self::Notifications),
            "messages" => Ok(Self::Messages),
            other => Err(format!(
                "unknown feed `{other}`; expected notifications|messages"
            )),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Notifications => "notifications",
            Self::Messages => "messages",
        }
    }
}

struct FeedSession {
    feed: FeedName,
    store: FeedStore,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One feed row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemView {
    pub id: String,
    /// Kind tag (`task_assigned`, `pending`, ...).
    pub kind: String,
    pub read: bool,
    pub text: String,
    pub sender: Option<String>,
    pub project: Option<String>,
    /// Navigation target category (`project|task|comment|user`).
    pub entity_type: String,
    pub entity_id: String,
    pub created_at_epoch_ms: i64,
    /// Coarse elapsed-time label, e.g. `5 minutes ago`.
    pub relative_time: String,
}

/// Response envelope for `feed_open`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedOpenResponse {
    pub ok: bool,
    /// Session handle for follow-up calls; `0` on failure.
    pub session_id: u64,
    pub item_count: u32,
    pub message: String,
}

/// Response envelope for `feed_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedListResponse {
    pub ok: bool,
    /// Matching items in feed order.
    pub items: Vec<FeedItemView>,
    /// Unread items in the whole feed, independent of the filter.
    pub unread_count: u32,
    pub message: String,
}

/// Response envelope for mutating calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedActionResponse {
    pub ok: bool,
    /// Whether the call found its target. Absent ids are not errors.
    pub applied: bool,
    pub message: String,
}

impl FeedActionResponse {
    fn done(applied: bool, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            applied,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            applied: false,
            message: message.into(),
        }
    }
}

/// Opens a session for `feed` (`notifications|messages`) and loads it.
///
/// Items come from `$DESKFEED_FIXTURE_DIR/<feed>.json` when that variable is
/// set, otherwise from the built-in demo feed.
///
/// # FFI contract
/// - Sync call; may read one small JSON file.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_open(feed: String) -> FeedOpenResponse {
    let open_failure = |message: String| FeedOpenResponse {
        ok: false,
        session_id: 0,
        item_count: 0,
        message,
    };

    let feed = match FeedName::parse(&feed) {
        Ok(feed) => feed,
        Err(err) => return open_failure(format!("feed_open failed: {err}")),
    };

    let mut store = FeedStore::new();
    let loaded = match resolve_fixture_dir() {
        Some(dir) => {
            let path = dir.join(format!("{}.json", feed.as_str()));
            load_into(&mut store, &JsonFeedSource::from_file(path))
        }
        None => {
            let now = Utc::now();
            match feed {
                FeedName::Notifications => load_into(&mut store, &demo_notification_source(now)),
                FeedName::Messages => load_into(&mut store, &demo_message_source(now)),
            }
        }
    };
    let item_count = match loaded {
        Ok(count) => count,
        Err(err) => {
            warn!(
                "event=feed_open module=ffi status=error feed={}",
                feed.as_str()
            );
            return open_failure(format!("feed_open failed: {err}"));
        }
    };

    let session_id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
    match lock_sessions() {
        Ok(mut sessions) => {
            sessions.insert(session_id, FeedSession { feed, store });
        }
        Err(err) => return open_failure(format!("feed_open failed: {err}")),
    }
    info!(
        "event=feed_open module=ffi status=ok feed={} session={session_id} count={item_count}",
        feed.as_str()
    );

    FeedOpenResponse {
        ok: true,
        session_id,
        item_count,
        message: format!("Loaded {item_count} item(s)."),
    }
}

/// Lists session items in `tab` matching `search`.
///
/// `now_epoch_ms` anchors relative-time labels; `None` uses the current time.
///
/// # FFI contract
/// - Sync call, in-memory.
/// - Unknown tab names fail with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_list(
    session_id: u64,
    tab: String,
    search: String,
    now_epoch_ms: Option<i64>,
) -> FeedListResponse {
    let list_failure = |message: String| FeedListResponse {
        ok: false,
        items: Vec::new(),
        unread_count: 0,
        message,
    };

    let tab = match tab.parse::<FeedTab>() {
        Ok(tab) => tab,
        Err(err) => return list_failure(format!("feed_list failed: {err}")),
    };
    let now = match now_epoch_ms {
        Some(ms) => match DateTime::<Utc>::from_timestamp_millis(ms) {
            Some(now) => now,
            None => return list_failure(format!("feed_list failed: invalid timestamp {ms}")),
        },
        None => Utc::now(),
    };

    let result = with_session(session_id, |session| {
        let items = session
            .store
            .filter(tab, search.as_str())
            .into_iter()
            .map(|item| to_item_view(item, now))
            .collect::<Vec<_>>();
        (items, to_u32(session.store.unread_count()))
    });

    match result {
        Ok((items, unread_count)) => {
            let message = if items.is_empty() {
                "No items.".to_string()
            } else {
                format!("Found {} item(s).", items.len())
            };
            FeedListResponse {
                ok: true,
                items,
                unread_count,
                message,
            }
        }
        Err(err) => list_failure(format!("feed_list failed: {err}")),
    }
}

/// Marks one item read.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_mark_read(session_id: u64, item_id: String) -> FeedActionResponse {
    let id = FeedItemId::new(item_id.trim());
    action(session_id, "feed_mark_read", |store| {
        let applied = store.mark_read(&id);
        let message = if applied { "Marked read." } else { "Item not found." };
        (applied, message.to_string())
    })
}

/// Marks every item in the session read.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_mark_all_read(session_id: u64) -> FeedActionResponse {
    action(session_id, "feed_mark_all_read", |store| {
        let changed = store.mark_all_read();
        (changed > 0, format!("Marked {changed} item(s) read."))
    })
}

/// Deletes one item permanently.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_delete(session_id: u64, item_id: String) -> FeedActionResponse {
    let id = FeedItemId::new(item_id.trim());
    action(session_id, "feed_delete", |store| {
        let applied = store.delete(&id);
        let message = if applied { "Deleted." } else { "Item not found." };
        (applied, message.to_string())
    })
}

/// Accepts, declines or resets one message invitation.
///
/// `status` is one of `pending|accepted|declined`.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_set_status(session_id: u64, item_id: String, status: String) -> FeedActionResponse {
    let status = match MessageStatus::parse(status.trim().to_ascii_lowercase().as_str()) {
        Some(status) => status,
        None => {
            return FeedActionResponse::failure(format!(
                "feed_set_status failed: unknown status `{}`; expected pending|accepted|declined",
                status.trim()
            ))
        }
    };
    let id = FeedItemId::new(item_id.trim());
    action(session_id, "feed_set_status", |store| {
        let applied = store.set_status(&id, status);
        let message = if applied {
            format!("Status set to {}.", status.as_str())
        } else {
            "No message item with that id.".to_string()
        };
        (applied, message)
    })
}

/// Closes a session and disposes its store.
///
/// Closing an unknown session is not an error.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_close(session_id: u64) -> FeedActionResponse {
    match lock_sessions() {
        Ok(mut sessions) => match sessions.remove(&session_id) {
            Some(mut session) => {
                session.store.dispose();
                info!(
                    "event=feed_close module=ffi status=ok feed={} session={session_id}",
                    session.feed.as_str()
                );
                FeedActionResponse::done(true, "Session closed.")
            }
            None => FeedActionResponse::done(false, "Session not open."),
        },
        Err(err) => FeedActionResponse::failure(format!("feed_close failed: {err}")),
    }
}

fn load_into<S: FeedSource>(store: &mut FeedStore, source: &S) -> Result<u32, String> {
    store
        .load(source)
        .map(|items| to_u32(items.len()))
        .map_err(|err| err.to_string())
}

fn action(
    session_id: u64,
    name: &str,
    f: impl FnOnce(&mut FeedStore) -> (bool, String),
) -> FeedActionResponse {
    match with_session(session_id, |session| f(&mut session.store)) {
        Ok((applied, message)) => FeedActionResponse::done(applied, message),
        Err(err) => FeedActionResponse::failure(format!("{name} failed: {err}")),
    }
}

fn with_session<T>(session_id: u64, f: impl FnOnce(&mut FeedSession) -> T) -> Result<T, String> {
    let mut sessions = lock_sessions()?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| format!("session {session_id} is not open"))?;
    Ok(f(session))
}

fn lock_sessions() -> Result<MutexGuard<'static, HashMap<u64, FeedSession>>, String> {
    SESSIONS
        .lock()
        .map_err(|_| "feed session registry is poisoned".to_string())
}

fn resolve_fixture_dir() -> Option<PathBuf> {
    FIXTURE_DIR
        .get_or_init(|| {
            let raw = std::env::var(FIXTURE_DIR_ENV).ok()?;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            }
        })
        .clone()
}

fn to_item_view(item: &FeedItem, now: DateTime<Utc>) -> FeedItemView {
    FeedItemView {
        id: item.id.to_string(),
        kind: item.kind.as_str().to_string(),
        read: item.read,
        text: item.text.clone(),
        sender: item.sender.clone(),
        project: item.project.clone(),
        entity_type: item.related_entity.entity_type.as_str().to_string(),
        entity_id: item.related_entity.entity_id.clone(),
        created_at_epoch_ms: item.created_at.timestamp_millis(),
        relative_time: relative_time(item.created_at, now),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
