//! Feed store: owner of one ordered feed and its derived views.
//!
//! # Responsibility
//! - Hold feed items in source order and apply read/status/delete mutations.
//! - Provide stable tab + search filtering over the held items.
//! - Guard bulk loads against superseded requests and store teardown.
//!
//! # Invariants
//! - Item ids are unique within one store.
//! - `read` never goes back to `false`.
//! - Mutations addressed to an absent id are silent no-ops.
//! - A failed load leaves the previous items untouched.

use crate::feed::load::{FeedSource, LoadError, LoadOutcome, LoadResult, LoadTicket};
use crate::feed::search::SearchTerm;
use crate::feed::tab::FeedTab;
use crate::model::feed_item::{FeedItem, FeedItemId, MessageStatus};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// In-memory owner of one feed.
#[derive(Debug)]
pub struct FeedStore {
    store_id: u64,
    items: Vec<FeedItem>,
    generation: u64,
    disposed: bool,
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            store_id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            items: Vec::new(),
            generation: 0,
            disposed: false,
        }
    }

    /// Creates a store pre-populated with `items`.
    ///
    /// # Errors
    /// - `InvalidItem` when one item fails validation.
    /// - `DuplicateId` when two items share an id.
    pub fn from_items(items: Vec<FeedItem>) -> LoadResult<Self> {
        validate_batch(&items)?;
        let mut store = Self::new();
        store.items = items;
        Ok(store)
    }

    /// Loads items from `source`, replacing the current contents.
    ///
    /// Returns the loaded items in source order. On a disposed store the
    /// result is discarded and an empty slice is returned.
    ///
    /// # Errors
    /// Returns the source's `LoadError` or a validation failure; the previous
    /// items are kept in that case.
    pub fn load<S: FeedSource>(&mut self, source: &S) -> LoadResult<&[FeedItem]> {
        let ticket = self.begin_load();
        let fetched = source.fetch();
        self.complete_load(ticket, fetched)?;
        Ok(&self.items)
    }

    /// Starts a load and returns the ticket that must accompany its result.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        LoadTicket {
            store_id: self.store_id,
            generation: self.generation,
        }
    }

    /// Applies the result of the load identified by `ticket`.
    ///
    /// Results for stale tickets, foreign tickets or disposed stores are
    /// dropped without surfacing their errors.
    ///
    /// # Errors
    /// Returns the load failure when the ticket is current.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: LoadResult<Vec<FeedItem>>,
    ) -> LoadResult<LoadOutcome> {
        if self.disposed {
            debug!("event=feed_load module=feed status=suppressed reason=disposed");
            return Ok(LoadOutcome::Disposed);
        }
        if ticket.store_id != self.store_id || ticket.generation != self.generation {
            debug!(
                "event=feed_load module=feed status=suppressed reason=superseded generation={}",
                ticket.generation
            );
            return Ok(LoadOutcome::Superseded);
        }

        let items = match result.and_then(|items| validate_batch(&items).map(|()| items)) {
            Ok(items) => items,
            Err(err) => {
                warn!("event=feed_load module=feed status=error error={err}");
                return Err(err);
            }
        };

        let count = items.len();
        self.items = items;
        info!("event=feed_load module=feed status=ok count={count}");
        Ok(LoadOutcome::Applied(count))
    }

    /// Tears the store down: drops all items and suppresses pending loads.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.items.clear();
        debug!("event=feed_dispose module=feed status=ok");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Marks one item read. Returns whether an item with `id` exists.
    pub fn mark_read(&mut self, id: &FeedItemId) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.mark_read();
                true
            }
            None => {
                debug!("event=feed_mark_read module=feed status=skipped reason=not_found id={id}");
                false
            }
        }
    }

    /// Marks every item read. Returns how many items changed state.
    pub fn mark_all_read(&mut self) -> usize {
        let changed = self
            .items
            .iter_mut()
            .map(FeedItem::mark_read)
            .filter(|changed| *changed)
            .count();
        debug!("event=feed_mark_all_read module=feed status=ok changed={changed}");
        changed
    }

    /// Removes one item permanently. Returns whether an item was removed.
    pub fn delete(&mut self, id: &FeedItemId) -> bool {
        match self.items.iter().position(|item| &item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => {
                debug!("event=feed_delete module=feed status=skipped reason=not_found id={id}");
                false
            }
        }
    }

    /// Changes the status of one message item and marks it read.
    ///
    /// Returns `false` when `id` is absent or addresses a notification.
    pub fn set_status(&mut self, id: &FeedItemId, status: MessageStatus) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                let applied = item.apply_status(status);
                if !applied {
                    warn!(
                        "event=feed_set_status module=feed status=skipped reason=not_a_message id={id}"
                    );
                }
                applied
            }
            None => {
                debug!("event=feed_set_status module=feed status=skipped reason=not_found id={id}");
                false
            }
        }
    }

    /// Returns items in `tab` matching `search_term`, in store order.
    pub fn filter(&self, tab: FeedTab, search_term: &str) -> Vec<&FeedItem> {
        self.filter_by(tab, &SearchTerm::new(search_term))
    }

    /// Same as `filter`, with a pre-normalized term.
    pub fn filter_by(&self, tab: FeedTab, term: &SearchTerm) -> Vec<&FeedItem> {
        self.items
            .iter()
            .filter(|item| tab.matches(item) && term.matches(item))
            .collect()
    }

    pub fn get(&self, id: &FeedItemId) -> Option<&FeedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// All items in store order.
    pub fn items(&self) -> &[FeedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of unread items, used for badge counts.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|item| !item.read).count()
    }

    /// Item count per tab, in the order of `tabs`.
    pub fn tab_counts(&self, tabs: &[FeedTab]) -> Vec<(FeedTab, usize)> {
        tabs.iter()
            .map(|tab| {
                let count = self.items.iter().filter(|item| tab.matches(item)).count();
                (*tab, count)
            })
            .collect()
    }

    fn find_mut(&mut self, id: &FeedItemId) -> Option<&mut FeedItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

fn validate_batch(items: &[FeedItem]) -> LoadResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        item.validate()?;
        if !seen.insert(&item.id) {
            return Err(LoadError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}
