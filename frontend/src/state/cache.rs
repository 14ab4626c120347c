use leptos::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::api::{ApiError, Category, Expense, Paginated, StatusHistoryEntry, Vendor};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(resource: &str) -> Self {
        Self(resource.to_string())
    }

    pub fn with(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.0.push(if self.0.contains('?') { '&' } else { '?' });
        self.0.push_str(name);
        self.0.push('=');
        self.0.push_str(&value.to_string());
        self
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for an optimistic write that has not settled yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    key: QueryKey,
    id: u64,
}

impl PendingWrite {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

struct Entry<V> {
    confirmed: Option<V>,
    fetched_at_ms: i64,
    overlay: Option<(u64, V)>,
}

impl<V: Clone> Entry<V> {
    fn visible(&self) -> Option<V> {
        self.overlay
            .as_ref()
            .map(|(_, v)| v.clone())
            .or_else(|| self.confirmed.clone())
    }
}

struct Inner<V> {
    entries: HashMap<QueryKey, Entry<V>>,
    next_write: u64,
}

/// Read-through cache for server data. Each entry holds the last value the
/// backend confirmed plus at most one optimistic overlay, which readers see
/// while a write is in flight. Settling drops the overlay; a success also
/// replaces the confirmed value.
pub struct QueryCache<V> {
    inner: Rc<RefCell<Inner<V>>>,
    stale_ms: i64,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            stale_ms: self.stale_ms,
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl<V: Clone + 'static> QueryCache<V> {
    pub fn new(stale_secs: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                next_write: 1,
            })),
            stale_ms: i64::from(stale_secs) * 1000,
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.inner.borrow().entries.get(key).and_then(Entry::visible)
    }

    pub fn confirmed(&self, key: &QueryKey) -> Option<V> {
        self.inner
            .borrow()
            .entries
            .get(key)
            .and_then(|e| e.confirmed.clone())
    }

    pub fn has_pending(&self, key: &QueryKey) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map(|e| e.overlay.is_some())
            .unwrap_or(false)
    }

    fn is_fresh_at(&self, key: &QueryKey, now: i64) -> bool {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map(|e| e.confirmed.is_some() && now.saturating_sub(e.fetched_at_ms) < self.stale_ms)
            .unwrap_or(false)
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        self.is_fresh_at(key, now_ms())
    }

    pub fn insert(&self, key: QueryKey, value: V) {
        self.insert_at(key, value, now_ms());
    }

    fn insert_at(&self, key: QueryKey, value: V, at: i64) {
        let mut inner = self.inner.borrow_mut();
        let entry = inner.entries.entry(key).or_insert(Entry {
            confirmed: None,
            fetched_at_ms: at,
            overlay: None,
        });
        entry.confirmed = Some(value);
        entry.fetched_at_ms = at;
    }

    /// Marks every entry whose key starts with `prefix` as stale. Pending
    /// overlays survive so an in-flight write still settles against them.
    pub fn invalidate(&self, prefix: &str) {
        let mut inner = self.inner.borrow_mut();
        let mut dropped = 0usize;
        inner.entries.retain(|key, entry| {
            if !key.as_str().starts_with(prefix) {
                return true;
            }
            if entry.overlay.is_some() {
                entry.fetched_at_ms = i64::MIN;
                true
            } else {
                dropped += 1;
                false
            }
        });
        log::debug!("invalidated {} cache entries under {}", dropped, prefix);
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().entries.clear();
    }

    /// Returns the cached value while fresh, otherwise calls `fetch` and stores
    /// its result. Errors leave the cache untouched.
    pub async fn get_or_fetch<F, Fut>(&self, key: QueryKey, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        if self.is_fresh(&key) {
            if let Some(value) = self.get(&key) {
                log::debug!("cache hit {}", key);
                return Ok(value);
            }
        }
        let value = fetch().await?;
        self.insert(key.clone(), value.clone());
        Ok(self.get(&key).unwrap_or(value))
    }

    /// Applies `patch` to the visible value and exposes the result as an
    /// overlay. Returns `None` when nothing is cached under `key`.
    pub fn apply_optimistic(
        &self,
        key: &QueryKey,
        patch: impl FnOnce(&mut V),
    ) -> Option<PendingWrite> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_write;
        let entry = inner.entries.get_mut(key)?;
        let mut value = entry.visible()?;
        patch(&mut value);
        entry.overlay = Some((id, value));
        inner.next_write += 1;
        Some(PendingWrite {
            key: key.clone(),
            id,
        })
    }

    /// The server response becomes the confirmed value; the overlay created by
    /// `write` is discarded, never merged.
    pub fn reconcile(&self, write: &PendingWrite, server_value: V) {
        let at = now_ms();
        let mut inner = self.inner.borrow_mut();
        let entry = inner.entries.entry(write.key.clone()).or_insert(Entry {
            confirmed: None,
            fetched_at_ms: at,
            overlay: None,
        });
        entry.confirmed = Some(server_value);
        entry.fetched_at_ms = at;
        if matches!(entry.overlay, Some((id, _)) if id == write.id) {
            entry.overlay = None;
        }
    }

    pub fn rollback(&self, write: &PendingWrite) {
        let mut inner = self.inner.borrow_mut();
        if let Some(entry) = inner.entries.get_mut(&write.key) {
            if matches!(entry.overlay, Some((id, _)) if id == write.id) {
                entry.overlay = None;
            }
        }
    }
}

pub fn expense_key(id: &str) -> QueryKey {
    QueryKey::new("expenses/detail").with("id", id)
}

pub fn expense_history_key(id: &str) -> QueryKey {
    QueryKey::new("expenses/history").with("id", id)
}

pub const EXPENSE_LIST_PREFIX: &str = "expenses/list";

/// Caches shared by every page, provided once at the application root.
#[derive(Clone)]
pub struct AppCaches {
    pub expenses: QueryCache<Expense>,
    pub expense_lists: QueryCache<Paginated<Expense>>,
    pub expense_history: QueryCache<Vec<StatusHistoryEntry>>,
    pub categories: QueryCache<Vec<Category>>,
    pub vendors: QueryCache<Vec<Vendor>>,
}

impl AppCaches {
    pub fn new(stale_secs: u32) -> Self {
        Self {
            expenses: QueryCache::new(stale_secs),
            expense_lists: QueryCache::new(stale_secs),
            expense_history: QueryCache::new(stale_secs),
            categories: QueryCache::new(stale_secs),
            vendors: QueryCache::new(stale_secs),
        }
    }

    pub fn clear_all(&self) {
        self.expenses.clear();
        self.expense_lists.clear();
        self.expense_history.clear();
        self.categories.clear();
        self.vendors.clear();
    }
}

pub fn provide_caches() -> AppCaches {
    let caches = AppCaches::new(crate::config::current().cache_stale_secs);
    provide_context(caches.clone());
    caches
}

pub fn use_caches() -> AppCaches {
    use_context::<AppCaches>().unwrap_or_else(provide_caches)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn cache() -> QueryCache<String> {
        QueryCache::new(30)
    }

    #[test]
    fn query_key_appends_params() {
        let key = QueryKey::new("expenses/list").with("page", 2).with("status", "PAID");
        assert_eq!(key.as_str(), "expenses/list?page=2&status=PAID");
    }

    #[test]
    fn overlay_is_visible_until_reconciled_with_server_value() {
        let cache = cache();
        let key = QueryKey::new("e1");
        cache.insert(key.clone(), "DRAFT".into());

        let write = cache
            .apply_optimistic(&key, |v| *v = "SUBMITTED".into())
            .unwrap();
        assert_eq!(cache.get(&key).as_deref(), Some("SUBMITTED"));
        assert_eq!(cache.confirmed(&key).as_deref(), Some("DRAFT"));
        assert!(cache.has_pending(&key));

        cache.reconcile(&write, "APPROVED".into());
        assert_eq!(cache.get(&key).as_deref(), Some("APPROVED"));
        assert!(!cache.has_pending(&key));
    }

    #[test]
    fn rollback_restores_confirmed_value() {
        let cache = cache();
        let key = QueryKey::new("e1");
        cache.insert(key.clone(), "SUBMITTED".into());
        let write = cache.apply_optimistic(&key, |v| *v = "APPROVED".into()).unwrap();
        cache.rollback(&write);
        assert_eq!(cache.get(&key).as_deref(), Some("SUBMITTED"));
        assert!(!cache.has_pending(&key));
    }

    #[test]
    fn stale_write_does_not_clear_newer_overlay() {
        let cache = cache();
        let key = QueryKey::new("e1");
        cache.insert(key.clone(), "a".into());
        let first = cache.apply_optimistic(&key, |v| *v = "b".into()).unwrap();
        let second = cache.apply_optimistic(&key, |v| *v = "c".into()).unwrap();
        cache.rollback(&first);
        assert_eq!(cache.get(&key).as_deref(), Some("c"));
        cache.reconcile(&second, "server".into());
        assert_eq!(cache.get(&key).as_deref(), Some("server"));
    }

    #[test]
    fn optimistic_patch_needs_cached_value() {
        let cache = cache();
        assert!(cache
            .apply_optimistic(&QueryKey::new("missing"), |v| v.push('x'))
            .is_none());
    }

    #[test]
    fn invalidate_drops_prefix_but_keeps_pending_entries_stale() {
        let cache = cache();
        let list = QueryKey::new("expenses/list").with("page", 1);
        let detail = QueryKey::new("expenses/detail").with("id", "e1");
        let other = QueryKey::new("vendors");
        cache.insert(list.clone(), "list".into());
        cache.insert(detail.clone(), "detail".into());
        cache.insert(other.clone(), "vendors".into());
        cache.apply_optimistic(&detail, |v| v.push('!')).unwrap();

        cache.invalidate("expenses");
        assert!(cache.get(&list).is_none());
        assert_eq!(cache.get(&detail).as_deref(), Some("detail!"));
        assert!(!cache.is_fresh(&detail));
        assert!(cache.is_fresh(&other));
    }

    #[test]
    fn freshness_follows_stale_window() {
        let cache = cache();
        let key = QueryKey::new("k");
        cache.insert_at(key.clone(), "v".into(), 1_000);
        assert!(cache.is_fresh_at(&key, 1_000 + 29_999));
        assert!(!cache.is_fresh_at(&key, 1_000 + 30_000));
    }

    #[tokio::test]
    async fn get_or_fetch_reads_through_once_while_fresh() {
        let cache = cache();
        let calls = Rc::new(std::cell::Cell::new(0));
        for _ in 0..3 {
            let calls = calls.clone();
            let value = cache
                .get_or_fetch(QueryKey::new("k"), || async move {
                    calls.set(calls.get() + 1);
                    Ok::<_, ApiError>("fetched".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "fetched");
        }
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn get_or_fetch_error_leaves_cache_empty() {
        let cache = cache();
        let err = cache
            .get_or_fetch(QueryKey::new("k"), || async {
                Err::<String, _>(ApiError::network("offline"))
            })
            .await
            .unwrap_err();
        assert!(err.is_network());
        assert!(cache.get(&QueryKey::new("k")).is_none());
    }
}
