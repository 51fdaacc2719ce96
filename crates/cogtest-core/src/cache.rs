//! Resolved-image cache kept in the key-value store.
//!
//! Keys are `cache:<namespace>:<search phrase>`; the phrase is used verbatim,
//! so lookups are case-sensitive.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CogResult;
use crate::store::KvStore;

pub const CACHE_PREFIX: &str = "cache:";

/// External source an entry came from. Entries never cross namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheNamespace {
    Stock,
    Encyclopedia,
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::Encyclopedia => write!(f, "encyclopedia"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedImageEntry {
    pub url: String,
    pub source: CacheNamespace,
    pub cached_at: DateTime<Utc>,
}

pub fn cache_key(namespace: CacheNamespace, phrase: &str) -> String {
    format!("{CACHE_PREFIX}{namespace}:{phrase}")
}

pub struct ImageCache<'s> {
    store: &'s dyn KvStore,
    stock_ttl: TimeDelta,
    encyclopedia_ttl: TimeDelta,
}

impl<'s> ImageCache<'s> {
    pub fn new(store: &'s dyn KvStore, stock_ttl: TimeDelta, encyclopedia_ttl: TimeDelta) -> Self {
        Self {
            store,
            stock_ttl,
            encyclopedia_ttl,
        }
    }

    pub fn ttl(&self, namespace: CacheNamespace) -> TimeDelta {
        match namespace {
            CacheNamespace::Stock => self.stock_ttl,
            CacheNamespace::Encyclopedia => self.encyclopedia_ttl,
        }
    }

    /// Fresh entry for `phrase`, if any. Stale entries stay in the store.
    pub fn lookup(
        &self,
        namespace: CacheNamespace,
        phrase: &str,
        now: DateTime<Utc>,
    ) -> Option<CachedImageEntry> {
        let key = cache_key(namespace, phrase);
        let raw = match self.store.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("cache read failed for {key}: {e}");
                return None;
            }
        };
        let entry: CachedImageEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("ignoring malformed cache entry {key}: {e}");
                return None;
            }
        };
        // An expiry past the representable range is treated as unreadable.
        match entry.cached_at.checked_add_signed(self.ttl(namespace)) {
            Some(expires) if now < expires => Some(entry),
            Some(_) => {
                debug!("cache entry {key} expired");
                None
            }
            None => {
                warn!("ignoring cache entry {key} with out-of-range timestamp");
                None
            }
        }
    }

    pub fn put(&self, namespace: CacheNamespace, phrase: &str, url: &str, now: DateTime<Utc>) {
        let key = cache_key(namespace, phrase);
        let entry = CachedImageEntry {
            url: url.to_string(),
            source: namespace,
            cached_at: now,
        };
        let result = serde_json::to_string(&entry)
            .map_err(Into::into)
            .and_then(|raw| self.store.set(&key, &raw));
        if let Err(e) = result {
            warn!("cache write failed for {key}: {e}");
        }
    }

    /// Remove every cache entry in both namespaces.
    pub fn clear(&self) -> CogResult<usize> {
        let keys: Vec<String> = self
            .store
            .list_keys()?
            .into_iter()
            .filter(|k| k.starts_with(CACHE_PREFIX))
            .collect();
        if keys.is_empty() {
            return Ok(0);
        }
        self.store.remove_many(&keys)
    }
}
