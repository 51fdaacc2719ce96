//! Tiered image resolution: bundled asset, cache, encyclopedia, stock photo,
//! placeholder. The first tier that produces a URL wins and [`ImageResolver::resolve`]
//! never fails.

use std::fmt;
use std::sync::Mutex;

use chrono::TimeDelta;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::assets::{AssetHandle, AssetRegistry};
use crate::cache::{CacheNamespace, ImageCache};
use crate::clock::{Clock, SystemClock};
use crate::error::CogResult;
use crate::http::HttpClient;
use crate::item::CatalogItem;
use crate::sources::{
    EncyclopediaSource, StockPhotoSource, DEFAULT_ENCYCLOPEDIA_ENDPOINT, DEFAULT_STOCK_ENDPOINT,
};
use crate::store::KvStore;

pub const DEFAULT_PLACEHOLDER_ENDPOINT: &str = "https://robohash.org";
const PLACEHOLDER_QUERY: &str = "set=set4&size=400x400";

/// Something the UI can display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageReference {
    Bundled(AssetHandle),
    Remote(String),
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled(handle) => write!(f, "bundled:{handle}"),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// Which tier produced a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSource {
    Bundled,
    Cached(CacheNamespace),
    Encyclopedia,
    StockPhoto,
    Placeholder,
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bundled => "bundled",
            Self::Cached(CacheNamespace::Stock) => "cache/stock",
            Self::Cached(CacheNamespace::Encyclopedia) => "cache/encyclopedia",
            Self::Encyclopedia => "encyclopedia",
            Self::StockPhoto => "stock",
            Self::Placeholder => "placeholder",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub reference: ImageReference,
    pub source: ImageSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded(ImageSource),
    /// No real source answered; the placeholder is being shown.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadEvent<'i> {
    pub index: usize,
    pub total: usize,
    pub item_id: &'i str,
    pub state: LoadState,
}

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub encyclopedia_endpoint: String,
    pub stock_endpoint: String,
    /// Stock photo search is skipped without a key.
    pub stock_api_key: Option<String>,
    pub placeholder_endpoint: String,
    pub stock_ttl: TimeDelta,
    pub encyclopedia_ttl: TimeDelta,
    /// Photos fetched per search when asking for a different image.
    pub reload_batch: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            encyclopedia_endpoint: DEFAULT_ENCYCLOPEDIA_ENDPOINT.into(),
            stock_endpoint: DEFAULT_STOCK_ENDPOINT.into(),
            stock_api_key: None,
            placeholder_endpoint: DEFAULT_PLACEHOLDER_ENDPOINT.into(),
            stock_ttl: TimeDelta::hours(24),
            encyclopedia_ttl: TimeDelta::hours(48),
            reload_batch: 15,
        }
    }
}

/// Deterministic placeholder URL for a search phrase.
pub fn placeholder_url(endpoint: &str, phrase: &str) -> String {
    if let Ok(mut url) = Url::parse(endpoint) {
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(phrase);
        } else {
            return fallback_placeholder(phrase);
        }
        url.set_query(Some(PLACEHOLDER_QUERY));
        return url.to_string();
    }
    warn!("invalid placeholder endpoint {endpoint:?}, using default");
    fallback_placeholder(phrase)
}

fn fallback_placeholder(phrase: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(phrase.as_bytes()).collect();
    format!("{DEFAULT_PLACEHOLDER_ENDPOINT}/{encoded}?{PLACEHOLDER_QUERY}")
}

pub struct ImageResolver<'a> {
    cache: ImageCache<'a>,
    http: &'a dyn HttpClient,
    assets: &'a dyn AssetRegistry,
    clock: Box<dyn Clock + 'a>,
    rng: Mutex<StdRng>,
    settings: ResolverSettings,
}

impl<'a> ImageResolver<'a> {
    pub fn new(
        store: &'a dyn KvStore,
        http: &'a dyn HttpClient,
        assets: &'a dyn AssetRegistry,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            cache: ImageCache::new(store, settings.stock_ttl, settings.encyclopedia_ttl),
            http,
            assets,
            clock: Box::new(SystemClock),
            rng: Mutex::new(StdRng::from_os_rng()),
            settings,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn resolve(&self, item: &CatalogItem, bypass_cache: bool) -> ImageReference {
        self.resolve_traced(item, bypass_cache).reference
    }

    /// Like [`resolve`](Self::resolve), also reporting the winning tier.
    pub fn resolve_traced(&self, item: &CatalogItem, bypass_cache: bool) -> Resolution {
        let phrase = item.search_phrase;
        let resolution = self
            .from_bundle(item, bypass_cache)
            .or_else(|| self.from_cache(phrase, bypass_cache))
            .or_else(|| self.from_encyclopedia(phrase))
            .or_else(|| self.from_stock(phrase, bypass_cache))
            .unwrap_or_else(|| self.placeholder(phrase));
        debug!(
            item = item.id,
            source = %resolution.source,
            bypass_cache,
            "resolved image"
        );
        resolution
    }

    /// Resolve one item after another, reporting each transition to `on_event`.
    pub fn load_sequential<'i, F>(&self, items: &[&'i CatalogItem], mut on_event: F) -> Vec<Resolution>
    where
        F: FnMut(LoadEvent<'i>),
    {
        let total = items.len();
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let event = |state| LoadEvent {
                    index,
                    total,
                    item_id: item.id,
                    state,
                };
                on_event(event(LoadState::Loading));
                let resolution = self.resolve_traced(item, false);
                on_event(event(match resolution.source {
                    ImageSource::Placeholder => LoadState::Error,
                    source => LoadState::Loaded(source),
                }));
                resolution
            })
            .collect()
    }

    /// Resolve all items concurrently, one thread per item. Results keep the
    /// input order.
    pub fn preload(&self, items: &[&CatalogItem]) -> Vec<Resolution> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = items
                .iter()
                .map(|item| scope.spawn(move || self.resolve_traced(item, false)))
                .collect();
            handles
                .into_iter()
                .zip(items)
                .map(|(handle, item)| {
                    handle.join().unwrap_or_else(|_| {
                        warn!("image preload for {} panicked", item.id);
                        self.placeholder(item.search_phrase)
                    })
                })
                .collect()
        })
    }

    pub fn clear_cache(&self) -> CogResult<usize> {
        self.cache.clear()
    }

    fn from_bundle(&self, item: &CatalogItem, bypass_cache: bool) -> Option<Resolution> {
        if bypass_cache {
            return None;
        }
        let handle = self.assets.lookup(item.asset?)?;
        Some(Resolution {
            reference: ImageReference::Bundled(handle),
            source: ImageSource::Bundled,
        })
    }

    fn from_cache(&self, phrase: &str, bypass_cache: bool) -> Option<Resolution> {
        if bypass_cache {
            return None;
        }
        let now = self.clock.now();
        [CacheNamespace::Stock, CacheNamespace::Encyclopedia]
            .into_iter()
            .find_map(|ns| {
                self.cache.lookup(ns, phrase, now).map(|entry| Resolution {
                    reference: ImageReference::Remote(entry.url),
                    source: ImageSource::Cached(ns),
                })
            })
    }

    fn from_encyclopedia(&self, phrase: &str) -> Option<Resolution> {
        let source = EncyclopediaSource::new(self.http, &self.settings.encyclopedia_endpoint);
        let info = match source.find(phrase) {
            Ok(Some(info)) => info,
            Ok(None) => {
                debug!("encyclopedia has no image for {phrase:?}");
                return None;
            }
            Err(e) => {
                debug!("encyclopedia lookup for {phrase:?} failed: {e}");
                return None;
            }
        };
        self.cache.put(
            CacheNamespace::Encyclopedia,
            phrase,
            &info.url,
            self.clock.now(),
        );
        Some(Resolution {
            reference: ImageReference::Remote(info.url),
            source: ImageSource::Encyclopedia,
        })
    }

    fn from_stock(&self, phrase: &str, bypass_cache: bool) -> Option<Resolution> {
        let Some(api_key) = self.settings.stock_api_key.as_deref() else {
            debug!("no stock photo key configured, skipping");
            return None;
        };
        let per_page = if bypass_cache {
            self.settings.reload_batch.max(1)
        } else {
            1
        };
        let source = StockPhotoSource::new(self.http, &self.settings.stock_endpoint, api_key);
        let mut photos = match source.search(phrase, per_page) {
            Ok(photos) if !photos.is_empty() => photos,
            Ok(_) => {
                debug!("stock photo search for {phrase:?} found nothing");
                return None;
            }
            Err(e) => {
                debug!("stock photo search for {phrase:?} failed: {e}");
                return None;
            }
        };
        let index = if bypass_cache {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.random_range(0..photos.len())
        } else {
            0
        };
        let url = photos.swap_remove(index);
        if !bypass_cache {
            self.cache
                .put(CacheNamespace::Stock, phrase, &url, self.clock.now());
        }
        Some(Resolution {
            reference: ImageReference::Remote(url),
            source: ImageSource::StockPhoto,
        })
    }

    fn placeholder(&self, phrase: &str) -> Resolution {
        Resolution {
            reference: ImageReference::Remote(placeholder_url(
                &self.settings.placeholder_endpoint,
                phrase,
            )),
            source: ImageSource::Placeholder,
        }
    }
}
