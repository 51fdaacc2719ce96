//! Adapters for the two external image services.
//!
//! Both return `Ok(None)` when the service answered but had nothing usable,
//! and `Err` for transport or protocol failures. The resolver treats the two
//! the same way.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CogError, CogResult};
use crate::http::{HttpClient, HttpRequest, HttpResponse};

pub const DEFAULT_ENCYCLOPEDIA_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_STOCK_ENDPOINT: &str = "https://api.pexels.com/v1/search";

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];
const MAX_IMAGE_CANDIDATES: usize = 3;

fn decode<T: DeserializeOwned>(response: HttpResponse, service: &str) -> CogResult<T> {
    if !response.is_success() {
        return Err(CogError::Http(format!(
            "{service} returned status {}",
            response.status
        )));
    }
    Ok(serde_json::from_value(response.body)?)
}

// ---------------------------------------------------------------------------
// Encyclopedia (MediaWiki action API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QueryResponse<P> {
    query: Option<QueryPages<P>>,
}

#[derive(Debug, Deserialize)]
struct QueryPages<P> {
    #[serde(default = "no_pages")]
    pages: BTreeMap<String, P>,
}

// A plain `#[serde(default)]` would demand `P: Default`.
fn no_pages<P>() -> BTreeMap<String, P> {
    BTreeMap::new()
}

#[derive(Debug, Deserialize)]
struct ImagesPage {
    #[serde(default)]
    images: Vec<ImageTitle>,
}

#[derive(Debug, Deserialize)]
struct ImageTitle {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ImageInfoPage {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

/// Metadata for one encyclopedia image file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageInfo {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

fn is_image_file(title: &str) -> bool {
    let lower = title.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub struct EncyclopediaSource<'a> {
    http: &'a dyn HttpClient,
    endpoint: &'a str,
}

impl<'a> EncyclopediaSource<'a> {
    pub fn new(http: &'a dyn HttpClient, endpoint: &'a str) -> Self {
        Self { http, endpoint }
    }

    /// File titles attached to the article for `phrase`, images only, at most
    /// three.
    pub fn image_titles(&self, phrase: &str) -> CogResult<Vec<String>> {
        let request = HttpRequest::get(self.endpoint)
            .query("action", "query")
            .query("format", "json")
            .query("prop", "images")
            .query("imlimit", "50")
            .query("redirects", "1")
            .query("titles", phrase);
        let response: QueryResponse<ImagesPage> =
            decode(self.http.get_json(&request)?, "encyclopedia")?;

        Ok(response
            .query
            .map(|q| q.pages.into_values().flat_map(|p| p.images).collect::<Vec<_>>())
            .unwrap_or_default()
            .into_iter()
            .map(|img| img.title)
            .filter(|title| is_image_file(title))
            .take(MAX_IMAGE_CANDIDATES)
            .collect())
    }

    pub fn image_info(&self, file_title: &str) -> CogResult<Option<ImageInfo>> {
        let request = HttpRequest::get(self.endpoint)
            .query("action", "query")
            .query("format", "json")
            .query("prop", "imageinfo")
            .query("iiprop", "url|size")
            .query("titles", file_title);
        let response: QueryResponse<ImageInfoPage> =
            decode(self.http.get_json(&request)?, "encyclopedia")?;

        Ok(response
            .query
            .and_then(|q| q.pages.into_values().flat_map(|p| p.imageinfo).next())
            .filter(|info| !info.url.is_empty()))
    }

    /// URL of the first usable image on the article for `phrase`.
    pub fn find(&self, phrase: &str) -> CogResult<Option<ImageInfo>> {
        let titles = self.image_titles(phrase)?;
        debug!("encyclopedia candidates for {phrase:?}: {titles:?}");
        match titles.first() {
            Some(title) => self.image_info(title),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Stock photos (Pexels search API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    medium: String,
}

pub struct StockPhotoSource<'a> {
    http: &'a dyn HttpClient,
    endpoint: &'a str,
    api_key: &'a str,
}

impl<'a> StockPhotoSource<'a> {
    pub fn new(http: &'a dyn HttpClient, endpoint: &'a str, api_key: &'a str) -> Self {
        Self {
            http,
            endpoint,
            api_key,
        }
    }

    /// Medium-size photo URLs for `phrase`, square orientation, best first.
    pub fn search(&self, phrase: &str, per_page: usize) -> CogResult<Vec<String>> {
        let request = HttpRequest::get(self.endpoint)
            .query("query", phrase)
            .query("per_page", per_page.to_string())
            .query("orientation", "square")
            .header("Authorization", self.api_key);
        let response: SearchResponse = decode(self.http.get_json(&request)?, "stock photo")?;
        debug!("stock photo search for {phrase:?} returned {}", response.photos.len());
        Ok(response.photos.into_iter().map(|p| p.src.medium).collect())
    }
}
