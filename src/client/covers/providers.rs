/// External sources consumed by the cover pipeline.
///
/// Two lookups exist: a dedicated cover service addressed by ISBN or by
/// title+author (carousel path), and a general book-metadata search whose
/// volumes carry image links in several resolutions (self-healing path).
/// Both are consumed over plain HTTPS with no caching and no rate-limit
/// handling; callers treat every error as "no data".
use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::client::covers::image::secure_image_url;
use crate::error::AppResult;

/// Cover-lookup service keyed by ISBN or title+author
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CoverLookup: Send + Sync {
    async fn cover_by_isbn(&self, isbn: &str) -> AppResult<Option<String>>;
    async fn cover_by_title_author(&self, title: &str, author: &str)
        -> AppResult<Option<String>>;
}

/// Book-metadata search returning volumes with image links
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookMetadata: Send + Sync {
    /// ISBN-keyed query (higher precision)
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<VolumeInfo>>;
    /// Free-text keyword query
    async fn find_by_query(&self, query: &str) -> AppResult<Option<VolumeInfo>>;
}

/// Whether a stored image URL currently loads
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageProbe: Send + Sync {
    async fn loads(&self, url: &str) -> bool;
}

// Metadata wire types

#[derive(Debug, Clone, Deserialize, Default)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Clone, Deserialize)]
struct Volume {
    #[serde(rename = "volumeInfo", default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub extra_large: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub small_thumbnail: Option<String>,
}

impl ImageLinks {
    /// Highest-resolution link available, normalized for display
    pub fn best(&self) -> Option<String> {
        self.extra_large
            .as_deref()
            .or(self.large.as_deref())
            .or(self.medium.as_deref())
            .or(self.thumbnail.as_deref())
            .or(self.small_thumbnail.as_deref())
            .map(secure_image_url)
    }
}

/// Dedicated cover-lookup service client
#[derive(Clone)]
pub struct BookcoverService {
    http_client: HttpClient,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CoverResponse {
    url: Option<String>,
}

impl BookcoverService {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl CoverLookup for BookcoverService {
    async fn cover_by_isbn(&self, isbn: &str) -> AppResult<Option<String>> {
        let url = format!("{}/bookcover/{}", self.base_url, isbn);
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let data: CoverResponse = response.json().await?;
        Ok(data.url)
    }

    async fn cover_by_title_author(
        &self,
        title: &str,
        author: &str,
    ) -> AppResult<Option<String>> {
        let url = format!("{}/bookcover", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("book_title", title), ("author_name", author)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let data: CoverResponse = response.json().await?;
        Ok(data.url)
    }
}

/// Volumes search API client
#[derive(Clone)]
pub struct VolumesApi {
    http_client: HttpClient,
    base_url: String,
}

impl VolumesApi {
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    async fn search(&self, query: &str, max_results: Option<u32>) -> AppResult<Option<VolumeInfo>> {
        let url = format!("{}/books/v1/volumes", self.base_url);
        let mut request = self.http_client.get(&url).query(&[("q", query)]);
        if let Some(max) = max_results {
            request = request.query(&[("maxResults", max.to_string())]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let results: VolumesResponse = response.json().await?;
        Ok(results.items.into_iter().next().map(|v| v.volume_info))
    }
}

#[async_trait::async_trait]
impl BookMetadata for VolumesApi {
    async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<VolumeInfo>> {
        self.search(&format!("isbn:{}", isbn), None).await
    }

    async fn find_by_query(&self, query: &str) -> AppResult<Option<VolumeInfo>> {
        self.search(query, Some(1)).await
    }
}

/// Probe that fetches the URL and reports whether it answered successfully
#[derive(Clone)]
pub struct HttpImageProbe {
    http_client: HttpClient,
}

impl HttpImageProbe {
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
        }
    }
}

impl Default for HttpImageProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ImageProbe for HttpImageProbe {
    async fn loads(&self, url: &str) -> bool {
        match self.http_client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
