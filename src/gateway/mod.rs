//! Reads resource collections from the CMS REST API.
//!
//! Every GET goes through the same path: resolve the URL against the right
//! API surface, answer from the TTL cache when possible, otherwise request
//! with retries. A 404 is final; anything else (transport error, non-2xx
//! status, unparseable body) is retried with exponential backoff until the
//! attempt budget runs out.

pub mod cache;

use crate::app::ports::HttpClientPort;
use crate::config::CmsConfig;
use crate::constants::{EVENTS_ENDPOINT, PAGES_PREFIX};
use crate::content::Event;
use crate::error::{Result, SiteError};
use crate::infra::http_client::ReqwestHttp;
use crate::metrics::{self, MetricName};
use crate::types::{CmsEntity, RawRecord};
use cache::TtlCache;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Attempt budget and backoff for CMS reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// The wait after failed attempt `n` is `backoff_base * 2^n`
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Query parameters understood by the collection endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub per_page: Option<u32>,
    pub embed: bool,
}

impl FetchOptions {
    pub fn per_page(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            embed: false,
        }
    }

    pub fn embedded() -> Self {
        Self {
            per_page: None,
            embed: true,
        }
    }

    pub fn with_per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }

    fn query_string(&self) -> String {
        let mut params = Vec::new();
        if let Some(per_page) = self.per_page {
            params.push(format!("per_page={}", per_page));
        }
        if self.embed {
            params.push("_embed=true".to_string());
        }
        params.join("&")
    }
}

pub struct ContentGateway {
    http: Arc<dyn HttpClientPort>,
    api_url: String,
    acf_url: String,
    retry: RetryPolicy,
    cache: TtlCache,
}

impl ContentGateway {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        api_url: impl Into<String>,
        acf_url: impl Into<String>,
        retry: RetryPolicy,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            acf_url: acf_url.into().trim_end_matches('/').to_string(),
            retry,
            cache: TtlCache::new(cache_ttl),
        }
    }

    pub fn from_config(config: &CmsConfig) -> Result<Self> {
        let http = Arc::new(ReqwestHttp::new(config.timeout())?);
        Ok(Self::with_client(http, config))
    }

    /// Builds a gateway from configuration around an existing HTTP client.
    pub fn with_client(http: Arc<dyn HttpClientPort>, config: &CmsConfig) -> Self {
        Self::new(
            http,
            config.api_url.clone(),
            config.acf_url.clone(),
            RetryPolicy {
                max_attempts: config.max_attempts,
                backoff_base: config.backoff_base(),
            },
            config.cache_ttl(),
        )
    }

    /// Page lookups live on the custom-fields API, everything else on the
    /// standard REST API.
    pub fn resolve_url(&self, endpoint: &str, options: &FetchOptions) -> String {
        let base = if endpoint.starts_with(PAGES_PREFIX) {
            &self.acf_url
        } else {
            &self.api_url
        };
        let query = options.query_string();
        if query.is_empty() {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}{}?{}", base, endpoint, query)
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Fetches a collection endpoint and normalizes each record into `T`.
    /// Records that fail the shape check are logged and skipped.
    #[instrument(skip(self, options), fields(kind = T::KIND))]
    pub async fn fetch_collection<T: CmsEntity>(
        &self,
        endpoint: &str,
        options: &FetchOptions,
    ) -> Result<Vec<T>> {
        let records = self.fetch_raw(endpoint, options).await?;
        Ok(normalize_records(&records))
    }

    /// Fetches a collection endpoint without normalizing it.
    pub async fn fetch_raw(&self, endpoint: &str, options: &FetchOptions) -> Result<Vec<RawRecord>> {
        match self.get_json(endpoint, options, BodyShape::Array).await? {
            Value::Array(records) => Ok(records),
            other => Err(wrong_shape(endpoint, 1, &other)),
        }
    }

    /// Fetches a single JSON document, e.g. a page by id.
    #[instrument(skip(self))]
    pub async fn fetch_document(&self, endpoint: &str) -> Result<Value> {
        self.get_json(endpoint, &FetchOptions::default(), BodyShape::Any)
            .await
    }

    /// Finds an event by slug by scanning the full event collection.
    /// Absence is `Ok(None)`; only a failed fetch is an error.
    #[instrument(skip(self))]
    pub async fn fetch_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let events: Vec<Event> = self
            .fetch_collection(EVENTS_ENDPOINT, &FetchOptions::embedded())
            .await?;
        Ok(events.into_iter().find(|event| event.slug == slug))
    }

    /// Only bodies matching `shape` reach the cache. A well-formed body of the
    /// wrong shape fails the read at once.
    async fn get_json(
        &self,
        endpoint: &str,
        options: &FetchOptions,
        shape: BodyShape,
    ) -> Result<Value> {
        let url = self.resolve_url(endpoint, options);
        if let Some(hit) = self.cache.get(&url) {
            debug!(url = %url, "CMS cache hit");
            metrics::increment(MetricName::CmsCacheHits);
            return Ok(hit);
        }

        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            metrics::increment_labeled(MetricName::CmsRequests, "endpoint", endpoint);
            debug!(url = %url, attempt, "Requesting CMS");

            match self.http.get(&url).await {
                Ok(resp) if resp.status == 404 => {
                    warn!(url = %url, "CMS resource not found");
                    metrics::increment(MetricName::CmsFailures);
                    return Err(SiteError::NotFound(url));
                }
                Ok(resp) if resp.is_success() => match serde_json::from_slice::<Value>(&resp.bytes) {
                    Ok(value) if shape.accepts(&value) => {
                        self.cache.insert(url, value.clone());
                        return Ok(value);
                    }
                    Ok(value) => {
                        error!(url = %url, attempt, kind = json_kind(&value), "CMS returned an unexpected body");
                        metrics::increment(MetricName::CmsFailures);
                        return Err(wrong_shape(endpoint, attempt, &value));
                    }
                    Err(e) => last_error = format!("invalid JSON body: {}", e),
                },
                Ok(resp) => last_error = format!("API error: {}", resp.status),
                Err(e) => last_error = e,
            }

            if attempt < max_attempts {
                let delay = self.retry.delay_for(attempt);
                warn!(
                    url = %url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %last_error,
                    "CMS request failed, retrying"
                );
                metrics::increment(MetricName::CmsRetries);
                tokio::time::sleep(delay).await;
            }
        }

        error!(url = %url, attempts = max_attempts, error = %last_error, "CMS request failed");
        metrics::increment(MetricName::CmsFailures);
        Err(SiteError::Fetch {
            endpoint: endpoint.to_string(),
            attempts: max_attempts,
            message: last_error,
        })
    }
}

/// Maps raw records into entities, dropping those that fail the shape check.
pub fn normalize_records<T: CmsEntity>(records: &[RawRecord]) -> Vec<T> {
    let mut items = Vec::with_capacity(records.len());
    let mut dropped = 0u64;
    for (index, record) in records.iter().enumerate() {
        match T::from_record(record) {
            Ok(item) => items.push(item),
            Err(e) => {
                dropped += 1;
                warn!(kind = T::KIND, index, error = %e, "Dropping malformed CMS record");
            }
        }
    }
    if dropped > 0 {
        metrics::increment_by(MetricName::RecordsDropped, dropped);
    }
    items
}

/// Top-level JSON shape a read expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyShape {
    Array,
    Any,
}

impl BodyShape {
    fn accepts(self, value: &Value) -> bool {
        match self {
            BodyShape::Array => value.is_array(),
            BodyShape::Any => true,
        }
    }
}

fn wrong_shape(endpoint: &str, attempts: u32, value: &Value) -> SiteError {
    SiteError::Fetch {
        endpoint: endpoint.to_string(),
        attempts,
        message: format!("expected a JSON array, got {}", json_kind(value)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
