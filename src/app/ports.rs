use async_trait::async_trait;

/// Outbound HTTP used by the content gateway and the submission client.
/// Transport failures (connect errors, timeouts) are reported as `Err`;
/// any HTTP status, including errors, is an `Ok` response.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, String>;
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, String>;
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub bytes: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
