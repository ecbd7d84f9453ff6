use crate::app::ports::{HttpClientPort, HttpResponse};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;

const JSON_CONTENT_TYPE: &str = "application/json";

/// reqwest-backed client with a fixed per-request timeout
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meatra-site/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn into_response(resp: reqwest::Response) -> std::result::Result<HttpResponse, String> {
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await.map_err(|e| e.to_string())?.to_vec();
        Ok(HttpResponse { status, bytes })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, String> {
        let resp = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::into_response(resp).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> std::result::Result<HttpResponse, String> {
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Self::into_response(resp).await
    }
}
