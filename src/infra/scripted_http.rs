use crate::app::ports::{HttpClientPort, HttpResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// A canned answer for one request
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Body { status: u16, body: String },
    Transport(String),
}

impl ScriptedReply {
    pub fn json(status: u16, body: Value) -> Self {
        ScriptedReply::Body {
            status,
            body: body.to_string(),
        }
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        ScriptedReply::Body {
            status,
            body: body.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ScriptedReply::Transport(message.into())
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

/// In-memory HTTP client for development/testing.
///
/// Replies are queued per exact URL and consumed in order; the last queued
/// reply keeps answering once the queue is down to one. Unknown URLs get 404.
pub struct ScriptedHttp {
    replies: Arc<Mutex<HashMap<String, VecDeque<ScriptedReply>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for ScriptedHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn on(&self, url: &str, reply: ScriptedReply) -> &Self {
        let mut replies = self.replies.lock().unwrap();
        replies.entry(url.to_string()).or_default().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests made to `url`, any method
    pub fn count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    fn answer(&self, method: &'static str, url: &str, body: Option<Value>) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            body,
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        debug!(method, url, "Scripted HTTP request");

        match reply {
            Some(ScriptedReply::Body { status, body }) => Ok(HttpResponse {
                status,
                bytes: body.into_bytes(),
            }),
            Some(ScriptedReply::Transport(message)) => Err(message),
            None => Ok(HttpResponse {
                status: 404,
                bytes: Vec::new(),
            }),
        }
    }
}

#[async_trait]
impl HttpClientPort for ScriptedHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, String> {
        self.answer("GET", url, None)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<HttpResponse, String> {
        self.answer("POST", url, Some(body.clone()))
    }
}
