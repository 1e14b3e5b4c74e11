//! Scripted transport double for tests.
//!
//! Responses are scripted per (method, endpoint); every call is recorded
//! so tests can assert exactly how many requests a flow produced.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::{ApiError, Transport};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub endpoint: String,
    pub body: Option<Value>,
}

enum Script {
    /// Responses served in order; the last one repeats.
    Json(VecDeque<Value>),
    Error(ApiError),
    Binary(Vec<u8>),
}

#[derive(Default)]
pub struct FakeTransport {
    scripts: Mutex<HashMap<(String, String), Script>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(method: &str, endpoint: &str) -> (String, String) {
        (method.to_uppercase(), endpoint.trim_start_matches('/').to_string())
    }

    /// Script a repeating JSON response.
    pub fn respond_json(&self, method: &str, endpoint: &str, value: Value) {
        self.respond_json_seq(method, endpoint, vec![value]);
    }

    /// Script a sequence of JSON responses; the final one repeats.
    pub fn respond_json_seq(&self, method: &str, endpoint: &str, values: Vec<Value>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(Self::key(method, endpoint), Script::Json(values.into()));
    }

    /// Script a repeating transport failure.
    pub fn fail_with(&self, method: &str, endpoint: &str, error: ApiError) {
        self.scripts
            .lock()
            .unwrap()
            .insert(Self::key(method, endpoint), Script::Error(error));
    }

    /// Script a binary (export) response.
    pub fn respond_binary(&self, endpoint: &str, bytes: Vec<u8>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(Self::key("GET", endpoint), Script::Binary(bytes));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls to one (method, endpoint) pair.
    pub fn calls_to(&self, method: &str, endpoint: &str) -> usize {
        let key = Self::key(method, endpoint);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| (c.method.clone(), c.endpoint.clone()) == key)
            .count()
    }

    /// Total number of recorded calls.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, method: &Method, endpoint: &str, body: Option<&Value>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.to_string().to_uppercase(),
            endpoint: endpoint.trim_start_matches('/').to_string(),
            body: body.cloned(),
        });
    }

    fn next_response(&self, method: &Method, endpoint: &str) -> Result<Value, ApiError> {
        let key = Self::key(method.as_str(), endpoint);
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(&key) {
            Some(Script::Json(queue)) => {
                if queue.len() > 1 {
                    Ok(queue.pop_front().unwrap_or(Value::Null))
                } else {
                    Ok(queue.front().cloned().unwrap_or(Value::Null))
                }
            }
            Some(Script::Error(error)) => Err(error.clone()),
            Some(Script::Binary(_)) => Err(ApiError::InvalidResponse(format!(
                "binary script hit via send: {} {}",
                method, endpoint
            ))),
            None => Err(ApiError::InvalidResponse(format!(
                "no scripted response for {} {}",
                method, endpoint
            ))),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.record(&method, endpoint, body);
        self.next_response(&method, endpoint)
    }

    async fn send_binary(&self, endpoint: &str) -> Result<Vec<u8>, ApiError> {
        self.record(&Method::GET, endpoint, None);
        let key = Self::key("GET", endpoint);
        let scripts = self.scripts.lock().unwrap();
        match scripts.get(&key) {
            Some(Script::Binary(bytes)) => Ok(bytes.clone()),
            Some(Script::Error(error)) => Err(error.clone()),
            _ => Err(ApiError::InvalidResponse(format!(
                "no scripted binary response for GET {}",
                endpoint
            ))),
        }
    }
}
