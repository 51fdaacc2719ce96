//! Blocking [`HttpClient`] backed by `ureq`.

use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use cogtest_core::{CogError, CogResult, HttpClient, HttpRequest, HttpResponse};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("cogtest/", env!("CARGO_PKG_VERSION"));

pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl HttpClient for UreqClient {
    fn get_json(&self, request: &HttpRequest) -> CogResult<HttpResponse> {
        let mut call = self.agent.get(&request.url);
        for (key, value) in &request.query {
            call = call.query(key, value);
        }
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }

        match call.call() {
            Ok(response) => {
                let status = response.status();
                let body: Value = response
                    .into_json()
                    .map_err(|e| CogError::Http(format!("unreadable body from {}: {e}", request.url)))?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                debug!("{} answered {status}", request.url);
                let body = response.into_json().unwrap_or(Value::Null);
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(e)) => {
                Err(CogError::Http(format!("GET {} failed: {e}", request.url)))
            }
        }
    }
}
