//! Executes the core's `HttpRequest`s.

use movies_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Outcome};
use tracing::debug;

pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Outcome;
}

/// Blocking transport over a shared ureq agent.
///
/// 4xx/5xx are returned as responses, not errors; only failures that produce
/// no response at all become `ApiError::Transport`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Outcome {
        debug!(method = %request.method, url = %request.url, "sending request");
        let agent = &self.agent;
        let url = request.url.as_str();
        let result = match (request.method, request.body) {
            (HttpMethod::Get, _) => agent.get(url).call(),
            (HttpMethod::Delete, _) => agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => agent
                .post(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => agent.post(url).send_empty(),
            (HttpMethod::Put, Some(body)) => agent
                .put(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => agent.put(url).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Outcome,
{
    fn execute(&self, request: HttpRequest) -> Outcome {
        self(request)
    }
}
