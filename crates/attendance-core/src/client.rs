use crate::action::HttpMethod;
use crate::config::ConsoleConfig;
use crate::error::{ActionError, Result};
use serde_json::Value;

/// What came back in the response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Json(Value),
    /// Non-empty body that is not JSON. Holds the parse error.
    Malformed(String),
}

impl ResponseBody {
    fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(text) {
            Ok(v) => ResponseBody::Json(v),
            Err(e) => ResponseBody::Malformed(e.to_string()),
        }
    }

    pub fn json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(v) => Some(v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// The `error` string the backend puts in failure bodies.
    pub fn error_message(&self) -> Option<&str> {
        self.body
            .json()?
            .get("error")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Thin wrapper over `reqwest::Client` bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ConsoleConfig,
}

impl ApiClient {
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Send one request. GET puts `payload` in the query string; POST sends
    /// it as a JSON object.
    ///
    /// Only transport failures are errors here; any HTTP status is returned
    /// as an [`ApiResponse`] for the caller to interpret.
    pub async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        payload: &[(&str, String)],
    ) -> std::result::Result<ApiResponse, ActionError> {
        let url = self.config.endpoint_url(endpoint);
        tracing::debug!(method = method.as_str(), %url, fields = payload.len(), "sending request");

        let request = match method {
            HttpMethod::Get => {
                let req = self.http.get(&url);
                if payload.is_empty() {
                    req
                } else {
                    req.query(payload)
                }
            }
            HttpMethod::Post => {
                let body: serde_json::Map<String, Value> = payload
                    .iter()
                    .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
                    .collect();
                self.http.post(&url).json(&body)
            }
        };

        let response = request.send().await.map_err(|e| self.network_error(&url, e))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| self.network_error(&url, e))?;

        tracing::debug!(%url, status, bytes = text.len(), "received response");
        Ok(ApiResponse {
            status,
            body: ResponseBody::parse(&text),
        })
    }

    fn network_error(&self, url: &str, err: reqwest::Error) -> ActionError {
        let detail = if err.is_timeout() {
            format!(
                "request to {url} timed out after {}s",
                self.config.request_timeout_secs
            )
        } else {
            format!("request to {url} failed: {err}")
        };
        tracing::error!("{detail}");
        ActionError::Network(detail)
    }
}
