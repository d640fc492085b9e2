//! WHM JSON API client and the connectivity gate that guards every run.

use serde_json::Value;
use tracing::{debug, info};
use ureq::Agent;
use ureq::tls::TlsConfig;

use crate::config::WhmConfig;
use crate::error::{ApiError, excerpt};

const USER_AGENT: &str = concat!("WHM-Disk-Monitor/", env!("CARGO_PKG_VERSION"));
const LOG_EXCERPT_CHARS: usize = 500;
const ERROR_EXCERPT_CHARS: usize = 200;
/// Large resellers produce `listaccts` payloads past ureq's 10 MiB default.
pub(crate) const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Seam over the control panel so the scanners can run against fixtures.
pub trait ControlPanelApi {
    /// Authenticated GET of `/json-api/<endpoint>`; `Ok` only for HTTP 200 with a JSON body.
    fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ApiError>;
}

impl<T: ControlPanelApi + ?Sized> ControlPanelApi for &T {
    fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        (**self).call(endpoint, params)
    }
}

pub struct WhmClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl WhmClient {
    pub fn new(config: &WhmConfig) -> Self {
        Self::with_base_url(config, config.base_url())
    }

    /// Same as [`WhmClient::new`] but against an explicit `scheme://host:port`.
    pub fn with_base_url(config: &WhmConfig, base_url: impl Into<String>) -> Self {
        let tls = TlsConfig::builder()
            .disable_verification(config.insecure)
            .build();
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .tls_config(tls)
            .build()
            .into();

        WhmClient {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            authorization: format!("whm {}:{}", config.user, config.token),
        }
    }
}

impl ControlPanelApi for WhmClient {
    fn call(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = format!("{}/json-api/{}", self.base_url, endpoint);
        info!("Making API call to: {endpoint}");
        debug!("GET {url} params={params:?}");

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", self.authorization.as_str())
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json");
        for (key, value) in params {
            request = request.query(*key, *value);
        }

        let mut response = request.call().map_err(|e| {
            info!("Connection error: {e}");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        info!("HTTP Response Code: {status}");

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec();

        if status != 200 {
            let text = body
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default();
            info!("HTTP Error Response: {}", excerpt(&text, LOG_EXCERPT_CHARS));
            return Err(ApiError::HttpStatus {
                status,
                detail: status_detail(&text),
            });
        }

        let body = body.map_err(|e| ApiError::Transport(format!("read response body: {e}")))?;
        serde_json::from_slice(&body).map_err(|e| {
            info!(
                "JSON Response: {}",
                excerpt(&String::from_utf8_lossy(&body), LOG_EXCERPT_CHARS)
            );
            ApiError::Decode(e.to_string())
        })
    }
}

/// Structured `errors` list when the body carries one, else a raw excerpt.
fn status_detail(body: &str) -> String {
    let errors = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.get("errors").and_then(Value::as_array).map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
        })
    });

    match errors {
        Some(list) if !list.is_empty() => format!("API Error: {}", list.join(", ")),
        _ => format!("Response: {}", excerpt(body, ERROR_EXCERPT_CHARS)),
    }
}

/// Calls `version` and succeeds only if the payload names a version.
pub fn check_connectivity(api: &impl ControlPanelApi) -> bool {
    info!("Testing API connection...");

    match api.call("version", &[]) {
        Ok(data) => match version_of(&data) {
            Some(version) => {
                info!("API connection successful. WHM Version: {version}");
                true
            }
            None => {
                info!("Unexpected response format from version API");
                false
            }
        },
        Err(e) => {
            info!("API connection test failed: {e}");
            false
        }
    }
}

fn version_of(data: &Value) -> Option<String> {
    match data.get("version")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        number @ Value::Number(_) => Some(number.to_string()),
        _ => None,
    }
}
