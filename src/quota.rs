//! Per-account disk usage lookup.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::info;

use crate::accounts::top_level_keys;
use crate::error::ScanError;
use crate::models::UsageSample;
use crate::whm::ControlPanelApi;

const SUMMARY_ENDPOINT: &str = "accountsummary";

static NUMERIC_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap()
});

type Strategy = fn(&Value) -> Option<&Value>;

/// Known locations of the account record, tried in order.
const RECORD_STRATEGIES: &[Strategy] = &[
    nested_first,
    flat_first,
    nested_object,
    flat_object,
];

fn nested_first(v: &Value) -> Option<&Value> {
    v.get("data")?.get("acct")?.get(0).filter(|r| r.is_object())
}

fn flat_first(v: &Value) -> Option<&Value> {
    v.get("acct")?.get(0).filter(|r| r.is_object())
}

fn nested_object(v: &Value) -> Option<&Value> {
    v.get("data")?.get("acct").filter(|r| r.is_object())
}

fn flat_object(v: &Value) -> Option<&Value> {
    v.get("acct").filter(|r| r.is_object())
}

/// Reads a quota figure the way the panel tends to send it: plain numbers,
/// or strings such as `"512M"` and `"unlimited"`. Anything without a leading
/// number, or that overflows to infinity, counts as zero.
pub fn lenient_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => NUMERIC_PREFIX_RE
            .find(s)
            .and_then(|m| m.as_str().trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// Usage sample from an `accountsummary` payload; `Ok(None)` for unlimited quotas.
pub fn parse_usage(payload: &Value) -> Result<Option<UsageSample>, ScanError> {
    let record = RECORD_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(payload))
        .ok_or_else(|| {
            info!("Account summary response structure: {}", top_level_keys(payload));
            if let Some(data) = payload.get("data") {
                info!("Data section keys: {}", top_level_keys(data));
            }
            ScanError::InvalidResponseFormat(
                "account data not found - unexpected response structure".to_string(),
            )
        })?;

    let used = lenient_number(record.get("diskused"));
    let limit = lenient_number(record.get("disklimit"));
    Ok(UsageSample::new(used, limit))
}

pub fn fetch_usage(
    api: &impl ControlPanelApi,
    account: &str,
) -> Result<Option<UsageSample>, ScanError> {
    let payload = api.call(SUMMARY_ENDPOINT, &[("user", account)])?;
    let sample = parse_usage(&payload)?;
    if sample.is_none() {
        info!("Account {account} has unlimited or zero disk quota");
    }
    Ok(sample)
}
