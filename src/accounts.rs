//! Account enumeration: list every account on the server and keep the ones
//! owned by the configured reseller.

use serde_json::Value;
use tracing::info;

use crate::error::ScanError;
use crate::models::Account;
use crate::whm::ControlPanelApi;

const LIST_ENDPOINT: &str = "listaccts";

type Strategy = fn(&Value) -> Option<&Vec<Value>>;

/// Known locations of the account array, tried in order.
const ACCOUNT_ARRAY_STRATEGIES: &[Strategy] = &[nested_acct, flat_acct];

fn nested_acct(v: &Value) -> Option<&Vec<Value>> {
    v.get("data")?.get("acct")?.as_array()
}

fn flat_acct(v: &Value) -> Option<&Vec<Value>> {
    v.get("acct")?.as_array()
}

/// Extract every account record from a `listaccts` payload.
pub fn parse_accounts(payload: &Value) -> Result<Vec<Account>, ScanError> {
    let records = ACCOUNT_ARRAY_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(payload))
        .ok_or_else(|| {
            info!("API Response structure: {}", top_level_keys(payload));
            ScanError::InvalidResponseFormat("no account data found".to_string())
        })?;

    Ok(records
        .iter()
        .filter_map(|record| {
            let user = record.get("user")?.as_str()?.to_string();
            let owner = record
                .get("owner")
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(Account { user, owner })
        })
        .collect())
}

/// Users owned by `reseller`, in API order.
pub fn list_owned_accounts(
    api: &impl ControlPanelApi,
    reseller: &str,
) -> Result<Vec<String>, ScanError> {
    let payload = api.call(LIST_ENDPOINT, &[])?;
    let accounts = parse_accounts(&payload)?;
    info!("Found {} total accounts on server", accounts.len());

    let owned: Vec<String> = accounts
        .into_iter()
        .inspect(|a| {
            info!(
                "Account: {}, Owner: {}",
                a.user,
                a.owner.as_deref().unwrap_or("")
            )
        })
        .filter(|a| a.is_owned_by(reseller))
        .map(|a| a.user)
        .collect();

    info!("Found {} accounts owned by reseller: {reseller}", owned.len());
    Ok(owned)
}

pub(crate) fn top_level_keys(payload: &Value) -> String {
    match payload.as_object() {
        Some(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("{keys:?}")
        }
        None => "(not an object)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_nested_and_flat_layouts() {
        let nested = json!({"data": {"acct": [{"user": "alice", "owner": "res"}]}});
        let flat = json!({"acct": [{"user": "bob", "owner": "root"}]});

        assert_eq!(
            parse_accounts(&nested).unwrap(),
            vec![Account { user: "alice".into(), owner: Some("res".into()) }]
        );
        assert_eq!(
            parse_accounts(&flat).unwrap(),
            vec![Account { user: "bob".into(), owner: Some("root".into()) }]
        );
    }

    #[test]
    fn nested_layout_wins_over_flat() {
        let both = json!({
            "data": {"acct": [{"user": "inner", "owner": "res"}]},
            "acct": [{"user": "outer", "owner": "res"}]
        });
        let accounts = parse_accounts(&both).unwrap();
        assert_eq!(accounts[0].user, "inner");
    }

    #[test]
    fn unknown_layout_is_invalid_format() {
        for payload in [json!({"metadata": {}}), json!([1, 2]), json!({"acct": "nope"})] {
            assert!(matches!(
                parse_accounts(&payload),
                Err(ScanError::InvalidResponseFormat(_))
            ));
        }
    }

    #[test]
    fn records_without_user_are_dropped() {
        let payload = json!({"acct": [{"owner": "res"}, {"user": "carol"}]});
        assert_eq!(
            parse_accounts(&payload).unwrap(),
            vec![Account { user: "carol".into(), owner: None }]
        );
    }

    #[test]
    fn owner_match_is_exact() {
        let account = Account { user: "a".into(), owner: Some("Reseller".into()) };
        assert!(account.is_owned_by("Reseller"));
        assert!(!account.is_owned_by("reseller"));
        assert!(!account.is_owned_by("Reseller "));
        assert!(!Account { user: "b".into(), owner: None }.is_owned_by("Reseller"));
    }
}
