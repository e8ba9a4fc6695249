//! Ordered extraction rules for the response shapes the backend has been
//! seen to produce. Each table is probed top to bottom and the first match
//! wins, so alias priority lives here and nowhere else.

use serde_json::Value;

const TOKEN_RULES: &[&[&str]] = &[
    &["token"],
    &["accessToken"],
    &["access_token"],
    &["data", "token"],
    &["data", "accessToken"],
    &["data", "access_token"],
];

const USER_RULES: &[&[&str]] = &[&["user"], &["data", "user"], &["data"]];

const LIST_RULES: &[&[&str]] = &[&["data"], &["transactions"]];

const RECORD_RULES: &[&[&str]] = &[&["data"], &["transaction"]];

fn pluck<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(payload, |value, key| value.get(key))
}

/// First non-empty token string found in the payload, if any.
pub fn bearer_token(payload: &Value) -> Option<String> {
    TOKEN_RULES
        .iter()
        .filter_map(|path| pluck(payload, path))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

/// First object-shaped user record found in the payload, if any.
pub fn user_record(payload: &Value) -> Option<Value> {
    USER_RULES
        .iter()
        .filter_map(|path| pluck(payload, path))
        .find(|value| value.is_object())
        .cloned()
}

/// The transaction array, unwrapped from whichever envelope the server
/// used; an empty list when no array is found.
pub fn transaction_list(payload: &Value) -> Vec<Value> {
    LIST_RULES
        .iter()
        .filter_map(|path| pluck(payload, path))
        .chain(std::iter::once(payload))
        .find_map(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// The single-transaction object, unwrapped from whichever envelope the
/// server used; the raw payload when no wrapper matches.
pub fn transaction_record(payload: &Value) -> Value {
    RECORD_RULES
        .iter()
        .filter_map(|path| pluck(payload, path))
        .find(|value| value.is_object())
        .cloned()
        .unwrap_or_else(|| payload.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_prefers_direct_fields_over_data() {
        let payload = json!({
            "accessToken": "direct",
            "data": { "token": "nested" }
        });
        assert_eq!(bearer_token(&payload).as_deref(), Some("direct"));
    }

    #[test]
    fn token_alias_priority_is_fixed() {
        let payload = json!({ "access_token": "snake", "accessToken": "camel" });
        assert_eq!(bearer_token(&payload).as_deref(), Some("camel"));

        let nested = json!({ "data": { "access_token": "nested-snake" } });
        assert_eq!(bearer_token(&nested).as_deref(), Some("nested-snake"));
    }

    #[test]
    fn token_skips_empty_strings() {
        let payload = json!({ "token": "  ", "data": { "token": "real" } });
        assert_eq!(bearer_token(&payload).as_deref(), Some("real"));
        assert_eq!(bearer_token(&json!({})), None);
    }

    #[test]
    fn user_prefers_top_level_user() {
        let payload = json!({
            "user": { "name": "a" },
            "data": { "user": { "name": "b" } }
        });
        assert_eq!(user_record(&payload), Some(json!({ "name": "a" })));
    }

    #[test]
    fn user_falls_back_to_data_object() {
        let payload = json!({ "data": { "username": "admin" } });
        assert_eq!(user_record(&payload), Some(json!({ "username": "admin" })));
        assert_eq!(user_record(&json!({ "token": "t" })), None);
    }

    #[test]
    fn user_ignores_non_object_shapes() {
        assert_eq!(user_record(&json!({ "user": "admin" })), None);
        assert_eq!(user_record(&json!([1, 2])), None);
    }

    #[test]
    fn list_unwraps_each_envelope_in_order() {
        let wrapped = json!({ "data": [1], "transactions": [2, 3] });
        assert_eq!(transaction_list(&wrapped), vec![json!(1)]);

        let named = json!({ "transactions": [2, 3] });
        assert_eq!(transaction_list(&named).len(), 2);

        let raw = json!([4, 5, 6]);
        assert_eq!(transaction_list(&raw).len(), 3);

        assert!(transaction_list(&json!({ "count": 0 })).is_empty());
    }

    #[test]
    fn record_unwraps_each_envelope_in_order() {
        let wrapped = json!({ "data": { "id": "a" }, "transaction": { "id": "b" } });
        assert_eq!(transaction_record(&wrapped), json!({ "id": "a" }));

        let named = json!({ "transaction": { "id": "b" } });
        assert_eq!(transaction_record(&named), json!({ "id": "b" }));

        let raw = json!({ "id": "c" });
        assert_eq!(transaction_record(&raw), raw);
    }
}
