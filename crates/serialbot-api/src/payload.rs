// Typed views into the `data` member of successful envelopes.
//
// The API nests everything several levels deep and omits members freely.
// These helpers return `None` for any missing or wrongly-typed level so
// callers decide what "malformed" means for their stage.

use serde_json::{Map, Value};

/// Object key under which the feature map reports a feature's state.
pub const FEATURE_STATUS_FIELD: &str = "status";

/// Fields from `login_with_id_and_password`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginData {
    pub token: Option<String>,
    pub legacy_token: Option<String>,
    /// Unix timestamp (seconds).
    pub expires: Option<i64>,
}

impl LoginData {
    pub fn from_data(data: &Value) -> Self {
        Self {
            token: string_at(data, "token"),
            legacy_token: string_at(data, "legacy_token"),
            expires: data.get("expires").and_then(Value::as_i64),
        }
    }
}

/// `data.map.controller.ids_to_uuids` from `legacy_id_mapping`.
pub fn id_mapping(data: &Value) -> Option<&Map<String, Value>> {
    data.pointer("/map/controller/ids_to_uuids")?.as_object()
}

/// `data.controller_response.result.features` from a `hub.features.list`
/// raw command.
pub fn feature_map(data: &Value) -> Option<&Map<String, Value>> {
    data.pointer("/controller_response/result/features")?
        .as_object()
}

fn string_at(data: &Value, key: &str) -> Option<String> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_data_reads_all_fields() {
        let data = json!({"token": "t", "legacy_token": "l", "expires": 1_700_000_000});
        let parsed = LoginData::from_data(&data);
        assert_eq!(parsed.token.as_deref(), Some("t"));
        assert_eq!(parsed.legacy_token.as_deref(), Some("l"));
        assert_eq!(parsed.expires, Some(1_700_000_000));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let parsed = LoginData::from_data(&json!({"token": ""}));
        assert_eq!(parsed.token, None);
    }

    #[test]
    fn id_mapping_requires_object() {
        let ok = json!({"map": {"controller": {"ids_to_uuids": {"92000000": "u-1"}}}});
        assert!(id_mapping(&ok).is_some());

        let list = json!({"map": {"controller": {"ids_to_uuids": ["92000000"]}}});
        assert!(id_mapping(&list).is_none());
        assert!(id_mapping(&Value::Null).is_none());
    }

    #[test]
    fn feature_map_walks_controller_response() {
        let data = json!({"controller_response": {"result": {"features": {"x": {}}}}});
        assert_eq!(feature_map(&data).map(Map::len), Some(1));
        assert!(feature_map(&json!({"controller_response": {}})).is_none());
    }
}
