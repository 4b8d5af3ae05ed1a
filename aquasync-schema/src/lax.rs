use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts either a JSON string or a JSON number and yields its string form.
///
/// Backend identifiers are numeric on some deployments and opaque strings on others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for an identifier",
        )),
    }
}

/// Like [`string_or_number`], but `null` and missing values become `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;

    match v {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom(
            "expected a string, a number or null for an identifier",
        )),
    }
}

/// Treats an explicit `null` like a missing field and yields `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
    }

    #[test]
    fn numeric_ids_become_strings() {
        let probe: Probe = serde_json::from_str(r#"{"id": 42}"#).expect("parse numeric id");
        assert_eq!(probe.id, "42");
    }

    #[test]
    fn string_ids_pass_through() {
        let probe: Probe = serde_json::from_str(r#"{"id": "abc"}"#).expect("parse string id");
        assert_eq!(probe.id, "abc");
    }

    #[test]
    fn other_shapes_are_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": true}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"id": [1]}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Labelled {
        #[serde(default, deserialize_with = "super::null_as_default")]
        title: String,
        #[serde(default, deserialize_with = "super::null_as_default")]
        flag: bool,
    }

    #[test]
    fn null_reads_as_default() {
        let parsed: Labelled =
            serde_json::from_str(r#"{"title": null, "flag": null}"#).expect("parse nulls");
        assert_eq!(parsed.title, "");
        assert!(!parsed.flag);

        let parsed: Labelled = serde_json::from_str("{}").expect("parse empty object");
        assert_eq!(parsed.title, "");
    }
}
