//! Trained-flag normalisation
//!
//! Upstream rows encode "trained today" as a boolean, a 0/1 integer or a
//! string depending on how the row was written (form, bulk import, seed
//! script). This collapses all of them to a strict `bool`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalise a heterogeneous trained flag
///
/// - `true`/`false` pass through
/// - the number `1` is true, every other number is false
/// - strings are trimmed and compared case-insensitively against `"true"` and `"1"`
/// - everything else (null, arrays, objects) is false
pub fn normalize_trained(input: &Value) -> bool {
    match input {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

/// Serde adapter that normalises the flag while deserialising
pub fn deserialize_trained<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(normalize_trained(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!(1))]
    #[case(json!(1.0))]
    #[case(json!("1"))]
    #[case(json!("true"))]
    #[case(json!("TRUE"))]
    #[case(json!("  True "))]
    #[case(json!(true))]
    fn test_truthy_inputs(#[case] input: Value) {
        assert!(normalize_trained(&input), "{input} should be trained");
    }

    #[rstest]
    #[case(json!(0))]
    #[case(json!(2))]
    #[case(json!(-1))]
    #[case(json!("0"))]
    #[case(json!("false"))]
    #[case(json!(false))]
    #[case(json!(null))]
    #[case(json!(""))]
    #[case(json!("yes"))]
    #[case(json!([1]))]
    #[case(json!({"trained": true}))]
    fn test_falsy_inputs(#[case] input: Value) {
        assert!(!normalize_trained(&input), "{input} should not be trained");
    }

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_trained")]
        trained: bool,
    }

    #[test]
    fn test_deserialize_adapter() {
        let row: Row = serde_json::from_str(r#"{"trained": "1"}"#).unwrap();
        assert!(row.trained);

        let row: Row = serde_json::from_str(r#"{"trained": null}"#).unwrap();
        assert!(!row.trained);

        // Missing field behaves like undefined
        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(!row.trained);
    }
}
