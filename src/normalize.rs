//! Boundary normalisation for loosely typed backend columns.
//!
//! Records arriving from the backend carry nullable columns and free-form JSON
//! lists. These helpers are used as `deserialize_with` adapters so the shape is
//! fixed once, at decode time.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Any JSON value into a list of non-empty, trimmed strings.
///
/// Non-array values (including `null`) become an empty list and non-string
/// entries are dropped.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(strings_from_value(value.as_ref()))
}

pub(crate) fn strings_from_value(value: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Optional text where blank strings mean "absent".
pub(crate) fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.and_then(|text| {
        let trimmed = text.trim();

        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }))
}

/// Stock count, clamping negatives and non-numbers to zero.
pub(crate) fn stock<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(stock_from_value(value.as_ref()).unwrap_or(0))
}

/// Optional stock count; `null` stays absent.
pub(crate) fn optional_stock<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(stock_from_value(value.as_ref()))
}

fn stock_from_value(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(number) => Some(
            number
                .as_i64()
                .map_or(0, |count| u32::try_from(count.max(0)).unwrap_or(u32::MAX)),
        ),
        Value::String(text) => Some(text.trim().parse::<u32>().unwrap_or(0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "string_list")]
        sizes: Vec<String>,

        #[serde(default, deserialize_with = "non_empty")]
        color: Option<String>,

        #[serde(default, deserialize_with = "stock")]
        stock: u32,

        #[serde(default, deserialize_with = "optional_stock")]
        spare: Option<u32>,
    }

    #[test]
    fn array_of_strings_is_kept_in_order() -> TestResult {
        let row: Row = serde_json::from_str(r#"{"sizes": ["P", " M ", "", 3, "G"]}"#)?;

        assert_eq!(row.sizes, ["P", "M", "G"]);

        Ok(())
    }

    #[test]
    fn non_array_lists_become_empty() -> TestResult {
        let row: Row = serde_json::from_str(r#"{"sizes": {"P": true}}"#)?;
        let null: Row = serde_json::from_str(r#"{"sizes": null}"#)?;

        assert!(row.sizes.is_empty());
        assert!(null.sizes.is_empty());

        Ok(())
    }

    #[test]
    fn blank_text_is_absent() -> TestResult {
        let row: Row = serde_json::from_str(r#"{"color": "  "}"#)?;

        assert_eq!(row.color, None);

        Ok(())
    }

    #[test]
    fn negative_stock_clamps_to_zero() -> TestResult {
        let row: Row = serde_json::from_str(r#"{"stock": -4, "spare": null}"#)?;

        assert_eq!(row.stock, 0);
        assert_eq!(row.spare, None);

        Ok(())
    }
}
