//! Shared pieces of the per-user collections (projects, certificates,
//! notes, resumes).

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A record the client can save in a collection. Every record needs a
/// non-empty title.
pub trait Titled {
    fn title(&self) -> Option<&str>;
}

/// Index of the first record without a usable title.
pub fn first_untitled<T: Titled>(records: &[T]) -> Option<usize> {
    records
        .iter()
        .position(|r| r.title().is_none_or(|t| t.trim().is_empty()))
}

/// Response to a full-overwrite save.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveResponse {
    pub success: bool,
    /// Number of records now stored
    pub count: usize,
}

/// Trim a client string, mapping blank to `None`.
pub fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First non-blank value among the spellings a client may send for one
/// field, in order of precedence.
pub fn first_filled<const N: usize>(values: [Option<String>; N]) -> Option<String> {
    values.into_iter().flatten().find(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Float(f64),
}

/// Accept `"12"`, `12` or `12.5` for fields clients send either way
/// (record ids generated from timestamps, file sizes).
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            None => None,
            Some(StringOrNumber::String(s)) => Some(s),
            Some(StringOrNumber::Int(n)) => Some(n.to_string()),
            Some(StringOrNumber::Float(f)) => Some(f.to_string()),
        },
    )
}

/// Decode a JSON column holding a list of strings. Anything else reads as
/// an empty list.
pub fn string_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}
