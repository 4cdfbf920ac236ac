//! Deserialization helpers for service payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a string that the service may send as `null`.
///
/// `null` becomes the empty string. Pair with `#[serde(default)]` so a
/// missing key does too.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
