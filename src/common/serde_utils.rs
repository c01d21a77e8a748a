// src/common/serde_utils.rs

use serde::{Deserialize, Deserializer};

/// Distingue "campo ausente" de "campo = null" em atualizações parciais.
///
/// Usar junto com `#[serde(default)]`:
/// - ausente -> `None` (não mexe)
/// - `null`  -> `Some(None)` (limpa)
/// - valor   -> `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
