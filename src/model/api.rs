use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// A page of results along with the totals needed to render pagination
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PageDto<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Number of records affected by a bulk operation
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CountDto {
    pub count: u64,
}

/// Deserialize a field that is present (possibly `null`) as `Some`, leaving missing fields as
/// `None` through `#[serde(default)]`.
///
/// Lets PATCH bodies tell "clear this value" apart from "leave it alone".
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
