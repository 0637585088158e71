//! Translation of search query-string parameters into a [`SearchRequest`]

use essearch_storage::SearchOptions;
use url::form_urlencoded;

use crate::{
    error::{ApiError, ApiResult},
    models::SearchRequest,
};

/// `q` absent or empty
pub const MISSING_QUERY: &str = "missing query parameter";
/// `from` is not a non-negative integer
pub const MALFORMED_FROM: &str = "malformed from parameter";
/// `size` is not a non-negative integer
pub const MALFORMED_SIZE: &str = "malformed size parameter";

/// Parse the raw query string of a search request.
///
/// Checks run in a fixed order (`q`, then `from`, then `size`) and the first
/// failure is returned. Single-valued parameters take their first occurrence;
/// every `sort` is kept in request order, empty ones included.
pub fn translate(raw_query: Option<&str>) -> ApiResult<SearchRequest> {
    let mut phrase: Option<String> = None;
    let mut from: Option<String> = None;
    let mut size: Option<String> = None;
    let mut filter: Option<String> = None;
    let mut sort = Vec::new();

    for (name, value) in form_urlencoded::parse(raw_query.unwrap_or_default().as_bytes()) {
        match name.as_ref() {
            "q" => {
                phrase.get_or_insert_with(|| value.into_owned());
            }
            "from" => {
                from.get_or_insert_with(|| value.into_owned());
            }
            "size" => {
                size.get_or_insert_with(|| value.into_owned());
            }
            "filter" => {
                filter.get_or_insert_with(|| value.into_owned());
            }
            "sort" => sort.push(value.into_owned()),
            _ => {}
        }
    }

    let phrase = phrase
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest(MISSING_QUERY.to_string()))?;
    let from = parse_offset(from.as_deref(), MALFORMED_FROM)?;
    let size = parse_offset(size.as_deref(), MALFORMED_SIZE)?;

    Ok(SearchRequest {
        phrase,
        options: SearchOptions {
            from,
            size,
            sort,
            filter: filter.unwrap_or_default(),
        },
    })
}

/// Absent or empty means 0; anything else must be a non-negative integer
fn parse_offset(value: Option<&str>, error: &str) -> ApiResult<u64> {
    match value {
        None | Some("") => Ok(0),
        Some(s) => s
            .parse::<i64>()
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| ApiError::BadRequest(error.to_string())),
    }
}
