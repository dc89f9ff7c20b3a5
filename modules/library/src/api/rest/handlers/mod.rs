use axum::http::HeaderMap;
use shelf_errors::{ApiError, ErrDef};

use super::render::absolute_url;

pub mod authors;
pub mod books;
pub mod publishers;
pub mod users;

/// Non-numeric ids can never match a row.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ErrDef::NOT_FOUND.as_error())
}

fn member_location(headers: &HeaderMap, collection_path: &str, id: i64) -> String {
    let path = format!("{}/{id}", collection_path.trim_end_matches('/'));
    absolute_url(headers, &path)
}
