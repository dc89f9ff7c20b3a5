//! JSON rendering: field projection, embedded relations and response
//! envelopes (`{"data": ...}` plus `Link`/`Location` headers).

use axum::Json;
use axum::http::header::{HOST, LINK, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value, json};
use shelf_errors::{ApiError, ErrDef};
use shelf_query::pagination::link_header;
use shelf_query::{EagerLoad, PageWindow, PresenterContract, RawQueryParams};

use super::dto::{AuthorDto, BookDto, PublisherDto, UserDto};
use super::presenters::Presenters;
use crate::domain::model::{AuthorRecord, BookRecord, PublisherRecord, UserRecord};
use crate::domain::service::{AUTHOR, BOOKS, PUBLISHER};
use crate::infra::storage::entity::book;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

pub type Object = Map<String, Value>;

fn object<T: Serialize>(dto: &T) -> Result<Object, ApiError> {
    match serde_json::to_value(dto) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ErrDef::INTERNAL.as_error()),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize record");
            Err(ErrDef::INTERNAL.as_error())
        }
    }
}

/// Keep `fields` only, in that order.
#[must_use]
pub fn project(source: &Object, fields: &[String]) -> Object {
    fields
        .iter()
        .map(|f| (f.clone(), source.get(f).cloned().unwrap_or(Value::Null)))
        .collect()
}

fn embedded<T: Serialize>(dto: Option<&T>, contract: &PresenterContract) -> Result<Value, ApiError> {
    match dto {
        Some(dto) => Ok(Value::Object(project(&object(dto)?, contract.default_fields()))),
        None => Ok(Value::Null),
    }
}

fn embedded_books(books: Option<&[book::Model]>, p: &Presenters) -> Result<Value, ApiError> {
    books
        .unwrap_or_default()
        .iter()
        .map(|b| embedded(Some(&BookDto::from(b)), &p.books))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// # Errors
///
/// 500 if the record cannot be serialized.
pub fn author(
    rec: &AuthorRecord,
    fields: &[String],
    relations: &EagerLoad,
    p: &Presenters,
) -> Result<Object, ApiError> {
    let mut out = project(&object(&AuthorDto::from(&rec.author))?, fields);
    if relations.embeds_relation(BOOKS) {
        out.insert(BOOKS.to_owned(), embedded_books(rec.books.as_deref(), p)?);
    }
    Ok(out)
}

/// # Errors
///
/// 500 if the record cannot be serialized.
pub fn publisher(
    rec: &PublisherRecord,
    fields: &[String],
    relations: &EagerLoad,
    p: &Presenters,
) -> Result<Object, ApiError> {
    let mut out = project(&object(&PublisherDto::from(&rec.publisher))?, fields);
    if relations.embeds_relation(BOOKS) {
        out.insert(BOOKS.to_owned(), embedded_books(rec.books.as_deref(), p)?);
    }
    Ok(out)
}

/// # Errors
///
/// 500 if the record cannot be serialized.
pub fn user(rec: &UserRecord, fields: &[String]) -> Result<Object, ApiError> {
    Ok(project(&object(&UserDto::from(rec))?, fields))
}

/// # Errors
///
/// 500 if the record cannot be serialized.
pub fn book(
    rec: &BookRecord,
    fields: &[String],
    relations: &EagerLoad,
    p: &Presenters,
) -> Result<Object, ApiError> {
    let mut out = project(&object(&BookDto::from(&rec.book))?, fields);
    if relations.embeds_relation(AUTHOR) {
        let author = rec.author.as_ref().and_then(Option::as_ref).map(AuthorDto::from);
        out.insert(AUTHOR.to_owned(), embedded(author.as_ref(), &p.authors)?);
    }
    if relations.embeds_relation(PUBLISHER) {
        let publisher = rec
            .publisher
            .as_ref()
            .and_then(Option::as_ref)
            .map(PublisherDto::from);
        out.insert(PUBLISHER.to_owned(), embedded(publisher.as_ref(), &p.publishers)?);
    }
    Ok(out)
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Absolute URL for `path` when the request carried a `Host` header,
/// otherwise the bare path.
#[must_use]
pub fn absolute_url(headers: &HeaderMap, path: &str) -> String {
    match header_text(headers, HOST.as_str()) {
        Some(host) => {
            let scheme = header_text(headers, FORWARDED_PROTO).unwrap_or("http");
            format!("{scheme}://{host}{path}")
        }
        None => path.to_owned(),
    }
}

/// `200 {"data": [...]}` with a `Link` header when there are sibling pages.
#[must_use]
pub fn collection(
    items: Vec<Object>,
    window: &PageWindow,
    headers: &HeaderMap,
    path: &str,
    params: &RawQueryParams,
) -> Response {
    let data: Vec<Value> = items.into_iter().map(Value::Object).collect();
    let mut resp = Json(json!({ "data": data })).into_response();
    if let Some(link) = link_header(&absolute_url(headers, path), params, window) {
        match HeaderValue::from_str(&link) {
            Ok(value) => {
                resp.headers_mut().insert(LINK, value);
            }
            Err(e) => tracing::warn!(error = %e, "dropping unrepresentable Link header"),
        }
    }
    resp
}

#[must_use]
pub fn member(item: Object) -> Response {
    Json(json!({ "data": item })).into_response()
}

/// `201 {"data": {...}}` with `Location` pointing at the new record.
#[must_use]
pub fn created(item: Object, location: &str) -> Response {
    let mut resp = (StatusCode::CREATED, Json(json!({ "data": item }))).into_response();
    if let Ok(value) = HeaderValue::from_str(location) {
        resp.headers_mut().insert(LOCATION, value);
    }
    resp
}

#[must_use]
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
