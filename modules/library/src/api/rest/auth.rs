//! Builds the request's [`SecurityContext`] from trusted upstream headers.

use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use shelf_security::SecurityContext;
use shelf_security::context::{SUBJECT_ID_HEADER, SUBJECT_ROLE_HEADER};

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[must_use]
pub fn context_from_headers(headers: &HeaderMap) -> SecurityContext {
    SecurityContext::from_header_values(
        header(headers, SUBJECT_ID_HEADER),
        header(headers, SUBJECT_ROLE_HEADER),
    )
}

pub async fn security_context(mut req: Request, next: Next) -> Response {
    let ctx = context_from_headers(req.headers());
    req.extensions_mut().insert(ctx);
    next.run(req).await
}
