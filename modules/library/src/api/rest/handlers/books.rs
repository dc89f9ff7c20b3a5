use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::{Extension, Json};
use shelf_errors::ApiResult;
use shelf_query::{MemberPlan, QueryPlan, RawQueryParams};
use shelf_security::{AccessRequest, Action, SecurityContext};

use super::{member_location, parse_id};
use crate::api::rest::dto::DataEnvelope;
use crate::api::rest::error::bad_body;
use crate::api::rest::{AppState, render};
use crate::domain::model::BookInput;

const RESOURCE: &str = "books";

pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    params: RawQueryParams,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Index))?;
    let plan = QueryPlan::build(&params, &state.presenters.books, &state.limits)?;
    let page = state.service.list_books(&plan).await?;
    let items = page
        .items
        .iter()
        .map(|r| render::book(r, plan.selected_fields(), plan.relations(), &state.presenters))
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(render::collection(items, &page.window, &headers, uri.path(), &params))
}

pub async fn show(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
    params: RawQueryParams,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Show))?;
    let id = parse_id(&id)?;
    let plan = MemberPlan::build(&params, &state.presenters.books)?;
    let record = state.service.get_book(id, plan.relations()).await?;
    Ok(render::member(render::book(
        &record,
        plan.selected_fields(),
        plan.relations(),
        &state.presenters,
    )?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Result<Json<DataEnvelope<BookInput>>, JsonRejection>,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Create))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.create_book(data).await?;
    let plan = MemberPlan::defaults(&state.presenters.books);
    let location = member_location(&headers, uri.path(), record.book.id);
    let item = render::book(
        &record,
        plan.selected_fields(),
        plan.relations(),
        &state.presenters,
    )?;
    Ok(render::created(item, &location))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
    body: Result<Json<DataEnvelope<BookInput>>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Update))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.update_book(id, data).await?;
    let plan = MemberPlan::defaults(&state.presenters.books);
    Ok(render::member(render::book(
        &record,
        plan.selected_fields(),
        plan.relations(),
        &state.presenters,
    )?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Destroy))?;
    state.service.delete_book(id).await?;
    Ok(render::no_content())
}
