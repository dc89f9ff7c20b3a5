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
use crate::domain::model::AuthorInput;

const RESOURCE: &str = "authors";

pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    params: RawQueryParams,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Index))?;
    let plan = QueryPlan::build(&params, &state.presenters.authors, &state.limits)?;
    let page = state.service.list_authors(&plan).await?;
    let items = page
        .items
        .iter()
        .map(|r| render::author(r, plan.selected_fields(), plan.relations(), &state.presenters))
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
    let plan = MemberPlan::build(&params, &state.presenters.authors)?;
    let record = state.service.get_author(id, plan.relations()).await?;
    Ok(render::member(render::author(
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
    body: Result<Json<DataEnvelope<AuthorInput>>, JsonRejection>,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Create))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.create_author(data).await?;
    let plan = MemberPlan::defaults(&state.presenters.authors);
    let location = member_location(&headers, uri.path(), record.author.id);
    let item = render::author(
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
    body: Result<Json<DataEnvelope<AuthorInput>>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Update))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.update_author(id, data).await?;
    let plan = MemberPlan::defaults(&state.presenters.authors);
    Ok(render::member(render::author(
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
    state.service.delete_author(id).await?;
    Ok(render::no_content())
}
