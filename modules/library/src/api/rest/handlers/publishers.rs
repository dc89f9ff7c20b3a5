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
use crate::domain::model::PublisherInput;

const RESOURCE: &str = "publishers";

pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    params: RawQueryParams,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Index))?;
    let plan = QueryPlan::build(&params, &state.presenters.publishers, &state.limits)?;
    let page = state.service.list_publishers(&plan).await?;
    let items = page
        .items
        .iter()
        .map(|r| render::publisher(r, plan.selected_fields(), plan.relations(), &state.presenters))
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
    let plan = MemberPlan::build(&params, &state.presenters.publishers)?;
    let record = state.service.get_publisher(id, plan.relations()).await?;
    Ok(render::member(render::publisher(
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
    body: Result<Json<DataEnvelope<PublisherInput>>, JsonRejection>,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Create))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.create_publisher(data).await?;
    let plan = MemberPlan::defaults(&state.presenters.publishers);
    let location = member_location(&headers, uri.path(), record.publisher.id);
    let item = render::publisher(
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
    body: Result<Json<DataEnvelope<PublisherInput>>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Update))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.update_publisher(id, data).await?;
    let plan = MemberPlan::defaults(&state.presenters.publishers);
    Ok(render::member(render::publisher(
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
    state.service.delete_publisher(id).await?;
    Ok(render::no_content())
}
