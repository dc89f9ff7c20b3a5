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
use crate::domain::model::UserInput;

const RESOURCE: &str = "users";

pub async fn index(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    params: RawQueryParams,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Index))?;
    let plan = QueryPlan::build(&params, &state.presenters.users, &state.limits)?;
    let page = state.service.list_users(&plan).await?;
    let items = page
        .items
        .iter()
        .map(|r| render::user(r, plan.selected_fields()))
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
    let plan = MemberPlan::build(&params, &state.presenters.users)?;
    let record = state.service.get_user(id).await?;
    Ok(render::member(render::user(&record, plan.selected_fields())?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Result<Json<DataEnvelope<UserInput>>, JsonRejection>,
) -> ApiResult<Response> {
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Create))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.create_user(data).await?;
    let plan = MemberPlan::defaults(&state.presenters.users);
    let location = member_location(&headers, uri.path(), record.id);
    let item = render::user(&record, plan.selected_fields())?;
    Ok(render::created(item, &location))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
    body: Result<Json<DataEnvelope<UserInput>>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Update).owned_by(id))?;
    let Json(DataEnvelope { data }) = body.map_err(|e| bad_body(&e))?;
    let record = state.service.update_user(id, data).await?;
    let plan = MemberPlan::defaults(&state.presenters.users);
    Ok(render::member(render::user(&record, plan.selected_fields())?))
}

pub async fn destroy(
    State(state): State<AppState>,
    Extension(ctx): Extension<SecurityContext>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    state.authorize(&ctx, &AccessRequest::new(RESOURCE, Action::Destroy).owned_by(id))?;
    state.service.delete_user(id).await?;
    Ok(render::no_content())
}
