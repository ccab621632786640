//! Gadget API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateGadgetRequest, DeleteGadgetResponse, GadgetListResponse, GadgetMessageResponse,
    GadgetResponse, GadgetStatsResponse, GadgetStatsSummaryResponse, ListGadgetsParams,
    UpdateGadgetRequest,
};
use crate::application::GadgetService;
use crate::domain::gadget::{GadgetChanges, GadgetStatus, NewGadget};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResult, ErrorBody, QueryParams, ValidatedJson};

#[utoipa::path(
    get,
    path = "/api/gadgets",
    tag = "Gadgets",
    params(ListGadgetsParams),
    responses(
        (status = 200, description = "Page of gadgets", body = GadgetListResponse),
        (status = 400, description = "Invalid filter or sort parameter", body = ErrorBody)
    )
)]
pub async fn list_gadgets(
    State(service): State<Arc<GadgetService>>,
    QueryParams(params): QueryParams<ListGadgetsParams>,
) -> ApiResult<Json<GadgetListResponse>> {
    let page = service.list(params.into_query()?).await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/gadgets/stats",
    tag = "Gadgets",
    responses((status = 200, description = "Counts per status", body = GadgetStatsResponse))
)]
pub async fn gadget_stats(
    State(service): State<Arc<GadgetService>>,
) -> ApiResult<Json<GadgetStatsResponse>> {
    Ok(Json(service.stats().await?.into()))
}

#[utoipa::path(
    get,
    path = "/api/gadgets/stats/summary",
    tag = "Gadgets",
    responses((status = 200, description = "Counts per status", body = GadgetStatsSummaryResponse))
)]
pub async fn gadget_stats_summary(
    State(service): State<Arc<GadgetService>>,
) -> ApiResult<Json<GadgetStatsSummaryResponse>> {
    Ok(Json(GadgetStatsSummaryResponse {
        summary: service.stats().await?.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/gadgets/{id}",
    tag = "Gadgets",
    params(("id" = String, Path, description = "Gadget ID")),
    responses(
        (status = 200, description = "Gadget", body = GadgetResponse),
        (status = 404, description = "Gadget not found", body = ErrorBody)
    )
)]
pub async fn get_gadget(
    State(service): State<Arc<GadgetService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GadgetResponse>> {
    let gadget = service.get(&id).await?;
    Ok(Json(GadgetResponse {
        gadget: gadget.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/gadgets",
    tag = "Gadgets",
    request_body = CreateGadgetRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Gadget created", body = GadgetMessageResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 401, description = "No token provided", body = ErrorBody),
        (status = 403, description = "Invalid token or role", body = ErrorBody),
        (status = 409, description = "Codename already exists", body = ErrorBody)
    )
)]
pub async fn create_gadget(
    State(service): State<Arc<GadgetService>>,
    ValidatedJson(req): ValidatedJson<CreateGadgetRequest>,
) -> ApiResult<(StatusCode, Json<GadgetMessageResponse>)> {
    let status = req
        .status
        .as_deref()
        .map(str::parse::<GadgetStatus>)
        .transpose()?;
    let gadget = service
        .create(NewGadget::new(&req.name, &req.codename, status)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GadgetMessageResponse {
            message: "Gadget created successfully".into(),
            gadget: gadget.into(),
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/api/gadgets/{id}",
    tag = "Gadgets",
    params(("id" = String, Path, description = "Gadget ID")),
    request_body = UpdateGadgetRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Gadget updated", body = GadgetMessageResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Gadget not found", body = ErrorBody),
        (status = 409, description = "Codename already exists", body = ErrorBody)
    )
)]
pub async fn update_gadget(
    State(service): State<Arc<GadgetService>>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateGadgetRequest>,
) -> ApiResult<Json<GadgetMessageResponse>> {
    let status: GadgetStatus = req
        .status
        .as_deref()
        .ok_or_else(|| DomainError::validation("Status is required"))?
        .parse()?;
    let changes = GadgetChanges::new(&req.name, &req.codename, status)?;
    let gadget = service.update(&id, changes).await?;

    Ok(Json(GadgetMessageResponse {
        message: "Gadget updated successfully".into(),
        gadget: gadget.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/gadgets/{id}",
    tag = "Gadgets",
    params(("id" = String, Path, description = "Gadget ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Gadget deleted", body = DeleteGadgetResponse),
        (status = 403, description = "Admin access required", body = ErrorBody),
        (status = 404, description = "Gadget not found", body = ErrorBody)
    )
)]
pub async fn delete_gadget(
    State(service): State<Arc<GadgetService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteGadgetResponse>> {
    let deleted = service.delete(&id).await?;
    Ok(Json(DeleteGadgetResponse {
        message: "Gadget deleted successfully".into(),
        deleted_gadget: deleted.into(),
    }))
}

#[utoipa::path(
    patch,
    path = "/api/gadgets/{id}/decommission",
    tag = "Gadgets",
    params(("id" = String, Path, description = "Gadget ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Gadget decommissioned", body = GadgetMessageResponse),
        (status = 400, description = "Already decommissioned", body = ErrorBody),
        (status = 404, description = "Gadget not found", body = ErrorBody)
    )
)]
pub async fn decommission_gadget(
    State(service): State<Arc<GadgetService>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GadgetMessageResponse>> {
    let gadget = service.decommission(&id).await?;
    Ok(Json(GadgetMessageResponse {
        message: "Gadget decommissioned successfully".into(),
        gadget: gadget.into(),
    }))
}
