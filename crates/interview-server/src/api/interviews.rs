use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use interview_core::Page;
use interview_service::ListQuery;
use interview_storage::InterviewRecord;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use super::AppState;
use super::form::{InterviewForm, owner_email_header};
use super::schemas::{DeleteResponse, ErrorResponse, InterviewUpload};
use crate::error::ApiError;

/// Query parameters of the listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Zero-based page index.
    pub page_number: Option<u32>,
    /// Records per page, at least 1.
    pub page_size: Option<u32>,
    /// Record field to order by, e.g. `updatedAt` or `title`.
    pub sort_by: Option<String>,
    /// `asc` for ascending order; anything else sorts descending.
    pub sort_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailParams {
    /// Owner email, matched exactly.
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyParams {
    /// Company tag, matched exactly.
    pub company: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid id: {raw}")))
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[utoipa::path(
    post,
    path = "/api/v1/interviews",
    tag = "Interviews",
    summary = "Create interview experience",
    description = "Validates the form, uploads the optional image, then stores the record. The X-User-Email header, when set, replaces ownerEmail.",
    request_body(content = InterviewUpload, content_type = "multipart/form-data"),
    params(
        ("X-User-Email" = Option<String>, Header, description = "Email of the signed-in user")
    ),
    responses(
        (status = 201, description = "Record created", body = InterviewRecord),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 503, description = "Attachment store unavailable", body = ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = InterviewForm::from_multipart(multipart).await?;
    form.apply_owner_header(&headers);

    let record = state.service.create(form.request, form.attachment).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/v1/interviews/{id}",
    tag = "Interviews",
    summary = "Get interview experience",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "The record", body = InterviewRecord),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No record with this id", body = ErrorResponse)
    )
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InterviewRecord>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/interviews",
    tag = "Interviews",
    summary = "List interview experiences",
    description = "One page of records. Missing parameters fall back to the configured listing defaults.",
    params(ListParams),
    responses(
        (status = 200, description = "One page of records", body = Page<InterviewRecord>),
        (status = 400, description = "Unknown sort field or bad paging parameters", body = ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<InterviewRecord>>, ApiError> {
    let params = query_params(params)?;
    let defaults = &state.listing;
    let query = ListQuery::new(
        params.page_number.unwrap_or_default(),
        params.page_size.unwrap_or(defaults.page_size),
        params.sort_by.unwrap_or_else(|| defaults.sort_by.clone()),
        params.sort_dir.unwrap_or_else(|| defaults.sort_dir.clone()),
    );

    Ok(Json(state.service.list(&query).await?))
}

/// `GET /search`: by the `email` query parameter, else by the
/// `X-User-Email` header.
#[utoipa::path(
    get,
    path = "/api/v1/search",
    tag = "Search",
    summary = "My interview experiences",
    description = "Records owned by the email query parameter, or by the X-User-Email header when it is absent. Newest first.",
    params(
        EmailParams,
        ("X-User-Email" = Option<String>, Header, description = "Email of the signed-in user")
    ),
    responses(
        (status = 200, description = "Matching records", body = Vec<InterviewRecord>)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<EmailParams>, QueryRejection>,
) -> Result<Json<Vec<InterviewRecord>>, ApiError> {
    let email = query_params(params)?
        .email
        .or_else(|| owner_email_header(&headers))
        .unwrap_or_default();

    Ok(Json(state.service.search_by_email(&email).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/search/email",
    tag = "Search",
    summary = "Search by owner email",
    params(EmailParams),
    responses(
        (status = 200, description = "Matching records, newest first", body = Vec<InterviewRecord>)
    )
)]
pub async fn search_by_email(
    State(state): State<AppState>,
    params: Result<Query<EmailParams>, QueryRejection>,
) -> Result<Json<Vec<InterviewRecord>>, ApiError> {
    let email = query_params(params)?.email.unwrap_or_default();
    Ok(Json(state.service.search_by_email(&email).await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/search/company",
    tag = "Search",
    summary = "Search by company tag",
    params(CompanyParams),
    responses(
        (status = 200, description = "Matching records, newest first", body = Vec<InterviewRecord>)
    )
)]
pub async fn search_by_company(
    State(state): State<AppState>,
    params: Result<Query<CompanyParams>, QueryRejection>,
) -> Result<Json<Vec<InterviewRecord>>, ApiError> {
    let company = query_params(params)?.company.unwrap_or_default();
    Ok(Json(state.service.search_by_company(&company).await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/interviews/{id}",
    tag = "Interviews",
    summary = "Update interview experience",
    description = "Overwrites every text field. A new image replaces the old one; without one the current image is kept.",
    params(("id" = Uuid, Path, description = "Record id")),
    request_body(content = InterviewUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated record", body = InterviewRecord),
        (status = 400, description = "Validation failed or malformed id", body = ErrorResponse),
        (status = 404, description = "No record with this id", body = ErrorResponse),
        (status = 503, description = "Attachment store unavailable", body = ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<InterviewRecord>, ApiError> {
    let id = parse_id(&id)?;
    let form = InterviewForm::from_multipart(multipart).await?;

    let record = state
        .service
        .update(id, form.request, form.attachment)
        .await?;
    Ok(Json(record))
}

#[utoipa::path(
    delete,
    path = "/api/v1/interviews/{id}",
    tag = "Interviews",
    summary = "Delete interview experience",
    description = "Removes the image on a best-effort basis, then the record.",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record deleted", body = DeleteResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "No record with this id", body = ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Interview experience deleted".to_string(),
        id,
    }))
}
