// src/handlers/offices.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{
            PermOfficeAssign, PermOfficeCreate, PermOfficeDelete, PermOfficeList, PermOfficeRead,
            PermOfficeUpdate, PermOwnOfficeRead, RequirePermission,
        },
    },
    models::office::{
        AssignEmployeePayload, CreateOfficePayload, Office, OfficeFilter, UpdateOfficePayload,
    },
};

// ---
// CRUD de escritórios
// ---

#[utoipa::path(
    get,
    path = "/api/office",
    tag = "Offices",
    params(OfficeFilter),
    responses(
        (status = 200, description = "Escritórios da empresa", body = Vec<Office>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_offices(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOfficeList>,
    Query(filter): Query<OfficeFilter>,
) -> Result<Json<Vec<Office>>, ApiError> {
    let offices = app_state
        .office_service
        .list(&caller, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(offices))
}

#[utoipa::path(
    post,
    path = "/api/office",
    tag = "Offices",
    request_body = CreateOfficePayload,
    responses(
        (status = 201, description = "Escritório criado", body = Office),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_office(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOfficeCreate>,
    Json(payload): Json<CreateOfficePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let office = app_state
        .office_service
        .create(&caller, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(office)))
}

#[utoipa::path(
    get,
    path = "/api/office_detail/{id}",
    tag = "Offices",
    params(("id" = Uuid, Path, description = "ID do Escritório")),
    responses(
        (status = 200, description = "Escritório", body = Office),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_office(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOfficeRead>,
    Path(id): Path<Uuid>,
) -> Result<Json<Office>, ApiError> {
    let office = app_state
        .office_service
        .get(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(office))
}

#[utoipa::path(
    put,
    path = "/api/office_detail/{id}",
    tag = "Offices",
    params(("id" = Uuid, Path, description = "ID do Escritório")),
    request_body = UpdateOfficePayload,
    responses(
        (status = 200, description = "Escritório atualizado", body = Office),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_office(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOfficeUpdate>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOfficePayload>,
) -> Result<Json<Office>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let office = app_state
        .office_service
        .update(&caller, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(office))
}

#[utoipa::path(
    delete,
    path = "/api/office_detail/{id}",
    tag = "Offices",
    params(("id" = Uuid, Path, description = "ID do Escritório")),
    responses(
        (status = 204, description = "Escritório removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_office(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOfficeDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .office_service
        .delete(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Alocação de funcionários
// ---

#[utoipa::path(
    put,
    path = "/api/employee_office/{id}",
    tag = "Offices",
    params(("id" = Uuid, Path, description = "ID do Escritório")),
    request_body = AssignEmployeePayload,
    responses(
        (status = 200, description = "Ocupante atualizado", body = Office),
        (status = 400, description = "Funcionário inválido ou já alocado"),
        (status = 404, description = "Escritório não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOfficeAssign>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignEmployeePayload>,
) -> Result<Json<Office>, ApiError> {
    let office = app_state
        .office_service
        .assign_employee(&caller, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(office))
}

#[utoipa::path(
    get,
    path = "/api/employee_office_detail",
    tag = "Offices",
    responses(
        (status = 200, description = "O escritório do usuário logado", body = Office),
        (status = 404, description = "Usuário sem escritório")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_own_office(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOwnOfficeRead>,
) -> Result<Json<Office>, ApiError> {
    let office = app_state
        .office_service
        .own_office(&caller)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(office))
}
