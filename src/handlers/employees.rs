// src/handlers/employees.rs

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
            PermEmployeeCreate, PermEmployeeDelete, PermEmployeeList, PermEmployeeRead,
            PermEmployeeUpdate, RequirePermission,
        },
    },
    models::{
        auth::Member,
        employee::{CreateEmployeePayload, EmployeeFilter, UpdateEmployeePayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/employee",
    tag = "Employees",
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Funcionários da empresa", body = Vec<Member>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEmployeeList>,
    Query(filter): Query<EmployeeFilter>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let employees = app_state
        .employee_service
        .list(&caller, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(employees))
}

#[utoipa::path(
    post,
    path = "/api/employee",
    tag = "Employees",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Member),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado"),
        (status = 409, description = "As senhas não coincidem")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEmployeeCreate>,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let employee = app_state
        .employee_service
        .create(&caller, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/api/employee_detail/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do Funcionário")),
    responses(
        (status = 200, description = "Funcionário", body = Member),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEmployeeRead>,
    Path(id): Path<Uuid>,
) -> Result<Json<Member>, ApiError> {
    let employee = app_state
        .employee_service
        .get(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(employee))
}

#[utoipa::path(
    put,
    path = "/api/employee_detail/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do Funcionário")),
    request_body = UpdateEmployeePayload,
    responses(
        (status = 200, description = "Funcionário atualizado", body = Member),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEmployeeUpdate>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<Json<Member>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let employee = app_state
        .employee_service
        .update(&caller, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(employee))
}

#[utoipa::path(
    delete,
    path = "/api/employee_detail/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "ID do Funcionário")),
    responses(
        (status = 204, description = "Funcionário removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermEmployeeDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .employee_service
        .delete(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
