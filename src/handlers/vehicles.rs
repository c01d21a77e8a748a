// src/handlers/vehicles.rs

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
            PermOwnVehiclesList, PermVehicleCreate, PermVehicleDelete, PermVehicleList,
            PermVehicleRead, PermVehicleUpdate, RequirePermission,
        },
    },
    models::vehicle::{CreateVehiclePayload, UpdateVehiclePayload, Vehicle, VehicleFilter},
};

#[utoipa::path(
    get,
    path = "/api/vehicle",
    tag = "Vehicles",
    params(VehicleFilter),
    responses(
        (status = 200, description = "Veículos da empresa", body = Vec<Vehicle>),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vehicles(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermVehicleList>,
    Query(filter): Query<VehicleFilter>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = app_state
        .vehicle_service
        .list(&caller, filter)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(vehicles))
}

#[utoipa::path(
    post,
    path = "/api/vehicle",
    tag = "Vehicles",
    request_body = CreateVehiclePayload,
    responses(
        (status = 201, description = "Veículo criado", body = Vehicle),
        (status = 400, description = "Ano inválido ou motorista fora do escritório")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermVehicleCreate>,
    Json(payload): Json<CreateVehiclePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let vehicle = app_state
        .vehicle_service
        .create(&caller, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(vehicle)))
}

#[utoipa::path(
    get,
    path = "/api/vehicle_detail/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "ID do Veículo")),
    responses(
        (status = 200, description = "Veículo", body = Vehicle),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermVehicleRead>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, ApiError> {
    let vehicle = app_state
        .vehicle_service
        .get(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(vehicle))
}

#[utoipa::path(
    put,
    path = "/api/vehicle_detail/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "ID do Veículo")),
    request_body = UpdateVehiclePayload,
    responses(
        (status = 200, description = "Veículo atualizado", body = Vehicle),
        (status = 400, description = "Ano inválido ou motorista fora do escritório"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermVehicleUpdate>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateVehiclePayload>,
) -> Result<Json<Vehicle>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let vehicle = app_state
        .vehicle_service
        .update(&caller, id, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(vehicle))
}

#[utoipa::path(
    delete,
    path = "/api/vehicle_detail/{id}",
    tag = "Vehicles",
    params(("id" = Uuid, Path, description = "ID do Veículo")),
    responses(
        (status = 204, description = "Veículo removido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_vehicle(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermVehicleDelete>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state
        .vehicle_service
        .delete(&caller, id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// Os veículos que o usuário logado dirige
#[utoipa::path(
    get,
    path = "/api/vehicle_profile",
    tag = "Vehicles",
    responses(
        (status = 200, description = "Veículos do motorista logado", body = Vec<Vehicle>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_own_vehicles(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermOwnVehiclesList>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = app_state
        .vehicle_service
        .own_vehicles(&caller)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(vehicles))
}
