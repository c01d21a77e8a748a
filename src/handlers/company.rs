// src/handlers/company.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::{field_error, ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermCompanyRead, PermCompanyUpdate, RequirePermission},
    },
    models::company::{Company, UpdateCompanyPayload},
};

#[utoipa::path(
    get,
    path = "/api/company",
    tag = "Company",
    responses(
        (status = 200, description = "A empresa do usuário logado", body = Company),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermCompanyRead>,
) -> Result<Json<Company>, ApiError> {
    let company = app_state
        .company_service
        .get_own(&caller)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}

#[utoipa::path(
    put,
    path = "/api/company",
    tag = "Company",
    request_body = UpdateCompanyPayload,
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 403, description = "Apenas administradores")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermCompanyUpdate>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<Json<Company>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    if payload.address_too_long() {
        return Err(AppError::ValidationError(field_error("address", "invalid_length"))
            .to_api_error(&locale, &app_state.i18n_store));
    }

    let company = app_state
        .company_service
        .update_own(&caller, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(company))
}
