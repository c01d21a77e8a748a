// src/handlers/profile.rs

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        i18n::Locale,
        rbac::{PermProfileRead, PermProfileUpdate, RequirePermission},
    },
    models::{auth::Member, employee::ChangePasswordPayload},
};

#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "Profile",
    responses(
        (status = 200, description = "Dados do usuário logado", body = Member)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermProfileRead>,
) -> Result<Json<Member>, ApiError> {
    let member = app_state
        .employee_service
        .profile(&caller)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(member))
}

// Só a senha pode ser trocada por aqui
#[utoipa::path(
    put,
    path = "/api/profile",
    tag = "Profile",
    request_body = ChangePasswordPayload,
    responses(
        (status = 200, description = "Senha alterada", body = Member)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_profile(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(caller): AuthenticatedUser,
    _guard: RequirePermission<PermProfileUpdate>,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<Member>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let member = app_state
        .employee_service
        .change_password(&caller, payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(member))
}
