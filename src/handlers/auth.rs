// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{MessageResponse, RegisterCompanyPayload, TokenAuthPayload, TokenResponse},
};

// ---
// Handler: register (cadastro público de empresa + admin)
// ---
#[utoipa::path(
    post,
    path = "/api/auth",
    tag = "Auth",
    request_body = RegisterCompanyPayload,
    responses(
        (status = 201, description = "Empresa e administrador criados", body = MessageResponse),
        (status = 400, description = "Dados inválidos ou e-mail já cadastrado"),
        (status = 409, description = "As senhas não coincidem")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterCompanyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .auth_service
        .register_company(payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let message = MessageResponse {
        success: app_state.i18n_store.translate(&locale.0, "company_created"),
    };
    Ok((StatusCode::CREATED, Json(message)))
}

// ---
// Handler: token_auth (login)
// ---
#[utoipa::path(
    post,
    path = "/api/token-auth",
    tag = "Auth",
    request_body = TokenAuthPayload,
    responses(
        (status = 200, description = "Token emitido", body = TokenResponse),
        (status = 400, description = "Credenciais inválidas")
    )
)]
pub async fn token_auth(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<TokenAuthPayload>,
) -> Result<Json<TokenResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (token, member) = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(TokenResponse {
        token,
        email: member.email,
    }))
}
