// src/common/error.rs

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro interno. Os handlers nunca devolvem `AppError` direto:
// ele é convertido em `ApiError` (já traduzido) via `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("As senhas não coincidem")]
    PasswordMismatch,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido ou ausente")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("O membro já ocupa outro escritório")]
    OccupantAlreadyAssigned,

    #[error("O motorista não ocupa o escritório do veículo")]
    DriverNotInOffice,

    #[error("Ano de fabricação inválido: {0}")]
    InvalidYear(i32),

    #[error("Referência inválida no campo '{0}'")]
    InvalidReference(&'static str),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O corpo de erro que sai na resposta HTTP.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Monta um `ValidationErrors` com um único campo, no mesmo formato que o
/// `validator` produz para as regras declarativas.
pub fn field_error(field: &'static str, code: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code));
    errors
}

impl AppError {
    /// Converte o erro interno numa resposta traduzida para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        // Erros de regra de negócio que pertencem a um campo específico
        // viram erros de validação comuns.
        let as_field = match &self {
            AppError::EmailAlreadyExists => Some(field_error("email", "email_taken")),
            AppError::OccupantAlreadyAssigned => {
                Some(field_error("employeeId", "occupant_already_assigned"))
            }
            AppError::DriverNotInOffice => Some(field_error("driverId", "driver_not_in_office")),
            AppError::InvalidYear(_) => Some(field_error("yearOfManufacture", "invalid_year")),
            AppError::InvalidReference(field) => Some(field_error(field, "invalid_reference")),
            _ => None,
        };

        if let Some(errors) = as_field {
            return validation_response(&errors, lang, i18n);
        }

        let (status, key) = match self {
            AppError::ValidationError(errors) => {
                return validation_response(&errors, lang, i18n);
            }
            AppError::PasswordMismatch => (StatusCode::CONFLICT, "password_mismatch"),
            AppError::InvalidCredentials => (StatusCode::BAD_REQUEST, "invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "authentication_required"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            AppError::ResourceNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),

            // Todo o resto (banco, bcrypt, jwt, anyhow) vira 500.
            // O detalhe vai para o log, nunca para o cliente.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        ApiError::new(status, i18n.translate(lang, key))
    }
}

fn validation_response(errors: &ValidationErrors, lang: &str, i18n: &I18nStore) -> ApiError {
    let mut details = BTreeMap::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| match &e.message {
                Some(message) => message.to_string(),
                None => i18n.translate(lang, &e.code),
            })
            .collect();
        details.insert(to_camel_case(&field), messages);
    }

    ApiError {
        status: StatusCode::BAD_REQUEST,
        error: i18n.translate(lang, "validation_failed"),
        details: Some(details),
    }
}

// O `validator` usa o nome do campo Rust (snake_case); o JSON é camelCase.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
