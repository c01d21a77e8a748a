// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Representa um membro (usuário) vindo do banco de dados.
// Todo membro pertence a exatamente uma empresa.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub company_id: Uuid,

    #[schema(example = "Maria")]
    pub first_name: String,

    #[schema(example = "Silva")]
    pub last_name: String,

    #[schema(example = "maria@empresa.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    pub is_admin: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que os repositórios precisam para inserir um membro.
// A empresa é sempre passada à parte (vem do chamador, nunca do payload).
#[derive(Debug, Clone)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// A identidade do chamador, resolvida a partir do token.
/// É passada explicitamente para cada serviço.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub company_id: Uuid,
    pub is_admin: bool,
}

impl From<&Member> for Caller {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            company_id: member.company_id,
            is_admin: member.is_admin,
        }
    }
}

/// E-mails são comparados sem distinção de maiúsculas: normalizamos antes
/// de qualquer leitura ou escrita.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// Cadastro público: cria a empresa e o seu primeiro administrador.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCompanyPayload {
    #[validate(length(min = 1, max = 150, code = "invalid_length"))]
    #[schema(example = "Maria")]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, code = "invalid_length"))]
    #[schema(example = "Silva")]
    pub last_name: String,

    #[validate(email(code = "invalid_email"))]
    #[schema(example = "maria@acme.com")]
    pub email: String,

    #[validate(length(min = 1, code = "required"))]
    pub password: String,

    #[validate(length(min = 1, code = "required"))]
    pub confirm_password: String,

    #[validate(length(min = 1, max = 20, code = "invalid_length"))]
    #[schema(example = "Acme")]
    pub company_name: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenAuthPayload {
    #[validate(email(code = "invalid_email"))]
    #[schema(example = "maria@acme.com")]
    pub email: String,

    #[validate(length(min = 1, code = "required"))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Company is created successfully.")]
    pub success: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do membro)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
