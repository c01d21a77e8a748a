// src/models/employee.rs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// Admin cadastra um funcionário na própria empresa (nunca como admin).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, max = 150, code = "invalid_length"))]
    #[schema(example = "João")]
    pub first_name: String,

    #[validate(length(min = 1, max = 150, code = "invalid_length"))]
    #[schema(example = "Souza")]
    pub last_name: String,

    #[validate(email(code = "invalid_email"))]
    #[schema(example = "joao@acme.com")]
    pub email: String,

    #[validate(length(min = 1, code = "required"))]
    pub password: String,

    #[validate(length(min = 1, code = "required"))]
    pub confirm_password: String,
}

// Admin altera nome, sobrenome e senha. O e-mail nunca muda.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    #[validate(length(min = 1, max = 150, code = "invalid_length"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 150, code = "invalid_length"))]
    pub last_name: Option<String>,

    #[validate(length(min = 1, code = "required"))]
    pub password: Option<String>,
}

// O próprio membro só pode trocar a senha.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordPayload {
    #[validate(length(min = 1, code = "required"))]
    pub password: String,
}

// Filtros de GET /employee (igualdade exata).
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}
