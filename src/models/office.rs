// src/models/office.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;

// ---
// Office (o Escritório)
// ---
// Pertence a uma empresa e tem no máximo um ocupante.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Office {
    pub id: Uuid,
    pub company_id: Uuid,

    // O membro alocado neste escritório (se houver)
    pub occupant_id: Option<Uuid>,

    #[schema(example = "Sede")]
    pub name: String,
    #[schema(example = "Rua das Flores, 123")]
    pub address: String,
    #[schema(example = "Brasil")]
    pub country: String,
    #[schema(example = "São Paulo")]
    pub city: String,
    #[schema(example = "SP")]
    pub region: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfficePayload {
    #[validate(length(min = 1, max = 20, code = "invalid_length"))]
    #[schema(example = "Sede")]
    pub name: String,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub address: String,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub country: String,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub city: String,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub region: String,
}

// Atualização parcial. O ocupante não muda por aqui (ver /employee_office).
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfficePayload {
    #[validate(length(min = 1, max = 20, code = "invalid_length"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub address: Option<String>,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub country: Option<String>,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub region: Option<String>,
}

// PUT /employee_office/{id}
// `employeeId: null` desocupa o escritório; `reassign: true` move o membro
// do escritório atual para este.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignEmployeePayload {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub employee_id: Option<Option<Uuid>>,

    #[serde(default)]
    pub reassign: bool,
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OfficeFilter {
    pub country: Option<String>,
    pub city: Option<String>,
}
