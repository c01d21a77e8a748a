// src/models/company.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;

// ---
// Company (o Tenant)
// ---
// A unidade de isolamento de dados: membros, escritórios e veículos
// pertencem sempre a uma empresa.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,

    #[schema(example = "Acme")]
    pub name: String,

    #[schema(example = "Rua das Flores, 123")]
    pub address: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub address: Option<String>,
}

// Atualização parcial (PUT /company). `address: null` limpa o endereço.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyPayload {
    #[validate(length(min = 1, max = 20, code = "invalid_length"))]
    #[schema(example = "Acme Ltda")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "Av. Paulista, 1000")]
    pub address: Option<Option<String>>,
}

impl UpdateCompanyPayload {
    // `validator` não enxerga dentro de Option<Option<_>>.
    pub fn address_too_long(&self) -> bool {
        matches!(&self.address, Some(Some(address)) if address.chars().count() > 50)
    }
}
