// src/models/vehicle.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_utils::double_option;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub company_id: Uuid,

    pub office_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,

    #[schema(example = "ABC1D23")]
    pub licence_plate: String,
    #[schema(example = "Van de entregas")]
    pub name: String,
    #[schema(example = "Sprinter")]
    pub model: String,
    #[schema(example = 2020)]
    pub year_of_manufacture: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub licence_plate: String,
    pub name: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub office_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehiclePayload {
    #[validate(length(min = 1, max = 20, code = "invalid_length"))]
    pub licence_plate: String,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub model: String,

    // Se ausente, assume o ano corrente
    pub year_of_manufacture: Option<i32>,

    pub office_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,
}

// Atualização parcial; `officeId`/`driverId` aceitam null para desvincular.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehiclePayload {
    #[validate(length(min = 1, max = 20, code = "invalid_length"))]
    pub licence_plate: Option<String>,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, code = "invalid_length"))]
    pub model: Option<String>,

    pub year_of_manufacture: Option<i32>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub office_id: Option<Option<Uuid>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub driver_id: Option<Option<Uuid>>,
}

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleFilter {
    pub driver_id: Option<Uuid>,
    pub office_id: Option<Uuid>,
}
