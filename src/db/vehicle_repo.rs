// src/db/vehicle_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::VehicleStore,
    models::vehicle::{NewVehicle, Vehicle, VehicleFilter},
};

#[derive(Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &VehicleFilter,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE company_id = $1
              AND ($2::uuid IS NULL OR driver_id = $2)
              AND ($3::uuid IS NULL OR office_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(filter.driver_id)
        .bind(filter.office_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    async fn list_by_driver(
        &self,
        company_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE company_id = $1 AND driver_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    async fn find_in_company(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(vehicle)
    }

    async fn create(&self, company_id: Uuid, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, company_id, office_id, driver_id,
                licence_plate, name, model, year_of_manufacture
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(company_id)
        .bind(vehicle.office_id)
        .bind(vehicle.driver_id)
        .bind(&vehicle.licence_plate)
        .bind(&vehicle.name)
        .bind(&vehicle.model)
        .bind(vehicle.year_of_manufacture)
        .fetch_one(&self.pool)
        .await?;
        Ok(vehicle)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET office_id = $3, driver_id = $4, licence_plate = $5, name = $6,
                model = $7, year_of_manufacture = $8, updated_at = NOW()
            WHERE id = $1 AND company_id = $2
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.company_id)
        .bind(vehicle.office_id)
        .bind(vehicle.driver_id)
        .bind(&vehicle.licence_plate)
        .bind(&vehicle.name)
        .bind(&vehicle.model)
        .bind(vehicle.year_of_manufacture)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound(format!("Vehicle {}", vehicle.id)))
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
