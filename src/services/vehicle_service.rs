// src/services/vehicle_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::Stores,
    models::{
        auth::Caller,
        office::Office,
        vehicle::{CreateVehiclePayload, NewVehicle, UpdateVehiclePayload, Vehicle, VehicleFilter},
    },
    services::consistency::{check_driver_in_office, check_year_of_manufacture, current_year},
};

#[derive(Clone)]
pub struct VehicleService {
    stores: Stores,
}

impl VehicleService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn list(&self, caller: &Caller, filter: VehicleFilter) -> Result<Vec<Vehicle>, AppError> {
        self.stores.vehicles.list_by_company(caller.company_id, &filter).await
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        let year = payload.year_of_manufacture.unwrap_or_else(current_year);
        self.check_assignment(caller, year, payload.office_id, payload.driver_id)
            .await?;

        let vehicle = self
            .stores
            .vehicles
            .create(
                caller.company_id,
                NewVehicle {
                    licence_plate: payload.licence_plate,
                    name: payload.name,
                    model: payload.model,
                    year_of_manufacture: year,
                    office_id: payload.office_id,
                    driver_id: payload.driver_id,
                },
            )
            .await?;

        tracing::info!(company = %caller.company_id, vehicle = %vehicle.id, "Veículo cadastrado");
        Ok(vehicle)
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> Result<Vehicle, AppError> {
        self.stores
            .vehicles
            .find_in_company(caller.company_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Vehicle {}", id)))
    }

    /// Atualização parcial. As regras valem para o registro já mesclado,
    /// então mudar só o escritório também reconfere o motorista.
    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateVehiclePayload,
    ) -> Result<Vehicle, AppError> {
        let mut vehicle = self.get(caller, id).await?;

        if let Some(licence_plate) = payload.licence_plate {
            vehicle.licence_plate = licence_plate;
        }
        if let Some(name) = payload.name {
            vehicle.name = name;
        }
        if let Some(model) = payload.model {
            vehicle.model = model;
        }
        if let Some(year) = payload.year_of_manufacture {
            vehicle.year_of_manufacture = year;
        }
        if let Some(office_id) = payload.office_id {
            vehicle.office_id = office_id;
        }
        if let Some(driver_id) = payload.driver_id {
            vehicle.driver_id = driver_id;
        }

        self.check_assignment(
            caller,
            vehicle.year_of_manufacture,
            vehicle.office_id,
            vehicle.driver_id,
        )
        .await?;

        self.stores.vehicles.update(&vehicle).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        if !self.stores.vehicles.delete(caller.company_id, id).await? {
            return Err(AppError::ResourceNotFound(format!("Vehicle {}", id)));
        }
        tracing::info!(company = %caller.company_id, vehicle = %id, "Veículo removido");
        Ok(())
    }

    /// Veículos que o próprio chamador dirige.
    pub async fn own_vehicles(&self, caller: &Caller) -> Result<Vec<Vehicle>, AppError> {
        self.stores.vehicles.list_by_driver(caller.company_id, caller.id).await
    }

    // Ano, referências da mesma empresa e motorista alocado no escritório.
    async fn check_assignment(
        &self,
        caller: &Caller,
        year: i32,
        office_id: Option<Uuid>,
        driver_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        check_year_of_manufacture(year, current_year())?;

        let office: Option<Office> = match office_id {
            Some(id) => Some(
                self.stores
                    .offices
                    .find_in_company(caller.company_id, id)
                    .await?
                    .ok_or(AppError::InvalidReference("officeId"))?,
            ),
            None => None,
        };

        if let Some(id) = driver_id {
            self.stores
                .members
                .find_in_company(caller.company_id, id)
                .await?
                .ok_or(AppError::InvalidReference("driverId"))?;
        }

        check_driver_in_office(driver_id, office.as_ref()).inspect_err(|_| {
            tracing::warn!(office = ?office_id, driver = ?driver_id, "Motorista fora do escritório do veículo");
        })
    }
}
