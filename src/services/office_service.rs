// src/services/office_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::Stores,
    models::{
        auth::Caller,
        office::{AssignEmployeePayload, CreateOfficePayload, Office, OfficeFilter, UpdateOfficePayload},
    },
    services::consistency::{plan_occupant_assignment, OccupancyPlan},
};

#[derive(Clone)]
pub struct OfficeService {
    stores: Stores,
}

impl OfficeService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub async fn list(&self, caller: &Caller, filter: OfficeFilter) -> Result<Vec<Office>, AppError> {
        self.stores.offices.list_by_company(caller.company_id, &filter).await
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateOfficePayload,
    ) -> Result<Office, AppError> {
        let office = self.stores.offices.create(caller.company_id, &payload).await?;
        tracing::info!(company = %caller.company_id, office = %office.id, "Escritório criado");
        Ok(office)
    }

    pub async fn get(&self, caller: &Caller, id: Uuid) -> Result<Office, AppError> {
        self.stores
            .offices
            .find_in_company(caller.company_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Office {}", id)))
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateOfficePayload,
    ) -> Result<Office, AppError> {
        let mut office = self.get(caller, id).await?;

        if let Some(name) = payload.name {
            office.name = name;
        }
        if let Some(address) = payload.address {
            office.address = address;
        }
        if let Some(country) = payload.country {
            office.country = country;
        }
        if let Some(city) = payload.city {
            office.city = city;
        }
        if let Some(region) = payload.region {
            office.region = region;
        }

        self.stores.offices.update(&office).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        if !self.stores.offices.delete(caller.company_id, id).await? {
            return Err(AppError::ResourceNotFound(format!("Office {}", id)));
        }
        tracing::info!(company = %caller.company_id, office = %id, "Escritório removido");
        Ok(())
    }

    /// Aloca (ou desaloca) um funcionário no escritório.
    pub async fn assign_employee(
        &self,
        caller: &Caller,
        office_id: Uuid,
        payload: AssignEmployeePayload,
    ) -> Result<Office, AppError> {
        // 1. O escritório precisa ser da empresa do chamador
        let office = self.get(caller, office_id).await?;

        let candidate = payload.employee_id.ok_or_else(|| {
            AppError::ValidationError(crate::common::error::field_error("employeeId", "required"))
        })?;

        // 2. O candidato precisa ser da mesma empresa, e descobrimos onde ele está hoje
        let current_office = match candidate {
            Some(member_id) => {
                self.stores
                    .members
                    .find_in_company(caller.company_id, member_id)
                    .await?
                    .ok_or(AppError::InvalidReference("employeeId"))?;
                self.stores
                    .offices
                    .find_by_occupant(caller.company_id, member_id)
                    .await?
            }
            None => None,
        };

        // 3. Decide (regra pura) e grava numa única transação
        let plan = plan_occupant_assignment(&office, candidate, current_office.as_ref(), payload.reassign)
            .inspect_err(|_| {
                tracing::warn!(office = %office.id, "Funcionário já alocado em outro escritório");
            })?;

        match plan {
            OccupancyPlan::Unchanged => Ok(office),
            OccupancyPlan::Assign { occupant_id, release_from } => {
                let updated = self
                    .stores
                    .offices
                    .assign_occupant(caller.company_id, office.id, occupant_id, release_from)
                    .await?;
                tracing::info!(
                    office = %updated.id,
                    occupant = ?updated.occupant_id,
                    released = ?release_from,
                    "Ocupante do escritório atualizado"
                );
                Ok(updated)
            }
        }
    }

    /// O escritório onde o próprio chamador está alocado.
    pub async fn own_office(&self, caller: &Caller) -> Result<Office, AppError> {
        self.stores
            .offices
            .find_by_occupant(caller.company_id, caller.id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Office of {}", caller.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{memory::MemoryStore, repository::VehicleStore},
        models::vehicle::{NewVehicle, VehicleFilter},
        test_support::{add_employee, register},
    };

    fn payload(name: &str) -> CreateOfficePayload {
        CreateOfficePayload {
            name: name.into(),
            address: "Rua A, 1".into(),
            country: "Brasil".into(),
            city: "Recife".into(),
            region: "PE".into(),
        }
    }

    fn assign(member: Uuid, reassign: bool) -> AssignEmployeePayload {
        AssignEmployeePayload {
            employee_id: Some(Some(member)),
            reassign,
        }
    }

    #[tokio::test]
    async fn created_office_belongs_to_the_callers_company() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let globex = register(&store, "Globex", "admin@globex.com").await;
        let service = OfficeService::new(store.stores());

        let office = service.create(&acme, payload("Sede")).await.unwrap();

        assert_eq!(office.company_id, acme.company_id);
        assert_eq!(service.list(&acme, OfficeFilter::default()).await.unwrap().len(), 1);
        assert!(service.list(&globex, OfficeFilter::default()).await.unwrap().is_empty());
        assert!(matches!(service.get(&globex, office.id).await, Err(AppError::ResourceNotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_by_country_and_city() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let service = OfficeService::new(store.stores());
        service.create(&acme, payload("Recife")).await.unwrap();
        service
            .create(
                &acme,
                CreateOfficePayload {
                    city: "Lisboa".into(),
                    country: "Portugal".into(),
                    ..payload("Lisboa")
                },
            )
            .await
            .unwrap();

        let filter = OfficeFilter {
            country: Some("Portugal".into()),
            city: None,
        };
        let found = service.list(&acme, filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Lisboa");
    }

    #[tokio::test]
    async fn member_already_in_another_office_is_rejected() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let bruno = add_employee(&store, &acme, "Bruno", "bruno@acme.com").await;
        let service = OfficeService::new(store.stores());
        let o1 = service.create(&acme, payload("O1")).await.unwrap();
        let o2 = service.create(&acme, payload("O2")).await.unwrap();

        service.assign_employee(&acme, o1.id, assign(bruno.id, false)).await.unwrap();
        let err = service
            .assign_employee(&acme, o2.id, assign(bruno.id, false))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::OccupantAlreadyAssigned));
        assert_eq!(service.get(&acme, o1.id).await.unwrap().occupant_id, Some(bruno.id));
        assert_eq!(service.get(&acme, o2.id).await.unwrap().occupant_id, None);
    }

    #[tokio::test]
    async fn reassign_moves_the_member_exclusively() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let bruno = add_employee(&store, &acme, "Bruno", "bruno@acme.com").await;
        let service = OfficeService::new(store.stores());
        let o1 = service.create(&acme, payload("O1")).await.unwrap();
        let o2 = service.create(&acme, payload("O2")).await.unwrap();
        service.assign_employee(&acme, o1.id, assign(bruno.id, false)).await.unwrap();

        let moved = service.assign_employee(&acme, o2.id, assign(bruno.id, true)).await.unwrap();

        assert_eq!(moved.occupant_id, Some(bruno.id));
        assert_eq!(service.get(&acme, o1.id).await.unwrap().occupant_id, None);
        assert_eq!(service.own_office(&Caller::from(&bruno)).await.unwrap().id, o2.id);
    }

    #[tokio::test]
    async fn assigning_the_same_office_twice_is_a_no_op() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let bruno = add_employee(&store, &acme, "Bruno", "bruno@acme.com").await;
        let service = OfficeService::new(store.stores());
        let o1 = service.create(&acme, payload("O1")).await.unwrap();

        service.assign_employee(&acme, o1.id, assign(bruno.id, false)).await.unwrap();
        let again = service.assign_employee(&acme, o1.id, assign(bruno.id, false)).await.unwrap();
        assert_eq!(again.occupant_id, Some(bruno.id));
    }

    #[tokio::test]
    async fn members_of_other_companies_cannot_be_assigned() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let globex = register(&store, "Globex", "admin@globex.com").await;
        let stranger = add_employee(&store, &globex, "Eva", "eva@globex.com").await;
        let service = OfficeService::new(store.stores());
        let o1 = service.create(&acme, payload("O1")).await.unwrap();

        let err = service
            .assign_employee(&acme, o1.id, assign(stranger.id, false))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference("employeeId")));
    }

    #[tokio::test]
    async fn missing_employee_field_is_a_validation_error() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let service = OfficeService::new(store.stores());
        let o1 = service.create(&acme, payload("O1")).await.unwrap();

        let err = service
            .assign_employee(&acme, o1.id, AssignEmployeePayload::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn leaving_an_office_releases_its_vehicles() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let bruno = add_employee(&store, &acme, "Bruno", "bruno@acme.com").await;
        let service = OfficeService::new(store.stores());
        let o1 = service.create(&acme, payload("O1")).await.unwrap();
        service.assign_employee(&acme, o1.id, assign(bruno.id, false)).await.unwrap();
        let van = VehicleStore::create(
            &store,
            acme.company_id,
            NewVehicle {
                licence_plate: "ABC1D23".into(),
                name: "Van".into(),
                model: "Sprinter".into(),
                year_of_manufacture: 2020,
                office_id: Some(o1.id),
                driver_id: Some(bruno.id),
            },
        )
        .await
        .unwrap();

        let vacated = service
            .assign_employee(
                &acme,
                o1.id,
                AssignEmployeePayload {
                    employee_id: Some(None),
                    reassign: false,
                },
            )
            .await
            .unwrap();

        assert_eq!(vacated.occupant_id, None);
        let vehicles = VehicleStore::list_by_company(&store, acme.company_id, &VehicleFilter::default())
            .await
            .unwrap();
        let van = vehicles.iter().find(|v| v.id == van.id).unwrap();
        assert_eq!(van.driver_id, None);
        assert_eq!(van.office_id, Some(o1.id));
    }

    #[tokio::test]
    async fn own_office_is_not_found_when_unassigned() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let service = OfficeService::new(store.stores());
        assert!(matches!(service.own_office(&acme).await, Err(AppError::ResourceNotFound(_))));
    }
}
