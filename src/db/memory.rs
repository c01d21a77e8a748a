// src/db/memory.rs

//! Implementação em memória dos repositórios, usada nos testes.
//! Reproduz as regras que o Postgres garante (e-mail único, ocupante único,
//! ON DELETE SET NULL) para que os serviços sejam testados sem banco.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::{CompanyStore, MemberStore, OfficeStore, Stores, VehicleStore},
    models::{
        auth::{Member, NewMember},
        company::{Company, NewCompany},
        employee::EmployeeFilter,
        office::{CreateOfficePayload, Office, OfficeFilter},
        vehicle::{NewVehicle, Vehicle, VehicleFilter},
    },
};

#[derive(Default)]
struct Tables {
    companies: Vec<Company>,
    members: Vec<Member>,
    offices: Vec<Office>,
    vehicles: Vec<Vehicle>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stores(&self) -> Stores {
        Stores {
            companies: Arc::new(self.clone()),
            members: Arc::new(self.clone()),
            offices: Arc::new(self.clone()),
            vehicles: Arc::new(self.clone()),
        }
    }

    pub fn company_count(&self) -> usize {
        self.lock().companies.len()
    }

    pub fn member_count(&self) -> usize {
        self.lock().members.len()
    }

    pub fn office_count(&self) -> usize {
        self.lock().offices.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // Um teste que entrou em pânico segurando o lock não invalida os dados
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn insert_member(tables: &mut Tables, company_id: Uuid, member: NewMember) -> Result<Member, AppError> {
    if tables
        .members
        .iter()
        .any(|m| m.email.eq_ignore_ascii_case(&member.email))
    {
        return Err(AppError::EmailAlreadyExists);
    }
    let now = Utc::now();
    let member = Member {
        id: Uuid::new_v4(),
        company_id,
        first_name: member.first_name,
        last_name: member.last_name,
        email: member.email,
        password_hash: member.password_hash,
        is_admin: member.is_admin,
        created_at: now,
        updated_at: now,
    };
    tables.members.push(member.clone());
    Ok(member)
}

// Mais recentes primeiro, como nas consultas SQL
fn newest_first<T: Clone>(items: impl Iterator<Item = T>, created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    items
}

#[async_trait]
impl CompanyStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        Ok(self.lock().companies.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, company: &Company) -> Result<Company, AppError> {
        let mut tables = self.lock();
        let stored = tables
            .companies
            .iter_mut()
            .find(|c| c.id == company.id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Company {}", company.id)))?;
        stored.name = company.name.clone();
        stored.address = company.address.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn create_with_admin(
        &self,
        company: NewCompany,
        admin: NewMember,
    ) -> Result<(Company, Member), AppError> {
        let mut tables = self.lock();
        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: company.name,
            address: company.address,
            created_at: now,
            updated_at: now,
        };
        // Tudo ou nada: a empresa só entra se o admin entrar
        let admin = insert_member(&mut tables, company.id, admin)?;
        tables.companies.push(company.clone());
        Ok((company, admin))
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError> {
        Ok(self.lock().members.iter().find(|m| m.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError> {
        Ok(self
            .lock()
            .members
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_in_company(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Member>, AppError> {
        Ok(self
            .lock()
            .members
            .iter()
            .find(|m| m.id == id && m.company_id == company_id)
            .cloned())
    }

    async fn list_employees(
        &self,
        company_id: Uuid,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Member>, AppError> {
        let tables = self.lock();
        let matches = |expected: &Option<String>, actual: &str| {
            expected.as_deref().is_none_or(|e| e == actual)
        };
        Ok(newest_first(
            tables
                .members
                .iter()
                .filter(|m| m.company_id == company_id && !m.is_admin)
                .filter(|m| matches(&filter.first_name, &m.first_name))
                .filter(|m| matches(&filter.last_name, &m.last_name))
                .filter(|m| {
                    filter
                        .email
                        .as_deref()
                        .is_none_or(|e| e.eq_ignore_ascii_case(&m.email))
                })
                .cloned(),
            |m| m.created_at,
        ))
    }

    async fn create(&self, company_id: Uuid, member: NewMember) -> Result<Member, AppError> {
        insert_member(&mut self.lock(), company_id, member)
    }

    async fn update(&self, member: &Member) -> Result<Member, AppError> {
        let mut tables = self.lock();
        let stored = tables
            .members
            .iter_mut()
            .find(|m| m.id == member.id && m.company_id == member.company_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Member {}", member.id)))?;
        stored.first_name = member.first_name.clone();
        stored.last_name = member.last_name.clone();
        stored.password_hash = member.password_hash.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.members.len();
        tables
            .members
            .retain(|m| !(m.id == id && m.company_id == company_id));
        if tables.members.len() == before {
            return Ok(false);
        }
        // ON DELETE SET NULL
        for office in tables.offices.iter_mut().filter(|o| o.occupant_id == Some(id)) {
            office.occupant_id = None;
        }
        for vehicle in tables.vehicles.iter_mut().filter(|v| v.driver_id == Some(id)) {
            vehicle.driver_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl OfficeStore for MemoryStore {
    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &OfficeFilter,
    ) -> Result<Vec<Office>, AppError> {
        let tables = self.lock();
        Ok(newest_first(
            tables
                .offices
                .iter()
                .filter(|o| o.company_id == company_id)
                .filter(|o| filter.country.as_deref().is_none_or(|c| c == o.country))
                .filter(|o| filter.city.as_deref().is_none_or(|c| c == o.city))
                .cloned(),
            |o| o.created_at,
        ))
    }

    async fn find_in_company(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Office>, AppError> {
        Ok(self
            .lock()
            .offices
            .iter()
            .find(|o| o.id == id && o.company_id == company_id)
            .cloned())
    }

    async fn find_by_occupant(
        &self,
        company_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<Office>, AppError> {
        Ok(self
            .lock()
            .offices
            .iter()
            .find(|o| o.occupant_id == Some(member_id) && o.company_id == company_id)
            .cloned())
    }

    async fn create(
        &self,
        company_id: Uuid,
        office: &CreateOfficePayload,
    ) -> Result<Office, AppError> {
        let now = Utc::now();
        let office = Office {
            id: Uuid::new_v4(),
            company_id,
            occupant_id: None,
            name: office.name.clone(),
            address: office.address.clone(),
            country: office.country.clone(),
            city: office.city.clone(),
            region: office.region.clone(),
            created_at: now,
            updated_at: now,
        };
        self.lock().offices.push(office.clone());
        Ok(office)
    }

    async fn update(&self, office: &Office) -> Result<Office, AppError> {
        let mut tables = self.lock();
        let stored = tables
            .offices
            .iter_mut()
            .find(|o| o.id == office.id && o.company_id == office.company_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Office {}", office.id)))?;
        stored.name = office.name.clone();
        stored.address = office.address.clone();
        stored.country = office.country.clone();
        stored.city = office.city.clone();
        stored.region = office.region.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.offices.len();
        tables
            .offices
            .retain(|o| !(o.id == id && o.company_id == company_id));
        if tables.offices.len() == before {
            return Ok(false);
        }
        for vehicle in tables.vehicles.iter_mut().filter(|v| v.office_id == Some(id)) {
            vehicle.office_id = None;
        }
        Ok(true)
    }

    async fn assign_occupant(
        &self,
        company_id: Uuid,
        office_id: Uuid,
        occupant_id: Option<Uuid>,
        release_from: Option<Uuid>,
    ) -> Result<Office, AppError> {
        // O lock cobre a operação inteira, como a transação no Postgres
        let mut tables = self.lock();

        let previous = tables
            .offices
            .iter()
            .find(|o| o.id == office_id && o.company_id == company_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Office {}", office_id)))?
            .occupant_id;

        if let Some(member) = occupant_id {
            let taken_elsewhere = tables.offices.iter().any(|o| {
                o.occupant_id == Some(member) && o.id != office_id && Some(o.id) != release_from
            });
            if taken_elsewhere {
                return Err(AppError::OccupantAlreadyAssigned);
            }
        }

        let mut released: Vec<(Uuid, Uuid)> = Vec::new();
        if let Some(previous) = previous.filter(|p| Some(*p) != occupant_id) {
            released.push((office_id, previous));
        }
        if let (Some(source), Some(member)) = (release_from, occupant_id) {
            if let Some(office) = tables.offices.iter_mut().find(|o| {
                o.id == source && o.company_id == company_id && o.occupant_id == Some(member)
            }) {
                office.occupant_id = None;
                office.updated_at = Utc::now();
            }
            released.push((source, member));
        }

        for (office, member) in released {
            for vehicle in tables.vehicles.iter_mut().filter(|v| {
                v.company_id == company_id
                    && v.office_id == Some(office)
                    && v.driver_id == Some(member)
            }) {
                vehicle.driver_id = None;
                vehicle.updated_at = Utc::now();
            }
        }

        let office = tables
            .offices
            .iter_mut()
            .find(|o| o.id == office_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Office {}", office_id)))?;
        office.occupant_id = occupant_id;
        office.updated_at = Utc::now();
        Ok(office.clone())
    }
}

#[async_trait]
impl VehicleStore for MemoryStore {
    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &VehicleFilter,
    ) -> Result<Vec<Vehicle>, AppError> {
        let tables = self.lock();
        Ok(newest_first(
            tables
                .vehicles
                .iter()
                .filter(|v| v.company_id == company_id)
                .filter(|v| filter.driver_id.is_none_or(|d| v.driver_id == Some(d)))
                .filter(|v| filter.office_id.is_none_or(|o| v.office_id == Some(o)))
                .cloned(),
            |v| v.created_at,
        ))
    }

    async fn list_by_driver(
        &self,
        company_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Vec<Vehicle>, AppError> {
        let tables = self.lock();
        Ok(newest_first(
            tables
                .vehicles
                .iter()
                .filter(|v| v.company_id == company_id && v.driver_id == Some(driver_id))
                .cloned(),
            |v| v.created_at,
        ))
    }

    async fn find_in_company(
        &self,
        company_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Vehicle>, AppError> {
        Ok(self
            .lock()
            .vehicles
            .iter()
            .find(|v| v.id == id && v.company_id == company_id)
            .cloned())
    }

    async fn create(&self, company_id: Uuid, vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            company_id,
            office_id: vehicle.office_id,
            driver_id: vehicle.driver_id,
            licence_plate: vehicle.licence_plate,
            name: vehicle.name,
            model: vehicle.model,
            year_of_manufacture: vehicle.year_of_manufacture,
            created_at: now,
            updated_at: now,
        };
        self.lock().vehicles.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let mut tables = self.lock();
        let stored = tables
            .vehicles
            .iter_mut()
            .find(|v| v.id == vehicle.id && v.company_id == vehicle.company_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Vehicle {}", vehicle.id)))?;
        *stored = Vehicle {
            updated_at: Utc::now(),
            ..vehicle.clone()
        };
        Ok(stored.clone())
    }

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let before = tables.vehicles.len();
        tables
            .vehicles
            .retain(|v| !(v.id == id && v.company_id == company_id));
        Ok(tables.vehicles.len() != before)
    }
}
