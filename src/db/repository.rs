// src/db/repository.rs

//! Contratos de acesso a dados.
//!
//! Toda leitura de membro, escritório ou veículo recebe o `company_id` do
//! chamador: o isolamento entre empresas é feito aqui, não nos handlers.
//! As implementações Postgres ficam nos `*_repo.rs`.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{Member, NewMember},
        company::{Company, NewCompany},
        employee::EmployeeFilter,
        office::{CreateOfficePayload, Office, OfficeFilter},
        vehicle::{NewVehicle, Vehicle, VehicleFilter},
    },
};

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>, AppError>;

    async fn update(&self, company: &Company) -> Result<Company, AppError>;

    /// Cria a empresa e o seu primeiro administrador de forma atômica:
    /// se qualquer uma das duas inserções falhar, nada é persistido.
    async fn create_with_admin(
        &self,
        company: NewCompany,
        admin: NewMember,
    ) -> Result<(Company, Member), AppError>;
}

#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Busca global, usada apenas na resolução de identidade (token).
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Member>, AppError>;

    /// Busca global por e-mail (já normalizado), usada no login e no cadastro.
    async fn find_by_email(&self, email: &str) -> Result<Option<Member>, AppError>;

    async fn find_in_company(&self, company_id: Uuid, id: Uuid)
        -> Result<Option<Member>, AppError>;

    /// Lista membros não-administradores da empresa.
    async fn list_employees(
        &self,
        company_id: Uuid,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Member>, AppError>;

    async fn create(&self, company_id: Uuid, member: NewMember) -> Result<Member, AppError>;

    async fn update(&self, member: &Member) -> Result<Member, AppError>;

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait OfficeStore: Send + Sync {
    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &OfficeFilter,
    ) -> Result<Vec<Office>, AppError>;

    async fn find_in_company(&self, company_id: Uuid, id: Uuid)
        -> Result<Option<Office>, AppError>;

    async fn find_by_occupant(
        &self,
        company_id: Uuid,
        member_id: Uuid,
    ) -> Result<Option<Office>, AppError>;

    async fn create(
        &self,
        company_id: Uuid,
        office: &CreateOfficePayload,
    ) -> Result<Office, AppError>;

    /// Atualiza os dados cadastrais. O ocupante não é alterado aqui.
    async fn update(&self, office: &Office) -> Result<Office, AppError>;

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Define (ou limpa) o ocupante do escritório numa única transação:
    /// - se `release_from` vier preenchido, aquele escritório perde o ocupante;
    /// - todo membro que deixa um escritório deixa também de dirigir os
    ///   veículos daquele escritório.
    async fn assign_occupant(
        &self,
        company_id: Uuid,
        office_id: Uuid,
        occupant_id: Option<Uuid>,
        release_from: Option<Uuid>,
    ) -> Result<Office, AppError>;
}

#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn list_by_company(
        &self,
        company_id: Uuid,
        filter: &VehicleFilter,
    ) -> Result<Vec<Vehicle>, AppError>;

    async fn list_by_driver(
        &self,
        company_id: Uuid,
        driver_id: Uuid,
    ) -> Result<Vec<Vehicle>, AppError>;

    async fn find_in_company(&self, company_id: Uuid, id: Uuid)
        -> Result<Option<Vehicle>, AppError>;

    async fn create(&self, company_id: Uuid, vehicle: NewVehicle) -> Result<Vehicle, AppError>;

    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;

    async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

/// O conjunto de repositórios que os serviços recebem.
#[derive(Clone)]
pub struct Stores {
    pub companies: Arc<dyn CompanyStore>,
    pub members: Arc<dyn MemberStore>,
    pub offices: Arc<dyn OfficeStore>,
    pub vehicles: Arc<dyn VehicleStore>,
}
