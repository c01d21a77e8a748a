// src/services/company_service.rs

use crate::{
    common::error::AppError,
    db::repository::Stores,
    models::{
        auth::Caller,
        company::{Company, UpdateCompanyPayload},
    },
};

#[derive(Clone)]
pub struct CompanyService {
    stores: Stores,
}

impl CompanyService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    /// A empresa do chamador. O id nunca vem da requisição.
    pub async fn get_own(&self, caller: &Caller) -> Result<Company, AppError> {
        self.stores
            .companies
            .find_by_id(caller.company_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Company {}", caller.company_id)))
    }

    pub async fn update_own(
        &self,
        caller: &Caller,
        payload: UpdateCompanyPayload,
    ) -> Result<Company, AppError> {
        let mut company = self.get_own(caller).await?;

        if let Some(name) = payload.name {
            company.name = name;
        }
        if let Some(address) = payload.address {
            company.address = address;
        }

        let updated = self.stores.companies.update(&company).await?;
        tracing::info!(company = %updated.id, "Dados da empresa atualizados");
        Ok(updated)
    }
}
