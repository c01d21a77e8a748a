// src/services/employee_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::repository::Stores,
    models::{
        auth::{normalize_email, Caller, Member, NewMember},
        employee::{ChangePasswordPayload, CreateEmployeePayload, EmployeeFilter, UpdateEmployeePayload},
    },
    services::auth::hash_password,
};

/// Gestão de funcionários (membros não-admin) e do próprio perfil.
#[derive(Clone)]
pub struct EmployeeService {
    stores: Stores,
    bcrypt_cost: u32,
}

impl EmployeeService {
    pub fn new(stores: Stores, bcrypt_cost: u32) -> Self {
        Self { stores, bcrypt_cost }
    }

    pub async fn list(&self, caller: &Caller, mut filter: EmployeeFilter) -> Result<Vec<Member>, AppError> {
        filter.email = filter.email.as_deref().map(normalize_email);
        self.stores.members.list_employees(caller.company_id, &filter).await
    }

    pub async fn create(
        &self,
        caller: &Caller,
        payload: CreateEmployeePayload,
    ) -> Result<Member, AppError> {
        if payload.password != payload.confirm_password {
            return Err(AppError::PasswordMismatch);
        }

        let email = normalize_email(&payload.email);
        if self.stores.members.find_by_email(&email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        let password_hash = hash_password(&payload.password, self.bcrypt_cost).await?;

        // A empresa vem sempre do admin que está criando
        let employee = self
            .stores
            .members
            .create(
                caller.company_id,
                NewMember {
                    first_name: payload.first_name,
                    last_name: payload.last_name,
                    email,
                    password_hash,
                    is_admin: false,
                },
            )
            .await?;

        tracing::info!(company = %caller.company_id, employee = %employee.id, "Funcionário cadastrado");
        Ok(employee)
    }

    /// Funcionário da empresa do chamador. Admins e membros de outras empresas
    /// respondem como inexistentes.
    pub async fn get(&self, caller: &Caller, id: Uuid) -> Result<Member, AppError> {
        self.stores
            .members
            .find_in_company(caller.company_id, id)
            .await?
            .filter(|m| !m.is_admin)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Employee {}", id)))
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: Uuid,
        payload: UpdateEmployeePayload,
    ) -> Result<Member, AppError> {
        let mut employee = self.get(caller, id).await?;

        if let Some(first_name) = payload.first_name {
            employee.first_name = first_name;
        }
        if let Some(last_name) = payload.last_name {
            employee.last_name = last_name;
        }
        if let Some(password) = payload.password {
            employee.password_hash = hash_password(&password, self.bcrypt_cost).await?;
        }

        self.stores.members.update(&employee).await
    }

    pub async fn delete(&self, caller: &Caller, id: Uuid) -> Result<(), AppError> {
        let employee = self.get(caller, id).await?;
        if !self.stores.members.delete(caller.company_id, employee.id).await? {
            return Err(AppError::ResourceNotFound(format!("Employee {}", id)));
        }
        tracing::info!(company = %caller.company_id, employee = %id, "Funcionário removido");
        Ok(())
    }

    // ---
    // Perfil (o próprio chamador)
    // ---

    pub async fn profile(&self, caller: &Caller) -> Result<Member, AppError> {
        self.stores
            .members
            .find_in_company(caller.company_id, caller.id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Member {}", caller.id)))
    }

    pub async fn change_password(
        &self,
        caller: &Caller,
        payload: ChangePasswordPayload,
    ) -> Result<Member, AppError> {
        let mut member = self.profile(caller).await?;
        member.password_hash = hash_password(&payload.password, self.bcrypt_cost).await?;
        self.stores.members.update(&member).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::MemoryStore,
        services::auth::AuthService,
        test_support::{add_employee, register},
    };

    #[tokio::test]
    async fn listing_is_scoped_to_the_callers_company() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let globex = register(&store, "Globex", "admin@globex.com").await;
        add_employee(&store, &acme, "Bruno", "bruno@acme.com").await;
        add_employee(&store, &globex, "Bruno", "bruno@globex.com").await;
        let service = EmployeeService::new(store.stores(), 4);

        let filter = EmployeeFilter {
            first_name: Some("Bruno".into()),
            ..Default::default()
        };
        let found = service.list(&acme, filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email, "bruno@acme.com");
        assert_eq!(found[0].company_id, acme.company_id);
    }

    #[tokio::test]
    async fn admins_are_not_listed_as_employees() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let service = EmployeeService::new(store.stores(), 4);

        assert!(service.list(&acme, EmployeeFilter::default()).await.unwrap().is_empty());
        assert!(matches!(
            service.get(&acme, acme.id).await,
            Err(AppError::ResourceNotFound(_))
        ));
    }

    #[tokio::test]
    async fn created_employee_joins_the_admins_company() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let service = EmployeeService::new(store.stores(), 4);

        let employee = service
            .create(
                &acme,
                CreateEmployeePayload {
                    first_name: "Carla".into(),
                    last_name: "Dias".into(),
                    email: "Carla@Acme.com".into(),
                    password: "x".into(),
                    confirm_password: "x".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(employee.company_id, acme.company_id);
        assert!(!employee.is_admin);
        assert_eq!(employee.email, "carla@acme.com");
    }

    #[tokio::test]
    async fn duplicate_email_and_mismatch_are_rejected() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let service = EmployeeService::new(store.stores(), 4);
        let payload = |email: &str, confirm: &str| CreateEmployeePayload {
            first_name: "Carla".into(),
            last_name: "Dias".into(),
            email: email.into(),
            password: "x".into(),
            confirm_password: confirm.into(),
        };

        assert!(matches!(
            service.create(&acme, payload("ADMIN@acme.com", "x")).await,
            Err(AppError::EmailAlreadyExists)
        ));
        assert!(matches!(
            service.create(&acme, payload("carla@acme.com", "y")).await,
            Err(AppError::PasswordMismatch)
        ));
        assert_eq!(store.member_count(), 1);
    }

    #[tokio::test]
    async fn other_companies_employees_look_missing() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let globex = register(&store, "Globex", "admin@globex.com").await;
        let bruno = add_employee(&store, &globex, "Bruno", "bruno@globex.com").await;
        let service = EmployeeService::new(store.stores(), 4);

        assert!(matches!(service.get(&acme, bruno.id).await, Err(AppError::ResourceNotFound(_))));
        assert!(matches!(
            service.update(&acme, bruno.id, UpdateEmployeePayload::default()).await,
            Err(AppError::ResourceNotFound(_))
        ));
        assert!(matches!(service.delete(&acme, bruno.id).await, Err(AppError::ResourceNotFound(_))));
        assert_eq!(store.member_count(), 3);
    }

    #[tokio::test]
    async fn password_changes_take_effect_on_login() {
        let store = MemoryStore::new();
        let acme = register(&store, "Acme", "admin@acme.com").await;
        let bruno = add_employee(&store, &acme, "Bruno", "bruno@acme.com").await;
        let service = EmployeeService::new(store.stores(), 4);
        let auth = AuthService::new(store.stores(), "s".into(), 1, 4);

        service
            .change_password(&Caller::from(&bruno), ChangePasswordPayload { password: "nova".into() })
            .await
            .unwrap();

        assert!(auth.login("bruno@acme.com", "nova").await.is_ok());
        assert!(matches!(
            auth.login("bruno@acme.com", "p").await,
            Err(AppError::InvalidCredentials)
        ));
    }
}
