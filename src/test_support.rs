// src/test_support.rs

//! Atalhos para montar cenários nos testes.

use crate::{
    db::memory::MemoryStore,
    models::{
        auth::{Caller, Member, RegisterCompanyPayload},
        employee::CreateEmployeePayload,
    },
    services::{auth::AuthService, employee_service::EmployeeService},
};

// Custo mínimo do bcrypt, para os testes não ficarem lentos
pub const TEST_BCRYPT_COST: u32 = 4;

/// Cadastra uma empresa e devolve o seu admin como chamador.
/// A senha de todos os membros criados aqui é "p".
pub async fn register(store: &MemoryStore, company: &str, email: &str) -> Caller {
    let auth = AuthService::new(store.stores(), "segredo".into(), 1, TEST_BCRYPT_COST);
    let (_, admin) = auth
        .register_company(RegisterCompanyPayload {
            first_name: "Ana".into(),
            last_name: "Lima".into(),
            email: email.into(),
            password: "p".into(),
            confirm_password: "p".into(),
            company_name: company.into(),
        })
        .await
        .unwrap();
    Caller::from(&admin)
}

pub async fn add_employee(store: &MemoryStore, admin: &Caller, first_name: &str, email: &str) -> Member {
    EmployeeService::new(store.stores(), TEST_BCRYPT_COST)
        .create(
            admin,
            CreateEmployeePayload {
                first_name: first_name.into(),
                last_name: "Teste".into(),
                email: email.into(),
                password: "p".into(),
                confirm_password: "p".into(),
            },
        )
        .await
        .unwrap()
}
