// src/services/authorization.rs

//! Tabela de autorização: (recurso, operação, papel) -> permitido?
//!
//! É uma função pura, avaliada pelo extrator `RequirePermission` antes de
//! qualquer lógica do handler. O escopo por empresa é aplicado depois, nos
//! repositórios, com o `company_id` do chamador.

use crate::{common::error::AppError, models::auth::Caller};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Company,
    Employee,
    Profile,
    Office,
    OfficeAssignment,
    OwnOffice,
    Vehicle,
    OwnVehicles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Read,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Caller {
    pub fn role(&self) -> Role {
        if self.is_admin { Role::Admin } else { Role::Member }
    }
}

pub fn is_allowed(resource: Resource, operation: Operation, role: Role) -> bool {
    use Operation::*;
    use Resource::*;

    let admin = role == Role::Admin;
    match (resource, operation) {
        // Qualquer membro vê a própria empresa; só o admin altera
        (Company, Read) => true,
        (Company, Update) => admin,

        (Employee, _) => admin,

        (Profile, Read | Update) => true,

        (Office, List) => true,
        (Office, Read | Create | Update | Delete) => admin,
        (OfficeAssignment, Update) => admin,
        (OwnOffice, Read) => true,

        (Vehicle, _) => admin,
        (OwnVehicles, List) => true,

        _ => false,
    }
}

pub fn authorize(caller: &Caller, resource: Resource, operation: Operation) -> Result<(), AppError> {
    if is_allowed(resource, operation, caller.role()) {
        Ok(())
    } else {
        tracing::warn!(
            caller = %caller.id,
            ?resource,
            ?operation,
            "Acesso negado pela tabela de autorização"
        );
        Err(AppError::Forbidden)
    }
}
