// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    services::authorization::{authorize, Operation, Resource},
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    const RESOURCE: Resource;
    const OPERATION: Operation;
}

/// 2. O Extractor (Guardião). Roda antes do corpo da requisição ser lido,
/// então um pedido negado não chega a tocar em nada.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(caller) = AuthenticatedUser::from_request_parts(parts, state).await?;

        authorize(&caller, T::RESOURCE, T::OPERATION).map_err(|e| {
            let app_state = AppState::from_ref(state);
            e.to_api_error(&Locale::from_parts(parts), &app_state.i18n_store)
        })?;

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission {
    ($name:ident, $resource:ident, $operation:ident) => {
        pub struct $name;
        impl PermissionDef for $name {
            const RESOURCE: Resource = Resource::$resource;
            const OPERATION: Operation = Operation::$operation;
        }
    };
}

permission!(PermCompanyRead, Company, Read);
permission!(PermCompanyUpdate, Company, Update);

permission!(PermEmployeeList, Employee, List);
permission!(PermEmployeeRead, Employee, Read);
permission!(PermEmployeeCreate, Employee, Create);
permission!(PermEmployeeUpdate, Employee, Update);
permission!(PermEmployeeDelete, Employee, Delete);

permission!(PermProfileRead, Profile, Read);
permission!(PermProfileUpdate, Profile, Update);

permission!(PermOfficeList, Office, List);
permission!(PermOfficeRead, Office, Read);
permission!(PermOfficeCreate, Office, Create);
permission!(PermOfficeUpdate, Office, Update);
permission!(PermOfficeDelete, Office, Delete);
permission!(PermOfficeAssign, OfficeAssignment, Update);
permission!(PermOwnOfficeRead, OwnOffice, Read);

permission!(PermVehicleList, Vehicle, List);
permission!(PermVehicleRead, Vehicle, Read);
permission!(PermVehicleCreate, Vehicle, Create);
permission!(PermVehicleUpdate, Vehicle, Update);
permission!(PermVehicleDelete, Vehicle, Delete);
permission!(PermOwnVehiclesList, OwnVehicles, List);
