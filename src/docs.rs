// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::token_auth,

        // --- Company / Profile ---
        handlers::company::get_company,
        handlers::company::update_company,
        handlers::profile::get_profile,
        handlers::profile::update_profile,

        // --- Employees ---
        handlers::employees::list_employees,
        handlers::employees::create_employee,
        handlers::employees::get_employee,
        handlers::employees::update_employee,
        handlers::employees::delete_employee,

        // --- Offices ---
        handlers::offices::list_offices,
        handlers::offices::create_office,
        handlers::offices::get_office,
        handlers::offices::update_office,
        handlers::offices::delete_office,
        handlers::offices::assign_employee,
        handlers::offices::get_own_office,

        // --- Vehicles ---
        handlers::vehicles::list_vehicles,
        handlers::vehicles::create_vehicle,
        handlers::vehicles::get_vehicle,
        handlers::vehicles::update_vehicle,
        handlers::vehicles::delete_vehicle,
        handlers::vehicles::list_own_vehicles,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Member,
            models::auth::RegisterCompanyPayload,
            models::auth::TokenAuthPayload,
            models::auth::TokenResponse,
            models::auth::MessageResponse,

            // --- Company ---
            models::company::Company,
            models::company::UpdateCompanyPayload,

            // --- Employees ---
            models::employee::CreateEmployeePayload,
            models::employee::UpdateEmployeePayload,
            models::employee::ChangePasswordPayload,

            // --- Offices ---
            models::office::Office,
            models::office::CreateOfficePayload,
            models::office::UpdateOfficePayload,
            models::office::AssignEmployeePayload,

            // --- Vehicles ---
            models::vehicle::Vehicle,
            models::vehicle::CreateVehiclePayload,
            models::vehicle::UpdateVehiclePayload,
        )
    ),
    tags(
        (name = "Auth", description = "Cadastro de Empresas e Login"),
        (name = "Company", description = "Dados da Empresa"),
        (name = "Profile", description = "Dados do Usuário Logado"),
        (name = "Employees", description = "Gestão de Funcionários"),
        (name = "Offices", description = "Escritórios e Alocação de Funcionários"),
        (name = "Vehicles", description = "Frota de Veículos")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
