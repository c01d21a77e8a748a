pub mod auth;
pub mod authorization;
pub mod company_service;
pub mod consistency;
pub mod employee_service;
pub mod office_service;
pub mod vehicle_service;
