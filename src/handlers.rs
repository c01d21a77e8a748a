pub mod auth;
pub mod company;
pub mod employees;
pub mod offices;
pub mod profile;
pub mod vehicles;
