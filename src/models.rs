pub mod auth;
pub mod company;
pub mod employee;
pub mod office;
pub mod vehicle;
