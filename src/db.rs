pub mod repository;
pub use repository::Stores;

pub mod company_repo;
pub use company_repo::CompanyRepository;
pub mod member_repo;
pub use member_repo::MemberRepository;
pub mod office_repo;
pub use office_repo::OfficeRepository;
pub mod vehicle_repo;
pub use vehicle_repo::VehicleRepository;

#[cfg(test)]
pub mod memory;
