pub mod auth_repo;
pub mod biodata_repo;
