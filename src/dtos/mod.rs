pub mod auth_dtos;
pub mod biodata_dtos;
// alias supaya dapat dipanggil sebagai `crate::dtos::auth` dan `crate::dtos::biodata`
pub use auth_dtos as auth;
pub use biodata_dtos as biodata;
