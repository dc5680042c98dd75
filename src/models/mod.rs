pub mod biodata;
pub mod serde_text;
pub mod user;
