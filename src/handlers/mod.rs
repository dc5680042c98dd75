pub mod admin_list;
pub mod biodata_page;
pub mod layout;
pub mod notice;
pub mod register_page;
