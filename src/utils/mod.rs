pub mod display;
pub mod pagination;
