// src/lib.rs
//! Client for the employee biodata service: session cookies, the shared API
//! client, the biodata form and the page controllers built on them.

pub mod config;
pub mod dtos;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
