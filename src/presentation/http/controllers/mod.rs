// src/presentation/http/controllers/mod.rs
pub mod activity;
pub mod articles;
pub mod auth;
pub mod dashboard;
pub mod movements;
pub mod requests;
