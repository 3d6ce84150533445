pub mod admin;
pub mod app;
pub mod applications;
pub mod auth;
pub mod clients;
pub mod upload;
