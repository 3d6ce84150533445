pub mod admin;
pub mod auth;
pub mod database;
pub mod error;
pub mod jwt;
pub mod storage;
pub mod workflow;

pub use error::ServiceError;
