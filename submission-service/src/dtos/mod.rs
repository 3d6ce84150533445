pub mod admin;
pub mod applications;
pub mod auth;
pub mod clients;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
