pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use std::sync::Arc;

use services::{
    admin::AdminService, auth::AuthService, database::Database, jwt::JwtService,
    storage::Storage, workflow::WorkflowService,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub jwt: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
    pub admin_service: Arc<AdminService>,
    pub workflow_service: Arc<WorkflowService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, jwt: Arc<JwtService>, storage: Arc<dyn Storage>) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(db.clone(), jwt.clone())),
            admin_service: Arc::new(AdminService::new(db.clone())),
            workflow_service: Arc::new(WorkflowService::new(db.clone(), storage)),
            db,
            jwt,
        }
    }
}
