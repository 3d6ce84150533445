pub mod auth;

pub use auth::{ensure_role, CurrentUser};
