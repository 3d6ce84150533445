pub mod application;
pub mod client;
pub mod document;
pub mod role;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use client::Client;
pub use document::Document;
pub use role::Role;
pub use user::User;
