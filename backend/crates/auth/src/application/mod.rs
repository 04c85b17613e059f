//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_user;
pub mod login;

// Re-exports
pub use config::AuthConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
