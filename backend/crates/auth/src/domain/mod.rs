//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{Session, SignInOutput, UserProfile};
pub use repository::{AuthGateway, CredentialStore};
pub use value_object::user_role::UserRole;
