//! Auth (Session) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Session entities, credential store and gateway traits
//! - `application/` - Auth state controller, gatekeeper, config
//! - `infra/` - Cookie-jar credential store, HTTP sign-in gateway
//! - `presentation/` - HTTP handlers, DTOs, router, gatekeeper middleware
//!
//! ## Features
//! - One durable session per profile (token + user profile, 7-day expiry)
//! - Route protection before any handler runs, redirecting with `?from=`
//! - Login/logout that clear the query cache
//! - Concurrent logins rejected rather than raced

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    AuthConfig, AuthController, AuthSnapshot, AuthStatus, GateDecision, Gatekeeper,
    GatekeeperConfig, Navigation,
};
pub use domain::{AuthGateway, CredentialStore, Session, SignInOutput, UserProfile, UserRole};
pub use error::{AuthError, AuthResult};
pub use infra::{CookieCredentialStore, HttpAuthGateway};
pub use presentation::middleware::{GatekeeperState, session_gatekeeper};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::{AppError, ErrorKind};
