//! Application Layer
//!
//! Use cases and application services.

pub mod auth_state;
pub mod config;
pub mod gatekeeper;

// Re-exports
pub use auth_state::{AuthController, AuthSnapshot, AuthStatus, Navigation};
pub use config::AuthConfig;
pub use gatekeeper::{GateDecision, Gatekeeper, GatekeeperConfig};
