//! Presentation Layer
//!
//! HTTP handlers, DTOs and the dashboard router.

pub mod dto;
pub mod handlers;
pub mod router;
