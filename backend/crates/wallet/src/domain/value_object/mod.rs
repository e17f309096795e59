//! Value Object Module

pub mod lenient;
pub mod params;
