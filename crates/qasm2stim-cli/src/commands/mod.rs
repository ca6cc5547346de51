//! CLI command implementations.

pub mod convert;
pub mod gates;
pub mod version;
