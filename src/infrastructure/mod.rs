//! Infrastructure Layer
//!
//! Contains all external concerns: the HTTP transport to explorers and the
//! configuration source that feeds the registry.

pub mod driven_adapters;
