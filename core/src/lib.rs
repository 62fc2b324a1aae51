//! # ASTRIUM CONTAINER CORE
//!
//! **RUST-POWERED INVERSION-OF-CONTROL CONTAINER FOR THE ASTRIUM FRAMEWORK**
//!
//! **ARCHITECTURE**: Flat registries keyed by canonical abstract, a recursive
//! resolver with per-call cycle detection, and lifecycle hooks applied before
//! singleton caching
//! **GUARANTEE**: Deterministic resolution; at most one construction per
//! shared binding even under concurrent first access

pub mod api;
pub mod binding;
pub mod container;
pub mod errors;
pub mod hooks;
pub mod resolve;
