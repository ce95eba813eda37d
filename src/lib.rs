//! hyperkey library
//!
//! Builds the rule document consumed by a key-remapping host application:
//! hyper-key layers, a shift-lock toggle, and plain remaps, expanded from a
//! small declarative vocabulary, validated, and written as one JSON file.

// Module declarations
pub mod config;
pub mod constants;
pub mod declarations;
pub mod error;
pub mod generator;
pub mod models;
pub mod simulator;
pub mod variables;
