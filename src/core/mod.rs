//! Core services and infrastructure

pub mod cleanup;
pub mod config;
pub mod error_handling;
pub mod logging;
