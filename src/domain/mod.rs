//! Core domain types and logic.

pub mod error;
pub mod price;
pub mod position;
pub mod trade;
pub mod config;
pub mod config_validation;
pub mod acquisition;
pub mod simulation;
pub mod metrics;
pub mod benchmark;
pub mod report;
