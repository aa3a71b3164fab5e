// Common library for shared code: data access, models, configuration and logging

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod telemetry;
