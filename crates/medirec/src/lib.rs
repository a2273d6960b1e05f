//! Clinical records platform: patient and note keeping plus the diabetes
//! risk assessment pipeline, with the configuration, telemetry, and
//! authentication layers shared by the deployable services.

pub mod auth;
pub mod config;
pub mod error;
pub mod records;
pub mod telemetry;
