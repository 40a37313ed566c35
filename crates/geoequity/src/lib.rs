//! GeoEquity: Economic Justice Value scoring for retail and service locations.

pub mod census;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
