//! Sunroof Core - footprint matching, projected area, and solar yield estimation
//!
//! This crate contains the query pipeline and the port definitions for the two
//! external data providers (building footprints and irradiance climatology).

pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod pipeline;
pub mod ports;
pub mod providers;
pub mod solar;

pub use error::{Result, SunroofError};
pub use pipeline::Pipeline;
