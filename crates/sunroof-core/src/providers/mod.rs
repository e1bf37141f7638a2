//! HTTP adapters for the provider ports

pub mod overpass;
pub mod power;

pub use overpass::OverpassProvider;
pub use power::PowerProvider;
