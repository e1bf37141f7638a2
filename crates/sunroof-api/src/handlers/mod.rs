mod health;
mod locate;

pub use health::health_check;
pub use locate::locate_building;
