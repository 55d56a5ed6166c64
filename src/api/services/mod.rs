pub mod admin;
pub mod health;
pub mod public;

pub use health::{AppStartTime, HealthService, health_routes};
pub use public::public_routes;
