pub mod check;
pub mod health;

pub use check::{CheckService, check_routes};
pub use health::{HealthService, health_routes};
