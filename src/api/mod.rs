pub mod envelope;
pub mod middleware;
mod routes;
pub mod services;

pub use envelope::{Envelope, Status};
pub use routes::configure_routes;
