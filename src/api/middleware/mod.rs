pub mod auth;
pub mod content_type;
pub mod timing;

pub use auth::{Rejection, SharedSecretAuth};
pub use content_type::{APPLICATION_JSON, JsonContentType};
pub use timing::TimingMiddleware;
