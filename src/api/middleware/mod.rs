pub mod auth;
pub mod request_id;

pub use auth::{AdminAuth, AuthMethod};
pub use request_id::{RequestId, RequestIdMiddleware};
