//! Middleware components.

pub mod request_id;

pub use request_id::{request_id_middleware, REQUEST_ID_HEADER};
