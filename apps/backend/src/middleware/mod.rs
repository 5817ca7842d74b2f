pub mod cors;
pub mod jwt_extract;
pub mod request_log;

pub use cors::cors_middleware;
pub use jwt_extract::JwtExtract;
pub use request_log::RequestLog;
