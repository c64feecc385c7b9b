pub mod auth;
pub mod envelope;
pub mod error;
pub mod router;
pub mod server;
pub mod stream;
pub mod timeout;
pub mod tracing;
pub mod types;
pub mod upstream;

pub use self::tracing::init_tracing;
