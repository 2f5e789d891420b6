pub mod connection;
pub mod endpoints;

pub use connection::{ApiConnectionError, GenerationSettings};
pub use endpoints::Provider;
