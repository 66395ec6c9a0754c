pub mod client;
pub mod error;
pub mod server;

pub use client::{MindMapClient, Origin};
pub use error::ServiceError;
pub use server::{HealthStatus, MindMapServer, ServerConfig};
