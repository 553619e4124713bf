// Application layer - use cases sitting between the transports (HTTP, CLI)
// and the storage collaborator.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
