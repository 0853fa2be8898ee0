mod environment;
mod error;
mod upstream;

pub use environment::Environment;
pub use error::{DomainError, HandlerError};
pub use upstream::UpstreamResponse;
