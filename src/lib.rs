//! Identity directory service

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Directory search capability contract
pub mod directory;

/// Request/response normalization shared by all handlers
pub mod handler;

/// HTTP route handlers
pub mod routes;

/// Server assembly and startup
pub mod server;

/// Shared types
pub mod types;
