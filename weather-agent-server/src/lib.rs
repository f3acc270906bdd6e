//! A2A JSON-RPC transport for the weather agent.

pub mod error;
pub mod json_rpc;
pub mod routes;
pub mod server;

pub use error::{Error, Result};
pub use server::A2AServer;
