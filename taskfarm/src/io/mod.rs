//! I/O adapters for the remote service and local configuration.

pub mod account;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod session;
