//! HTTP server exposing the tournament directory.
//!
//! The binary wires these pieces together; they are exported so integration
//! tests can build the router without binding a socket.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
