#![forbid(unsafe_code)]

//! restd maps a REST URL space onto the confd object store. Every inbound
//! request authenticates through HTTP Basic against the daemon's session
//! mechanism and runs on its own short-lived connection.

pub mod auth;
pub mod definitions_api;
pub mod error;
pub mod objects_api;
pub mod server;
