#![forbid(unsafe_code)]

//! Client library for the confd configuration daemon.
//!
//! confd speaks JSON-RPC 1.0 over a persistent TCP connection; each message
//! travels as a single HTTP/1.1 request/response pair. A [`Conn`] owns one
//! such connection: it serializes interleaved calls from concurrent callers
//! onto a single worker thread, establishes the session lazily (`new` plus
//! `get_SID`), and keeps the session id across reconnects.
//!
//! The daemon reports failures through two channels. The JSON-RPC `error`
//! field carries protocol-level errors, while a bare `0` result means "the
//! call failed, inspect `err_list`". When automatic error handling is on
//! (the default), the connection resolves the latter into the first entry
//! of the error list before surfacing it.
//!
//! The daemon is expected to be local or reachable through a tunnel, e.g.:
//!
//! ```text
//! ssh -L 4472:127.0.0.1:4472 root@box
//! ```

pub mod boolean;
pub mod conn;
pub mod err_list;
pub mod error;
pub mod exports;
pub mod filter;
pub mod meta;
pub mod nodes;
pub mod objects;
pub mod options;
pub mod request;
pub mod response;
pub mod rights;
pub mod transactions;
pub mod transport;
pub mod wire;

pub use boolean::{Boolean, bool_value};
pub use conn::Conn;
pub use err_list::ErrDescription;
pub use error::{Error, Result};
pub use exports::Export;
pub use filter::ObjectFilter;
pub use meta::{AttrConstraint, AttributeDefinition, ConstraintSpec, NodeTree, ObjectMetaTree, TypeDefinition};
pub use nodes::{Node, NodePath};
pub use objects::{AnyObject, ObjectMeta};
pub use options::{
    ANONYMOUS_LOCAL_URL, DEFAULT_FACILITY, DEFAULT_PORT, DEFAULT_TIMEOUT, Options,
    SYSTEM_LOCAL_URL, safe_url,
};
pub use request::Request;
pub use response::Response;
pub use transactions::Transaction;
pub use transport::{TcpTransport, Transport};
