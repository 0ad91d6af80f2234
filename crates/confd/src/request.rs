//! JSON-RPC request envelope.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::Result;

/// One JSON-RPC 1.0 request.
///
/// `params` is pre-serialized so the wire format stays stable regardless of
/// how the caller constructed the values.
#[derive(Debug, Serialize)]
pub struct Request {
    pub method: String,
    pub params: Box<RawValue>,
    pub id: u64,
}

impl Request {
    /// Build a request envelope. An empty parameter list encodes as `null`.
    pub fn new(method: &str, params: Vec<Value>, id: u64) -> Result<Request> {
        let params = if params.is_empty() {
            RawValue::from_string("null".to_string())?
        } else {
            serde_json::value::to_raw_value(&params)?
        };
        Ok(Request {
            method: method.to_string(),
            params,
            id,
        })
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = self.params.get();
        if params == "null" {
            params = "";
        }
        write!(f, "[{}] {}({})", self.id, self.method, params)
    }
}
