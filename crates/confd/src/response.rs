//! JSON-RPC response envelope and decoding rules.

use std::fmt;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::value::RawValue;

use crate::error::{Error, Result};

/// One JSON-RPC 1.0 response.
///
/// The daemon sometimes emits a string in the `error` field, sometimes null,
/// occasionally a structured object; anything non-null counts as an error.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub result: Option<Box<RawValue>>,
}

impl Response {
    /// Decode the result into `T`, or surface the envelope's failure mode.
    ///
    /// With `check_return` set a bare `0` result becomes [`Error::ReturnCode`].
    /// The check stays off for `get_SID` (a small number is a valid session
    /// id) and for calls whose target is a confd boolean (encoded as `0`/`1`).
    pub fn decode<T: DeserializeOwned>(&self, check_return: bool) -> Result<T> {
        if let Some(error) = &self.error {
            return Err(Error::Remote(error_text(error)));
        }
        let Some(result) = &self.result else {
            return Err(Error::EmptyResponse);
        };
        if check_return && result.get() == "0" {
            return Err(Error::ReturnCode);
        }
        Ok(serde_json::from_str(result.get())?)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.result) {
            (Some(error), _) => write!(f, "[{}] Error: {}", self.id, error_text(error)),
            (None, Some(result)) => write!(f, "[{}] Result: {}", self.id, result.get()),
            (None, None) => write!(f, "[{}] Result: empty response", self.id),
        }
    }
}

fn error_text(error: &Value) -> String {
    match error {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
