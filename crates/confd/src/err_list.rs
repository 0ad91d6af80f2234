//! The daemon-side error list.
//!
//! Failed calls push structured entries onto a per-session list. Entries
//! stay there until the next write transaction, and unacknowledged ones
//! block a commit. Acknowledgement is server-side state.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::boolean::Boolean;
use crate::conn::Conn;
use crate::error::Result;

/// One entry of the error list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ErrDescription {
    pub name: String,
    pub rights: String,
    #[serde(rename = "attrs")]
    pub attributes: Vec<String>,
    #[serde(rename = "Oattrs")]
    pub object_attributes: Vec<String>,
    #[serde(rename = "objname")]
    pub object_name: String,
    #[serde(rename = "del_object")]
    pub function: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "msgtype")]
    pub message_type: String,
    pub never_hide: Boolean,
    pub format: String,
    pub fatal: Boolean,
    pub class: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(rename = "perms")]
    pub permission: String,
}

impl fmt::Display for ErrDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if bool::from(self.fatal) {
            write!(f, "FATAL [{}] {}", self.message_type, self.name)
        } else {
            write!(f, "[{}] {}", self.message_type, self.name)
        }
    }
}

impl std::error::Error for ErrDescription {}

impl Conn {
    /// Errors since the last write transaction or, outside a transaction,
    /// during the last one.
    pub fn err_list(&self) -> Result<Vec<ErrDescription>> {
        self.request("err_list", Vec::new())
    }

    /// Fatal errors, same window as [`Conn::err_list`].
    pub fn err_list_fatal(&self) -> Result<Vec<ErrDescription>> {
        self.request("err_list_fatal", Vec::new())
    }

    /// Unacknowledged errors, same window as [`Conn::err_list`].
    pub fn err_list_noack(&self) -> Result<Vec<ErrDescription>> {
        self.request("err_list_noack", Vec::new())
    }

    /// Number of fatal errors during the last public method call.
    pub fn err_is_fatal(&self) -> Result<u64> {
        self.request("err_is_fatal", Vec::new())
    }

    /// Number of unacknowledged errors during the last public method call.
    pub fn err_is_noack(&self) -> Result<u64> {
        self.request("err_is_noack", Vec::new())
    }

    /// Acknowledge the given error context patterns. They are ignored for
    /// the next public method call or the rest of the transaction.
    pub fn err_ack(&self, errors: &[ErrDescription]) -> Result<()> {
        let errors = serde_json::to_value(errors)?;
        self.request::<serde_json::Value>("err_ack", vec![errors])?;
        Ok(())
    }

    /// Acknowledge everything (the catch-all pattern).
    pub fn err_ack_all(&self) -> Result<()> {
        self.request::<serde_json::Value>("err_ack", vec![json!("all")])?;
        Ok(())
    }

    /// Acknowledge the entries of the current error list.
    pub fn err_ack_last(&self) -> Result<()> {
        self.request::<serde_json::Value>("err_ack", vec![json!("last")])?;
        Ok(())
    }

    /// Clear the list of acknowledged patterns.
    pub fn err_ack_none(&self) -> Result<()> {
        self.request::<serde_json::Value>("err_ack", vec![json!("none")])?;
        Ok(())
    }
}
