//! Rights of the logged-in user.

use serde_json::json;

use crate::conn::Conn;
use crate::error::Result;

impl Conn {
    /// The rights granted to the current session.
    pub fn get_rights(&self) -> Result<Vec<String>> {
        self.request("get_rights", Vec::new())
    }

    /// Whether the current user has the given right.
    pub fn has_right(&self, right: &str) -> Result<bool> {
        self.request_bool("get_rights", vec![json!(right)])
    }

    /// Whether the current user has at least one of the given rights.
    pub fn has_one_of_rights(&self, rights: &[&str]) -> Result<bool> {
        self.request_bool("get_rights", vec![json!(rights)])
    }
}
