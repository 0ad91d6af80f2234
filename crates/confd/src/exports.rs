//! Exported daemon methods.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::boolean::Boolean;
use crate::conn::Conn;
use crate::error::Result;

/// A method the daemon advertises as callable by clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Export {
    #[serde(default)]
    pub write: Boolean,
    #[serde(default)]
    pub deny: Boolean,
    #[serde(default)]
    pub module: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub rights: Vec<String>,
    #[serde(default)]
    pub doc: String,
}

impl Conn {
    /// All available exports, keyed by method name.
    pub fn exports(&self) -> Result<HashMap<String, Export>> {
        self.request("get_exports", Vec::new())
    }
}
