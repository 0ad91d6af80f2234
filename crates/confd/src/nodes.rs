//! Settings-tree node operations.
//!
//! Nodes are addressed by a path of segments, passed to the daemon as
//! positional parameters.

use serde_json::{Map, Value, json};

use crate::conn::Conn;
use crate::error::{Error, Result};

/// Node data, keyed by child name.
pub type Node = Map<String, Value>;

/// Path of segments leading to a node or value.
pub type NodePath = Vec<String>;

impl Conn {
    /// Read node data. The shape depends on the node called.
    pub fn get_node(&self, path: &[&str]) -> Result<Node> {
        self.request("get", path_args(path))
    }

    /// Read a single node value. A zero return is a legitimate value here,
    /// not a failure.
    pub fn get_node_value(&self, path: &[&str]) -> Result<Value> {
        match self.request("get", path_args(path)) {
            Err(Error::ReturnCode) => Ok(Value::from(0)),
            other => other,
        }
    }

    /// Nodes that directly or indirectly use the object behind `reference`.
    pub fn get_affected_nodes(&self, reference: &str) -> Result<Vec<NodePath>> {
        self.request("get_affected_nodes", vec![json!(reference)])
    }

    /// Reset a node in the main tree to its default value.
    pub fn reset_node(&self, path: &[&str]) -> Result<bool> {
        self.request_bool("reset", path_args(path))
    }

    /// Write node data in the main tree.
    pub fn set_node(&self, node: &Node, path: &[&str]) -> Result<bool> {
        self.set_node_value(&Value::Object(node.clone()), path)
    }

    /// Write a single node value in the main tree.
    pub fn set_node_value(&self, value: &Value, path: &[&str]) -> Result<bool> {
        let mut args = Vec::with_capacity(path.len() + 1);
        args.push(value.clone());
        args.extend(path_args(path));
        self.request_bool("set", args)
    }

    /// Names of the sub-nodes below `path`.
    pub fn get_nodes(&self, path: &[&str]) -> Result<Vec<String>> {
        self.request("get_nodes", path_args(path))
    }
}

fn path_args(path: &[&str]) -> Vec<Value> {
    path.iter().map(|segment| json!(segment)).collect()
}
