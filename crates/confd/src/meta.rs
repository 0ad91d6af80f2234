//! Object and node metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::boolean::Boolean;
use crate::conn::Conn;
use crate::error::Result;

/// Constraints of an object attribute.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ConstraintSpec {
    #[serde(rename = "_isa", default)]
    pub isa: String,
    #[serde(rename = "_type", default)]
    pub value_type: String,
    #[serde(rename = "_class", default)]
    pub class: String,
    #[serde(rename = "_delete_with_parent", default)]
    pub delete_with_parent: Boolean,
    #[serde(rename = "_regex", default)]
    pub regex: String,
    #[serde(rename = "_require", default)]
    pub require: String,
    #[serde(rename = "_types", default)]
    pub types: Vec<String>,
    #[serde(rename = "_not_types", default)]
    pub not_types: Vec<String>,
    #[serde(rename = "_keys", default)]
    pub keys: Option<Box<ConstraintSpec>>,
    #[serde(rename = "_values", default)]
    pub values: Option<Value>,
    #[serde(rename = "_limits", default)]
    pub limits: Vec<String>,
    #[serde(rename = "_default", default)]
    pub default: Option<Value>,
}

/// A leaf in the metadata tree: either a full constraint record or a bare
/// name-template string. Both shapes occur at every leaf.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttrConstraint {
    Spec(Box<ConstraintSpec>),
    Template(String),
}

impl AttrConstraint {
    pub fn spec(&self) -> Option<&ConstraintSpec> {
        match self {
            AttrConstraint::Spec(spec) => Some(spec),
            AttrConstraint::Template(_) => None,
        }
    }

    pub fn template(&self) -> Option<&str> {
        match self {
            AttrConstraint::Spec(_) => None,
            AttrConstraint::Template(template) => Some(template),
        }
    }
}

/// All attributes of one type.
pub type AttributeDefinition = HashMap<String, AttrConstraint>;

/// All types of one class.
pub type TypeDefinition = HashMap<String, AttributeDefinition>;

/// All class definitions.
pub type ObjectMetaTree = HashMap<String, TypeDefinition>;

/// All nodes and values in a single structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct NodeTree(pub Map<String, Value>);

impl NodeTree {
    /// Descend one level into the tree.
    pub fn tree(&self, name: &str) -> Option<NodeTree> {
        match self.0.get(name) {
            Some(Value::Object(map)) => Some(NodeTree(map.clone())),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

impl Conn {
    /// Object meta-information: class -> type -> attribute -> constraint.
    pub fn get_meta_objects(&self) -> Result<ObjectMetaTree> {
        self.request("get_meta_objects", Vec::new())
    }

    /// Complete nodes information.
    pub fn get_meta_nodes(&self) -> Result<Map<String, Value>> {
        self.request("get_nodes", Vec::new())
    }

    /// All available object classes.
    pub fn get_object_classes(&self) -> Result<Vec<String>> {
        self.request("get_object_classes", Vec::new())
    }

    /// Types available for the given class.
    pub fn get_object_types(&self, class: &str) -> Result<Vec<String>> {
        self.request("get_object_types", vec![json!(class)])
    }

    /// Attribute descriptions for one class/type pair.
    pub fn get_object_description(
        &self,
        class: &str,
        object_type: &str,
    ) -> Result<Map<String, Value>> {
        self.request("get_object_descr", vec![json!(class), json!(object_type)])
    }

    /// Nodes available below `path`.
    pub fn get_available_nodes(&self, path: &[&str]) -> Result<Vec<String>> {
        self.request("get_nodes", path_args(path))
    }

    /// All possible nodes and their values.
    pub fn get_meta(&self) -> Result<NodeTree> {
        self.request("get_meta", Vec::new())
    }

    /// Scalar values available below `path`.
    pub fn get_scalars(&self, path: &[&str]) -> Result<Vec<String>> {
        self.request("get_scalars", path_args(path))
    }

    /// Array values available below `path`.
    pub fn get_arrays(&self, path: &[&str]) -> Result<Vec<String>> {
        self.request("get_arrays", path_args(path))
    }
}

fn path_args(path: &[&str]) -> Vec<Value> {
    path.iter().map(|segment| json!(segment)).collect()
}
