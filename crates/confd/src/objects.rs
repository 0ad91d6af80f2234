//! Typed object operations.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::boolean::Boolean;
use crate::conn::Conn;
use crate::error::Result;

/// Metadata every stored object carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ObjectMeta {
    /// Stable identifier, always prefixed `REF_`.
    #[serde(rename = "ref", default)]
    pub reference: String,
    #[serde(default)]
    pub class: String,
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default)]
    pub hidden: Boolean,
    #[serde(default)]
    pub lock: String,
    #[serde(default)]
    pub nodel: String,
    #[serde(default)]
    pub autoname: Boolean,
}

/// An object of any class and type.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnyObject {
    #[serde(flatten)]
    pub meta: ObjectMeta,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Conn {
    /// Fetch the object behind `reference` without assuming its shape.
    pub fn get_any_object(&self, reference: &str) -> Result<AnyObject> {
        self.get_object(reference)
    }

    /// Fetch the object behind `reference` into a caller-supplied type.
    pub fn get_object<T: DeserializeOwned>(&self, reference: &str) -> Result<T> {
        self.request("get_object", vec![json!(reference)])
    }

    /// Store an object, returning its reference. With `fuzzy_name` the
    /// daemon may adjust the name to avoid collisions.
    pub fn set_object<T: Serialize>(&self, object: &T, fuzzy_name: bool) -> Result<String> {
        let object = serde_json::to_value(object)?;
        self.request(
            "set_object",
            vec![object, json!(crate::boolean::bool_value(fuzzy_name))],
        )
    }

    /// Change single attributes of the object behind `reference`.
    pub fn change_object<T: Serialize>(&self, reference: &str, attributes: &T) -> Result<()> {
        let attributes = serde_json::to_value(attributes)?;
        self.simple_request("change_object", vec![json!(reference), attributes])?;
        Ok(())
    }

    /// Delete the object behind `reference`.
    pub fn del_object(&self, reference: &str) -> Result<bool> {
        self.request_bool("del_object", vec![json!(reference)])
    }

    /// Move an object to a new reference.
    pub fn move_object(&self, old_reference: &str, new_reference: &str) -> Result<bool> {
        self.request_bool("move_object", vec![json!(old_reference), json!(new_reference)])
    }

    /// Reset the object behind `reference` to its default state.
    pub fn reset_object(&self, reference: &str) -> Result<bool> {
        self.request_bool("reset_object", vec![json!(reference)])
    }

    /// Put a user lock on the object so neither users nor the system touch
    /// it.
    pub fn lock_object(&self, reference: &str) -> Result<bool> {
        self.request_bool("lock_object", vec![json!(reference), json!("user")])
    }

    /// Remove the lock from an object. Clearing a user lock needs the
    /// override raised, which is restored afterwards in any case.
    pub fn unlock_object(&self, reference: &str) -> Result<bool> {
        self.request_bool("lock_override", vec![json!(1)])?;
        let unlocked = self.request_bool("lock_object", vec![json!(reference), json!(0)]);
        let restored = self.request_bool("lock_override", vec![json!(0)]);
        let unlocked = unlocked?;
        restored?;
        Ok(unlocked)
    }

    /// Objects that directly or indirectly use the given ones. Every object
    /// references itself, so the input refs are part of the result.
    pub fn get_affected_objects(&self, references: &[String]) -> Result<Vec<String>> {
        self.request("get_affected_objects", vec![json!(references)])
    }

    /// All stored objects.
    pub fn get_all_objects(&self) -> Result<Vec<AnyObject>> {
        self.filter_objects().get()
    }
}
