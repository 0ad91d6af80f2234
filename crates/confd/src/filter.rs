//! Fluent filter for `get_objects`.
//!
//! The builder accumulates the call's positional parameters: the optional
//! class name, the list of type names, then one array per predicate.
//! Multiple top-level predicates imply an `and` expression.

use serde_json::{Value, json};

use crate::conn::Conn;
use crate::error::Result;
use crate::objects::AnyObject;

/// Accumulated object filter, created by [`Conn::filter_objects`].
pub struct ObjectFilter<'a> {
    conn: &'a Conn,
    class_name: Option<String>,
    type_names: Vec<String>,
    attribute_filters: Vec<Value>,
}

impl Conn {
    /// Start filtering objects.
    pub fn filter_objects(&self) -> ObjectFilter<'_> {
        ObjectFilter {
            conn: self,
            class_name: None,
            type_names: Vec::new(),
            attribute_filters: Vec::new(),
        }
    }
}

impl ObjectFilter<'_> {
    /// All objects the filter matches.
    pub fn get(&self) -> Result<Vec<AnyObject>> {
        self.conn.request("get_objects", self.build_args())
    }

    /// Filter by class name. A later invocation overwrites the name.
    pub fn class_name(mut self, name: &str) -> Self {
        self.class_name = Some(name.to_string());
        self
    }

    /// Filter by type name. Multiple invocations add to the list.
    pub fn type_name(mut self, name: &str) -> Self {
        self.type_names.push(name.to_string());
        self
    }

    /// Attribute equals value.
    pub fn eq(self, name: &str, value: impl Into<Value>) -> Self {
        self.predicate(name, "eq", value.into())
    }

    /// Attribute does not equal value.
    pub fn ne(self, name: &str, value: impl Into<Value>) -> Self {
        self.predicate(name, "ne", value.into())
    }

    /// Attribute is greater than value.
    pub fn gt(self, name: &str, value: impl Into<Value>) -> Self {
        self.predicate(name, "gt", value.into())
    }

    /// Attribute is greater than or equal to value.
    pub fn gte(self, name: &str, value: impl Into<Value>) -> Self {
        self.predicate(name, "ge", value.into())
    }

    /// Attribute is less than value.
    pub fn lt(self, name: &str, value: impl Into<Value>) -> Self {
        self.predicate(name, "lt", value.into())
    }

    /// Attribute is less than or equal to value.
    pub fn lte(self, name: &str, value: impl Into<Value>) -> Self {
        self.predicate(name, "le", value.into())
    }

    /// Attribute matches the regular expression.
    pub fn matches(self, name: &str, pattern: &str) -> Self {
        self.predicate(name, "=~", json!(pattern))
    }

    /// Attribute does not match the regular expression.
    pub fn not_matches(self, name: &str, pattern: &str) -> Self {
        self.predicate(name, "!~", json!(pattern))
    }

    /// Attribute still has its default value.
    pub fn default(mut self, name: &str) -> Self {
        self.attribute_filters.push(json!([name, "default"]));
        self
    }

    /// Wrap the other filter's predicates in an `or` expression.
    pub fn or(self, other: ObjectFilter<'_>) -> Self {
        self.expression("_or", other)
    }

    /// Wrap the other filter's predicates in an `and` expression.
    pub fn and(self, other: ObjectFilter<'_>) -> Self {
        self.expression("_and", other)
    }

    /// Wrap the other filter's predicates in a `not` expression.
    pub fn not(self, other: ObjectFilter<'_>) -> Self {
        self.expression("_not", other)
    }

    fn expression(mut self, token: &str, other: ObjectFilter<'_>) -> Self {
        let mut wrapped = Vec::with_capacity(other.attribute_filters.len() + 1);
        wrapped.push(json!(token));
        wrapped.extend(other.attribute_filters);
        self.attribute_filters.push(Value::Array(wrapped));
        self
    }

    fn predicate(mut self, name: &str, operator: &str, value: Value) -> Self {
        self.attribute_filters.push(json!([name, operator, value]));
        self
    }

    fn build_args(&self) -> Vec<Value> {
        let mut args = Vec::with_capacity(2 + self.attribute_filters.len());
        args.push(json!(self.class_name));
        args.push(json!(self.type_names));
        args.extend(self.attribute_filters.iter().cloned());
        args
    }
}
