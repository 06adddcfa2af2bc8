use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Host-side copy of a value produced by an interpreter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ScriptValue>),
    Object(BTreeMap<String, ScriptValue>),
    /// Functions, symbols and anything cut off by depth; holds the type name.
    #[serde(serialize_with = "serialize_opaque")]
    Opaque(String),
}

impl ScriptValue {
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ScriptValue> {
        match self {
            Self::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Opaque(type_name) => type_name.as_str(),
        }
    }
}

fn serialize_opaque<S: Serializer>(type_name: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("[{}]", type_name))
}
