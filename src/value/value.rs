//! Core value types and conversions.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value represents one node of a serialized configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
}

/// Map represents an object node. Keys are kept sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    /// Serializes any snapshot into a Value tree.
    ///
    /// Goes through `serde_yaml::Value`, which keeps NaN and infinities, so
    /// that they fail here instead of turning into null.
    pub fn from_serialize<T: Serialize + ?Sized>(snapshot: &T) -> Result<Value> {
        let yaml = serde_yaml::to_value(snapshot)?;
        Value::from_yaml_value(yaml)
    }

    /// Deserializes this tree into a new instance of the target shape.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T> {
        let json = self.to_json_value()?;
        Ok(serde_json::from_value(json)?)
    }

    /// Converts a serde_json value, rejecting numbers that would not round-trip.
    pub fn from_json_value(json: serde_json::Value) -> Result<Value> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if n.is_u64() {
                    return Err(Error::serialization(format!(
                        "integer {} does not fit in a signed 64-bit value",
                        n
                    )));
                } else {
                    match n.as_f64() {
                        Some(f) => Value::Float(f),
                        None => {
                            return Err(Error::serialization(format!("unsupported number {}", n)))
                        }
                    }
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::from_json_value)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(obj) => {
                let mut map = Map::new();
                for (k, v) in obj {
                    map.set(k, Value::from_json_value(v)?);
                }
                Value::Map(map)
            }
        })
    }

    /// Converts a serde_yaml value.
    ///
    /// Non-finite floats are rejected. Scalar map keys are stringified and a
    /// tagged value `!Tag v` becomes the map `{Tag: v}`, as serde_json renders
    /// enum variants.
    pub fn from_yaml_value(yaml: serde_yaml::Value) -> Result<Value> {
        use serde_yaml::Value as Yaml;
        Ok(match yaml {
            Yaml::Null => Value::Null,
            Yaml::Bool(b) => Value::Bool(b),
            Yaml::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if n.is_u64() {
                    return Err(Error::serialization(format!(
                        "integer {} does not fit in a signed 64-bit value",
                        n
                    )));
                } else {
                    match n.as_f64() {
                        Some(f) if f.is_finite() => Value::Float(f),
                        _ => return Err(Error::serialization(format!("non-finite number {}", n))),
                    }
                }
            }
            Yaml::String(s) => Value::String(s),
            Yaml::Sequence(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::from_yaml_value)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Yaml::Mapping(mapping) => {
                let mut map = Map::new();
                for (k, v) in mapping {
                    map.set(yaml_key(k)?, Value::from_yaml_value(v)?);
                }
                Value::Map(map)
            }
            Yaml::Tagged(tagged) => {
                let tagged = *tagged;
                let name = tagged.tag.to_string().trim_start_matches('!').to_string();
                let mut map = Map::new();
                map.set(name, Value::from_yaml_value(tagged.value)?);
                Value::Map(map)
            }
        })
    }

    /// Converts back to a serde_json value.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => match serde_json::Number::from_f64(*f) {
                Some(n) => serde_json::Value::Number(n),
                None => {
                    return Err(Error::serialization(format!(
                        "non-finite number {} has no JSON form",
                        f
                    )))
                }
            },
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_json_value)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Map(map) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in map.iter() {
                    obj.insert(k.clone(), v.to_json_value()?);
                }
                serde_json::Value::Object(obj)
            }
        })
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Map {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::serialization(format!(
            "map key must be a string, got {:?}",
            other
        ))),
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    Value::from_json_value(parsed)
}

/// Serialize a value to pretty-printed JSON.
pub fn to_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(&value.to_json_value()?)?)
}

/// Parse a value from YAML. JSON documents are accepted too.
pub fn from_yaml(yaml: &str) -> Result<Value> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    Value::from_yaml_value(parsed)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String> {
    Ok(serde_yaml::to_string(&value.to_json_value()?)?)
}
