//! Property values and their coercion to and from untyped wire values.
//!
//! Decoding never fails: a wire value is offered to an ordered list of
//! interpretations (object, array, bool, integer, double, string, null) and
//! the first one that accepts it wins. Integral JSON numbers therefore come
//! back as [`PropertyValue::Integer`], never as `30.0`.

use crate::error::{ModelError, ModelResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// String-keyed property bag.
pub type PropertyMap = BTreeMap<String, PropertyValue>;

/// A typed property value. Lists and maps nest without depth limit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PropertyValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(PropertyMap),
}

type DecodeStrategy = fn(&Value) -> Option<PropertyValue>;

const DECODE_ORDER: [DecodeStrategy; 7] = [
    decode_map,
    decode_list,
    decode_bool,
    decode_integer,
    decode_float,
    decode_string,
    decode_null,
];

/// Decodes a wire value, taking the first interpretation that accepts it.
pub fn decode(value: &Value) -> PropertyValue {
    DECODE_ORDER
        .iter()
        .find_map(|strategy| strategy(value))
        .unwrap_or(PropertyValue::Null)
}

fn decode_map(value: &Value) -> Option<PropertyValue> {
    value.as_object().map(|object| PropertyValue::Map(decode_object(object)))
}

fn decode_list(value: &Value) -> Option<PropertyValue> {
    value
        .as_array()
        .map(|items| PropertyValue::List(items.iter().map(decode).collect()))
}

fn decode_bool(value: &Value) -> Option<PropertyValue> {
    value.as_bool().map(PropertyValue::Bool)
}

fn decode_integer(value: &Value) -> Option<PropertyValue> {
    value.as_i64().map(PropertyValue::Integer)
}

fn decode_float(value: &Value) -> Option<PropertyValue> {
    value.as_f64().map(PropertyValue::Float)
}

fn decode_string(value: &Value) -> Option<PropertyValue> {
    value.as_str().map(|s| PropertyValue::String(s.to_string()))
}

fn decode_null(value: &Value) -> Option<PropertyValue> {
    value.is_null().then_some(PropertyValue::Null)
}

/// Decodes a wire object into a property map.
pub fn decode_object(object: &Map<String, Value>) -> PropertyMap {
    object
        .iter()
        .map(|(key, value)| (key.clone(), decode(value)))
        .collect()
}

/// Encodes a property value into its wire form.
///
/// Fails with [`ModelError::UnsupportedPropertyValue`] for numbers JSON cannot
/// carry (NaN and infinities).
pub fn encode(value: &PropertyValue) -> ModelResult<Value> {
    match value {
        PropertyValue::Null => Ok(Value::Null),
        PropertyValue::Bool(b) => Ok(Value::Bool(*b)),
        PropertyValue::Integer(i) => Ok(Value::from(*i)),
        PropertyValue::Float(f) => Number::from_f64(*f).map(Value::Number).ok_or_else(|| {
            ModelError::UnsupportedPropertyValue(format!("non-finite number {f}"))
        }),
        PropertyValue::String(s) => Ok(Value::String(s.clone())),
        PropertyValue::List(items) => items
            .iter()
            .map(encode)
            .collect::<ModelResult<Vec<_>>>()
            .map(Value::Array),
        PropertyValue::Map(map) => encode_map(map).map(Value::Object),
    }
}

/// Encodes a property map into a wire object.
pub fn encode_map(map: &PropertyMap) -> ModelResult<Map<String, Value>> {
    map.iter()
        .map(|(key, value)| Ok((key.clone(), encode(value)?)))
        .collect()
}

impl PropertyValue {
    /// Builds a property value from any serializable type.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> ModelResult<Self> {
        serde_json::to_value(value)
            .map(|wire| decode(&wire))
            .map_err(|e| ModelError::UnsupportedPropertyValue(e.to_string()))
    }

    /// Converts this value into any deserializable type.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> ModelResult<T> {
        let wire = encode(self)?;
        serde_json::from_value(wire).map_err(|e| ModelError::InvalidPayload(e.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integral view of a number; floats are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            PropertyValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Integer(i) => Some(*i as f64),
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&PropertyMap> {
        match self {
            PropertyValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key when this value is a map.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Looks up a position when this value is a list.
    pub fn at(&self, index: usize) -> Option<&PropertyValue> {
        self.as_list().and_then(|items| items.get(index))
    }

    /// Nesting depth; scalars are depth 0.
    pub fn depth(&self) -> usize {
        match self {
            PropertyValue::List(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            PropertyValue::Map(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode(self)
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|wire| decode(&wire))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(i64::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(items: Vec<T>) -> Self {
        PropertyValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<PropertyMap> for PropertyValue {
    fn from(map: PropertyMap) -> Self {
        PropertyValue::Map(map)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropertyValue::Null, Into::into)
    }
}

impl From<&Value> for PropertyValue {
    fn from(value: &Value) -> Self {
        decode(value)
    }
}
