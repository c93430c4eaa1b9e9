//! # Raw Values
//!
//! [`Value`] is the untyped input the population engine works on: a scalar,
//! a list, a keyed mapping ([`Data`]) meant to build or populate a nested
//! object, or an already-constructed [`Object`].
//!
//! Writers convert values into field types through [`FromValue`]; readers go
//! the other way through `From<T> for Value`.

use std::fmt;

use indexmap::IndexMap;

use crate::error::DtoError;
use crate::object::Object;

/// Keyed mapping of field names to raw values. Iteration order is insertion
/// order, which is also the population order.
pub type Data = IndexMap<String, Value>;

/// An untyped raw value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// JSON has no NaN or infinity; those export as `null`.
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Data),
    Object(Box<dyn Object>),
}

impl Value {
    /// Wraps an already-constructed object.
    pub fn object(object: impl Object) -> Self {
        Value::Object(Box::new(object))
    }

    /// Name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(object) => object.type_name(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Data> {
        match self {
            Value::Map(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<Data> {
        match self {
            Value::Map(data) => Some(data),
            _ => None,
        }
    }

    /// JSON projection; nested objects are exported through
    /// [`Object::export`].
    pub fn to_json(&self) -> Result<serde_json::Value, DtoError> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<_, _>>()?,
            ),
            Value::Map(data) => serde_json::Value::Object(
                data.iter()
                    .map(|(key, value)| Ok((key.clone(), value.to_json()?)))
                    .collect::<Result<_, DtoError>>()?,
            ),
            Value::Object(object) => object.export()?,
        })
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            // Objects have no identity here; same type and same export is equal.
            (Value::Object(a), Value::Object(b)) => {
                a.type_name() == b.type_name()
                    && matches!((a.export(), b.export()), (Ok(x), Ok(y)) if x == y)
            }
            _ => false,
        }
    }
}

/// Printable form used in diagnostics: the JSON projection when there is
/// one, the debug form otherwise.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => write!(f, "{json}"),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Data> for Value {
    fn from(data: Data) -> Self {
        Value::Map(data)
    }
}

impl From<Box<dyn Object>> for Value {
    fn from(object: Box<dyn Object>) -> Self {
        Value::Object(object)
    }
}

/// Conversion a writer applies to a resolved value before storing it.
///
/// On mismatch the [`Value::kind`] of the rejected value is returned.
pub trait FromValue: Sized {
    /// What the writer accepts, for diagnostics.
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Result<Self, &'static str>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        Ok(value)
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.kind()),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other.kind()),
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other.kind()),
        }
    }
}

impl FromValue for u32 {
    const EXPECTED: &'static str = "unsigned int";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Int(i) => u32::try_from(i).map_err(|_| "out-of-range int"),
            other => Err(other.kind()),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(other.kind()),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other.kind()),
        }
    }
}

impl FromValue for Data {
    const EXPECTED: &'static str = "map";

    fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Map(data) => Ok(data),
            other => Err(other.kind()),
        }
    }
}

/// Builds a [`Data`] mapping from a JSON object literal.
///
/// ```rust
/// let data = dto_framework::data!({ "name": "Ann", "age": 5 });
/// assert_eq!(data.keys().collect::<Vec<_>>(), ["name", "age"]);
/// ```
///
/// Anything other than an object literal yields an empty mapping.
#[macro_export]
macro_rules! data {
    ($($json:tt)+) => {
        $crate::Value::from($crate::__private::serde_json::json!($($json)+))
            .into_data()
            .unwrap_or_default()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_keeps_key_order_and_number_kinds() {
        let value = Value::from(json!({"b": 1, "a": 2.5, "c": [true, null]}));
        let data = value.into_data().unwrap();
        assert_eq!(data.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert_eq!(data["b"], Value::Int(1));
        assert_eq!(data["a"], Value::Float(2.5));
        assert_eq!(data["c"], Value::List(vec![Value::Bool(true), Value::Null]));
    }

    #[test]
    fn test_to_json_matches_source() {
        let source = json!({"name": "Ann", "tags": ["a", "b"], "nested": {"zip": 7}});
        let value = Value::from(source.clone());
        assert_eq!(value.to_json().unwrap(), source);
    }

    #[test]
    fn test_non_finite_floats_export_as_null() {
        assert_eq!(Value::Float(f64::NAN).to_json().unwrap(), serde_json::Value::Null);
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "null");
        assert_eq!(Value::Float(1.5).to_json().unwrap(), json!(1.5));
    }

    #[test]
    fn test_display_is_json() {
        let value = Value::from(json!({"foo": "bar"}));
        assert_eq!(value.to_string(), r#"{"foo":"bar"}"#);
        assert_eq!(Value::from("x").to_string(), r#""x""#);
    }

    #[test]
    fn test_from_value_conversions() {
        assert_eq!(String::from_value("x".into()), Ok("x".to_string()));
        assert_eq!(i64::from_value(Value::Int(3)), Ok(3));
        assert_eq!(f64::from_value(Value::Int(3)), Ok(3.0));
        assert_eq!(u32::from_value(Value::Int(-1)), Err("out-of-range int"));
        assert_eq!(u32::from_value(Value::Int(i64::MAX)), Err("out-of-range int"));
        assert_eq!(u32::from_value(Value::String("1".into())), Err("string"));
        assert_eq!(String::from_value(Value::Int(3)), Err("int"));
        assert_eq!(
            Vec::<String>::from_value(vec!["a", "b"].into()),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(Vec::<String>::from_value(vec![1].into()), Err("int"));
    }

    #[test]
    fn test_data_macro() {
        let data = crate::data!({"name": "Ann", "age": 5});
        assert_eq!(data.len(), 2);
        assert_eq!(data["age"].as_i64(), Some(5));
        assert!(crate::data!([1, 2]).is_empty());
    }
}
