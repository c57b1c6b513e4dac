//! The owned value tree the path engine operates on.
//!
//! Three container shapes exist: insertion-ordered mappings, sequences, and
//! attribute-bearing objects behind the [`FieldAccess`] capability trait.
//! Strings and byte strings are leaves; they are never treated as sequences
//! of characters.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::PathError;

/// Signature of a callable leaf value, invoked through `call_in` with
/// positional arguments.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, PathError> + Send + Sync>;

/// A callable leaf. Two `Func` values compare equal only when they share the
/// same underlying function.
#[derive(Clone)]
pub struct Func(NativeFn);

impl Func {
    pub fn new(f: impl Fn(&[Value]) -> Result<Value, PathError> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn invoke(&self, args: &[Value]) -> Result<Value, PathError> {
        (self.0)(args)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Func(..)")
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Named-field access for attribute-bearing objects.
///
/// Objects participate in path resolution by enumerating their data fields
/// explicitly; there is no reflection, and methods never appear among field
/// names. [`Record`] is the standard implementation.
pub trait FieldAccess: fmt::Debug + Send + Sync {
    /// Field names in enumeration order; data fields only.
    fn field_names(&self) -> Vec<String>;

    fn field(&self, name: &str) -> Option<&Value>;

    fn field_mut(&mut self, name: &str) -> Option<&mut Value>;

    /// Inserts or replaces a field.
    fn set_field(&mut self, name: &str, value: Value);

    /// Removes a field, returning its value if present.
    fn remove_field(&mut self, name: &str) -> Option<Value>;

    fn clone_boxed(&self) -> Box<dyn FieldAccess>;

    fn as_any(&self) -> &dyn Any;

    /// Structural equality against another object.
    fn eq_dyn(&self, other: &dyn FieldAccess) -> bool;
}

impl Clone for Box<dyn FieldAccess> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// The standard attribute-bearing object: an insertion-ordered set of named
/// fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.fields.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldAccess for Record {
    fn field_names(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_string(), value);
    }

    fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    fn clone_boxed(&self) -> Box<dyn FieldAccess> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn FieldAccess) -> bool {
        other
            .as_any()
            .downcast_ref::<Record>()
            .is_some_and(|record| record == self)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A value in a nested structure.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Seq(Vec<Value>),
    Map(IndexMap<String, Value>),
    Object(Box<dyn FieldAccess>),
    Func(Func),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Func(_) => "func",
        }
    }

    /// True for values that are not containers.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Seq(_) | Value::Map(_) | Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&dyn FieldAccess> {
        match self {
            Value::Object(object) => Some(object.as_ref()),
            _ => None,
        }
    }

    pub fn as_func(&self) -> Option<&Func> {
        match self {
            Value::Func(func) => Some(func),
            _ => None,
        }
    }

    /// Converts to a `serde_json::Value`; fails on callables and non-finite
    /// floats. Objects convert through their enumerated fields.
    pub fn to_json(&self) -> Result<serde_json::Value, PathError> {
        serde_json::Value::try_from(self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.eq_dyn(b.as_ref()),
            (Value::Func(a), Value::Func(b)) => a == b,
            _ => false,
        }
    }
}

// --- Conversions ---

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(Box::new(record))
    }
}

impl From<Func> for Value {
    fn from(func: Func) -> Self {
        Value::Func(func)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    Value::Null
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = PathError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or_else(|| {
                    PathError::Type("non-finite float cannot be represented as JSON".to_string())
                })?,
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(bytes) => serde_json::Value::Array(
                bytes
                    .iter()
                    .map(|b| serde_json::Value::Number((*b).into()))
                    .collect(),
            ),
            Value::Seq(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), serde_json::Value::try_from(value)?)))
                    .collect::<Result<_, PathError>>()?,
            ),
            Value::Object(object) => serde_json::Value::Object(
                object
                    .field_names()
                    .into_iter()
                    .filter_map(|name| object.field(&name).map(|v| (name, v)))
                    .map(|(name, value)| Ok((name, serde_json::Value::try_from(value)?)))
                    .collect::<Result<_, PathError>>()?,
            ),
            Value::Func(_) => {
                return Err(PathError::Type(
                    "callable values cannot be represented as JSON".to_string(),
                ));
            }
        })
    }
}
