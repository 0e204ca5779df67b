use std::any::Any;
use std::collections::HashMap;

use crate::constant::*;

/// A typed value produced by casting a raw token (or the input stream).
pub enum Value {
    /// A switch state.
    Bool(bool),
    /// An un-cast token.
    Str(String),
    /// The result of [`Cast::Integer`](crate::Cast::Integer).
    Int(i64),
    /// The result of [`Cast::Float`](crate::Cast::Float).
    Float(f64),
    /// An un-cast input stream.
    Bytes(Vec<u8>),
    /// The result of a structured-data loader, such as [`Cast::yaml`](crate::Cast::yaml).
    Data(serde_yaml::Value),
    /// The element-wise values of a repeatable option or variadic argument.
    List(Vec<Value>),
    /// The result of a [`Cast::Constructor`](crate::Cast::Constructor).
    Custom(Box<dyn Any + Send + Sync>),
}

impl Value {
    /// Get the switch state, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the text, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Get the integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the float, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the bytes, if this is a `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// Get the structured data, if this is a `Data`.
    pub fn as_data(&self) -> Option<&serde_yaml::Value> {
        match self {
            Value::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Get the elements, if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Get a reference to the constructed `T`, if this is a `Custom` holding a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(value) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Move the constructed `T` out, if this is a `Custom` holding a `T`.
    pub fn downcast<T: Any>(self) -> Result<T, Value> {
        match self {
            Value::Custom(value) => match value.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(value) => Err(Value::Custom(value)),
            },
            other => Err(other),
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Value::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Value::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Value::Bytes(value) => f.debug_tuple("Bytes").field(value).finish(),
            Value::Data(value) => f.debug_tuple("Data").field(value).finish(),
            Value::List(values) => f.debug_tuple("List").field(values).finish(),
            Value::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

// Custom values are opaque, so they never compare equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// The result of a single parse: one slot per declared switch, option and argument.
///
/// A slot holding `None` is *unset*: the switch was not given, the option has no value nor default, or the optional argument was not given.
/// Asking for a name that was never declared also answers `None`.
///
/// When help (or version) is requested, only the `help` (or `version`) slot is populated.
#[derive(Debug, Default, PartialEq)]
pub struct Values {
    slots: HashMap<String, Option<Value>>,
    stdin: Option<Value>,
}

impl Values {
    pub(crate) fn help(usage: String) -> Self {
        let mut values = Values::default();
        values.assign(HELP_NAME, Some(Value::Str(usage)));
        values
    }

    pub(crate) fn version(version: String) -> Self {
        let mut values = Values::default();
        values.assign(VERSION_NAME, Some(Value::Str(version)));
        values
    }

    pub(crate) fn assign(&mut self, name: impl Into<String>, value: Option<Value>) {
        self.slots.insert(name.into(), value);
    }

    pub(crate) fn bind_stdin(&mut self, value: Value) {
        self.stdin.replace(value);
    }

    /// Whether `name` has a slot in this result.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Get the value for `name`, or `None` if it is unset.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).and_then(Option::as_ref)
    }

    /// Move the value for `name` out of the result, leaving it unset.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.slots.get_mut(name).and_then(Option::take)
    }

    /// Whether the value for `name` is set.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Whether the switch `name` is on.
    /// Unset switches are off.
    pub fn switch(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Get the text value for `name`.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Get the integer value for `name`.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    /// Get the float value for `name`.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    /// Get the elements for the repeatable option or variadic argument `name`.
    pub fn list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Get the text elements for `name`.
    /// Answers `None` unless every element is text.
    pub fn strs(&self, name: &str) -> Option<Vec<&str>> {
        self.list(name)?.iter().map(Value::as_str).collect()
    }

    /// Get the constructed `T` for `name`.
    pub fn get_as<T: std::any::Any>(&self, name: &str) -> Option<&T> {
        self.get(name).and_then(Value::downcast_ref::<T>)
    }

    /// The rendered usage text, if help was requested.
    pub fn help_text(&self) -> Option<&str> {
        self.str(HELP_NAME)
    }

    /// The formatted version string, if the version was requested.
    pub fn version_text(&self) -> Option<&str> {
        self.str(VERSION_NAME)
    }

    /// The value bound from the input stream, if stdin is declared and a stream was supplied.
    pub fn stdin(&self) -> Option<&Value> {
        self.stdin.as_ref()
    }
}
