use std::any::Any;
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::model::Value;
use crate::prelude::Loader;

type TransformFn = dyn Fn(&str) -> Result<Value, String> + Send + Sync;
type ConstructorFn = dyn Fn(&str) -> Result<Box<dyn Any + Send + Sync>, String> + Send + Sync;

/// The conversion applied to a raw token (or the input stream) to produce its [`Value`].
///
/// Casting happens once per value, after all tokens have been matched to their switches/options/arguments.
/// Defaults are stored raw and cast at the point of use, so a bad default fails the same way a bad token does.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Cast, CommandLineSpec, Opt};
/// use std::path::PathBuf;
///
/// let parser = CommandLineSpec::new("program")
///     .option(Opt::new("size").cast(Cast::Integer))
///     .option(Opt::new("log").cast(Cast::construct::<PathBuf>()))
///     .build_parser()
///     .unwrap();
///
/// let values = parser.parse(&["--size", "24", "--log", "/tmp"]).unwrap();
/// assert_eq!(values.int("size"), Some(24));
/// assert_eq!(values.get_as::<PathBuf>("log"), Some(&PathBuf::from("/tmp")));
/// ```
#[derive(Clone, Default)]
pub enum Cast {
    /// Keep the raw token as [`Value::Str`] (or the raw stream as [`Value::Bytes`]).
    #[default]
    Identity,
    /// Strictly parse a [`Value::Int`].
    Integer,
    /// Strictly parse a finite [`Value::Float`] (`inf` and `NaN` are rejected).
    Float,
    /// Apply a user function to the raw token.
    Transform {
        /// The type name reported when the function fails.
        label: String,
        /// The function.
        func: Arc<TransformFn>,
    },
    /// Construct a user type from the raw token, producing a [`Value::Custom`].
    Constructor {
        /// The type name reported when construction fails.
        type_name: &'static str,
        /// The constructor.
        func: Arc<ConstructorFn>,
    },
    /// Decode the raw token with a structured-data [`Loader`].
    Loader(Arc<dyn Loader>),
}

impl std::fmt::Debug for Cast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cast({})", self.type_name())
    }
}

impl Cast {
    /// Cast via a user function.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{Cast, Value};
    ///
    /// Cast::transform("Upper", |raw: &str| -> Result<Value, String> {
    ///     Ok(Value::Str(raw.to_uppercase()))
    /// });
    /// ```
    pub fn transform<F, E>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Value, E> + Send + Sync + 'static,
        E: std::fmt::Display,
    {
        Cast::Transform {
            label: label.into(),
            func: Arc::new(move |raw: &str| func(raw).map_err(|error| error.to_string())),
        }
    }

    /// Cast by constructing any `T: FromStr`.
    /// Retrieve the value with [`Values::get_as`](crate::Values::get_as).
    pub fn construct<T>() -> Self
    where
        T: FromStr + Any + Send + Sync,
        <T as FromStr>::Err: std::fmt::Display,
    {
        Cast::Constructor {
            type_name: std::any::type_name::<T>(),
            func: Arc::new(|raw: &str| {
                T::from_str(raw)
                    .map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
                    .map_err(|error| error.to_string())
            }),
        }
    }

    /// Cast via a structured-data loader.
    pub fn loader(loader: impl Loader + 'static) -> Self {
        Cast::Loader(Arc::new(loader))
    }

    /// Cast by decoding YAML into a [`Value::Data`].
    pub fn yaml() -> Self {
        Cast::loader(Yaml)
    }

    /// The type name reported in cast errors.
    pub fn type_name(&self) -> &str {
        match self {
            Cast::Identity => "String",
            Cast::Integer => "Integer",
            Cast::Float => "Float",
            Cast::Transform { label, .. } => label,
            Cast::Constructor { type_name, .. } => type_name,
            Cast::Loader(loader) => loader.name(),
        }
    }

    pub(crate) fn apply(&self, raw: &str) -> Result<Value, InvalidCast> {
        let result = match self {
            Cast::Identity => Ok(Value::Str(raw.to_string())),
            Cast::Integer => i64::from_str(raw)
                .map(Value::Int)
                .map_err(|error| error.to_string()),
            Cast::Float => f64::from_str(raw)
                .map_err(|error| error.to_string())
                .and_then(|value| {
                    if value.is_finite() {
                        Ok(Value::Float(value))
                    } else {
                        Err(format!("non-finite float literal: {raw}"))
                    }
                }),
            Cast::Transform { func, .. } => func(raw),
            Cast::Constructor { func, .. } => func(raw).map(Value::Custom),
            Cast::Loader(loader) => loader.load(raw),
        };

        result.map_err(|message| InvalidCast {
            type_name: self.type_name().to_string(),
            message,
        })
    }

    /// Read the stream to the end, then cast it.
    /// Without a conversion the bytes are kept as-is, otherwise they must be UTF-8.
    pub(crate) fn apply_stream(&self, input: &mut dyn Read) -> Result<Value, InvalidCast> {
        match self {
            Cast::Identity => {
                let mut buffer = Vec::default();
                input
                    .read_to_end(&mut buffer)
                    .map_err(|error| InvalidCast {
                        type_name: self.type_name().to_string(),
                        message: error.to_string(),
                    })?;
                Ok(Value::Bytes(buffer))
            }
            _ => {
                let mut buffer = String::default();
                input
                    .read_to_string(&mut buffer)
                    .map_err(|error| InvalidCast {
                        type_name: self.type_name().to_string(),
                        message: error.to_string(),
                    })?;
                self.apply(&buffer)
            }
        }
    }
}

/// The built-in YAML [`Loader`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Loader for Yaml {
    fn name(&self) -> &str {
        "YAML"
    }

    fn load(&self, raw: &str) -> Result<Value, String> {
        serde_yaml::from_str::<serde_yaml::Value>(raw)
            .map(Value::Data)
            .map_err(|error| error.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert to {type_name}: {message}")]
pub(crate) struct InvalidCast {
    pub(crate) type_name: String,
    pub(crate) message: String,
}
