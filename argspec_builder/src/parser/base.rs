use std::io::Read;
use thiserror::Error;

use crate::api::{Cast, InvalidCast};
use crate::constant::*;
use crate::matcher::*;
use crate::model::{Value, Values};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// An error in the tokens (or input stream) given to a [`CommandParser`](crate::CommandParser).
/// These are user errors: a host reports them alongside the usage text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An option was given as the final token, without its value.
    #[error("missing value for option {0}")]
    MissingOptionValue(String),

    /// A switch-shaped token matches no switch nor option.
    #[error("unknown switch {0}")]
    UnknownSwitch(String),

    /// Mandatory options were neither given nor defaulted (sorted by long name).
    #[error("mandatory options not specified: {}", .0.join(", "))]
    MandatoryOptionsNotSpecified(Vec<String>),

    /// A mandatory argument was not given.
    #[error("mandatory argument '{0}' not given")]
    MandatoryArgumentNotSpecified(String),

    /// A value (or default) failed its cast.
    #[error("failed to cast: '{name}' to type: {type_name}: {message}")]
    Cast {
        /// The declared name.
        name: String,
        /// The type of the cast.
        type_name: String,
        /// The underlying failure.
        message: String,
    },

    /// Tokens were left over after every argument was allocated.
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

impl From<MatchError> for ParseError {
    fn from(error: MatchError) -> Self {
        match error {
            MatchError::MissingOptionValue(flag) => ParseError::MissingOptionValue(flag),
            MatchError::UnknownSwitch(token) => ParseError::UnknownSwitch(token),
            MatchError::MandatoryOptionsNotSpecified(flags) => {
                ParseError::MandatoryOptionsNotSpecified(flags)
            }
            MatchError::MandatoryArgumentNotSpecified(name) => {
                ParseError::MandatoryArgumentNotSpecified(name)
            }
            MatchError::UnexpectedArgument(token) => ParseError::UnexpectedArgument(token),
        }
    }
}

impl ParseError {
    fn cast(name: &str, error: InvalidCast) -> Self {
        let InvalidCast { type_name, message } = error;
        ParseError::Cast {
            name: name.to_string(),
            type_name,
            message,
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) enum Action {
    PrintHelp,
    PrintVersion,
    Complete(Values),
}

fn cast_raw(name: &str, cast: &Cast, raw: RawValue) -> Result<Value, ParseError> {
    match raw {
        RawValue::Switch(state) => Ok(Value::Bool(state)),
        RawValue::Single(value) => cast.apply(&value).map_err(|e| ParseError::cast(name, e)),
        RawValue::Multiple(values) => values
            .iter()
            .map(|value| cast.apply(value).map_err(|e| ParseError::cast(name, e)))
            .collect::<Result<Vec<Value>, ParseError>>()
            .map(Value::List),
    }
}

/// The parse engine of one command: help/version short-circuit, token matching, then casting.
#[derive(Debug)]
pub(crate) struct Parser {
    registry: Registry,
    versioned: bool,
}

fn is_help(token: &str) -> bool {
    match token.strip_prefix("--") {
        Some(name) => name == HELP_NAME,
        None => {
            let mut short = token.chars();
            short.next() == Some('-') && short.next() == Some(HELP_SHORT) && short.next().is_none()
        }
    }
}

impl Parser {
    pub(crate) fn new(registry: Registry, versioned: bool) -> Self {
        Self {
            registry,
            versioned,
        }
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    pub(crate) fn consume(
        &self,
        tokens: &[&str],
        input: Option<&mut dyn Read>,
    ) -> Result<Action, ParseError> {
        // 1. Help and version win over everything before the separator.
        for token in tokens.iter().take_while(|token| **token != SEPARATOR) {
            if is_help(token) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Help requested by '{token}'.");
                }
                return Ok(Action::PrintHelp);
            }

            if self.versioned && token.strip_prefix("--") == Some(VERSION_NAME) {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Version requested.");
                }
                return Ok(Action::PrintVersion);
            }
        }

        // 2. Match the tokens to their switches/options/arguments, still as raw strings.
        let matches = TokenMatcher::new(&self.registry).match_tokens(tokens)?;
        let mut values = Values::default();

        // 3. Cast each value, in declaration order.
        for (flag, raw) in self.registry.flags().iter().zip(matches.flags) {
            let name = flag.name();

            if name == HELP_NAME || (self.versioned && name == VERSION_NAME) {
                continue;
            }

            let value = match (flag, raw) {
                (_, None) => None,
                (Flag::Switch(_), Some(raw)) => Some(cast_raw(name, &Cast::Identity, raw)?),
                (Flag::Opt(option), Some(raw)) => Some(cast_raw(name, &option.cast, raw)?),
            };
            values.assign(name, value);
        }

        for (argument, raw) in self.registry.arguments().iter().zip(matches.arguments) {
            let value = match raw {
                None => None,
                Some(raw) => Some(cast_raw(&argument.name, &argument.cast, raw)?),
            };
            values.assign(argument.name.clone(), value);
        }

        // 4. Bind the input stream, when both declared and supplied.
        if let (Some(stdin), Some(input)) = (self.registry.stdin(), input) {
            let name = stdin.name.as_deref().unwrap_or(DEFAULT_STDIN_NAME);
            let value = stdin
                .cast
                .apply_stream(input)
                .map_err(|e| ParseError::cast(name, e))?;
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Bound stdin '{name}'.");
            }
            values.bind_stdin(value);
        }

        Ok(Action::Complete(values))
    }
}
