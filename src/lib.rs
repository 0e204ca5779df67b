//! `argspec` is a declarative command line specification and parser for Rust.
//!
//! A program declares the command line it accepts, then hands the raw tokens (and optionally its standard input) to the built parser.
//! The result is a [`Values`] mapping from each declared name to its typed value, or a precise [`ParseError`].
//!
//! `argspec` is built around four kinds of declarations:
//! * [`Switch`]: a boolean presence flag (`--debug`, `-d`).
//! * [`Opt`]: a flag carrying a value (`--size 24`, `-s 24`), optionally repeatable.
//! * [`Argument`]: a positional value, with at most one variadic "rest" argument.
//! * [`Stdin`]: the binding of the input stream.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/summer.rs")]
//! ```
//!
//! ```console
//! $ summer -h
//! Usage: summer [switches] [--] items*
//! Switches:
//!    --help (-h) - display this help message
//! Arguments:
//!    items* - the items to sum
//!
//! $ summer 1 2 3
//! Sum: 6
//!
//! $ summer 1 blah
//! Error: failed to cast: 'items' to type: Integer: invalid digit found in string
//! Usage: summer [switches] [--] items*
//! ...
//! ```
//!
//! # Parsing
//! Tokens are consumed in order:
//! 1. If `-h`/`--help` (or `--version`, when a version is set) appears before any `--` separator, parsing stops with the usage text (or version string).
//! 2. Leading switch-shaped tokens are matched to switches and options; an option takes the next token verbatim as its value.
//! 3. Options not given take their defaults, then every mandatory option must have a value.
//! 4. A `--` separator is discarded; everything after it is positional, even if it looks like a switch.
//! 5. The remaining tokens are allocated to the arguments in declaration order.
//! Defaulted and optional arguments only take a token when the mandatory arguments after them can still be satisfied.
//! The variadic argument takes every token the mandatory arguments after it do not need.
//! 6. Each value (or raw default) is cast, then the input stream is bound to the stdin declaration.
//!
//! ```
//! use argspec::{Argument, CommandLineSpec};
//!
//! let parser = CommandLineSpec::new("program")
//!     .argument(Argument::new("log"))
//!     .argument(Argument::new("test").default_value("word"))
//!     .argument(Argument::new("target"))
//!     .build_parser()
//!     .unwrap();
//!
//! let values = parser.parse(&["/tmp", "/out"]).unwrap();
//! assert_eq!(values.str("test"), Some("word"));
//!
//! let values = parser.parse(&["/tmp", "magick", "/out"]).unwrap();
//! assert_eq!(values.str("test"), Some("magick"));
//! ```
//!
//! # Casting
//! Every option, argument and stdin declaration carries a [`Cast`].
//! Without one, values stay as text ([`Value::Str`]) and the input stream stays as bytes ([`Value::Bytes`]).
//!
//! ```
//! use argspec::{Cast, CommandLineSpec, Opt, ParseError};
//! use std::net::Ipv4Addr;
//!
//! let parser = CommandLineSpec::new("program")
//!     .option(Opt::new("size").short('s').cast(Cast::Integer))
//!     .option(Opt::new("host").cast(Cast::construct::<Ipv4Addr>()))
//!     .build_parser()
//!     .unwrap();
//!
//! let values = parser.parse(&["-s", "24", "--host", "127.0.0.1"]).unwrap();
//! assert_eq!(values.int("size"), Some(24));
//! assert_eq!(values.get_as::<Ipv4Addr>("host"), Some(&Ipv4Addr::LOCALHOST));
//!
//! let error = parser.parse(&["--size", "24.99"]).unwrap_err();
//! assert_eq!(error.to_string(), "failed to cast: 'size' to type: Integer: invalid digit found in string");
//! ```
//!
//! A custom structured-data decoder is a [`prelude::Loader`]:
//! ```
//! use argspec::prelude::*;
//! use argspec::{Cast, CommandLineSpec, Stdin, Value};
//!
//! struct Lines;
//!
//! impl Loader for Lines {
//!     fn name(&self) -> &str {
//!         "Lines"
//!     }
//!
//!     fn load(&self, raw: &str) -> Result<Value, String> {
//!         Ok(Value::List(raw.lines().map(Value::from).collect()))
//!     }
//! }
//!
//! let parser = CommandLineSpec::new("program")
//!     .stdin(Stdin::new().cast(Cast::loader(Lines)))
//!     .build_parser()
//!     .unwrap();
//!
//! let values = parser.parse_with_input(&[], "a\nb".as_bytes()).unwrap();
//! assert_eq!(values.stdin().unwrap().as_list().unwrap().len(), 2);
//! ```
//!
//! # Errors
//! Invalid declarations (ex: a repeated switch name) are reported by [`CommandLineSpec::build_parser`] as a [`DeclarationError`].
//! [`CommandLineSpec::build`] instead prints the error and exits.
//!
//! Parse errors are reported by [`CommandParser::parse`] as a [`ParseError`].
//! [`CommandParser::parse_env`] instead prints `Error: <message>` followed by the usage text, and exits with code `1`.
//!
//! # Features
//! * `tracing_debug`: log the parser's decisions with [`tracing`](https://docs.rs/tracing) at the debug level.

pub use argspec_builder::*;
