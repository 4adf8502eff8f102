//! Declarative command-line token classifier.
//!
//! A [`Definition`] names every option up front; [`Parser::new`] compiles it
//! once and [`Parser::parse`] turns a token slice into a [`Config`] holding a
//! value for every option. Parsing never fails: anything that matches no
//! option ends up in [`Config::unrecognized`], and the caller decides whether
//! that is fatal.
//!
//! This crate does not read `std::env::args`, render help, or dispatch
//! subcommands. Those are left to the caller.
//!
//! ```
//! use toptions::{Definition, Parser, opt};
//!
//! let parser = Parser::new(
//!     Definition::new()
//!         .option("input", opt::arg(0))
//!         .option("output", opt::flag_or('o', "out.txt"))
//!         .option("verbose", opt::level('v'))
//!         .option("passthrough", opt::raw()),
//! )?;
//!
//! let config = parser.parse(&["-vv", "in.txt", "--", "--keep"]);
//! assert_eq!(config.text("input"), Some("in.txt"));
//! assert_eq!(config.text("output"), Some("out.txt"));
//! assert_eq!(config.count("verbose"), Some(2));
//! assert_eq!(config.raw("passthrough"), Some(&["--keep".to_string()][..]));
//! # Ok::<(), toptions::DefinitionError>(())
//! ```

mod config;
mod definition;
mod error;
mod option;
mod parser;

pub use config::{Config, UNRECOGNIZED, Unrecognized, Value};
pub use definition::Definition;
pub use error::DefinitionError;
pub use option::{OptionDef, OptionKind, opt};
pub use parser::Parser;
