//! Declarative command-line token matching.
//!
//! Options and positional arguments are declared up front with
//! [`OptionDef`], [`ArgumentDef`] and [`Command::builder`]; a built
//! [`Command`] then matches flat token lists into a [`Matches`] or a precise
//! [`ParseError`].
//!
//! ```
//! use cmdmatch_argparse::{ArgumentDef, Command, OptionDef, Value, ValueSpec, ValueType};
//!
//! let command = Command::builder("cmd")
//!     .option(OptionDef::new("a").value(ValueSpec::new(ValueType::Integer).default_value(-11)))
//!     .option(OptionDef::new("c"))
//!     .argument(ArgumentDef::new("PID", ValueType::Integer))
//!     .argument(ArgumentDef::new("TYPE", ValueType::Integer).default_value(-200))
//!     .build()?;
//!
//! let matches = command.parse(&["-a11", "100", "-c"])?;
//! assert_eq!(matches.option_value("-a"), Some(&Value::Integer(11)));
//! assert!(matches.option_exists("c"));
//! assert_eq!(matches.argument_value("TYPE"), Some(&Value::Integer(-200)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Positional arguments form one contiguous run. Options may come before or
//! after the run, never inside it. At most one optional argument may sit
//! among mandatory ones; two or more optional arguments must be the last ones.

mod bind;
mod constraint;
mod cursor;
mod definition;
mod dispatch;
mod driver;
mod error;
pub mod help;
mod matches;
mod option;
mod positional;
mod value;

pub use bind::{BindError, Binder, FromValue};
pub use constraint::{
    Constraint, ConstraintFailure, Enumeration, Length, MaxLength, MaxValue, MinLength, MinValue,
};
pub use cursor::looks_like_option;
pub use definition::{ArgumentDef, Command, CommandBuilder, OptionDef, ValueSpec};
pub use dispatch::CommandSet;
pub use error::{ConfigError, ConfigResult, Element, ParseError, ParseResult};
pub use matches::{Matches, ParsedArgument, ParsedOption};
pub use value::{ConversionError, UnknownValueType, Value, ValueType};
