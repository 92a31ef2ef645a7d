use std::fmt;

use thiserror::Error;

use crate::constraint::ConstraintFailure;
use crate::value::ValueType;

/// The definition a parse-time error is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Option(String),
    Argument(String),
}

impl Element {
    pub fn name(&self) -> &str {
        match self {
            Self::Option(name) | Self::Argument(name) => name,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option(name) => write!(f, "option '{name}'"),
            Self::Argument(name) => write!(f, "argument '{name}'"),
        }
    }
}

fn command_suffix(command: &Option<String>) -> String {
    command
        .as_deref()
        .map(|c| format!(" for command '{c}'"))
        .unwrap_or_default()
}

fn interrupted_hint(interrupted: &bool) -> &'static str {
    if *interrupted {
        " Check that there are no options between arguments."
    } else {
        ""
    }
}

fn misplaced_message(command: &Option<String>, token: &str) -> String {
    match command {
        Some(command) => format!(
            "Command line argument '{token}' for command '{command}' cannot be interpreted as a \
             proper command line argument. All the arguments must be sequentially positioned. \
             Check that there are no options between arguments."
        ),
        None => format!(
            "Command line argument '{token}' is at the wrong position. All the arguments must be \
             sequentially positioned (i.e. options cannot be between arguments)."
        ),
    }
}

/// Errors raised while matching tokens. Every variant aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid value for {element}: {failure}")]
    ConstraintFailure {
        element: Element,
        failure: ConstraintFailure,
    },

    #[error("Option '{option}' can occur only once.")]
    DuplicateOption { option: String },

    #[error("'{raw}' is not a valid {value_type} value for {element}.")]
    InvalidValue {
        element: Element,
        raw: String,
        value_type: ValueType,
    },

    #[error("{}", misplaced_message(.command, .token))]
    MisplacedToken {
        command: Option<String>,
        token: String,
    },

    #[error("No command given.")]
    MissingCommand,

    #[error("Option '{option}' requires a value.")]
    MissingValue { option: String },

    #[error(
        "Too few command line arguments{}. Expected min: {expected} but was: {actual}.{}",
        command_suffix(.command),
        interrupted_hint(.interrupted)
    )]
    TooFewArguments {
        command: Option<String>,
        expected: usize,
        actual: usize,
        interrupted: bool,
    },

    #[error(
        "Too many command line arguments{}. Expected max: {expected} but was: {actual}.",
        command_suffix(.command)
    )]
    TooManyArguments {
        command: Option<String>,
        expected: usize,
        actual: usize,
    },

    #[error("Command '{name}' was not found.")]
    UnknownCommand { name: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Errors raised while registering definitions, before any parse happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("alias conflict: '{alias}' refers to both '{first}' and '{second}'")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("default value {value} of {element} does not have the declared type {expected}")]
    DefaultTypeMismatch {
        element: Element,
        value: String,
        expected: ValueType,
    },

    #[error("argument '{0}' is defined more than once")]
    DuplicateArgument(String),

    #[error("command '{0}' is defined more than once")]
    DuplicateCommandName(String),

    #[error("option name '{name}' is used by both '{first}' and '{second}'")]
    DuplicateOptionName {
        name: String,
        first: String,
        second: String,
    },

    #[error("'{0}' must have a name.")]
    EmptyName(&'static str),

    #[error("'{0}' must have the preceding minus character(s).")]
    InvalidOptionName(String),

    #[error(
        "Optional argument '{0}' must have a default value when defaults are required."
    )]
    MissingDefault(String),

    #[error(
        "If there is more than one optional argument they must be the last arguments. \
         The first conflicting argument is '{0}'. \
         A single optional argument can have any position."
    )]
    MisplacedOptionalArgument(String),

    #[error("option '{0}' does not take a value")]
    NotValueOption(String),

    #[error("command '{command}' has no {element}")]
    UnknownElement { command: String, element: Element },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_few_message_carries_hint_and_command() {
        let err = ParseError::TooFewArguments {
            command: Some("pull".to_string()),
            expected: 2,
            actual: 1,
            interrupted: true,
        };
        assert_eq!(
            err.to_string(),
            "Too few command line arguments for command 'pull'. Expected min: 2 but was: 1. \
             Check that there are no options between arguments."
        );
    }

    #[test]
    fn too_many_message_without_command() {
        let err = ParseError::TooManyArguments {
            command: None,
            expected: 4,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "Too many command line arguments. Expected max: 4 but was: 5."
        );
    }

    #[test]
    fn misplaced_message_depends_on_command() {
        let err = ParseError::MisplacedToken {
            command: None,
            token: "400".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command line argument '400' is at the wrong position. All the arguments must be \
             sequentially positioned (i.e. options cannot be between arguments)."
        );

        let err = ParseError::MisplacedToken {
            command: Some("pull".to_string()),
            token: "200".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Command line argument '200' for command 'pull' cannot be interpreted as a proper \
             command line argument. All the arguments must be sequentially positioned. \
             Check that there are no options between arguments."
        );
    }

    #[test]
    fn invalid_value_names_element_and_type() {
        let err = ParseError::InvalidValue {
            element: Element::Option("-b".to_string()),
            raw: "x".to_string(),
            value_type: ValueType::Integer,
        };
        assert_eq!(err.to_string(), "'x' is not a valid i32 value for option '-b'.");
    }
}
