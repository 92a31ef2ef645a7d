//! Copying matched values into a caller-owned struct.
//!
//! A [`Binder`] is set up once per [`Command`]: each binding names an option
//! or argument and supplies a setter. Names are resolved when the binding is
//! registered, so a typo fails early with a [`ConfigError`] instead of being
//! silently skipped on every parse.
//!
//! ```
//! use cmdmatch_argparse::{ArgumentDef, Binder, Command, OptionDef, ValueType};
//!
//! #[derive(Default)]
//! struct Pull {
//!     pid: i64,
//!     verbose: bool,
//! }
//!
//! let command = Command::builder("pull")
//!     .option(OptionDef::new("v"))
//!     .argument(ArgumentDef::new("PID", ValueType::Integer))
//!     .build()?;
//! let binder = Binder::new(&command)
//!     .argument("PID", |p: &mut Pull, v: i64| p.pid = v)?
//!     .flag("v", |p: &mut Pull, on| p.verbose = on)?;
//!
//! let mut pull = Pull::default();
//! binder.apply(&command.parse(&["-v", "42"])?, &mut pull)?;
//! assert_eq!((pull.pid, pull.verbose), (42, true));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use thiserror::Error;

use crate::definition::{Command, normalize_option_name};
use crate::error::{ConfigError, ConfigResult, Element};
use crate::matches::Matches;
use crate::value::{Value, ValueType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("matches belong to command '{actual}', binder was built for '{expected}'")]
    CommandMismatch { expected: String, actual: String },

    #[error("{element} holds a {actual} value, which cannot be bound as {expected}")]
    TypeMismatch {
        element: Element,
        expected: &'static str,
        actual: ValueType,
    },
}

/// Conversion from a matched [`Value`] into a setter's parameter type.
pub trait FromValue: Sized {
    /// Name used in [`BindError::TypeMismatch`].
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

/// Any integer width.
impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

/// Either float width.
impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

macro_rules! exact_from_value {
    ($($ty:ty => $variant:ident, $name:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $name;

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

exact_from_value! {
    i8 => Byte, "i8",
    i16 => Short, "i16",
    i32 => Integer, "i32",
    f32 => Float, "f32",
    BigInt => BigInteger, "bigint",
    BigDecimal => BigDecimal, "bigdecimal",
}

type Binding<'c, T> = Box<dyn Fn(&Matches<'_>, &mut T) -> Result<(), BindError> + 'c>;

fn convert<V: FromValue>(value: &Value, element: &Element) -> Result<V, BindError> {
    V::from_value(value).ok_or_else(|| BindError::TypeMismatch {
        element: element.clone(),
        expected: V::EXPECTED,
        actual: value.value_type(),
    })
}

/// Named setters for the options and arguments of one command.
pub struct Binder<'c, T> {
    command: &'c Command,
    bindings: Vec<Binding<'c, T>>,
}

impl<'c, T: 'c> Binder<'c, T> {
    pub fn new(command: &'c Command) -> Self {
        Self {
            command,
            bindings: Vec::new(),
        }
    }

    fn unknown(&self, element: Element) -> ConfigError {
        ConfigError::UnknownElement {
            command: self.command.name().to_string(),
            element,
        }
    }

    fn option_name(&self, name: &str) -> ConfigResult<&'c str> {
        let command: &'c Command = self.command;
        command
            .option(name)
            .or_else(|| command.option(&normalize_option_name(name)))
            .map(|def| def.name())
            .ok_or_else(|| self.unknown(Element::Option(name.to_string())))
    }

    fn value_option_name(&self, name: &str) -> ConfigResult<&'c str> {
        let canonical = self.option_name(name)?;
        match self.command.option(canonical) {
            Some(def) if def.value_spec().is_some() => Ok(canonical),
            _ => Err(ConfigError::NotValueOption(canonical.to_string())),
        }
    }

    /// Call `setter` with the argument's value when it has one.
    pub fn argument<V, F>(mut self, name: &str, setter: F) -> ConfigResult<Self>
    where
        V: FromValue + 'c,
        F: Fn(&mut T, V) + 'c,
    {
        let command: &'c Command = self.command;
        let def = command
            .argument(name)
            .ok_or_else(|| self.unknown(Element::Argument(name.to_string())))?;
        let name = def.name();
        let element = Element::Argument(name.to_string());
        self.bindings.push(Box::new(move |matches: &Matches<'_>, target: &mut T| {
            if let Some(value) = matches.argument_value(name) {
                setter(target, convert(value, &element)?);
            }
            Ok(())
        }));
        Ok(self)
    }

    /// Call `setter` with the value of the option's first occurrence.
    pub fn option<V, F>(mut self, name: &str, setter: F) -> ConfigResult<Self>
    where
        V: FromValue + 'c,
        F: Fn(&mut T, V) + 'c,
    {
        let name = self.value_option_name(name)?;
        let element = Element::Option(name.to_string());
        self.bindings.push(Box::new(move |matches: &Matches<'_>, target: &mut T| {
            if let Some(value) = matches.option_value(name) {
                setter(target, convert(value, &element)?);
            }
            Ok(())
        }));
        Ok(self)
    }

    /// Call `setter` once with the values of every occurrence, in input order.
    pub fn options<V, F>(mut self, name: &str, setter: F) -> ConfigResult<Self>
    where
        V: FromValue + 'c,
        F: Fn(&mut T, Vec<V>) + 'c,
    {
        let name = self.value_option_name(name)?;
        let element = Element::Option(name.to_string());
        self.bindings.push(Box::new(move |matches: &Matches<'_>, target: &mut T| {
            let values = matches.option_values(name);
            if values.is_empty() {
                return Ok(());
            }
            let values = values
                .into_iter()
                .map(|v| convert(v, &element))
                .collect::<Result<Vec<V>, _>>()?;
            setter(target, values);
            Ok(())
        }));
        Ok(self)
    }

    /// Call `setter` with `true` when the option occurs at least once.
    pub fn flag<F>(mut self, name: &str, setter: F) -> ConfigResult<Self>
    where
        F: Fn(&mut T, bool) + 'c,
    {
        let name = self.option_name(name)?;
        self.bindings.push(Box::new(move |matches: &Matches<'_>, target: &mut T| {
            if matches.option_exists(name) {
                setter(target, true);
            }
            Ok(())
        }));
        Ok(self)
    }

    /// Run every binding against `matches` in registration order.
    pub fn apply(&self, matches: &Matches<'_>, target: &mut T) -> Result<(), BindError> {
        if matches.command_name() != self.command.name() {
            return Err(BindError::CommandMismatch {
                expected: self.command.name().to_string(),
                actual: matches.command_name().to_string(),
            });
        }
        for binding in &self.bindings {
            binding(matches, target)?;
        }
        Ok(())
    }
}

impl<T> std::fmt::Debug for Binder<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binder")
            .field("command", &self.command.name())
            .field("bindings", &self.bindings.len())
            .finish()
    }
}
