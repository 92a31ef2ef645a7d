//! Checks evaluated on a value after it has been converted to its declared type.
//!
//! Constraints are chained on a [`crate::ValueSpec`]; the first failing check
//! aborts the parse with its own message.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConstraintFailure {
    message: String,
}

impl ConstraintFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single check in a value's constraint chain.
///
/// Implementations must be pure: the matcher may evaluate the same constraint
/// from several threads at once.
pub trait Constraint: fmt::Debug + Send + Sync {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure>;

    /// Short description shown in help output, e.g. `min: 1`.
    fn describe(&self) -> String;
}

/// The value must be one of a fixed set.
#[derive(Debug, Clone)]
pub struct Enumeration {
    values: Vec<Value>,
}

impl Enumeration {
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    fn joined(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Constraint for Enumeration {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure> {
        if self.values.iter().any(|v| v == value) {
            return Ok(());
        }
        Err(ConstraintFailure::new(format!(
            "'{value}' is not one of the possible values: {}",
            self.joined()
        )))
    }

    fn describe(&self) -> String {
        format!("possible values: {}", self.joined())
    }
}

/// Inclusive lower bound. Values of a different type than the bound fail.
#[derive(Debug, Clone)]
pub struct MinValue(pub Value);

impl Constraint for MinValue {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure> {
        match value.partial_cmp(&self.0) {
            Some(std::cmp::Ordering::Less) | None => Err(ConstraintFailure::new(format!(
                "'{value}' is less than the minimum value {}",
                self.0
            ))),
            Some(_) => Ok(()),
        }
    }

    fn describe(&self) -> String {
        format!("min: {}", self.0)
    }
}

/// Inclusive upper bound. Values of a different type than the bound fail.
#[derive(Debug, Clone)]
pub struct MaxValue(pub Value);

impl Constraint for MaxValue {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure> {
        match value.partial_cmp(&self.0) {
            Some(std::cmp::Ordering::Greater) | None => Err(ConstraintFailure::new(format!(
                "'{value}' is greater than the maximum value {}",
                self.0
            ))),
            Some(_) => Ok(()),
        }
    }

    fn describe(&self) -> String {
        format!("max: {}", self.0)
    }
}

fn char_len(value: &Value) -> Result<usize, ConstraintFailure> {
    value.as_str().map(|s| s.chars().count()).ok_or_else(|| {
        ConstraintFailure::new(format!(
            "length constraints apply to strings only, got {}",
            value.value_type()
        ))
    })
}

#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

impl Constraint for MinLength {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure> {
        let len = char_len(value)?;
        if len < self.0 {
            return Err(ConstraintFailure::new(format!(
                "'{value}' is shorter than {} characters",
                self.0
            )));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("min length: {}", self.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

impl Constraint for MaxLength {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure> {
        let len = char_len(value)?;
        if len > self.0 {
            return Err(ConstraintFailure::new(format!(
                "'{value}' is longer than {} characters",
                self.0
            )));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("max length: {}", self.0)
    }
}

/// Exact string length in characters.
#[derive(Debug, Clone, Copy)]
pub struct Length(pub usize);

impl Constraint for Length {
    fn check(&self, value: &Value) -> Result<(), ConstraintFailure> {
        let len = char_len(value)?;
        if len != self.0 {
            return Err(ConstraintFailure::new(format!(
                "'{value}' must be exactly {} characters long",
                self.0
            )));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("length: {}", self.0)
    }
}
