//! Scalar value types and raw-text conversion.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Declared type of an option value or positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{raw}' is not a valid {value_type} value")]
pub struct ConversionError {
    pub raw: String,
    pub value_type: ValueType,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value type: {0}")]
pub struct UnknownValueType(pub String);

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "i8",
            Self::Short => "i16",
            Self::Integer => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::BigInteger => "bigint",
            Self::BigDecimal => "bigdecimal",
            Self::String => "string",
        }
    }

    /// Convert raw command line text into a typed value.
    pub fn convert(self, raw: &str) -> Result<Value, ConversionError> {
        let err = || ConversionError {
            raw: raw.to_string(),
            value_type: self,
        };
        let value = match self {
            Self::Byte => Value::Byte(raw.parse().map_err(|_| err())?),
            Self::Short => Value::Short(raw.parse().map_err(|_| err())?),
            Self::Integer => Value::Integer(raw.parse().map_err(|_| err())?),
            Self::Long => Value::Long(raw.parse().map_err(|_| err())?),
            Self::Float => Value::Float(raw.parse().map_err(|_| err())?),
            Self::Double => Value::Double(raw.parse().map_err(|_| err())?),
            Self::BigInteger => Value::BigInteger(BigInt::from_str(raw).map_err(|_| err())?),
            Self::BigDecimal => Value::BigDecimal(BigDecimal::from_str(raw).map_err(|_| err())?),
            Self::String => Value::String(raw.to_string()),
        };
        Ok(value)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = UnknownValueType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "i8" | "byte" => Self::Byte,
            "i16" | "short" => Self::Short,
            "i32" | "int" | "integer" => Self::Integer,
            "i64" | "long" => Self::Long,
            "f32" | "float" => Self::Float,
            "f64" | "double" => Self::Double,
            "bigint" | "big-integer" => Self::BigInteger,
            "bigdecimal" | "big-decimal" | "decimal" => Self::BigDecimal,
            "string" | "str" => Self::String,
            _ => return Err(UnknownValueType(s.to_string())),
        };
        Ok(ty)
    }
}

/// A converted option or argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInteger(BigInt),
    BigDecimal(BigDecimal),
    String(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Byte(_) => ValueType::Byte,
            Self::Short(_) => ValueType::Short,
            Self::Integer(_) => ValueType::Integer,
            Self::Long(_) => ValueType::Long,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::BigInteger(_) => ValueType::BigInteger,
            Self::BigDecimal(_) => ValueType::BigDecimal,
            Self::String(_) => ValueType::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Any fixed-width integer, widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(v) => Some(i64::from(*v)),
            Self::Short(v) => Some(i64::from(*v)),
            Self::Integer(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Either float width, widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }
}

impl PartialOrd for Value {
    /// Values are only ordered against values of the same type.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Byte(a), Self::Byte(b)) => a.partial_cmp(b),
            (Self::Short(a), Self::Short(b)) => a.partial_cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.partial_cmp(b),
            (Self::Long(a), Self::Long(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Double(a), Self::Double(b)) => a.partial_cmp(b),
            (Self::BigInteger(a), Self::BigInteger(b)) => a.partial_cmp(b),
            (Self::BigDecimal(a), Self::BigDecimal(b)) => a.partial_cmp(b),
            (Self::String(a), Self::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::BigInteger(v) => write!(f, "{v}"),
            Self::BigDecimal(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

// Arbitrary precision numbers are emitted as strings so JSON consumers never
// lose digits.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Byte(v) => serializer.serialize_i8(*v),
            Self::Short(v) => serializer.serialize_i16(*v),
            Self::Integer(v) => serializer.serialize_i32(*v),
            Self::Long(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f32(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::BigInteger(v) => serializer.serialize_str(&v.to_string()),
            Self::BigDecimal(v) => serializer.serialize_str(&v.to_string()),
            Self::String(v) => serializer.serialize_str(v),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    BigInt => BigInteger,
    BigDecimal => BigDecimal,
    String => String,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}
