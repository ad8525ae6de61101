//! Structured property values bound to a log event.

use chrono::{DateTime, FixedOffset};

/// A single, indivisible value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Timestamp(DateTime<FixedOffset>),
}

impl ScalarValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            ScalarValue::Int(_) | ScalarValue::UInt(_) | ScalarValue::Float(_)
        )
    }
}

/// A named value inside a [`StructureValue`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEventProperty {
    pub name: String,
    pub value: LogEventPropertyValue,
}

impl LogEventProperty {
    pub fn new(name: impl Into<String>, value: impl Into<LogEventPropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An object-like value with an optional type tag (`Point { X=1, Y=2 }`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureValue {
    type_tag: Option<String>,
    properties: Vec<LogEventProperty>,
}

impl StructureValue {
    pub fn new(properties: Vec<LogEventProperty>) -> Self {
        Self {
            type_tag: None,
            properties,
        }
    }

    pub fn with_type_tag(mut self, tag: impl Into<String>) -> Self {
        self.type_tag = Some(tag.into());
        self
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    pub fn properties(&self) -> &[LogEventProperty] {
        &self.properties
    }
}

/// Any value that can be bound to a message template property.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEventPropertyValue {
    Scalar(ScalarValue),
    Sequence(Vec<LogEventPropertyValue>),
    Structure(StructureValue),
    Dictionary(Vec<(ScalarValue, LogEventPropertyValue)>),
}

impl LogEventPropertyValue {
    pub fn null() -> Self {
        LogEventPropertyValue::Scalar(ScalarValue::Null)
    }

    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            LogEventPropertyValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The string content when this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }
}

macro_rules! scalar_from {
    ($($t:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$t> for ScalarValue {
                fn from(v: $t) -> Self {
                    ScalarValue::$variant(<$conv>::from(v))
                }
            }

            impl From<$t> for LogEventPropertyValue {
                fn from(v: $t) -> Self {
                    LogEventPropertyValue::Scalar(ScalarValue::from(v))
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool as bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => UInt as u64,
    u16 => UInt as u64,
    u32 => UInt as u64,
    u64 => UInt as u64,
    f32 => Float as f64,
    f64 => Float as f64,
    char => Char as char,
    String => Str as String,
    &str => Str as String,
    DateTime<FixedOffset> => Timestamp as DateTime<FixedOffset>,
}

impl From<usize> for ScalarValue {
    fn from(v: usize) -> Self {
        ScalarValue::UInt(v as u64)
    }
}

impl From<usize> for LogEventPropertyValue {
    fn from(v: usize) -> Self {
        LogEventPropertyValue::Scalar(ScalarValue::from(v))
    }
}

impl From<ScalarValue> for LogEventPropertyValue {
    fn from(v: ScalarValue) -> Self {
        LogEventPropertyValue::Scalar(v)
    }
}

impl From<StructureValue> for LogEventPropertyValue {
    fn from(v: StructureValue) -> Self {
        LogEventPropertyValue::Structure(v)
    }
}

impl<T: Into<LogEventPropertyValue>> From<Vec<T>> for LogEventPropertyValue {
    fn from(items: Vec<T>) -> Self {
        LogEventPropertyValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<LogEventPropertyValue>> From<Option<T>> for LogEventPropertyValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_else(LogEventPropertyValue::null)
    }
}

impl From<&serde_json::Value> for LogEventPropertyValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => LogEventPropertyValue::null(),
            Value::Bool(b) => (*b).into(),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.into()
                } else if let Some(u) = n.as_u64() {
                    u.into()
                } else {
                    n.as_f64().unwrap_or(f64::NAN).into()
                }
            }
            Value::String(s) => s.as_str().into(),
            Value::Array(items) => {
                LogEventPropertyValue::Sequence(items.iter().map(Into::into).collect())
            }
            Value::Object(map) => LogEventPropertyValue::Structure(StructureValue::new(
                map.iter()
                    .map(|(k, v)| LogEventProperty::new(k.clone(), LogEventPropertyValue::from(v)))
                    .collect(),
            )),
        }
    }
}

impl From<serde_json::Value> for LogEventPropertyValue {
    fn from(value: serde_json::Value) -> Self {
        LogEventPropertyValue::from(&value)
    }
}
