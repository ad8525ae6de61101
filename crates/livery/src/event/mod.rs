//! The structured log event consumed by the renderers.
//!
//! Events are read-only inputs: nothing in the rendering pipeline mutates them.

mod exception;
mod level;
mod value;

use chrono::{DateTime, FixedOffset, Local};
use indexmap::IndexMap;
use livery_template::MessageTemplate;

pub use exception::{ExceptionInfo, END_OF_INNER_EXCEPTION};
pub use level::{LogEventLevel, ParseLevelError};
pub use value::{
    LogEventProperty, LogEventPropertyValue, ScalarValue, StructureValue,
};

/// Properties keyed by name, in insertion order.
pub type Properties = IndexMap<String, LogEventPropertyValue>;

/// A single log event: when, how severe, what happened and any attached failure.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    timestamp: DateTime<FixedOffset>,
    level: LogEventLevel,
    message_template: MessageTemplate,
    properties: Properties,
    exception: Option<ExceptionInfo>,
}

impl LogEvent {
    pub fn new(
        timestamp: DateTime<FixedOffset>,
        level: LogEventLevel,
        message_template: MessageTemplate,
        properties: Properties,
        exception: Option<ExceptionInfo>,
    ) -> Self {
        Self {
            timestamp,
            level,
            message_template,
            properties,
            exception,
        }
    }

    /// Starts building an event with the current local time.
    ///
    /// ```rust
    /// use livery::event::{LogEvent, LogEventLevel};
    ///
    /// let event = LogEvent::builder(LogEventLevel::Information, "Hello {Name}")
    ///     .property("Name", "World")
    ///     .build();
    /// assert_eq!(event.properties().len(), 1);
    /// ```
    pub fn builder(level: LogEventLevel, message_template: &str) -> LogEventBuilder {
        LogEventBuilder {
            timestamp: Local::now().fixed_offset(),
            level,
            message_template: MessageTemplate::parse(message_template),
            properties: Properties::new(),
            exception: None,
        }
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn level(&self) -> LogEventLevel {
        self.level
    }

    pub fn message_template(&self) -> &MessageTemplate {
        &self.message_template
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&LogEventPropertyValue> {
        self.properties.get(name)
    }

    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }
}

/// Builder returned by [`LogEvent::builder`].
#[derive(Debug, Clone)]
pub struct LogEventBuilder {
    timestamp: DateTime<FixedOffset>,
    level: LogEventLevel,
    message_template: MessageTemplate,
    properties: Properties,
    exception: Option<ExceptionInfo>,
}

impl LogEventBuilder {
    pub fn timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Binds a property. Re-binding a name replaces the earlier value in place.
    pub fn property(
        mut self,
        name: impl Into<String>,
        value: impl Into<LogEventPropertyValue>,
    ) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn build(self) -> LogEvent {
        LogEvent {
            timestamp: self.timestamp,
            level: self.level,
            message_template: self.message_template,
            properties: self.properties,
            exception: self.exception,
        }
    }
}
