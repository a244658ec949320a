//! Time values handed to templates by `timeParse` and `timeNow`.
//!
//! Layouts are strftime patterns (`%Y-%m-%d %H:%M`). A time renders as
//! RFC 3339 and exposes its fields as attributes:
//!
//! ```text
//! {{ timeParse("%Y-%m-%d", released).year }}
//! {{ timeNow().format("%d %b %Y") }}
//! ```

use chrono::format::ParseErrorKind;
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};
use minijinja::value::{from_args, Object, ObjectRepr};
use minijinja::{Error, ErrorKind, State, Value};
use std::fmt::{self, Write as _};
use std::sync::Arc;

/// An instant with a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Time(DateTime<FixedOffset>);

impl Time {
    /// The current local time. Read from the clock on every call.
    pub fn now() -> Self {
        Time(Local::now().fixed_offset())
    }

    /// Parse `text` against a strftime `layout`.
    ///
    /// Text without an offset is taken as UTC; a layout with only date
    /// fields yields midnight UTC.
    pub fn parse(layout: &str, text: &str) -> Result<Self, chrono::ParseError> {
        match DateTime::parse_from_str(text, layout) {
            Ok(dt) => Ok(Time(dt)),
            Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                let naive = match NaiveDateTime::parse_from_str(text, layout) {
                    Ok(naive) => naive,
                    Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                        NaiveDate::parse_from_str(text, layout)?.and_time(NaiveTime::MIN)
                    }
                    Err(e) => return Err(e),
                };
                Ok(Time(naive.and_utc().fixed_offset()))
            }
            Err(e) => Err(e),
        }
    }

    /// Format with a strftime `layout`, rejecting unknown specifiers.
    pub fn format(&self, layout: &str) -> Result<String, Error> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(layout)).map_err(|_| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("invalid time layout {layout:?}"),
            )
        })?;
        Ok(out)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}

impl Object for Time {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let dt = self.0;
        let value = match key.as_str()? {
            "year" => Value::from(dt.year()),
            "month" => Value::from(dt.month()),
            "day" => Value::from(dt.day()),
            "hour" => Value::from(dt.hour()),
            "minute" => Value::from(dt.minute()),
            "second" => Value::from(dt.second()),
            "weekday" => Value::from(dt.weekday().to_string()),
            "unix" => Value::from(dt.timestamp()),
            _ => return None,
        };
        Some(value)
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "format" => {
                let (layout,): (String,) = from_args(args)?;
                self.format(&layout).map(Value::from)
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("time has no method named {method}"),
            )),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        fmt::Display::fmt(&**self, f)
    }
}
