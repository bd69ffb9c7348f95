use alloc::string::String;

use crate::{
    duration::Duration,
    error::Error,
    fmt::friendly::{DurationParser, DurationPrinter, Style},
};

/// The input to [`ns`]: either a duration string or a number of
/// nanoseconds.
///
/// This is usually built implicitly through one of its `From` impls. Every
/// Rust integer type that fits in an `i128` converts to [`Value::Nanos`].
/// Floating point numbers convert to [`Value::Float`], which [`ns`] always
/// rejects: a fractional number of nanoseconds isn't a duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value<'a> {
    /// A duration string to parse, e.g., `1.5h`.
    Text(&'a str),
    /// A signed number of nanoseconds to format.
    Nanos(i128),
    /// A floating point number. This is never a valid input.
    Float(f64),
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(text: &'a str) -> Value<'a> {
        Value::Text(text)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(text: &'a String) -> Value<'a> {
        Value::Text(text)
    }
}

impl<'a> From<Duration> for Value<'a> {
    fn from(dur: Duration) -> Value<'a> {
        Value::Nanos(dur.as_nanos())
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(nanos: $ty) -> Value<'a> {
                    Value::Nanos(i128::from(nanos))
                }
            }
        )*
    }
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl<'a> From<f64> for Value<'a> {
    fn from(float: f64) -> Value<'a> {
        Value::Float(float)
    }
}

impl<'a> From<f32> for Value<'a> {
    fn from(float: f32) -> Value<'a> {
        Value::Float(f64::from(float))
    }
}

/// The output of [`ns`]: nanoseconds parsed from text, or text formatted
/// from nanoseconds.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Converted {
    /// The nanoseconds parsed from a [`Value::Text`].
    Nanos(i128),
    /// The string formatted from a [`Value::Nanos`].
    Text(String),
}

impl Converted {
    /// Returns the nanoseconds, if this came from parsing.
    pub fn nanos(&self) -> Option<i128> {
        match *self {
            Converted::Nanos(nanos) => Some(nanos),
            Converted::Text(_) => None,
        }
    }

    /// Returns the formatted string, if this came from formatting.
    pub fn text(&self) -> Option<&str> {
        match *self {
            Converted::Nanos(_) => None,
            Converted::Text(ref text) => Some(text),
        }
    }

    /// Like [`Converted::text`], but gives up ownership of the string.
    pub fn into_text(self) -> Option<String> {
        match self {
            Converted::Nanos(_) => None,
            Converted::Text(text) => Some(text),
        }
    }
}

impl core::fmt::Display for Converted {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Converted::Nanos(nanos) => core::fmt::Display::fmt(&nanos, f),
            Converted::Text(ref text) => f.write_str(text),
        }
    }
}

/// Parses a duration string, or formats a number of nanoseconds.
///
/// Text is parsed like [`parse_strict`](crate::parse_strict) and integers
/// are printed like [`format`](crate::format) in [`Style::Compact`]. Use
/// [`ns_with`] to choose the style.
///
/// # Errors
///
/// This returns an error of kind
/// [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument) for a
/// floating point value, and for empty text or text longer than 100
/// characters. Text that isn't a duration is an error of kind
/// [`ErrorKind::Unparseable`](crate::ErrorKind::Unparseable).
///
/// # Example
///
/// ```
/// use nanodur::ns;
///
/// assert_eq!(ns("12 secs")?.nanos(), Some(12_000_000_000));
/// assert_eq!(ns(12_000_000_000i64)?.text(), Some("12s"));
///
/// assert!(ns(12.0).unwrap_err().is_invalid_argument());
/// assert!(ns("").unwrap_err().is_invalid_argument());
/// assert!(ns("12 idiots").unwrap_err().is_unparseable());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn ns<'a>(value: impl Into<Value<'a>>) -> Result<Converted, Error> {
    ns_with(value, Style::Compact)
}

/// Like [`ns`], but formats integers in the given style.
///
/// The style has no effect on parsing.
///
/// # Example
///
/// ```
/// use nanodur::{ns_with, Style};
///
/// let text = ns_with(-3_600_000_000_000i64, Style::Verbose)?;
/// assert_eq!(text.to_string(), "-1 hour");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn ns_with<'a>(
    value: impl Into<Value<'a>>,
    style: Style,
) -> Result<Converted, Error> {
    match value.into() {
        Value::Text(text) => {
            DurationParser::new().parse_strict(text).map(Converted::Nanos)
        }
        Value::Nanos(nanos) => {
            let text = DurationPrinter::new().style(style).duration_to_string(nanos);
            Ok(Converted::Text(text))
        }
        Value::Float(float) => {
            debug!("rejected floating point value {float} as a duration");
            Err(Error::invalid_argument(format_args!(
                "expected a duration string or an integer number of \
                 nanoseconds, but found the floating point number {float:?}",
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::unit::{NANOS_PER_HOUR, NANOS_PER_SECOND};

    use super::*;

    #[test]
    fn dispatch() {
        assert_eq!(ns("12 secs").unwrap(), Converted::Nanos(12 * NANOS_PER_SECOND));
        assert_eq!(
            ns(12 * NANOS_PER_SECOND).unwrap(),
            Converted::Text("12s".to_string()),
        );
        assert_eq!(
            ns_with(12 * NANOS_PER_SECOND, Style::Verbose).unwrap().text(),
            Some("12 seconds"),
        );
        assert_eq!(ns_with("1h", Style::Verbose).unwrap().nanos(), Some(NANOS_PER_HOUR));

        let owned = "1.5h".to_string();
        assert_eq!(ns(&owned).unwrap().nanos(), Some(5_400_000_000_000));
        assert_eq!(ns(500u16).unwrap().into_text().unwrap(), "500ns");
        assert_eq!(ns(-1i8).unwrap().to_string(), "-1ns");
        assert_eq!(ns(Duration::from_nanos(NANOS_PER_HOUR)).unwrap().to_string(), "1h");
        assert_eq!(ns("-.5ms").unwrap().to_string(), "-500000");
    }

    #[test]
    fn errors() {
        // Rust integer literals are integers, unlike numbers in some other
        // languages, so only floating point values are rejected.
        let err = ns(12.0).unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(
            err,
            @"expected a duration string or an integer number of nanoseconds, but found the floating point number 12.0",
        );
        assert!(ns(1.5f32).unwrap_err().is_invalid_argument());
        assert!(ns(f64::NAN).unwrap_err().is_invalid_argument());
        assert!(ns(f64::INFINITY).unwrap_err().is_invalid_argument());
        assert!(ns(f64::NEG_INFINITY).unwrap_err().is_invalid_argument());

        assert!(ns("").unwrap_err().is_invalid_argument());
        let long = "1".repeat(101);
        assert!(ns(long.as_str()).unwrap_err().is_invalid_argument());

        let err = ns("12 idiots").unwrap_err();
        assert!(err.is_unparseable());
        insta::assert_snapshot!(
            err,
            @r###"failed to parse "12 idiots" as a duration: expected to find a unit designator (e.g., 'hours' or 'ms'), but found input beginning with "idiots" instead"###,
        );
    }
}
