/*!
Convert between human friendly duration strings and exact nanosecond counts.

This crate parses strings like `1.5h`, `53 milliseconds` or `-.5ms` into a
signed `i128` number of nanoseconds, and formats a number of nanoseconds
back into a compact (`1h`) or verbose (`1 hour`) string.

Parsing is exact. The fractional part of a number is never routed through
floating point, so `1.1y` is exactly `11/10` of a year, truncated to a whole
number of nanoseconds. Formatting is lossy: it rounds to a whole number of
the largest unit that fits.

# Example

```
use nanodur::Style;

assert_eq!(nanodur::parse("1.5h")?, Some(5_400_000_000_000));
assert_eq!(nanodur::parse("-.5ms")?, Some(-500_000));
assert_eq!(nanodur::parse("12 idiots")?, None);

assert_eq!(nanodur::format(1_000_000_000, Style::Compact), "1s");
assert_eq!(nanodur::format(234_234_234_000_000, Style::Compact), "3d");
assert_eq!(nanodur::format(3_600_000_000_000, Style::Verbose), "1 hour");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Overview

* [`parse`] and [`parse_strict`] turn text into nanoseconds. The former
reports text that isn't a duration as `Ok(None)`, and the latter as an
error explaining what went wrong.
* [`format`] turns nanoseconds into text in a [`Style`].
* [`ns`] does either, depending on whether it's given text or an integer.
* [`parse_millis`] and [`format_millis`] do the same in milliseconds.
* [`Duration`] wraps a number of nanoseconds with `Display` and `FromStr`
impls, conversions to and from `std::time::Duration` and, optionally,
`serde` support.
* The [`fmt::friendly`] module has the parser and printer types behind all
of the above, along with a precise description of the format.

All errors are reported with the single [`Error`] type. Its
[`kind`](Error::kind) tells a violated precondition, like an empty string,
apart from text that simply isn't a duration.

# Units

| Unit | Length | Spellings |
|---|---|---|
| nanosecond | 1 | `ns`, `nsec`, `nsecs`, `nanosecond`, `nanoseconds` |
| microsecond | 1,000 | `µs`, `µsec`, `µsecs`, `microsecond`, `microseconds` |
| millisecond | 1,000,000 | `ms`, `msec`, `msecs`, `millisecond`, `milliseconds` |
| second | 10^9 | `s`, `sec`, `secs`, `second`, `seconds` |
| minute | 60 seconds | `m`, `min`, `mins`, `minute`, `minutes` |
| hour | 60 minutes | `h`, `hr`, `hrs`, `hour`, `hours` |
| day | 24 hours | `d`, `day`, `days` |
| week | 7 days | `w`, `week`, `weeks` |
| month | 1/12 year | `mo`, `month`, `months` |
| year | 365 days, 6 hours | `y`, `yr`, `yrs`, `year`, `years` |

Spellings are case insensitive. Days are always 24 hours, and months and
years are averages. There is no calendar arithmetic.

# Crate features

* **std** (enabled by default) - Implements `std::error::Error` for
[`Error`] and provides [`fmt::StdIoWrite`]. Without it, this crate only
needs `core` and `alloc`.
* **logging** - Emits log messages through the [`log`] crate, e.g., the
reason a string couldn't be parsed. This is meant for debugging.
* **serde** - Implements `serde::Serialize` and `serde::Deserialize` for
[`Duration`].

[`log`]: https://docs.rs/log
*/

#![no_std]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

use alloc::string::String;

pub use crate::{
    duration::Duration,
    error::{Error, ErrorKind},
    fmt::friendly::{DurationParser, DurationPrinter, Style},
    unit::{
        Unit, NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI,
        NANOS_PER_MINUTE, NANOS_PER_MONTH, NANOS_PER_SECOND, NANOS_PER_WEEK,
        NANOS_PER_YEAR,
    },
    value::{ns, ns_with, Converted, Value},
};

#[macro_use]
mod logging;

mod duration;
mod error;
pub mod fmt;
mod unit;
mod util;
mod value;

/// Parses a duration string into a signed number of nanoseconds.
///
/// See the [`fmt::friendly`] module for the exact format. Text that isn't
/// a duration, like `12 idiots`, gives `Ok(None)`.
///
/// # Errors
///
/// When `text` is empty or longer than 100 characters. The error has kind
/// [`ErrorKind::InvalidArgument`].
///
/// # Example
///
/// ```
/// assert_eq!(nanodur::parse("1   s")?, Some(1_000_000_000));
/// assert_eq!(nanodur::parse("53 MiLliSeCondS")?, Some(53_000_000));
/// assert_eq!(nanodur::parse("100")?, Some(100));
/// assert_eq!(nanodur::parse("10-.5")?, None);
/// assert!(nanodur::parse("").is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse(text: &str) -> Result<Option<i128>, Error> {
    DurationParser::new().parse(text)
}

/// Like [`parse`], but text that isn't a duration is an error of kind
/// [`ErrorKind::Unparseable`].
///
/// # Example
///
/// ```
/// assert_eq!(nanodur::parse_strict("1.5h")?, 5_400_000_000_000);
///
/// let err = nanodur::parse_strict("5 mos").unwrap_err();
/// assert!(err.is_unparseable());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_strict(text: &str) -> Result<i128, Error> {
    DurationParser::new().parse_strict(text)
}

/// Formats a signed number of nanoseconds in the given style.
///
/// Any integer is accepted. The result is rounded to a whole number of the
/// largest unit that fits, see [`DurationPrinter`].
///
/// # Example
///
/// ```
/// use nanodur::Style;
///
/// assert_eq!(nanodur::format(500, Style::Compact), "500ns");
/// assert_eq!(nanodur::format(-10_000, Style::Compact), "-10µs");
/// assert_eq!(nanodur::format(0, Style::Verbose), "0 ns");
/// assert_eq!(nanodur::format(10_000_000_000, Style::Verbose), "10 seconds");
/// ```
pub fn format(nanos: i128, style: Style) -> String {
    DurationPrinter::new().style(style).duration_to_string(nanos)
}

/// Like [`parse`], but returns whole milliseconds.
///
/// The number of nanoseconds is truncated toward zero.
///
/// # Example
///
/// ```
/// assert_eq!(nanodur::parse_millis("1.5s")?, Some(1_500));
/// assert_eq!(nanodur::parse_millis("-1999us")?, None);
/// assert_eq!(nanodur::parse_millis("-1999µs")?, Some(-1));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_millis(text: &str) -> Result<Option<i128>, Error> {
    Ok(parse(text)?.map(|nanos| nanos / NANOS_PER_MILLI))
}

/// Like [`format`], but for a number of milliseconds.
///
/// # Errors
///
/// When `millis` is too big to be represented in nanoseconds. The error has
/// kind [`ErrorKind::InvalidArgument`].
///
/// # Example
///
/// ```
/// use nanodur::Style;
///
/// assert_eq!(nanodur::format_millis(60_000, Style::Compact)?, "1m");
/// assert_eq!(nanodur::format_millis(-500, Style::Verbose)?, "-500 ms");
/// assert!(nanodur::format_millis(i128::MAX, Style::Compact).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn format_millis(millis: i128, style: Style) -> Result<String, Error> {
    let nanos = millis.checked_mul(NANOS_PER_MILLI).ok_or_else(|| {
        Error::invalid_argument(format_args!(
            "{millis} milliseconds is too big to be represented as \
             a 128-bit signed integer of nanoseconds",
        ))
    })?;
    Ok(format(nanos, style))
}
