/*!
Parsing and printing of durations.

The only format supported is the "friendly" format in the [`friendly`]
module: a single number with an optional unit designator, like `1.5h` or
`53 milliseconds`. The top-level [`parse`](crate::parse) and
[`format`](crate::format) functions are thin wrappers around the types in
that module.

This module also defines the [`Write`] trait, which is the output sink used
by [`friendly::DurationPrinter`]. It is implemented for `String`, and the
[`StdFmtWrite`] and [`StdIoWrite`] adapters connect it to
`core::fmt::Write` and `std::io::Write` implementations.
*/

use alloc::string::String;

use crate::{
    error::{err, Error},
    util::escape,
};

pub mod friendly;

/// The result of parsing a value out of a slice of bytes.
///
/// This carries the parsed value and the remaining input that wasn't
/// consumed. Parser routines take their input by value and return whatever
/// they didn't consume, so they compose by threading `input` through.
#[derive(Clone, Debug)]
pub(crate) struct Parsed<'i, V> {
    /// The value parsed.
    pub(crate) value: V,
    /// The remaining unparsed input.
    pub(crate) input: &'i [u8],
}

impl<'i, V: core::fmt::Display> Parsed<'i, V> {
    /// Returns the parsed value, or an error if any input remains.
    #[inline]
    pub(crate) fn into_full(self) -> Result<V, Error> {
        if self.input.is_empty() {
            return Ok(self.value);
        }
        Err(err!(
            "parsed value '{value}', but unparsed input {unparsed:?} \
             remains (expected no unparsed input)",
            value = self.value,
            unparsed = escape::Bytes(self.input),
        ))
    }
}

/// A trait for printing durations into a sink.
///
/// This is like `core::fmt::Write`, but reports failures with this crate's
/// [`Error`] type.
pub trait Write {
    /// Write the given string to this writer.
    fn write_str(&mut self, string: &str) -> Result<(), Error>;

    /// Write the given character to this writer.
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        self.write_str(char.encode_utf8(&mut [0; 4]))
    }
}

impl Write for String {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.push_str(string);
        Ok(())
    }
}

impl<W: Write + ?Sized> Write for &mut W {
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        (**self).write_str(string)
    }

    #[inline]
    fn write_char(&mut self, char: char) -> Result<(), Error> {
        (**self).write_char(char)
    }
}

/// An adapter for using `core::fmt::Write` implementations with
/// [`Write`].
///
/// This is what the `Display` impl of [`Duration`](crate::Duration) uses.
///
/// # Example
///
/// ```
/// use nanodur::fmt::{friendly::DurationPrinter, StdFmtWrite};
///
/// let mut buf = String::new();
/// DurationPrinter::new().print_duration(90_000_000_000, StdFmtWrite(&mut buf))?;
/// assert_eq!(buf, "2m");
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct StdFmtWrite<W>(pub W);

impl<W: core::fmt::Write> Write for StdFmtWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_str(string).map_err(|_| {
            Error::write(format_args!(
                "an error occurred when formatting an argument"
            ))
        })
    }
}

/// An adapter for using `std::io::Write` implementations with [`Write`].
///
/// # Example
///
/// ```
/// use nanodur::{fmt::{friendly::DurationPrinter, StdIoWrite}, Style};
///
/// let mut buf = vec![];
/// let printer = DurationPrinter::new().style(Style::Verbose);
/// printer.print_duration(-500_000, StdIoWrite(&mut buf))?;
/// assert_eq!(buf, "-500 µs".as_bytes());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "std")]
#[derive(Clone, Debug)]
pub struct StdIoWrite<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Write for StdIoWrite<W> {
    #[inline]
    fn write_str(&mut self, string: &str) -> Result<(), Error> {
        self.0.write_all(string.as_bytes()).map_err(|_err| {
            Error::write(format_args!("failed to write duration: {_err}"))
        })
    }
}

/// Formats an unsigned integer in decimal without allocating.
///
/// A `u128` has at most 39 decimal digits.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Decimal {
    buf: [u8; Decimal::MAX_LEN],
    start: usize,
}

impl Decimal {
    const MAX_LEN: usize = 39;

    pub(crate) fn new(mut value: u128) -> Decimal {
        let mut decimal =
            Decimal { buf: [0; Decimal::MAX_LEN], start: Decimal::MAX_LEN };
        loop {
            decimal.start -= 1;
            decimal.buf[decimal.start] = b'0' + (value % 10) as u8;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        decimal
    }

    pub(crate) fn as_str(&self) -> &str {
        // OK because every byte in `buf[start..]` is an ASCII digit.
        core::str::from_utf8(&self.buf[self.start..]).unwrap_or("")
    }
}
