use alloc::string::String;

use crate::{
    error::Error,
    fmt::{Decimal, Write},
    unit::Unit,
};

/// The units a printer picks from, largest first.
///
/// Anything smaller than a microsecond is printed in nanoseconds.
const TIERS: [Unit; 9] = [
    Unit::Year,
    Unit::Month,
    Unit::Week,
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
    Unit::Second,
    Unit::Millisecond,
    Unit::Microsecond,
];

/// The shape of a printed duration.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Style {
    /// A number followed immediately by the shortest designator, e.g.,
    /// `3d`, `-10µs` or `1mo`.
    #[default]
    Compact,
    /// A number, a space and the unit's English name, e.g., `1 hour` or
    /// `3 days`.
    ///
    /// Units below a second keep their abbreviation and are never
    /// pluralized, e.g., `500 ms`.
    Verbose,
}

/// A printer for durations given as a signed number of nanoseconds.
///
/// A printer picks the largest unit that is no longer than the duration
/// and rounds to a whole number of that unit, half away from zero. So a
/// printed duration is lossy: `2h 29m` prints as `2h`.
///
/// Months and years are printed using their average lengths, just like the
/// parser reads them.
///
/// # Example
///
/// ```
/// use nanodur::{fmt::friendly::DurationPrinter, Style};
///
/// const PRINTER: DurationPrinter = DurationPrinter::new();
///
/// assert_eq!(PRINTER.duration_to_string(234_234_234_000_000), "3d");
/// assert_eq!(
///     PRINTER.style(Style::Verbose).duration_to_string(-3_600_000_000_000),
///     "-1 hour",
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct DurationPrinter {
    style: Style,
}

impl DurationPrinter {
    /// Creates a new printer using [`Style::Compact`].
    pub const fn new() -> DurationPrinter {
        DurationPrinter { style: Style::Compact }
    }

    /// Sets the style of durations printed by this printer.
    pub const fn style(self, style: Style) -> DurationPrinter {
        DurationPrinter { style }
    }

    /// Prints the given number of nanoseconds to a `String`.
    pub fn duration_to_string(&self, nanos: i128) -> String {
        let mut buf = String::new();
        // OK because writing to a `String` never fails.
        self.print_duration(nanos, &mut buf).unwrap();
        buf
    }

    /// Prints the given number of nanoseconds to the given writer.
    ///
    /// # Errors
    ///
    /// This only returns an error when writing to `wtr` fails.
    pub fn print_duration<W: Write>(
        &self,
        nanos: i128,
        mut wtr: W,
    ) -> Result<(), Error> {
        let magnitude = nanos.unsigned_abs();
        let unit = tier(magnitude);
        let unit_len = unit.nanoseconds_unsigned();
        trace!("printing {nanos} nanoseconds in units of {unit}");

        if nanos < 0 {
            wtr.write_char('-')?;
        }
        match self.style {
            Style::Compact => {
                let value = Decimal::new(round(magnitude, unit_len));
                wtr.write_str(value.as_str())?;
                wtr.write_str(unit.abbreviation())?;
            }
            Style::Verbose if unit >= Unit::Second => {
                let value = Decimal::new(round(magnitude, unit_len));
                wtr.write_str(value.as_str())?;
                wtr.write_char(' ')?;
                wtr.write_str(unit.singular())?;
                // This looks at the magnitude before rounding.
                let plural = magnitude
                    .checked_mul(2)
                    .map_or(true, |twice| twice >= unit_len * 3);
                if plural {
                    wtr.write_char('s')?;
                }
            }
            Style::Verbose => {
                let value = Decimal::new(magnitude / unit_len);
                wtr.write_str(value.as_str())?;
                wtr.write_char(' ')?;
                wtr.write_str(unit.abbreviation())?;
            }
        }
        Ok(())
    }
}

/// Returns the largest unit no longer than `magnitude` nanoseconds, or
/// nanoseconds when there isn't one.
fn tier(magnitude: u128) -> Unit {
    TIERS
        .iter()
        .copied()
        .find(|unit| unit.nanoseconds_unsigned() <= magnitude)
        .unwrap_or(Unit::Nanosecond)
}

/// Divides `magnitude` by `unit_len`, rounding half up.
///
/// This can't overflow since a magnitude is at most `2^127`.
fn round(magnitude: u128, unit_len: u128) -> u128 {
    (magnitude + unit_len / 2) / unit_len
}
