/*!
A human friendly format for a single duration.

This format is a number followed by an optional unit designator, e.g.,
`1.5h`, `53 milliseconds` or `-.5ms`. It's meant to be easy to write by hand
in configuration files and on the command line, and easy to read in logs.

The [`DurationParser`] turns such strings into a signed number of
nanoseconds, and the [`DurationPrinter`] turns a number of nanoseconds back
into a string. Printing is lossy: the printer rounds to a whole number of
the largest unit that fits. So `parse(print(x))` is close to `x`, but it's
only exact when `x` is a whole number of that unit.

# Example

```
use nanodur::fmt::friendly::{DurationParser, DurationPrinter};

let nanos = DurationParser::new().parse_strict("90 mins")?;
assert_eq!(nanos, 5_400_000_000_000);
// 1.5 hours rounds to 2 hours.
assert_eq!(DurationPrinter::new().duration_to_string(nanos), "2h");

# Ok::<(), Box<dyn std::error::Error>>(())
```

# Precise details of format

Here is a grammar of the format accepted by the parser.

```text
format = sign? number ws* designator?

sign = '-'
number =
    [0-9]+
    | [0-9]* '.' [0-9]+
ws = U+0020 SPACE

designator =
    years
    | months
    | weeks
    | days
    | hours
    | minutes
    | seconds
    | milliseconds
    | microseconds
    | nanoseconds

years = 'years' | 'year' | 'yrs' | 'yr' | 'y'
months = 'months' | 'month' | 'mo'
weeks = 'weeks' | 'week' | 'w'
days = 'days' | 'day' | 'd'
hours = 'hours' | 'hour' | 'hrs' | 'hr' | 'h'
minutes = 'minutes' | 'minute' | 'mins' | 'min' | 'm'
seconds = 'seconds' | 'second' | 'secs' | 'sec' | 's'
milliseconds =
    'milliseconds' | 'millisecond' | 'msecs' | 'msec' | 'ms'
microseconds =
    'microseconds' | 'microsecond' | micro 'secs' | micro 'sec' | micro 's'
nanoseconds =
    'nanoseconds' | 'nanosecond' | 'nsecs' | 'nsec' | 'ns'

micro =
    U+00B5 MICRO SIGN
    | U+03BC GREEK SMALL LETTER MU
    | U+039C GREEK CAPITAL LETTER MU
```

Some notes:

* Designators are matched without regard to ASCII case, so `53 YeArS` is
fine. The three spellings of `micro` extend this to the micro sign.
* The longest designator wins, so `1ms` is a millisecond and `1mo` is a
month, but `1mos` is an error.
* A missing designator means nanoseconds. Trailing spaces are allowed in
that case only, so `1 ` is one nanosecond but `1s ` is an error.
* A fraction may be written with any unit, including nanoseconds. The
result is computed exactly and then truncated toward zero to a whole number
of nanoseconds. So `1.9ns` is `1` and `-1.9ns` is `-1`.
* `-0` is zero. There is no `+` sign.
* The whole string must be at most 100 characters long.
* Months and years have fixed average lengths. A year is 365 days and 6
hours, and a month is one twelfth of that.

The printer produces one of two styles. In both, the unit is the largest of
year, month, week, day, hour, minute, second, millisecond and microsecond
whose length is at most the magnitude of the duration. When there is no such
unit, the duration is printed in nanoseconds, exactly.

* [`Style::Compact`] writes the magnitude divided by the unit length,
rounded half away from zero, immediately followed by the shortest
designator: `3d`, `-10µs`, `1mo`.
* [`Style::Verbose`] writes the same rounded number, a space and the unit's
English name, e.g., `1 hour`. An `s` is added when the unrounded magnitude
is at least one and a half units. Below a second, the number is truncated
instead of rounded and the abbreviation is used without pluralization, e.g.,
`500 ms`.
*/

pub use self::{
    parser::DurationParser,
    printer::{DurationPrinter, Style},
};

mod parser;
mod printer;
