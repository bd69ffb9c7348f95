use crate::util::trie::{Trie, TrieNeedles};

/// The number of nanoseconds in a microsecond.
pub const NANOS_PER_MICRO: i128 = 1_000;
/// The number of nanoseconds in a millisecond.
pub const NANOS_PER_MILLI: i128 = 1_000 * NANOS_PER_MICRO;
/// The number of nanoseconds in a second.
pub const NANOS_PER_SECOND: i128 = 1_000 * NANOS_PER_MILLI;
/// The number of nanoseconds in a minute.
pub const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
/// The number of nanoseconds in an hour.
pub const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;
/// The number of nanoseconds in a day of exactly 24 hours.
pub const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;
/// The number of nanoseconds in a week of exactly 7 days.
pub const NANOS_PER_WEEK: i128 = 7 * NANOS_PER_DAY;
/// The number of nanoseconds in an average year: 365 days and 6 hours.
///
/// The extra 6 hours account for leap years on average.
pub const NANOS_PER_YEAR: i128 = 365 * NANOS_PER_DAY + 6 * NANOS_PER_HOUR;
/// The number of nanoseconds in an average month: one twelfth of
/// [`NANOS_PER_YEAR`], truncated.
pub const NANOS_PER_MONTH: i128 = NANOS_PER_YEAR / 12;

/// A unit of time recognized by the parser and used by the printer.
///
/// Units are ordered from smallest to largest, so `Unit::Year >
/// Unit::Month`.
///
/// Every unit has a fixed length in nanoseconds. Days are always 24 hours,
/// and months and years are averages. There is no calendar arithmetic
/// anywhere in this crate.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Unit {
    /// 365 days and 6 hours.
    Year = 9,
    /// One twelfth of a year.
    Month = 8,
    /// 7 days.
    Week = 7,
    /// 24 hours.
    Day = 6,
    /// 60 minutes.
    Hour = 5,
    /// 60 seconds.
    Minute = 4,
    /// 1,000 milliseconds.
    Second = 3,
    /// 1,000 microseconds.
    Millisecond = 2,
    /// 1,000 nanoseconds.
    Microsecond = 1,
    /// The smallest unit.
    Nanosecond = 0,
}

impl Unit {
    /// Returns the unit named by the given designator, if any.
    ///
    /// ASCII letters are compared without regard to case, and the whole
    /// string must be a designator. The micro sign (`µ`) may also be
    /// written as a Greek small or capital mu.
    ///
    /// # Example
    ///
    /// ```
    /// use nanodur::Unit;
    ///
    /// assert_eq!(Unit::from_designator("hrs"), Some(Unit::Hour));
    /// assert_eq!(Unit::from_designator("MilliSeconds"), Some(Unit::Millisecond));
    /// assert_eq!(Unit::from_designator("µs"), Some(Unit::Microsecond));
    /// assert_eq!(Unit::from_designator("mos"), None);
    /// assert_eq!(Unit::from_designator(""), None);
    /// ```
    pub fn from_designator(designator: &str) -> Option<Unit> {
        match Unit::find_designator(designator.as_bytes()) {
            Some((unit, len)) if len == designator.len() => Some(unit),
            _ => None,
        }
    }

    /// Finds the longest designator at the start of `input`.
    ///
    /// Returns the unit and the number of bytes the designator occupies.
    pub(crate) fn find_designator(input: &[u8]) -> Option<(Unit, usize)> {
        DESIGNATOR_TRIE.find(input)
    }

    /// Returns the length of this unit in nanoseconds.
    ///
    /// # Example
    ///
    /// ```
    /// use nanodur::Unit;
    ///
    /// assert_eq!(Unit::Hour.nanoseconds(), 3_600_000_000_000);
    /// assert_eq!(Unit::Year.nanoseconds(), 12 * Unit::Month.nanoseconds());
    /// ```
    pub const fn nanoseconds(self) -> i128 {
        match self {
            Unit::Year => NANOS_PER_YEAR,
            Unit::Month => NANOS_PER_MONTH,
            Unit::Week => NANOS_PER_WEEK,
            Unit::Day => NANOS_PER_DAY,
            Unit::Hour => NANOS_PER_HOUR,
            Unit::Minute => NANOS_PER_MINUTE,
            Unit::Second => NANOS_PER_SECOND,
            Unit::Millisecond => NANOS_PER_MILLI,
            Unit::Microsecond => NANOS_PER_MICRO,
            Unit::Nanosecond => 1,
        }
    }

    /// Like `nanoseconds`, but unsigned, for comparisons against
    /// magnitudes.
    pub(crate) const fn nanoseconds_unsigned(self) -> u128 {
        self.nanoseconds().unsigned_abs()
    }

    /// Returns the shortest designator for this unit.
    ///
    /// This is the suffix used by the compact format, e.g., `mo` or `µs`.
    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::Year => "y",
            Unit::Month => "mo",
            Unit::Week => "w",
            Unit::Day => "d",
            Unit::Hour => "h",
            Unit::Minute => "m",
            Unit::Second => "s",
            Unit::Millisecond => "ms",
            Unit::Microsecond => "µs",
            Unit::Nanosecond => "ns",
        }
    }

    /// A human readable singular description of this unit of time.
    pub fn singular(self) -> &'static str {
        match self {
            Unit::Year => "year",
            Unit::Month => "month",
            Unit::Week => "week",
            Unit::Day => "day",
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
            Unit::Millisecond => "millisecond",
            Unit::Microsecond => "microsecond",
            Unit::Nanosecond => "nanosecond",
        }
    }

    /// A human readable plural description of this unit of time.
    pub fn plural(self) -> &'static str {
        match self {
            Unit::Year => "years",
            Unit::Month => "months",
            Unit::Week => "weeks",
            Unit::Day => "days",
            Unit::Hour => "hours",
            Unit::Minute => "minutes",
            Unit::Second => "seconds",
            Unit::Millisecond => "milliseconds",
            Unit::Microsecond => "microseconds",
            Unit::Nanosecond => "nanoseconds",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.singular())
    }
}

#[cfg(test)]
impl Unit {
    pub(crate) const ALL: [Unit; 10] = [
        Unit::Nanosecond,
        Unit::Microsecond,
        Unit::Millisecond,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
        Unit::Week,
        Unit::Month,
        Unit::Year,
    ];
}

#[cfg(test)]
impl quickcheck::Arbitrary for Unit {
    fn arbitrary(g: &mut quickcheck::Gen) -> Unit {
        let n = <usize as quickcheck::Arbitrary>::arbitrary(g);
        Unit::ALL[n % Unit::ALL.len()]
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        let n = *self as usize;
        alloc::boxed::Box::new(
            quickcheck::Arbitrary::shrink(&n)
                .map(|n| Unit::ALL[n % Unit::ALL.len()]),
        )
    }
}

/// The type of the `const` trie mapping designators to units.
type DesignatorTrie = Trie<101, { DESIGNATOR_NEEDLES.alphabet_len() }, Unit>;

/// Built once, at compile time.
static DESIGNATOR_TRIE: &'static DesignatorTrie =
    &Trie::new(&DESIGNATOR_NEEDLES);

/// Every accepted designator. ASCII letters are always lowercase here.
///
/// The micro sign has three spellings. U+00B5 MICRO SIGN is the canonical
/// one. Its simple uppercase mapping is U+039C GREEK CAPITAL LETTER MU,
/// whose lowercase is U+03BC GREEK SMALL LETTER MU. Accepting all three is
/// what makes `µs` case insensitive in the same sense as `ms`.
const DESIGNATOR_NEEDLES: TrieNeedles<Unit> = TrieNeedles::new(&[
    ("years", Unit::Year),
    ("year", Unit::Year),
    ("yrs", Unit::Year),
    ("yr", Unit::Year),
    ("y", Unit::Year),
    ("months", Unit::Month),
    ("month", Unit::Month),
    ("mo", Unit::Month),
    ("weeks", Unit::Week),
    ("week", Unit::Week),
    ("w", Unit::Week),
    ("days", Unit::Day),
    ("day", Unit::Day),
    ("d", Unit::Day),
    ("hours", Unit::Hour),
    ("hour", Unit::Hour),
    ("hrs", Unit::Hour),
    ("hr", Unit::Hour),
    ("h", Unit::Hour),
    ("minutes", Unit::Minute),
    ("minute", Unit::Minute),
    ("mins", Unit::Minute),
    ("min", Unit::Minute),
    ("m", Unit::Minute),
    ("seconds", Unit::Second),
    ("second", Unit::Second),
    ("secs", Unit::Second),
    ("sec", Unit::Second),
    ("s", Unit::Second),
    ("milliseconds", Unit::Millisecond),
    ("millisecond", Unit::Millisecond),
    ("msecs", Unit::Millisecond),
    ("msec", Unit::Millisecond),
    ("ms", Unit::Millisecond),
    ("microseconds", Unit::Microsecond),
    ("microsecond", Unit::Microsecond),
    ("\u{B5}secs", Unit::Microsecond),
    ("\u{B5}sec", Unit::Microsecond),
    ("\u{B5}s", Unit::Microsecond),
    ("\u{3BC}secs", Unit::Microsecond),
    ("\u{3BC}sec", Unit::Microsecond),
    ("\u{3BC}s", Unit::Microsecond),
    ("\u{39C}secs", Unit::Microsecond),
    ("\u{39C}sec", Unit::Microsecond),
    ("\u{39C}s", Unit::Microsecond),
    ("nanoseconds", Unit::Nanosecond),
    ("nanosecond", Unit::Nanosecond),
    ("nsecs", Unit::Nanosecond),
    ("nsec", Unit::Nanosecond),
    ("ns", Unit::Nanosecond),
]);
