use crate::{
    error::Error,
    fmt::{
        friendly::{DurationParser, DurationPrinter, Style},
        StdFmtWrite,
    },
    unit::NANOS_PER_SECOND,
};

/// A signed duration with nanosecond precision.
///
/// This is a thin wrapper around an `i128` count of nanoseconds. It exists
/// so that a duration can be printed, parsed and (with the `serde` feature)
/// serialized without choosing between the top-level functions every time.
///
/// # Display and parsing
///
/// The `Display` impl uses [`Style::Compact`]. The alternate flag, `{:#}`,
/// selects [`Style::Verbose`]. Printing rounds, so parsing a printed
/// duration doesn't always give back the same duration.
///
/// The `FromStr` impl reports input that isn't a duration as an error. See
/// [`parse_strict`](crate::parse_strict).
///
/// ```
/// use nanodur::Duration;
///
/// let dur: Duration = "1.5 hours".parse()?;
/// assert_eq!(dur.as_nanos(), 5_400_000_000_000);
/// assert_eq!(dur.to_string(), "2h");
/// assert_eq!(format!("{dur:#}"), "2 hours");
///
/// assert!("12 idiots".parse::<Duration>().is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Conversions
///
/// A `std::time::Duration` always converts into a `Duration`. The other
/// direction fails for negative durations and for durations longer than
/// `u64::MAX` seconds.
///
/// ```
/// use nanodur::Duration;
///
/// let dur = Duration::from(std::time::Duration::from_millis(1_500));
/// assert_eq!(dur.as_nanos(), 1_500_000_000);
///
/// let unsigned = std::time::Duration::try_from(Duration::from_nanos(90))?;
/// assert_eq!(unsigned, std::time::Duration::from_nanos(90));
/// assert!(std::time::Duration::try_from(Duration::from_nanos(-90)).is_err());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Serde
///
/// With the `serde` feature, a `Duration` deserializes from a duration
/// string or from an integer number of nanoseconds. It serializes to its
/// compact string when that string parses back to the exact same duration,
/// and to its number of nanoseconds, as a string, otherwise. So
/// serialization never loses precision.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Duration {
    nanos: i128,
}

impl Duration {
    /// A duration of zero.
    pub const ZERO: Duration = Duration { nanos: 0 };

    /// The longest possible duration.
    pub const MAX: Duration = Duration { nanos: i128::MAX };

    /// The most negative possible duration.
    pub const MIN: Duration = Duration { nanos: i128::MIN };

    /// Creates a duration from a signed number of nanoseconds.
    #[inline]
    pub const fn from_nanos(nanos: i128) -> Duration {
        Duration { nanos }
    }

    /// Returns this duration as a signed number of nanoseconds.
    #[inline]
    pub const fn as_nanos(self) -> i128 {
        self.nanos
    }

    /// Returns true when this duration is less than zero.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    /// Returns true when this duration is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.nanos == 0
    }
}

impl core::fmt::Debug for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}ns", self.nanos)
    }
}

impl core::fmt::Display for Duration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let style = if f.alternate() { Style::Verbose } else { Style::Compact };
        DurationPrinter::new()
            .style(style)
            .print_duration(self.nanos, StdFmtWrite(f))
            .map_err(|_| core::fmt::Error)
    }
}

impl core::str::FromStr for Duration {
    type Err = Error;

    fn from_str(string: &str) -> Result<Duration, Error> {
        DurationParser::new().parse_strict(string).map(Duration::from_nanos)
    }
}

impl From<i128> for Duration {
    #[inline]
    fn from(nanos: i128) -> Duration {
        Duration::from_nanos(nanos)
    }
}

impl From<Duration> for i128 {
    #[inline]
    fn from(dur: Duration) -> i128 {
        dur.as_nanos()
    }
}

impl From<core::time::Duration> for Duration {
    fn from(dur: core::time::Duration) -> Duration {
        // Can't overflow: `u64::MAX` seconds is about 1.8 * 10^28
        // nanoseconds.
        let nanos = i128::from(dur.as_secs()) * NANOS_PER_SECOND
            + i128::from(dur.subsec_nanos());
        Duration::from_nanos(nanos)
    }
}

impl TryFrom<Duration> for core::time::Duration {
    type Error = Error;

    fn try_from(dur: Duration) -> Result<core::time::Duration, Error> {
        if dur.is_negative() {
            return Err(Error::invalid_argument(format_args!(
                "cannot convert negative duration `{dur:?}` to an \
                 unsigned `std::time::Duration`",
            )));
        }
        let secs = u64::try_from(dur.nanos / NANOS_PER_SECOND).map_err(|_| {
            Error::invalid_argument(format_args!(
                "duration `{dur:?}` is too big to convert to a \
                 `std::time::Duration`",
            ))
        })?;
        // OK because the remainder of a non-negative value is in
        // `0..NANOS_PER_SECOND`.
        let subsec = (dur.nanos % NANOS_PER_SECOND) as u32;
        Ok(core::time::Duration::new(secs, subsec))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Duration {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let compact = DurationPrinter::new().duration_to_string(self.nanos);
        match DurationParser::new().parse(&compact) {
            Ok(Some(nanos)) if nanos == self.nanos => {
                serializer.serialize_str(&compact)
            }
            _ => serializer.collect_str(&self.nanos),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Duration {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        use serde::de;

        struct DurationVisitor;

        impl<'de> de::Visitor<'de> for DurationVisitor {
            type Value = Duration;

            fn expecting(
                &self,
                f: &mut core::fmt::Formatter,
            ) -> core::fmt::Result {
                f.write_str(
                    "a duration string like \"1.5h\" \
                     or an integer number of nanoseconds",
                )
            }

            fn visit_str<E: de::Error>(
                self,
                value: &str,
            ) -> Result<Duration, E> {
                match DurationParser::new().parse(value) {
                    Ok(Some(nanos)) => Ok(Duration::from_nanos(nanos)),
                    Ok(None) => Err(E::invalid_value(
                        de::Unexpected::Str(value),
                        &self,
                    )),
                    Err(err) => Err(E::custom(err)),
                }
            }

            #[inline]
            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Duration, E> {
                Ok(Duration::from_nanos(i128::from(value)))
            }

            #[inline]
            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Duration, E> {
                Ok(Duration::from_nanos(i128::from(value)))
            }

            #[inline]
            fn visit_i128<E: de::Error>(
                self,
                value: i128,
            ) -> Result<Duration, E> {
                Ok(Duration::from_nanos(value))
            }

            fn visit_u128<E: de::Error>(
                self,
                value: u128,
            ) -> Result<Duration, E> {
                i128::try_from(value).map(Duration::from_nanos).map_err(|_| {
                    E::custom(format_args!(
                        "{value} nanoseconds is too big for a duration"
                    ))
                })
            }
        }

        deserializer.deserialize_any(DurationVisitor)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Duration {
    fn arbitrary(g: &mut quickcheck::Gen) -> Duration {
        Duration::from_nanos(<i128 as quickcheck::Arbitrary>::arbitrary(g))
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        alloc::boxed::Box::new(
            quickcheck::Arbitrary::shrink(&self.nanos).map(Duration::from_nanos),
        )
    }
}
