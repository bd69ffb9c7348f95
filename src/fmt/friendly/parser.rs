use crate::{
    error::{err, Error, ErrorContext},
    fmt::Parsed,
    unit::Unit,
    util::escape,
};

/// The maximum length, in characters, of a duration string.
///
/// Longer input is rejected before any parsing happens.
const MAX_INPUT_CHARS: usize = 100;

/// The capacity of the decimal digit buffer used when scaling a parsed
/// number by its unit.
///
/// The number has at most `MAX_INPUT_CHARS` digits, and the longest unit
/// length (a year) has 17.
const PRODUCT_DIGITS: usize = MAX_INPUT_CHARS + 20;

/// A parser for durations like `1.5h` or `-53 milliseconds`.
///
/// The top-level [`parse`](crate::parse) and
/// [`parse_strict`](crate::parse_strict) functions use a default parser.
/// Since a parser has no configuration yet, this type mostly exists so that
/// one can be stored in a `const` or `static`.
///
/// # Example
///
/// ```
/// use nanodur::fmt::friendly::DurationParser;
///
/// static PARSER: DurationParser = DurationParser::new();
///
/// assert_eq!(PARSER.parse("1.5h")?, Some(5_400_000_000_000));
/// assert_eq!(PARSER.parse("12 idiots")?, None);
/// assert_eq!(PARSER.parse_strict("-.5ms")?, -500_000);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DurationParser {
    _private: (),
}

impl DurationParser {
    /// Creates a new parser.
    pub const fn new() -> DurationParser {
        DurationParser { _private: () }
    }

    /// Parses a duration string into a signed number of nanoseconds.
    ///
    /// Input that isn't a duration is reported as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// When `input` is empty or longer than 100 characters. Such errors have
    /// kind [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument).
    pub fn parse(&self, input: &str) -> Result<Option<i128>, Error> {
        check_input(input)?;
        match self.parse_to_nanos(input.as_bytes()) {
            Ok(nanos) => Ok(Some(nanos)),
            Err(_err) => {
                trace!(
                    "{input:?} is not a duration: {_err}",
                    input = escape::Bytes(input.as_bytes()),
                );
                Ok(None)
            }
        }
    }

    /// Like [`DurationParser::parse`], but reports input that isn't a
    /// duration as an error of kind
    /// [`ErrorKind::Unparseable`](crate::ErrorKind::Unparseable).
    ///
    /// The error message says why parsing failed.
    ///
    /// # Example
    ///
    /// ```
    /// use nanodur::fmt::friendly::DurationParser;
    ///
    /// let err = DurationParser::new().parse_strict("10.h").unwrap_err();
    /// assert_eq!(
    ///     err.to_string(),
    ///     "failed to parse \"10.h\" as a duration: \
    ///      expected at least one digit after the decimal point, \
    ///      but found input beginning with \"h\" instead",
    /// );
    /// ```
    pub fn parse_strict(&self, input: &str) -> Result<i128, Error> {
        check_input(input)?;
        self.parse_to_nanos(input.as_bytes()).with_context(|| {
            err!(
                "failed to parse {input:?} as a duration",
                input = escape::Bytes(input.as_bytes()),
            )
        })
    }

    #[inline(always)]
    fn parse_to_nanos(&self, input: &[u8]) -> Result<i128, Error> {
        let Parsed { value: negative, input } = self.parse_sign(input);
        let Parsed { value: number, input } = self.parse_number(input)?;
        let input = self.parse_spaces(input).input;
        let parsed = self.parse_unit_designator(input)?;
        let unit = parsed.into_full()?;
        number.to_nanos(negative, unit)
    }

    /// Parses an optional `-`. Returns true when one was found.
    #[inline(always)]
    fn parse_sign<'i>(&self, input: &'i [u8]) -> Parsed<'i, bool> {
        match input.split_first() {
            Some((&b'-', rest)) => Parsed { value: true, input: rest },
            _ => Parsed { value: false, input },
        }
    }

    /// Parses an unsigned decimal number: digits, or optional digits
    /// followed by `.` and at least one more digit.
    #[inline(always)]
    fn parse_number<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Number<'i>>, Error> {
        let (integer, input) = split_digits(input);
        let Some((&b'.', input)) = input.split_first() else {
            if integer.is_empty() {
                return Err(err!(
                    "expected a number (e.g., '5' or '.5'), \
                     but found {found} instead",
                    found = Found(input),
                ));
            }
            let number = Number { integer, fraction: b"" };
            return Ok(Parsed { value: number, input });
        };
        let (fraction, input) = split_digits(input);
        if fraction.is_empty() {
            return Err(err!(
                "expected at least one digit after the decimal point, \
                 but found {found} instead",
                found = Found(input),
            ));
        }
        Ok(Parsed { value: Number { integer, fraction }, input })
    }

    /// Skips any number of U+0020 SPACE characters. No other whitespace is
    /// permitted between a number and its unit.
    #[inline(always)]
    fn parse_spaces<'i>(&self, input: &'i [u8]) -> Parsed<'i, ()> {
        let len = input.iter().take_while(|&&byte| byte == b' ').count();
        Parsed { value: (), input: &input[len..] }
    }

    /// Parses a unit designator, e.g., `hours` or `µs`.
    ///
    /// At the end of input, this returns nanoseconds. Otherwise the longest
    /// designator at the start of `input` is consumed, and an error is
    /// returned if there isn't one.
    #[inline(always)]
    fn parse_unit_designator<'i>(
        &self,
        input: &'i [u8],
    ) -> Result<Parsed<'i, Unit>, Error> {
        if input.is_empty() {
            return Ok(Parsed { value: Unit::Nanosecond, input });
        }
        let Some((unit, len)) = Unit::find_designator(input) else {
            return Err(err!(
                "expected to find a unit designator (e.g., 'hours' or 'ms'), \
                 but found {found} instead",
                found = Found(input),
            ));
        };
        Ok(Parsed { value: unit, input: &input[len..] })
    }
}

/// The digits of a parsed number, without its sign or decimal point.
#[derive(Clone, Copy, Debug)]
struct Number<'i> {
    integer: &'i [u8],
    /// Empty when the number had no decimal point.
    fraction: &'i [u8],
}

impl<'i> Number<'i> {
    /// Returns `self` units, in nanoseconds, truncated toward zero.
    ///
    /// The digits are multiplied by the unit length in decimal, so that the
    /// only possible overflow is in the final result.
    fn to_nanos(&self, negative: bool, unit: Unit) -> Result<i128, Error> {
        // Little endian decimal digits of `integer ++ fraction` times the
        // unit length. This is the result scaled up by
        // `10^fraction.len()`.
        let mut product = [0u8; PRODUCT_DIGITS];
        let unit_len = unit.nanoseconds_unsigned();
        let mut len = 0;
        let mut carry: u128 = 0;
        for &byte in self.integer.iter().chain(self.fraction).rev() {
            let sum = u128::from(byte - b'0') * unit_len + carry;
            product[len] = (sum % 10) as u8;
            carry = sum / 10;
            len += 1;
        }
        while carry > 0 {
            product[len] = (carry % 10) as u8;
            carry /= 10;
            len += 1;
        }

        // Dropping the lowest digits divides by `10^fraction.len()` and
        // truncates.
        let mut magnitude: u128 = 0;
        for &digit in product[self.fraction.len()..len].iter().rev() {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u128::from(digit)))
                .ok_or_else(|| self.overflow(negative, unit))?;
        }
        let nanos = if negative {
            0i128.checked_sub_unsigned(magnitude)
        } else {
            i128::try_from(magnitude).ok()
        };
        nanos.ok_or_else(|| self.overflow(negative, unit))
    }

    fn overflow(&self, negative: bool, unit: Unit) -> Error {
        err!(
            "{sign}{number} {unit} is too big to be represented as \
             a 128-bit signed integer of nanoseconds",
            sign = if negative { "-" } else { "" },
            number = self,
            unit = unit.plural(),
        )
    }
}

impl<'i> core::fmt::Display for Number<'i> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        for &byte in self.integer {
            f.write_char(char::from(byte))?;
        }
        if !self.fraction.is_empty() {
            f.write_char('.')?;
            for &byte in self.fraction {
                f.write_char(char::from(byte))?;
            }
        }
        Ok(())
    }
}

/// Describes the input found where something else was expected.
struct Found<'a>(&'a [u8]);

impl<'a> core::fmt::Display for Found<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("end of input");
        }
        write!(
            f,
            "input beginning with {:?}",
            escape::Bytes(&self.0[..self.0.len().min(15)]),
        )
    }
}

/// Checks the preconditions every duration string must satisfy.
fn check_input(input: &str) -> Result<(), Error> {
    if input.is_empty() {
        return Err(Error::invalid_argument(format_args!(
            "an empty string is not a valid duration"
        )));
    }
    let chars = input.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(Error::invalid_argument(format_args!(
            "duration strings must be at most {MAX_INPUT_CHARS} characters \
             long, but found one with {chars} characters"
        )));
    }
    Ok(())
}

/// Splits `input` after its longest prefix of ASCII digits.
fn split_digits(input: &[u8]) -> (&[u8], &[u8]) {
    let len = input.iter().take_while(|byte| byte.is_ascii_digit()).count();
    input.split_at(len)
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String};

    use crate::unit::{
        NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI,
        NANOS_PER_MINUTE, NANOS_PER_MONTH, NANOS_PER_SECOND, NANOS_PER_WEEK,
        NANOS_PER_YEAR,
    };

    use super::*;

    fn p(input: &str) -> i128 {
        DurationParser::new().parse_strict(input).unwrap()
    }

    fn perr(input: &str) -> Error {
        DurationParser::new().parse_strict(input).unwrap_err()
    }

    #[test]
    fn parse_basic() {
        assert_eq!(p("100"), 100);
        assert_eq!(p("1m"), NANOS_PER_MINUTE);
        assert_eq!(p("1h"), NANOS_PER_HOUR);
        assert_eq!(p("2d"), 2 * NANOS_PER_DAY);
        assert_eq!(p("3w"), 3 * NANOS_PER_WEEK);
        assert_eq!(p("1s"), NANOS_PER_SECOND);
        assert_eq!(p("100ms"), 100 * NANOS_PER_MILLI);
        assert_eq!(p("1mo"), NANOS_PER_MONTH);
        assert_eq!(p("1y"), NANOS_PER_YEAR);
        assert_eq!(p("0"), 0);
        assert_eq!(p("5µs"), 5 * NANOS_PER_MICRO);

        insta::assert_snapshot!(p("1mo"), @"2629800000000000");
        insta::assert_snapshot!(p("1y"), @"31557600000000000");
    }

    #[test]
    fn parse_long_designators() {
        assert_eq!(p("53 milliseconds"), 53 * NANOS_PER_MILLI);
        assert_eq!(p("17 msecs"), 17 * NANOS_PER_MILLI);
        assert_eq!(p("1 sec"), NANOS_PER_SECOND);
        assert_eq!(p("1 min"), NANOS_PER_MINUTE);
        assert_eq!(p("1 hr"), NANOS_PER_HOUR);
        assert_eq!(p("2 days"), 2 * NANOS_PER_DAY);
        assert_eq!(p("1 week"), NANOS_PER_WEEK);
        assert_eq!(p("1 month"), NANOS_PER_MONTH);
        assert_eq!(p("1 year"), NANOS_PER_YEAR);
        assert_eq!(p("7 nanoseconds"), 7);
        assert_eq!(p("7 nsec"), 7);
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(p("53 YeArS"), 53 * NANOS_PER_YEAR);
        assert_eq!(p("53 WeEkS"), 53 * NANOS_PER_WEEK);
        assert_eq!(p("53 DaYS"), 53 * NANOS_PER_DAY);
        assert_eq!(p("53 HoUrs"), 53 * NANOS_PER_HOUR);
        assert_eq!(p("53 MiLliSeCondS"), 53 * NANOS_PER_MILLI);
        assert_eq!(p("53 MicRoSeConDs"), 53 * NANOS_PER_MICRO);
        assert_eq!(p("53 NaNoSeConDs"), 53);
        assert_eq!(p("53 ΜS"), 53 * NANOS_PER_MICRO);
        assert_eq!(p("53 μsecs"), 53 * NANOS_PER_MICRO);
    }

    #[test]
    fn parse_fractional() {
        assert_eq!(p("1.5h"), NANOS_PER_HOUR + 30 * NANOS_PER_MINUTE);
        assert_eq!(p("1.5 hours"), 5_400_000_000_000);
        assert_eq!(p(".5ms"), NANOS_PER_MILLI / 2);
        assert_eq!(p("0.25d"), 6 * NANOS_PER_HOUR);
        assert_eq!(p("1.5mo"), 3_944_700_000_000_000);
        assert_eq!(p("1.000"), 1);

        // Anything below a nanosecond is truncated toward zero.
        assert_eq!(p("1.5ns"), 1);
        assert_eq!(p("1.9"), 1);
        assert_eq!(p("0.0000000019s"), 1);
        assert_eq!(p("1.0000000001s"), NANOS_PER_SECOND);
        assert_eq!(p("0.5"), 0);
    }

    #[test]
    fn parse_negative() {
        assert_eq!(p("-100ms"), -100 * NANOS_PER_MILLI);
        assert_eq!(p("-1.5h"), -NANOS_PER_HOUR - 30 * NANOS_PER_MINUTE);
        assert_eq!(p("-10.5h"), -37_800_000 * NANOS_PER_MILLI);
        assert_eq!(p("-.5h"), -1_800_000 * NANOS_PER_MILLI);
        assert_eq!(p("-.5ms"), -500_000);
        assert_eq!(p("-100 milliseconds"), -100 * NANOS_PER_MILLI);
        assert_eq!(p("-1.5 hours"), -5_400_000 * NANOS_PER_MILLI);
        assert_eq!(p("-.5 hr"), -1_800_000 * NANOS_PER_MILLI);
        assert_eq!(p("-0.0000000019s"), -1);

        assert_eq!(p("-0"), 0);
        assert_eq!(p("-0.5"), 0);
        assert_eq!(p("-0 years"), 0);
    }

    #[test]
    fn parse_spaces() {
        assert_eq!(p("1   s"), NANOS_PER_SECOND);
        assert_eq!(p("1 s"), NANOS_PER_SECOND);
        // Trailing spaces with no designator are nanoseconds.
        assert_eq!(p("1 "), 1);
        assert_eq!(p("1   "), 1);
    }

    #[test]
    fn parse_longest_designator() {
        assert_eq!(p("1mo"), NANOS_PER_MONTH);
        assert_eq!(p("1ms"), NANOS_PER_MILLI);
        assert_eq!(p("1m"), NANOS_PER_MINUTE);
        assert_eq!(p("1mins"), NANOS_PER_MINUTE);
        assert_eq!(p("1msec"), NANOS_PER_MILLI);
    }

    #[test]
    fn parse_boundaries() {
        assert_eq!(p("1000 years"), 31_557_600_000_000_000_000);
        assert_eq!(p("170141183460469231731687303715884105727"), i128::MAX);
        assert_eq!(p("-170141183460469231731687303715884105728"), i128::MIN);
        assert_eq!(p("-170141183460469231731687303715884105727ns"), -i128::MAX);

        // The intermediate product of a long fraction is far beyond i128.
        let tiny = format!("0.{}1y", "0".repeat(96));
        assert_eq!(tiny.chars().count(), MAX_INPUT_CHARS);
        assert_eq!(p(&tiny), 0);

        let padded = format!("{}1", "0".repeat(99));
        assert_eq!(p(&padded), 1);

        let spaced = format!("1{}s", " ".repeat(98));
        assert_eq!(p(&spaced), NANOS_PER_SECOND);
    }

    #[test]
    fn parse_not_a_duration() {
        let parser = DurationParser::new();
        for input in [
            "☃",
            "10-.5",
            "foo",
            "12 idiots",
            "10.",
            ".",
            "-",
            "--1",
            "+1",
            " 1",
            "1h ",
            "1\ts",
            "1 hour and a half",
            "1.5.5h",
            "5 mos",
            "1us",
            "1h30m",
            "١",
        ] {
            assert_eq!(parser.parse(input).unwrap(), None, "{input:?}");
        }
    }

    #[test]
    fn parse_not_a_duration_logged() {
        #[cfg(feature = "logging")]
        crate::logging::Logger::init();

        let parser = DurationParser::new();
        assert_eq!(parser.parse("1 zzz").unwrap(), None);
    }

    #[test]
    fn err_invalid_argument() {
        let parser = DurationParser::new();

        let err = parser.parse("").unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(err, @"an empty string is not a valid duration");

        let long: String = "x".repeat(101);
        let err = parser.parse(&long).unwrap_err();
        assert!(err.is_invalid_argument());
        insta::assert_snapshot!(
            err,
            @"duration strings must be at most 100 characters long, but found one with 101 characters",
        );

        let err = parser.parse_strict(&long).unwrap_err();
        assert!(err.is_invalid_argument());

        // The limit is in characters, not bytes.
        let micros: String = "µ".repeat(100);
        assert_eq!(parser.parse(&micros).unwrap(), None);
        assert_eq!(parser.parse(&"x".repeat(100)).unwrap(), None);
    }

    #[test]
    fn err_number() {
        insta::assert_snapshot!(
            perr("☃"),
            @r###"failed to parse "☃" as a duration: expected a number (e.g., '5' or '.5'), but found input beginning with "☃" instead"###,
        );
        insta::assert_snapshot!(
            perr("-"),
            @r###"failed to parse "-" as a duration: expected a number (e.g., '5' or '.5'), but found end of input instead"###,
        );
        insta::assert_snapshot!(
            perr("+1s"),
            @r###"failed to parse "+1s" as a duration: expected a number (e.g., '5' or '.5'), but found input beginning with "+1s" instead"###,
        );
        insta::assert_snapshot!(
            perr("10."),
            @r###"failed to parse "10." as a duration: expected at least one digit after the decimal point, but found end of input instead"###,
        );
        insta::assert_snapshot!(
            perr("-.h"),
            @r###"failed to parse "-.h" as a duration: expected at least one digit after the decimal point, but found input beginning with "h" instead"###,
        );
    }

    #[test]
    fn err_designator() {
        let err = perr("12 idiots");
        assert!(err.is_unparseable());
        insta::assert_snapshot!(
            err,
            @r###"failed to parse "12 idiots" as a duration: expected to find a unit designator (e.g., 'hours' or 'ms'), but found input beginning with "idiots" instead"###,
        );
        insta::assert_snapshot!(
            perr("10-.5"),
            @r###"failed to parse "10-.5" as a duration: expected to find a unit designator (e.g., 'hours' or 'ms'), but found input beginning with "-.5" instead"###,
        );
        insta::assert_snapshot!(
            perr("1 this is a very long designator"),
            @r###"failed to parse "1 this is a very long designator" as a duration: expected to find a unit designator (e.g., 'hours' or 'ms'), but found input beginning with "this is a very " instead"###,
        );
    }

    #[test]
    fn err_unparsed_input() {
        insta::assert_snapshot!(
            perr("5 mos"),
            @r###"failed to parse "5 mos" as a duration: parsed value 'month', but unparsed input "s" remains (expected no unparsed input)"###,
        );
        insta::assert_snapshot!(
            perr("1h "),
            @r###"failed to parse "1h " as a duration: parsed value 'hour', but unparsed input " " remains (expected no unparsed input)"###,
        );
        insta::assert_snapshot!(
            perr("1h30m"),
            @r###"failed to parse "1h30m" as a duration: parsed value 'hour', but unparsed input "30m" remains (expected no unparsed input)"###,
        );
    }

    #[test]
    fn err_overflow() {
        insta::assert_snapshot!(
            perr("170141183460469231731687303715884105728"),
            @"failed to parse \"170141183460469231731687303715884105728\" as a duration: 170141183460469231731687303715884105728 nanoseconds is too big to be represented as a 128-bit signed integer of nanoseconds",
        );
        insta::assert_snapshot!(
            perr("-1e99"),
            @r###"failed to parse "-1e99" as a duration: expected to find a unit designator (e.g., 'hours' or 'ms'), but found input beginning with "e99" instead"###,
        );
        insta::assert_snapshot!(
            perr("-6000000000000000000000.5 years"),
            @"failed to parse \"-6000000000000000000000.5 years\" as a duration: -6000000000000000000000.5 years is too big to be represented as a 128-bit signed integer of nanoseconds",
        );
        let err = perr(&"9".repeat(100));
        assert!(err.is_unparseable());
    }

    quickcheck::quickcheck! {
        fn prop_canonical_spellings(magnitude: u64, unit: Unit) -> bool {
            let parser = DurationParser::new();
            let expected = i128::from(magnitude) * unit.nanoseconds();
            let spellings =
                [unit.abbreviation(), unit.singular(), unit.plural()];
            spellings.iter().all(|spelling| {
                let compact = format!("{magnitude}{spelling}");
                let spaced = format!("{magnitude} {spelling}");
                let negative = format!("-{magnitude} {spelling}");
                parser.parse(&compact).unwrap() == Some(expected)
                    && parser.parse(&spaced).unwrap() == Some(expected)
                    && parser.parse(&negative).unwrap() == Some(-expected)
            })
        }

        fn prop_parse_never_panics(input: String) -> bool {
            let chars = input.chars().count();
            let result = DurationParser::new().parse(&input);
            match result {
                Ok(_) => (1..=MAX_INPUT_CHARS).contains(&chars),
                Err(err) => err.is_invalid_argument(),
            }
        }
    }
}
