use alloc::{boxed::Box, string::ToString, sync::Arc};

/// An error that can occur in this crate.
///
/// Errors fall into one of a few classes, reported by [`Error::kind`]:
///
/// * [`ErrorKind::InvalidArgument`] means the caller broke a documented
/// precondition. For example, asking to parse an empty string or a string
/// longer than 100 characters, or handing a floating point value to
/// [`ns`](crate::ns).
/// * [`ErrorKind::Unparseable`] means the input was of the right shape but
/// isn't a duration. [`parse`](crate::parse) never returns this kind. It
/// reports unparseable input as `Ok(None)` instead. Only the strict entry
/// points, like [`parse_strict`](crate::parse_strict), report it as an
/// error.
/// * [`ErrorKind::Write`] means a printer's output sink failed. Printing to
/// a `String` never does this.
///
/// The `Display` impl of an error includes its full chain of context. For
/// example:
///
/// ```
/// let err = nanodur::parse_strict("12 idiots").unwrap_err();
/// assert!(err.is_unparseable());
/// assert_eq!(
///     err.to_string(),
///     "failed to parse \"12 idiots\" as a duration: \
///      expected to find a unit designator (e.g., 'hours' or 'ms'), \
///      but found input beginning with \"idiots\" instead",
/// );
/// ```
///
/// Errors are cheap to clone.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    message: Box<str>,
    /// The error that caused this one, if any.
    ///
    /// When set, `kind` is always the same as the cause's kind.
    cause: Option<Error>,
}

/// The class of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A precondition on an argument was violated.
    InvalidArgument,
    /// The input does not describe a duration.
    Unparseable,
    /// Writing formatted output to a sink failed.
    Write,
}

impl Error {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    /// Returns true if this error is a contract violation by the caller.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Returns true if this error reports input that isn't a duration.
    pub fn is_unparseable(&self) -> bool {
        self.kind() == ErrorKind::Unparseable
    }

    /// Creates a new error of the given kind from the given message.
    pub(crate) fn new(kind: ErrorKind, message: core::fmt::Arguments<'_>) -> Error {
        let message = message.to_string().into_boxed_str();
        Error { inner: Arc::new(ErrorInner { kind, message, cause: None }) }
    }

    /// Creates a new error for a violated precondition.
    pub(crate) fn invalid_argument(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::InvalidArgument, message)
    }

    /// Creates a new error for a failed write to an output sink.
    pub(crate) fn write(message: core::fmt::Arguments<'_>) -> Error {
        Error::new(ErrorKind::Write, message)
    }

    /// Wraps this error in the given `consequent`, so that this error
    /// becomes its cause. The consequent takes on this error's kind.
    ///
    /// # Panics
    ///
    /// When `consequent` already has a cause.
    fn caused(self, consequent: Error) -> Error {
        let mut err = consequent;
        let inner = Arc::get_mut(&mut err.inner)
            .expect("a freshly created context error is not shared");
        assert!(inner.cause.is_none(), "cause of context error must be unset");
        inner.kind = self.kind();
        inner.cause = Some(self);
        err
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut err = self;
        loop {
            f.write_str(&err.inner.message)?;
            err = match err.inner.cause {
                None => break,
                Some(ref cause) => cause,
            };
            f.write_str(": ")?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("message", &self.inner.message)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

/// Creates a new ad hoc error describing unparseable input.
///
/// Use [`Error::invalid_argument`] for contract violations instead.
macro_rules! err {
    ($($tt:tt)*) => {{
        crate::error::Error::new(
            crate::error::ErrorKind::Unparseable,
            format_args!($($tt)*),
        )
    }}
}

pub(crate) use err;

/// A trait for adding context to an error.
///
/// The context is a new error, displayed before the original one.
pub(crate) trait ErrorContext {
    fn context(self, consequent: Error) -> Self;

    fn with_context<F: FnOnce() -> Error>(self, consequent: F) -> Self;
}

impl ErrorContext for Error {
    fn context(self, consequent: Error) -> Error {
        self.caused(consequent)
    }

    fn with_context<F: FnOnce() -> Error>(self, consequent: F) -> Error {
        self.caused(consequent())
    }
}

impl<T> ErrorContext for Result<T, Error> {
    fn context(self, consequent: Error) -> Result<T, Error> {
        self.map_err(|err| err.context(consequent))
    }

    fn with_context<F: FnOnce() -> Error>(
        self,
        consequent: F,
    ) -> Result<T, Error> {
        self.map_err(|err| err.with_context(consequent))
    }
}
