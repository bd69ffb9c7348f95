/*!
Helpers for quoting untrusted input in error messages.
*/

/// Provides a convenient `Debug` implementation for a `u8` slice.
///
/// Valid UTF-8 is printed with the usual `str` escaping, and any byte that
/// isn't part of a valid UTF-8 sequence is printed as `\xNN`. Parser errors
/// quote sub-slices of their input with this, which means they never need
/// to care whether a slice boundary falls on a character boundary.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        f.write_char('"')?;
        let mut bytes = self.0;
        while !bytes.is_empty() {
            let (valid, invalid_len) = match core::str::from_utf8(bytes) {
                Ok(valid) => (valid, 0),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    let invalid_len = err.error_len().unwrap_or(rest.len());
                    // OK because `valid_up_to` is a UTF-8 boundary.
                    (core::str::from_utf8(valid).unwrap_or(""), invalid_len)
                }
            };
            for ch in valid.chars() {
                // Single quotes don't need escaping inside a double quoted
                // string.
                if ch == '\'' {
                    f.write_char(ch)?;
                } else {
                    write!(f, "{}", ch.escape_debug())?;
                }
            }
            let rest = &bytes[valid.len()..];
            for &byte in &rest[..invalid_len] {
                write!(f, r"\x{byte:02X}")?;
            }
            bytes = &rest[invalid_len..];
        }
        f.write_char('"')?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn valid_utf8() {
        assert_eq!(format!("{:?}", Bytes(b"12 idiots")), r#""12 idiots""#);
        assert_eq!(format!("{:?}", Bytes("☃µ".as_bytes())), r#""☃µ""#);
        assert_eq!(format!("{:?}", Bytes(b"it's")), r#""it's""#);
        assert_eq!(format!("{:?}", Bytes(b"a\"b")), r#""a\"b""#);
    }

    #[test]
    fn invalid_utf8() {
        assert_eq!(format!("{:?}", Bytes(b"\xFFs")), r#""\xFFs""#);
        // A micro sign cut in half.
        assert_eq!(format!("{:?}", Bytes(b"5\xC2")), r#""5\xC2""#);
        assert_eq!(format!("{:?}", Bytes(b"")), r#""""#);
    }
}
