use crate::{pct_enc::EStr, Dsn, ParseError, ParseErrorKind};
use borrow_or_share::Bos;
use core::fmt;

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::InvalidScheme => "missing protocol scheme at index ",
            ParseErrorKind::MissingSlash => {
                "missing the slash separating the database name at index "
            }
            ParseErrorKind::UnterminatedAddress => {
                "network address not terminated (missing closing brace) at index "
            }
            ParseErrorKind::UnescapedValue => "did you forget to escape a param value at index ",
        };
        write!(f, "{}{}", msg, self.index)
    }
}

impl<T: Bos<str>> fmt::Debug for Dsn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dsn")
            .field("scheme", &self.scheme())
            .field("username", &self.username())
            .field("password", &self.password())
            .field("protocol", &self.protocol())
            .field("address", &self.address())
            .field("path", &self.path())
            .field("params", self.params())
            .finish()
    }
}

impl<T: Bos<str>> fmt::Display for Dsn<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}

impl fmt::Debug for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for EStr {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), f)
    }
}
