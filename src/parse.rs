use crate::{
    internal::Meta,
    pct_enc::table,
    query::{self, QueryDecoder},
};
use alloc::{collections::BTreeMap, string::String};
use core::num::NonZeroUsize;

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ParseErrorKind {
    /// The input starts with `':'`, leaving the scheme empty.
    ///
    /// The error index is always zero.
    InvalidScheme,
    /// The input is not empty but has no `'/'` separating the path.
    ///
    /// The error index points to the end of input.
    MissingSlash,
    /// An address is opened with `'('` but no `')'` immediately precedes the path.
    ///
    /// The error index points to the opening parenthesis.
    UnterminatedAddress,
    /// A `')'` inside the address does not immediately precede the path,
    /// which usually means a value was not escaped.
    ///
    /// The error index points to the first such closing parenthesis.
    UnescapedValue,
}

/// An error occurred when parsing a DSN.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index in the input at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

#[cfg(feature = "impl-error")]
impl core::error::Error for ParseError {}

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

pub(crate) fn parse<D: QueryDecoder>(
    s: &str,
    decoder: D,
) -> Result<(Meta, BTreeMap<String, String>)> {
    let mut parser = Parser {
        bytes: s.as_bytes(),
        out: Meta::default(),
    };
    let body_start = parser.parse_scheme()?;
    parser.parse_body(body_start)?;

    let params = match parser.out.query_start {
        Some(i) => query::collapse(decoder.decode(&s[i.get()..])),
        None => BTreeMap::new(),
    };
    Ok((parser.out, params))
}

/// DSN parser.
///
/// All delimiters are ASCII, so every output index is on the boundary
/// of a UTF-8 code point.
struct Parser<'a> {
    bytes: &'a [u8],
    out: Meta,
}

fn find(bytes: &[u8], x: u8) -> Option<usize> {
    bytes.iter().position(|&b| b == x)
}

fn rfind(bytes: &[u8], x: u8) -> Option<usize> {
    bytes.iter().rposition(|&b| b == x)
}

impl Parser<'_> {
    /// Scans for `scheme "://"` and returns the index where the body starts.
    ///
    /// Anything that does not look like a scheme is left to the body.
    fn parse_scheme(&mut self) -> Result<usize> {
        let bytes = self.bytes;
        for (i, &x) in bytes.iter().enumerate() {
            if table::ALPHA.allows(x) {
                continue;
            }
            if x == b':' {
                if i == 0 {
                    err!(0, InvalidScheme);
                }
                if bytes[i + 1..].starts_with(b"//") {
                    self.out.scheme_end = i;
                    return Ok(i + 3);
                }
                return Ok(0);
            }
            if i == 0 || !table::SCHEME.allows(x) {
                return Ok(0);
            }
        }
        Ok(0)
    }

    // body = [authority] "/" path ["?" query]
    fn parse_body(&mut self, start: usize) -> Result<()> {
        let bytes = self.bytes;
        let Some(i) = find(&bytes[start..], b'/') else {
            if start == bytes.len() {
                return Ok(());
            }
            err!(bytes.len(), MissingSlash);
        };
        let slash = start + i;

        if slash > start {
            self.parse_authority(start, slash)?;
        }

        let path_end = match find(&bytes[slash + 1..], b'?') {
            Some(i) => {
                let query_start = slash + 1 + i + 1;
                self.out.query_start = NonZeroUsize::new(query_start);
                query_start - 1
            }
            None => bytes.len(),
        };
        self.out.path = (slash, path_end);
        Ok(())
    }

    // authority = [username [":" password] "@"] [protocol ["(" address ")"]]
    fn parse_authority(&mut self, start: usize, end: usize) -> Result<()> {
        let bytes = self.bytes;

        // The protocol and address never contain '@', so the last one ends the credentials.
        let proto_start = match rfind(&bytes[start..end], b'@') {
            Some(i) => {
                let at = start + i;
                match find(&bytes[start..at], b':') {
                    Some(i) => {
                        self.out.username = (start, start + i);
                        self.out.password = (start + i + 1, at);
                    }
                    None => self.out.username = (start, at),
                }
                at + 1
            }
            None => start,
        };

        let proto_end = match find(&bytes[proto_start..end], b'(') {
            Some(i) => {
                let open = proto_start + i;
                if bytes[end - 1] != b')' {
                    match find(&bytes[open + 1..end], b')') {
                        Some(i) => err!(open + 1 + i, UnescapedValue),
                        None => err!(open, UnterminatedAddress),
                    }
                }
                self.out.address = (open + 1, end - 1);
                open
            }
            None => end,
        };
        self.out.protocol = (proto_start, proto_end);
        Ok(())
    }
}
