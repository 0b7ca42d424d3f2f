//! Percent-decoding utilities.

pub mod table;

pub use table::Table;

use alloc::{borrow::Cow, string::String, vec::Vec};
use core::{iter::FusedIterator, str};
use ref_cast::{ref_cast_custom, RefCastCustom};

/// Percent-encoded string slices.
///
/// Every `'%'` in an `EStr` slice is followed by two hexadecimal digits,
/// so decoding it never fails. Other characters are left as they are.
///
/// # Examples
///
/// Parse key-value pairs from a form-encoded query into a list:
///
/// ```
/// use dsn_parse::pct_enc::EStr;
///
/// let query = EStr::new("name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9%21").unwrap();
/// let pairs: Vec<_> = query
///     .split('&')
///     .map(|s| s.split_once('=').unwrap_or((s, EStr::EMPTY)))
///     .map(|(k, v)| (k.decode().to_string().unwrap(), v.decode().to_string().unwrap()))
///     .collect();
/// assert_eq!(pairs[0], ("name".into(), "张三".into()));
/// assert_eq!(pairs[1], ("speech".into(), "¡Olé!".into()));
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice, returning `None` if
    /// any `'%'` is not followed by two hexadecimal digits.
    #[must_use]
    pub const fn new(s: &str) -> Option<&Self> {
        if validate(s.as_bytes()) {
            Some(Self::new_validated(s))
        } else {
            None
        }
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator used to decode the `EStr` slice.
    ///
    /// Always **split before decoding**, as otherwise the data may be
    /// mistaken for delimiters.
    ///
    /// Note that the iterator will **not** decode `U+002B` (+) as `0x20` (space).
    /// Use [`decode_form`](Self::decode_form) for that.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsn_parse::pct_enc::EStr;
    ///
    /// let dec = EStr::new("%C2%A1Hola%21+").unwrap().decode();
    /// assert_eq!(*dec.clone().to_bytes(), [0xc2, 0xa1, 0x48, 0x6f, 0x6c, 0x61, 0x21, 0x2b]);
    /// assert_eq!(dec.to_string().unwrap(), "¡Hola!+");
    /// ```
    pub fn decode(&self) -> Decode<'_> {
        Decode::new(&self.inner, false)
    }

    /// Returns an iterator used to decode the `EStr` slice as
    /// `application/x-www-form-urlencoded` data, where `'+'` stands for a space.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsn_parse::pct_enc::EStr;
    ///
    /// let dec = EStr::new("a+b%2Bc").unwrap().decode_form();
    /// assert_eq!(dec.to_string().unwrap(), "a b+c");
    /// ```
    pub fn decode_form(&self) -> Decode<'_> {
        Decode::new(&self.inner, true)
    }

    /// Returns an iterator over subslices of the `EStr` slice separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is `'%'` or a hexadecimal digit, since
    /// splitting on it could break up a percent-encoded octet.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsn_parse::pct_enc::EStr;
    ///
    /// assert!(EStr::new("a&b&c").unwrap().split('&').eq(["a", "b", "c"]));
    /// assert!(EStr::new("&").unwrap().split('&').eq(["", ""]));
    /// assert!(EStr::EMPTY.split('&').eq([""]));
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        assert_splittable(delim);
        Split {
            inner: self.inner.split(delim),
        }
    }

    /// Splits the `EStr` slice on the first occurrence of the given delimiter and
    /// returns prefix before delimiter and suffix after delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is `'%'` or a hexadecimal digit.
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert_splittable(delim);
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }
}

fn assert_splittable(delim: char) {
    assert!(
        !(delim == '%' || delim.is_ascii_hexdigit()),
        "splitting with '%' or a hexadecimal digit"
    );
}

const fn validate(s: &[u8]) -> bool {
    let mut i = 0;
    while i < s.len() {
        if s[i] == b'%' {
            if i + 2 >= s.len() {
                return false;
            }
            if !(table::HEXDIG.allows(s[i + 1]) && table::HEXDIG.allows(s[i + 2])) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl Eq for EStr {}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// An iterator used to decode an [`EStr`] slice.
///
/// This struct is created by [`EStr::decode`] and [`EStr::decode_form`].
/// Normally you'll use the methods below instead of iterating over a
/// `Decode` manually.
///
/// See the [`DecodedChunk`] type for documentation of the items yielded by this iterator.
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Decode<'a> {
    source: &'a str,
    plus_as_space: bool,
}

/// An item returned by the [`Decode`] iterator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedChunk<'a> {
    /// An unencoded subslice.
    Unencoded(&'a str),
    /// A decoded byte (for example, `"%20"` or, in form decoding, `"+"` decoded as `0x20`).
    Decoded(u8),
}

impl<'a> Decode<'a> {
    fn new(source: &'a str, plus_as_space: bool) -> Self {
        Self {
            source,
            plus_as_space,
        }
    }

    fn is_special(&self, x: u8) -> bool {
        x == b'%' || (self.plus_as_space && x == b'+')
    }

    fn next_if_unencoded(&mut self) -> Option<&'a str> {
        let i = self
            .source
            .bytes()
            .position(|x| self.is_special(x))
            .unwrap_or(self.source.len());

        if i == 0 {
            None
        } else {
            let s;
            (s, self.source) = self.source.split_at(i);
            Some(s)
        }
    }

    fn decoded_len(&self) -> usize {
        self.source.len() - self.source.bytes().filter(|&x| x == b'%').count() * 2
    }

    /// Decodes the slice to bytes.
    ///
    /// This method allocates only when the slice contains anything to decode.
    #[must_use]
    pub fn to_bytes(mut self) -> Cow<'a, [u8]> {
        if self.source.is_empty() {
            return Cow::Borrowed(&[]);
        }

        let mut buf = match self.next_if_unencoded() {
            Some(s) if self.source.is_empty() => return Cow::Borrowed(s.as_bytes()),
            Some(s) => {
                let mut buf = Vec::with_capacity(s.len() + self.decoded_len());
                buf.extend_from_slice(s.as_bytes());
                buf
            }
            None => Vec::with_capacity(self.decoded_len()),
        };

        for chunk in self {
            match chunk {
                DecodedChunk::Unencoded(s) => buf.extend_from_slice(s.as_bytes()),
                DecodedChunk::Decoded(x) => buf.push(x),
            }
        }
        Cow::Owned(buf)
    }

    /// Attempts to decode the slice to a string.
    ///
    /// This method allocates only when the slice contains anything to decode.
    ///
    /// # Errors
    ///
    /// Returns `Err` containing the decoded bytes if they are not valid UTF-8.
    pub fn to_string(self) -> Result<Cow<'a, str>, Vec<u8>> {
        match self.to_bytes() {
            // Borrowed bytes are always a subslice of the source split at ASCII bytes.
            Cow::Borrowed(bytes) => str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|_| bytes.to_vec()),
            Cow::Owned(buf) => String::from_utf8(buf)
                .map(Cow::Owned)
                .map_err(|e| e.into_bytes()),
        }
    }

    /// Decodes the slice to a string, replacing invalid UTF-8 sequences
    /// with `U+FFFD`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsn_parse::pct_enc::EStr;
    ///
    /// let dec = EStr::new("%FFok").unwrap().decode();
    /// assert_eq!(dec.to_string_lossy(), "\u{FFFD}ok");
    /// ```
    #[must_use]
    pub fn to_string_lossy(self) -> Cow<'a, str> {
        self.to_string()
            .unwrap_or_else(|bytes| Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.source.is_empty() {
            None
        } else if let Some(s) = self.next_if_unencoded() {
            Some(DecodedChunk::Unencoded(s))
        } else if self.source.as_bytes()[0] == b'+' {
            self.source = &self.source[1..];
            Some(DecodedChunk::Decoded(b' '))
        } else {
            let s;
            (s, self.source) = self.source.split_at(3);
            let x = decode_octet(s.as_bytes()[1], s.as_bytes()[2]);
            Some(DecodedChunk::Decoded(x))
        }
    }
}

impl FusedIterator for Decode<'_> {}

/// An iterator over subslices of an [`EStr`] slice separated by a delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl FusedIterator for Split<'_> {}
