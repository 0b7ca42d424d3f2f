//! Byte class tables used by the DSN grammar.
//!
//! The predefined table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

/// A table specifying the ASCII bytes allowed in a string.
#[derive(Clone, Copy, Debug)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "cannot allow non-ASCII byte");
            table |= 1u128 << *cur;
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Creates a table that allows every byte in the inclusive range `lo..=hi`.
    ///
    /// # Panics
    ///
    /// Panics if `hi` is not ASCII or `lo > hi`.
    #[must_use]
    pub const fn range(lo: u8, hi: u8) -> Self {
        assert!(hi.is_ascii() && lo <= hi, "invalid ASCII range");
        let mut table = 0;
        let mut i = lo;
        while i <= hi {
            table |= 1u128 << i;
            i += 1;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the bytes allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Checks whether the given byte is allowed by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, x: u8) -> bool {
        if x < 64 {
            self.0 & (1 << x) != 0
        } else if x < 128 {
            self.1 & (1 << (x - 64)) != 0
        } else {
            false
        }
    }

    /// Validates the given string with the table.
    #[must_use]
    pub const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            if !self.allows(s[i]) {
                return false;
            }
            i += 1;
        }
        true
    }
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = Table::range(b'A', b'Z').or(Table::range(b'a', b'z'));

/// `DIGIT = %x30-39`
pub const DIGIT: Table = Table::range(b'0', b'9');

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`, case-insensitive.
pub const HEXDIG: Table = DIGIT.or(Table::new(b"ABCDEFabcdef"));

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
///
/// This table allows the characters after the first one.
pub const SCHEME: Table = ALPHA.or(DIGIT).or(Table::new(b"+-."));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert!(ALPHA.allows(b'a') && ALPHA.allows(b'Z'));
        assert!(!ALPHA.allows(b'0') && !ALPHA.allows(b'@') && !ALPHA.allows(b'['));
        assert!(HEXDIG.validate(b"09afAF"));
        assert!(!HEXDIG.validate(b"g"));
        assert!(SCHEME.validate(b"mongodb+srv.v1-x"));
        assert!(!SCHEME.allows(b':') && !SCHEME.allows(b'/'));
        assert!(!SCHEME.allows(0xc3));
    }
}
