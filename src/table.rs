//! Byte pattern tables from RFC 3986.
//!
//! The table constants in this module are documented with
//! the ABNF notation of [RFC 5234].
//!
//! [RFC 5234]: https://datatracker.ietf.org/doc/html/rfc5234

const MASK_PCT_ENCODED: u64 = 1 << b'%';
const MASK_UNENCODED_ASCII: u64 = !MASK_PCT_ENCODED;

/// A table specifying the byte patterns allowed in a URI component.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given unencoded bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or equals `b'%'`.
    pub(crate) const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, b'%' | 128..),
                "cannot allow non-ASCII byte or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Returns a table that allows everything allowed by `self` or by `other`.
    pub(crate) const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Marks this table as allowing percent-encoded octets.
    pub(crate) const fn or_pct_encoded(self) -> Self {
        Self(self.0 | MASK_PCT_ENCODED, self.1)
    }

    #[inline]
    pub(crate) const fn allows_pct_encoded(self) -> bool {
        self.0 & MASK_PCT_ENCODED != 0
    }

    #[inline]
    pub(crate) const fn allows(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0 & MASK_UNENCODED_ASCII
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether the whole of `s` matches the table.
    pub(crate) const fn validate(self, s: &[u8]) -> bool {
        let mut i = 0;
        while i < s.len() {
            let x = s[i];
            if self.allows_pct_encoded() && x == b'%' {
                if i + 2 >= s.len() || !is_hexdig_pair(s[i + 1], s[i + 2]) {
                    return false;
                }
                i += 3;
            } else if self.allows(x) {
                i += 1;
            } else {
                return false;
            }
        }
        true
    }
}

pub(crate) const fn is_hexdig(x: u8) -> bool {
    x.is_ascii_hexdigit()
}

pub(crate) const fn is_hexdig_pair(hi: u8, lo: u8) -> bool {
    is_hexdig(hi) && is_hexdig(lo)
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub(crate) const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub(crate) const DIGIT: Table = new(b"0123456789");

/// `HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"`
pub(crate) const HEXDIG: Table = DIGIT.or(new(b"ABCDEFabcdef"));

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub(crate) const SCHEME: Table = ALPHA.or(DIGIT).or(new(b"+-."));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub(crate) const USERINFO: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":")).or_pct_encoded();

/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
pub(crate) const IPV_FUTURE: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":"));

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub(crate) const REG_NAME: Table = UNRESERVED.or(SUB_DELIMS).or_pct_encoded();

/// `path = *( pchar / "/" )`
pub(crate) const PATH: Table = PCHAR.or(new(b"/"));

/// `segment-nz-nc = 1*( unreserved / pct-encoded / sub-delims / "@" )`
pub(crate) const SEGMENT_NZ_NC: Table = UNRESERVED.or(SUB_DELIMS).or(new(b"@")).or_pct_encoded();

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
pub(crate) const PCHAR: Table = UNRESERVED.or(SUB_DELIMS).or(new(b":@")).or_pct_encoded();

/// `query = *( pchar / "/" / "?" )`
pub(crate) const QUERY: Table = PCHAR.or(new(b"/?"));

/// `fragment = *( pchar / "/" / "?" )`
pub(crate) const FRAGMENT: Table = QUERY;

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
pub(crate) const UNRESERVED: Table = ALPHA.or(DIGIT).or(new(b"-._~"));

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub(crate) const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_table() {
        assert!(SCHEME.validate(b"svn+ssh"));
        assert!(SCHEME.validate(b"x-1.0"));
        assert!(!SCHEME.validate(b"ht tp"));
        assert!(!SCHEME.validate(b"a%20"));
    }

    #[test]
    fn pct_encoded() {
        assert!(PATH.validate(b"/a%20b"));
        assert!(!PATH.validate(b"/a%2"));
        assert!(!PATH.validate(b"/a%zz"));
        assert!(!REG_NAME.validate(b"a:b"));
        assert!(USERINFO.validate(b"user:pa%3Ass"));
    }

    #[test]
    fn non_ascii_rejected() {
        assert!(!PATH.validate("/caf\u{e9}".as_bytes()));
        assert!(!QUERY.validate("q=\u{2603}".as_bytes()));
    }

    #[test]
    fn query_and_fragment() {
        assert!(QUERY.validate(b"a=1&b=/?x"));
        assert!(!QUERY.validate(b"a#b"));
        assert!(FRAGMENT.validate(b"section-1"));
        assert!(!FRAGMENT.validate(b"a b"));
    }
}
