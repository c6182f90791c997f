use crate::{
    component::Components,
    table::{self, Table},
};
use core::{
    ops::{Deref, DerefMut},
    str,
};
use std::net::Ipv6Addr;

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Invalid percent-encoded octet that is either non-hexadecimal or incomplete.
    ///
    /// The error index points to the percent character "%" of the octet.
    InvalidOctet,
    /// Unexpected character or end of input.
    ///
    /// The error index points to the first byte of the character or the end of input.
    UnexpectedChar,
    /// Invalid IP literal address.
    ///
    /// The error index points to the preceding left square bracket "[".
    InvalidIpLiteral,
    /// Port that is zero or does not fit in 16 bits.
    ///
    /// The error index points to the first digit of the port.
    InvalidPort,
}

impl ParseErrorKind {
    fn description(self) -> &'static str {
        match self {
            Self::InvalidOctet => "invalid percent-encoded octet",
            Self::UnexpectedChar => "unexpected character",
            Self::InvalidIpLiteral => "invalid IP literal",
            Self::InvalidPort => "invalid port",
        }
    }
}

/// An error occurred when parsing a URI string.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{} at index {}", .kind.description(), .index)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index at which the error occurred.
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

/// Parses a URI reference into its component mapping.
pub(crate) fn parse(s: &str) -> Result<Components> {
    let mut parser = Parser {
        reader: Reader::new(s.as_bytes()),
        out: Bounds::default(),
    };
    parser.parse_from_scheme()?;
    parser.out.into_components(s)
}

type Span = (usize, usize);

/// Byte ranges of the components found so far.
#[derive(Default)]
struct Bounds {
    scheme: Option<Span>,
    userinfo: Option<Span>,
    host: Option<Span>,
    port: Option<Span>,
    path: Span,
    query: Option<Span>,
    fragment: Option<Span>,
}

impl Bounds {
    fn into_components(self, s: &str) -> Result<Components> {
        let get = |span: Option<Span>| span.map(|(start, end)| &s[start..end]);

        let (user, pass) = match get(self.userinfo) {
            Some(userinfo) => match userinfo.split_once(':') {
                Some((user, pass)) => (Some(user), Some(pass)),
                None => (Some(userinfo), None),
            },
            None => (None, None),
        };

        let port = match self.port {
            Some((start, end)) if start < end => match s[start..end].parse::<u16>() {
                Ok(port) if port != 0 => Some(port),
                _ => err!(start, InvalidPort),
            },
            // An empty port is allowed and equivalent to no port.
            _ => None,
        };

        Ok(Components {
            scheme: owned(get(self.scheme)),
            user: owned(user),
            pass: owned(pass),
            host: owned(get(self.host)),
            port,
            path: owned(Some(&s[self.path.0..self.path.1])),
            query: owned(get(self.query)),
            fragment: owned(get(self.fragment)),
        })
    }
}

fn owned(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(String::from)
}

/// URI reference parser.
///
/// # Invariants
///
/// `pos <= len`, `pos` is non-decreasing and on the boundary of a UTF-8 code point.
///
/// # Preconditions and guarantees
///
/// Before parsing, ensure that `pos == 0` and `out` is default initialized.
///
/// Start and finish parsing by calling `parse_from_scheme`.
/// When parsing succeeds, all output spans are within bounds, correctly ordered
/// and hold components validated against the RFC 3986 grammar.
struct Parser<'a> {
    reader: Reader<'a>,
    out: Bounds,
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Deref for Parser<'a> {
    type Target = Reader<'a>;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}

impl DerefMut for Parser<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PathKind {
    General,
    AbEmpty,
    ContinuedNoScheme,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Reader { bytes, pos: 0 }
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    // Any call to this method must keep the invariants.
    fn skip(&mut self, n: usize) {
        // INVARIANT: `pos` is non-decreasing.
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    /// Reads as many bytes allowed by `table` as possible.
    ///
    /// Returns whether anything was read.
    fn read(&mut self, table: Table) -> Result<bool> {
        let start = self.pos;
        let mut i = self.pos;

        while i < self.len() {
            let x = self.bytes[i];
            if table.allows_pct_encoded() && x == b'%' {
                match self.bytes[i + 1..] {
                    [hi, lo, ..] if table::is_hexdig_pair(hi, lo) => i += 3,
                    _ => err!(i, InvalidOctet),
                }
            } else if table.allows(x) {
                i += 1;
            } else {
                // Non-ASCII bytes are never allowed, so we stop on a code point boundary.
                break;
            }
        }

        // INVARIANT: `i` is non-decreasing and on a code point boundary.
        self.pos = i;
        Ok(self.pos > start)
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            // INVARIANT: The remaining bytes start with `s` so it's fine to skip `s.len()`.
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    /// Reads a port, returning the span of its digits.
    fn read_port(&mut self) -> Option<Span> {
        if !self.read_str(":") {
            return None;
        }
        let start = self.pos;
        let mut i = 0;
        while self.peek(i).is_some_and(|x| x.is_ascii_digit()) {
            i += 1;
        }
        // INVARIANT: Skipping `i` digits is fine.
        self.skip(i);
        Some((start, self.pos))
    }

    /// Reads an IP literal, returning whether one was present.
    fn read_ip_literal(&mut self) -> Result<bool> {
        let bracket = self.pos;
        if !self.read_str("[") {
            return Ok(false);
        }

        let rem = &self.bytes[self.pos..];
        let Some(len) = rem.iter().position(|&x| x == b']') else {
            err!(bracket, InvalidIpLiteral);
        };
        let addr = &rem[..len];

        let valid = match addr.first() {
            Some(b'v' | b'V') => is_ipv_future(&addr[1..]),
            _ => str::from_utf8(addr).is_ok_and(|addr| addr.parse::<Ipv6Addr>().is_ok()),
        };
        if !valid {
            err!(bracket, InvalidIpLiteral);
        }

        // INVARIANT: Skipping the ASCII address and "]" is fine.
        self.skip(len + 1);
        Ok(true)
    }
}

/// Checks the part of an `IPvFuture` after the leading "v".
fn is_ipv_future(bytes: &[u8]) -> bool {
    let Some(dot) = bytes.iter().position(|&x| x == b'.') else {
        return false;
    };
    let (version, addr) = (&bytes[..dot], &bytes[dot + 1..]);
    !version.is_empty()
        && table::HEXDIG.validate(version)
        && !addr.is_empty()
        && table::IPV_FUTURE.validate(addr)
}

impl Parser<'_> {
    /// Reads a host, returning its span and whether it is an IP literal.
    fn read_host(&mut self) -> Result<(Span, bool)> {
        let start = self.pos;
        let ip_literal = self.read_ip_literal()?;
        if !ip_literal {
            self.read(table::REG_NAME)?;
        }
        Ok(((start, self.pos), ip_literal))
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        self.read(table::SCHEME)?;

        if self.peek(0) == Some(b':') {
            // Scheme starts with a letter.
            if self.pos > 0 && self.bytes[0].is_ascii_alphabetic() {
                self.out.scheme = Some((0, self.pos));
            } else {
                err!(0, UnexpectedChar);
            }

            // INVARIANT: Skipping ":" is fine.
            self.skip(1);
            return if self.read_str("//") {
                self.parse_from_authority()
            } else {
                self.parse_from_path(PathKind::General)
            };
        } else if self.pos == 0 {
            // Nothing read.
            if self.read_str("//") {
                return self.parse_from_authority();
            }
        }
        // Scheme chars are valid for path.
        self.parse_from_path(PathKind::ContinuedNoScheme)
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        // We first try to read host and port, noting that
        // a reg-name can also be part of userinfo.
        let auth_start = self.pos;
        let (mut host, ip_literal) = self.read_host()?;
        let mut port = self.read_port();

        if !ip_literal {
            let userinfo_read = self.read(table::USERINFO)?;

            if self.peek(0) == Some(b'@') {
                // Userinfo present.
                self.out.userinfo = Some((auth_start, self.pos));
                // INVARIANT: Skipping "@" is fine.
                self.skip(1);

                (host, _) = self.read_host()?;
                port = self.read_port();
            } else if userinfo_read {
                err!(self.pos, UnexpectedChar);
            }
        }

        self.out.host = Some(host);
        self.out.port = port;
        self.parse_from_path(PathKind::AbEmpty)
    }

    fn parse_from_path(&mut self, kind: PathKind) -> Result<()> {
        let path_start = match kind {
            PathKind::General | PathKind::AbEmpty => self.pos,
            PathKind::ContinuedNoScheme => {
                self.read(table::SEGMENT_NZ_NC)?;

                if self.peek(0) == Some(b':') {
                    // In a relative reference, the first path
                    // segment cannot contain a colon character.
                    err!(self.pos, UnexpectedChar);
                }
                0
            }
        };

        if self.read(table::PATH)? && kind == PathKind::AbEmpty && self.bytes[path_start] != b'/'
        {
            err!(path_start, UnexpectedChar);
        }

        self.out.path = (path_start, self.pos);

        if self.read_str("?") {
            let start = self.pos;
            self.read(table::QUERY)?;
            self.out.query = Some((start, self.pos));
        }

        if self.read_str("#") {
            let start = self.pos;
            self.read(table::FRAGMENT)?;
            self.out.fragment = Some((start, self.pos));
        }

        if self.has_remaining() {
            err!(self.pos, UnexpectedChar);
        }
        Ok(())
    }
}
