//! The component mapping of a URI and its composition rules.

use crate::table;
use std::borrow::Cow;

/// Canonical ports of well-known schemes, in the format `(scheme, port)`.
const DEFAULT_PORTS: [(&str, u16); 11] = [
    ("http", 80),
    ("https", 443),
    ("ftp", 21),
    ("gopher", 70),
    ("nntp", 119),
    ("news", 119),
    ("telnet", 23),
    ("tn3270", 23),
    ("imap", 143),
    ("pop", 110),
    ("ldap", 389),
];

/// Returns the canonical default port of the given scheme, if it is a well-known one.
///
/// The lookup is case-sensitive.
///
/// # Examples
///
/// ```
/// use uri_value::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("tn3270"), Some(23));
/// assert_eq!(default_port("HTTP"), None);
/// assert_eq!(default_port("foo"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|&&(name, _)| name == scheme)
        .map(|&(_, port)| port)
}

/// An error occurred when composing a URI string from its components.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The scheme does not match `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    #[error("scheme should start with a letter followed by letters, digits, '+', '-' or '.'")]
    InvalidScheme,
    /// Authority is present, but the path is not empty and does not start with `'/'`.
    #[error("when authority is present, path should either be empty or start with '/'")]
    NonemptyRootlessPath,
    /// Authority is not present, but the path starts with `"//"`.
    #[error("when authority is not present, path should not start with \"//\"")]
    PathStartsWithDoubleSlash,
}

/// The decomposed components of a URI.
///
/// A component that is not set reads as the empty string (or `None` for the port).
/// Setting a string component to the empty string is the same as unsetting it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Components {
    pub(crate) scheme: Option<String>,
    pub(crate) user: Option<String>,
    pub(crate) pass: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Option<String>,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

/// Stores `s` as a component value.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}

impl Components {
    /// Returns the scheme component.
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.scheme.as_deref().unwrap_or_default()
    }

    /// Returns the user name.
    #[must_use]
    pub fn user(&self) -> &str {
        self.user.as_deref().unwrap_or_default()
    }

    /// Returns the password associated with the user name.
    #[must_use]
    pub fn password(&self) -> &str {
        self.pass.as_deref().unwrap_or_default()
    }

    /// Returns the host, verbatim. IP literals keep their brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or_default()
    }

    /// Returns the port, if any.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or_default()
    }

    /// Returns the query component, without the leading `'?'`.
    #[must_use]
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    /// Returns the fragment component, without the leading `'#'`.
    #[must_use]
    pub fn fragment(&self) -> &str {
        self.fragment.as_deref().unwrap_or_default()
    }

    /// Checks whether no component is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks whether the port is set and equals the default port of the scheme.
    #[must_use]
    pub fn has_default_port(&self) -> bool {
        self.port.is_some() && self.port == default_port(self.scheme())
    }

    /// Returns the user information: the user name, followed by `":"` and
    /// the password when the password is not empty.
    ///
    /// Returns the empty string when the user name is empty.
    #[must_use]
    pub fn user_info(&self) -> Cow<'_, str> {
        match (self.user(), self.password()) {
            ("", _) => Cow::Borrowed(""),
            (user, "") => Cow::Borrowed(user),
            (user, pass) => Cow::Owned(format!("{user}:{pass}")),
        }
    }

    /// Composes the authority: `[userinfo "@"] host [":" port]`.
    ///
    /// An empty host is replaced with `localhost` for the `http` and `https`
    /// schemes. The port is left out when it is the default one of the scheme.
    #[must_use]
    pub fn authority(&self) -> String {
        let mut buf = String::new();

        let user_info = self.user_info();
        if !user_info.is_empty() {
            buf.push_str(&user_info);
            buf.push('@');
        }

        match self.host() {
            "" if matches!(self.scheme(), "http" | "https") => buf.push_str("localhost"),
            host => buf.push_str(host),
        }

        if let Some(port) = self.port {
            if !self.has_default_port() {
                buf.push(':');
                buf.push_str(&port.to_string());
            }
        }
        buf
    }

    /// Composes a URI string from the components.
    ///
    /// The scheme defaults to `http` when not set. `"//"` is written before the
    /// authority when it is not empty, or unconditionally for the `file` scheme.
    /// The path, query and fragment are written verbatim.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheme is malformed, or if the path would change
    /// the structure of the composed URI.
    pub fn compose(&self) -> Result<String, BuildError> {
        let scheme = match self.scheme() {
            "" => "http",
            scheme => scheme,
        };
        if !scheme.as_bytes()[0].is_ascii_alphabetic()
            || !table::SCHEME.validate(scheme.as_bytes())
        {
            return Err(BuildError::InvalidScheme);
        }

        let mut buf = String::with_capacity(scheme.len() + 1);
        buf.push_str(scheme);
        buf.push(':');

        let authority = self.authority();
        let path = self.path();

        if !authority.is_empty() || scheme == "file" {
            if !path.is_empty() && !path.starts_with('/') {
                return Err(BuildError::NonemptyRootlessPath);
            }
            buf.push_str("//");
            buf.push_str(&authority);
        } else if path.starts_with("//") {
            return Err(BuildError::PathStartsWithDoubleSlash);
        }

        buf.push_str(path);

        if let Some(query) = &self.query {
            buf.push('?');
            buf.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(fragment);
        }
        Ok(buf)
    }
}
