use crate::{BuildError, ParseError};

/// An invalid argument was passed to a [`UriValue`] operation.
///
/// All variants are recoverable by the caller: operations are deterministic,
/// so retrying with the same input fails the same way.
///
/// [`UriValue`]: crate::UriValue
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The literal string is not a valid URI reference.
    #[error("URI string '{input}' is not a valid URI")]
    InvalidUri {
        /// The literal that failed to parse.
        input: String,
        /// Where and why parsing failed.
        #[source]
        source: ParseError,
    },
    /// The port is not a positive integer that fits in 16 bits.
    #[error("URI port must be an integer between 1 and 65535, got '{0}'")]
    InvalidPort(String),
    /// The components cannot be composed into a URI string.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl Error {
    /// Returns the parse error behind an [`Error::InvalidUri`].
    #[must_use]
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::InvalidUri { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseErrorKind;
    use std::error::Error as _;

    #[test]
    fn display() {
        let e = Error::InvalidUri {
            input: "http:///[".to_owned(),
            source: ParseError {
                index: 8,
                kind: ParseErrorKind::UnexpectedChar,
            },
        };
        assert_eq!(e.to_string(), "URI string 'http:///[' is not a valid URI");
        assert_eq!(
            e.source().map(ToString::to_string).as_deref(),
            Some("unexpected character at index 8")
        );
        assert_eq!(e.parse_error().map(ParseError::index), Some(8));

        let e = Error::InvalidPort("-1".to_owned());
        assert_eq!(
            e.to_string(),
            "URI port must be an integer between 1 and 65535, got '-1'"
        );
        assert!(e.source().is_none());
        assert!(e.parse_error().is_none());
    }

    #[test]
    fn build_is_transparent() {
        let e = Error::from(BuildError::PathStartsWithDoubleSlash);
        assert_eq!(
            e.to_string(),
            "when authority is not present, path should not start with \"//\""
        );
    }
}
