#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! An immutable URI value type with lazy parsing and copy-on-write component mutators.
//!
//! A [`UriValue`] is made either from a literal string, which is parsed against
//! [RFC 3986] only when one of its components is first read, or from scratch by
//! setting components one at a time. Every `with_*` method returns a new value
//! and leaves the receiver untouched.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//!
//! # Examples
//!
//! ```
//! use uri_value::UriValue;
//!
//! let uri = UriValue::from_string("https://example.com:443/search?q=rust");
//! assert_eq!(uri.host()?, "example.com");
//! assert_eq!(uri.port()?, Some(443));
//!
//! // The literal is kept verbatim until a component is changed.
//! assert_eq!(uri.to_string(), "https://example.com:443/search?q=rust");
//!
//! // The default port of the scheme is left out when composing.
//! let uri = uri.with_query("q=uri")?;
//! assert_eq!(uri.to_string(), "https://example.com/search?q=uri");
//! # Ok::<_, uri_value::Error>(())
//! ```
//!
//! # Composition
//!
//! A value built from components renders through [`Components::compose`]:
//!
//! - The scheme defaults to `http`.
//! - An empty host reads as `localhost` for the `http` and `https` schemes.
//! - `file` URIs keep the `file:///path` form even without a host.
//! - The port is omitted when it is the [default port](default_port) of the scheme.
//!
//! Composition is stricter than concatenating the components. It fails with a
//! [`BuildError`] when the scheme is malformed, when a path follows an authority
//! (or the `file` scheme) without starting with `'/'`, or when a path without an
//! authority starts with `"//"`. In each case the concatenated string would read
//! back as a different URI.
//!
//! A value that never had a component set renders as the empty string. A value
//! whose components were all cleared again is composed as usual, giving `"http:"`.
//!
//! Converting a value to a string with [`Display`](core::fmt::Display) never fails.
//! When the components cannot be composed, a `WARN` event is emitted through
//! [`tracing`](https://docs.rs/tracing) and the empty string is written instead.
//! Use [`UriValue::get_string`] to observe the error.
//!
//! # Feature flags
//!
//! All features are disabled by default.
//!
//! - `serde`: Implements `Serialize` and `Deserialize` for [`UriValue`],
//!   using its string form. Deserialization validates the string eagerly.

mod component;
mod error;
mod parse;
mod table;
mod value;

pub use component::{default_port, BuildError, Components};
pub use error::Error;
pub use parse::{ParseError, ParseErrorKind};
pub use value::UriValue;
