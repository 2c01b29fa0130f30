//! A streaming walker, emitter, extractor, and span splicer for a relaxed
//! superset of JSON.
//!
//! The relaxed form accepts unquoted object keys (`{a: 1}`); the emitter can
//! produce either relaxed or canonical output and quotes bare keys
//! automatically. Values are never materialised into a tree: the walker
//! reports byte spans of the input to a callback, and every other operation
//! (extraction, mutation, pretty-printing) is built on those spans.
//!
//! # Examples
//!
//! ```
//! use jsonsplice::{printf, scanf, Arg, Capture};
//!
//! let mut out = Vec::new();
//! printf(&mut out, "{a: %d, b: %Q}", &[Arg::Int(42), Arg::Str("hi")]).unwrap();
//! assert_eq!(out, br#"{"a": 42, "b": "hi"}"#);
//!
//! let mut a = 0i64;
//! let n = scanf(&out, "{a: %d}", &mut [Capture::Int(&mut a)]).unwrap();
//! assert_eq!((n, a), (1, 42));
//! ```

#![no_std]
#![allow(missing_docs)]
#![allow(clippy::must_use_candidate)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod base64;
mod emit;
mod error;
mod escape;
mod hex;
mod next;
mod path;
mod pretty;
mod scan;
mod set;
mod sink;
mod token;
mod walk;

#[cfg(feature = "std")]
mod file;

pub use emit::{printf, Arg, ArrayFmt, Fmt};
pub use error::{EmitError, Error, ParseError};
pub use next::{elems, keys, Elems, Keys};
pub use path::MAX_PATH_LEN;
pub use pretty::prettify;
pub use scan::{array_elem, scanf, Capture};
pub use set::{setf, unsetf};
pub use sink::{BufSink, Sink};
pub use token::{Name, Token, TokenKind};
pub use walk::{validate, walk, MAX_DEPTH};

#[cfg(feature = "std")]
pub use file::{fprintf, fread, prettify_file};
#[cfg(feature = "std")]
pub use sink::IoSink;

#[cfg(test)]
mod tests;
