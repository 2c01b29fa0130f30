//! Member and element enumeration.
//!
//! [`keys`] and [`elems`] walk the buffer once, collect the direct children
//! of the object or array at `path`, and hand them back as iterators of
//! span pairs. Aggregate values span the whole aggregate, so each child can
//! itself be fed back into [`scanf`](crate::scanf) or [`walk`](crate::walk).
//!
//! # Examples
//!
//! ```
//! use jsonsplice::keys;
//!
//! let doc = br#"{ "a": [], "b": { "c": 1 } }"#;
//! let pairs: Vec<_> = keys(doc, "")
//!     .unwrap()
//!     .map(|(k, v)| (k.text.to_vec(), v.text.to_vec()))
//!     .collect();
//! assert_eq!(pairs[0], (b"a".to_vec(), b"[]".to_vec()));
//! assert_eq!(pairs[1], (b"b".to_vec(), b"{ \"c\": 1 }".to_vec()));
//! ```

use alloc::vec::Vec;

use crate::error::ParseError;
use crate::path::is_direct_child;
use crate::token::{Name, Token, TokenKind};
use crate::walk::walk;

/// Iterator over `(key, value)` spans of the object at a path.
pub struct Keys<'b> {
    inner: alloc::vec::IntoIter<(Token<'b>, Token<'b>)>,
}

impl<'b> Iterator for Keys<'b> {
    type Item = (Token<'b>, Token<'b>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Iterator over `(index, value)` spans of the array at a path.
pub struct Elems<'b> {
    inner: alloc::vec::IntoIter<(usize, Token<'b>)>,
}

impl<'b> Iterator for Elems<'b> {
    type Item = (usize, Token<'b>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Enumerates the members of the object at `path` (empty `path` is the
/// root). Key tokens have [`TokenKind::String`] and span the key text.
pub fn keys<'b>(buf: &'b [u8], path: &str) -> Result<Keys<'b>, ParseError> {
    let base = path.as_bytes();
    let mut pairs: Vec<(Token<'b>, Token<'b>)> = Vec::new();
    // Key of the direct-child aggregate currently open, waiting for its end
    // event (which carries the full span but no name).
    let mut pending: Option<Token<'b>> = None;
    walk(buf, |name, p, tok| {
        if !is_direct_child(p, base) {
            return;
        }
        let key = match name {
            Some(Name::Key { text, offset }) => Some(Token {
                kind: TokenKind::String,
                text,
                // Step inside the quote so the token points at its own text.
                offset: offset + usize::from(buf[offset] == b'"'),
            }),
            _ => None,
        };
        if tok.kind.is_begin() {
            pending = key;
        } else if let Some(k) = key.or_else(|| pending.take()) {
            pairs.push((k, tok));
        }
    })?;
    Ok(Keys {
        inner: pairs.into_iter(),
    })
}

/// Enumerates the elements of the array at `path` (empty `path` is the
/// root).
pub fn elems<'b>(buf: &'b [u8], path: &str) -> Result<Elems<'b>, ParseError> {
    let base = path.as_bytes();
    let mut items: Vec<(usize, Token<'b>)> = Vec::new();
    let mut pending: Option<usize> = None;
    walk(buf, |name, p, tok| {
        if !is_direct_child(p, base) {
            return;
        }
        let index = match name {
            Some(Name::Index(i)) => Some(i),
            _ => None,
        };
        if tok.kind.is_begin() {
            pending = index;
        } else if let Some(i) = index.or_else(|| pending.take()) {
            items.push((i, tok));
        }
    })?;
    Ok(Elems {
        inner: items.into_iter(),
    })
}
