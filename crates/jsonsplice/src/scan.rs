//! The scanf-style extractor.
//!
//! [`scanf`] interprets a format string as a path-shaped pattern mirroring
//! the JSON it is matched against. Braces descend into objects, keys name
//! members, and every `%spec` captures the value at the resulting path into
//! the next caller-supplied [`Capture`] slot. Brackets, commas, colons, and
//! whitespace are decoration: `{a: [%T]}` and `{a: %T}` both address `.a`.
//!
//! Each `%spec` drives its own walk over the buffer; a spec whose path has
//! no token, whose token kind does not suit the conversion, or whose text
//! fails to convert is silently skipped. The return value counts the specs
//! that stored data.
//!
//! # Examples
//!
//! ```
//! use jsonsplice::{scanf, Capture};
//!
//! let doc = br#"{ a: 1234, b: true, d: "hi" }"#;
//! let (mut a, mut b, mut d) = (0i64, false, None);
//! let n = scanf(
//!     doc,
//!     "{a: %d, b: %B, d: %Q}",
//!     &mut [Capture::Int(&mut a), Capture::Bool(&mut b), Capture::Str(&mut d)],
//! )
//! .unwrap();
//! assert_eq!((n, a, b, d.as_deref()), (3, 1234, true, Some("hi")));
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ParseError;
use crate::path::PathBuilder;
use crate::token::{Token, TokenKind};
use crate::walk::walk;
use crate::{base64, escape, hex};

/// A destination for one `%spec`.
pub enum Capture<'s, 'b> {
    /// `%d` `%i` — signed decimal from a Number token.
    Int(&'s mut i64),
    /// `%u` `%o` `%x` `%X` — unsigned parse in the conversion's base.
    Uint(&'s mut u64),
    /// `%f` `%lf` `%Lf` — lexical float.
    Float(&'s mut f64),
    /// `%B` — `true`/`false`.
    Bool(&'s mut bool),
    /// `%Q` — unescaped owned copy of a String token; a Null token stores
    /// `None` and does not count as a match.
    Str(&'s mut Option<String>),
    /// `%s` — raw copy of the span, escapes left as stored, capped by the
    /// spec's precision.
    Raw(&'s mut Vec<u8>),
    /// `%V` — Base64-decoded bytes.
    Base64(&'s mut Option<Vec<u8>>),
    /// `%H` — hex-decoded bytes.
    Hex(&'s mut Option<Vec<u8>>),
    /// `%T` — the matched token itself, borrowing the scanned buffer.
    Tok(&'s mut Option<Token<'b>>),
    /// `%M` — invoked with the matched span.
    With(&'s mut dyn FnMut(&'b [u8])),
}

struct ScanSpec {
    conv: u8,
    prec: Option<usize>,
}

/// Matches `pat` against `buf`, filling `caps` in pattern order.
///
/// Returns the number of captures that received data, or the walker's error
/// when `buf` itself does not parse.
pub fn scanf<'b>(
    buf: &'b [u8],
    pat: &str,
    caps: &mut [Capture<'_, 'b>],
) -> Result<usize, ParseError> {
    let p = pat.as_bytes();
    let mut frames: Vec<Option<Vec<u8>>> = Vec::new();
    let mut pending: Option<Vec<u8>> = None;
    let mut slot = 0;
    let mut matched = 0;
    let mut i = 0;

    while i < p.len() {
        match p[i] {
            b'{' => {
                frames.push(pending.take());
                i += 1;
            }
            b'}' => {
                frames.pop();
                i += 1;
            }
            b'"' => {
                let (key, next) = quoted_key(p, i);
                pending = Some(key);
                i = next;
            }
            b'%' => {
                let (spec, next) = parse_spec(p, i + 1);
                i = next;
                let mut target = PathBuilder::new();
                for key in frames.iter().flatten() {
                    target.push_key(key);
                }
                if let Some(key) = pending.take() {
                    target.push_key(&key);
                }
                let Some(cap) = caps.get_mut(slot) else {
                    break;
                };
                slot += 1;
                if let Some(spec) = spec {
                    matched += run_spec(buf, target.as_bytes(), &spec, cap)?;
                }
            }
            b if is_key_byte(b) => {
                let start = i;
                while i < p.len() && is_key_byte(p[i]) {
                    i += 1;
                }
                pending = Some(p[start..i].to_vec());
            }
            _ => i += 1,
        }
    }

    Ok(matched)
}

/// Locates the `index`-th element of the array at `path` (empty `path`
/// addresses the root). `Ok(None)` means the index is out of range; an
/// element that is an empty string is still found, with an empty span.
pub fn array_elem<'b>(
    buf: &'b [u8],
    path: &str,
    index: usize,
) -> Result<Option<Token<'b>>, ParseError> {
    let mut target = PathBuilder::new();
    target.push_raw(path.as_bytes());
    target.push_index(index);
    let mut found = None;
    walk(buf, |_, p, tok| {
        if !tok.kind.is_begin() && p == target.as_bytes() && found.is_none() {
            found = Some(tok);
        }
    })?;
    Ok(found)
}

fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// Reads a quoted pattern key starting at the `"` in `p[i]`.
fn quoted_key(p: &[u8], i: usize) -> (Vec<u8>, usize) {
    let mut key = Vec::new();
    let mut j = i + 1;
    while j < p.len() && p[j] != b'"' {
        if p[j] == b'\\' && j + 1 < p.len() {
            key.push(p[j]);
            j += 1;
        }
        key.push(p[j]);
        j += 1;
    }
    (key, (j + 1).min(p.len()))
}

/// Parses the conversion after a `%`. An unrecognized spec still consumes
/// its capture slot but can never match.
fn parse_spec(p: &[u8], mut i: usize) -> (Option<ScanSpec>, usize) {
    let mut prec = None;
    if p.get(i) == Some(&b'.') {
        i += 1;
        let mut n = 0;
        while let Some(b @ b'0'..=b'9') = p.get(i) {
            n = n * 10 + usize::from(b - b'0');
            i += 1;
        }
        prec = Some(n);
    }
    // Length modifiers select C-side storage widths; the typed capture
    // already fixes the width here, so they only need recognizing.
    loop {
        match p.get(i) {
            Some(b'h' | b'l' | b'j' | b'z' | b't' | b'L') => i += 1,
            _ => break,
        }
    }
    match p.get(i) {
        Some(&conv) if b"diuoxXfBQsVHTM".contains(&conv) => {
            (Some(ScanSpec { conv, prec }), i + 1)
        }
        Some(_) => (None, i + 1),
        None => (None, i),
    }
}

fn run_spec<'b>(
    buf: &'b [u8],
    target: &[u8],
    spec: &ScanSpec,
    cap: &mut Capture<'_, 'b>,
) -> Result<usize, ParseError> {
    let mut stored = 0;
    walk(buf, |_, path, tok| {
        if tok.kind.is_begin() || path != target {
            return;
        }
        if convert(spec, tok, cap) {
            stored += 1;
        }
    })?;
    Ok(stored)
}

fn convert<'b>(spec: &ScanSpec, tok: Token<'b>, cap: &mut Capture<'_, 'b>) -> bool {
    match (spec.conv, cap) {
        (b'd' | b'i', Capture::Int(dst)) if tok.kind == TokenKind::Number => {
            match parse_signed(tok.text) {
                Some(v) => {
                    **dst = v;
                    true
                }
                None => false,
            }
        }
        (b'u' | b'o' | b'x' | b'X', Capture::Uint(dst)) if tok.kind == TokenKind::Number => {
            let radix = match spec.conv {
                b'o' => 8,
                b'x' | b'X' => 16,
                _ => 10,
            };
            match parse_unsigned(tok.text, radix) {
                Some(v) => {
                    **dst = v;
                    true
                }
                None => false,
            }
        }
        (b'f', Capture::Float(dst)) if tok.kind == TokenKind::Number => {
            match core::str::from_utf8(tok.text).ok().and_then(|s| s.parse().ok()) {
                Some(v) => {
                    **dst = v;
                    true
                }
                None => false,
            }
        }
        (b'B', Capture::Bool(dst)) => match tok.kind {
            TokenKind::True => {
                **dst = true;
                true
            }
            TokenKind::False => {
                **dst = false;
                true
            }
            _ => false,
        },
        (b'Q', Capture::Str(dst)) => match tok.kind {
            TokenKind::String => match escape::unescape(tok.text)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
            {
                Some(s) => {
                    **dst = Some(s);
                    true
                }
                None => false,
            },
            TokenKind::Null => {
                // The original stores a NULL pointer and counts no match.
                **dst = None;
                false
            }
            _ => false,
        },
        (b's', Capture::Raw(dst)) if tok.kind == TokenKind::String => {
            let cut = spec.prec.unwrap_or(usize::MAX).min(tok.text.len());
            dst.clear();
            dst.extend_from_slice(&tok.text[..cut]);
            true
        }
        (b'V', Capture::Base64(dst)) if tok.kind == TokenKind::String => {
            match base64::decode(tok.text) {
                Some(bytes) => {
                    **dst = Some(bytes);
                    true
                }
                None => false,
            }
        }
        (b'H', Capture::Hex(dst)) if tok.kind == TokenKind::String => {
            match hex::decode(tok.text) {
                Some(bytes) => {
                    **dst = Some(bytes);
                    true
                }
                None => false,
            }
        }
        (b'T', Capture::Tok(dst)) => {
            **dst = Some(tok);
            true
        }
        (b'M', Capture::With(f)) => {
            f(tok.text);
            true
        }
        _ => false,
    }
}

/// sscanf-style leading parse: optional sign, then as many digits as fit.
fn parse_signed(text: &[u8]) -> Option<i64> {
    let (neg, rest) = match text.first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mag = parse_unsigned(rest, 10)?;
    let mag = i64::try_from(mag).ok()?;
    Some(if neg { -mag } else { mag })
}

fn parse_unsigned(text: &[u8], radix: u64) -> Option<u64> {
    let mut v: u64 = 0;
    let mut any = false;
    for &b in text {
        let digit = match b {
            b'0'..=b'9' => u64::from(b - b'0'),
            b'a'..=b'f' => u64::from(b - b'a') + 10,
            b'A'..=b'F' => u64::from(b - b'A') + 10,
            _ => break,
        };
        if digit >= radix {
            break;
        }
        v = v.checked_mul(radix)?.checked_add(digit)?;
        any = true;
    }
    any.then_some(v)
}
