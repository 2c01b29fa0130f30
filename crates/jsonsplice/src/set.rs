//! Path-directed buffer mutation.
//!
//! [`setf`] and [`unsetf`] walk the input once to locate the span a path
//! refers to, then write the surrounding bytes untouched around the
//! replacement (or around nothing, for deletion). The input buffer is never
//! modified; the result goes to the sink.
//!
//! Paths look like walker paths: `.key`, `[2]`, `.a.b[0]`. Two extra forms
//! direct mutation: an empty path replaces the whole root, and a trailing
//! `[]` appends to the array at the path. Setting a path whose trailing
//! components are missing creates the intermediate objects inside the
//! deepest existing object; the return value reports whether the target
//! existed before the mutation.
//!
//! # Examples
//!
//! ```
//! use jsonsplice::{setf, unsetf, Arg};
//!
//! let doc = br#"{ "a": 123, "b": [ 1 ], "c": true }"#;
//!
//! let mut out = Vec::new();
//! let hit = setf(doc, &mut out, ".b[0]", "%d", &[Arg::Int(2)]).unwrap();
//! assert!(hit);
//! assert_eq!(out, br#"{ "a": 123, "b": [ 2 ], "c": true }"#);
//!
//! let mut out = Vec::new();
//! let hit = unsetf(doc, &mut out, ".a").unwrap();
//! assert!(hit);
//! assert_eq!(out, br#"{ "b": [ 1 ], "c": true }"#);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::emit::{printf, Arg};
use crate::error::Error;
use crate::path::{is_direct_child, PathBuilder};
use crate::sink::Sink;
use crate::token::{Name, TokenKind};
use crate::walk::walk;

/// Replaces the value at `path` with `fmt` expanded over `args`.
///
/// Returns `true` when the path existed (and was replaced); `false` when the
/// mutation was an append (`…[]`), a creation of missing components, or a
/// no-op.
pub fn setf(
    buf: &[u8],
    out: &mut dyn Sink,
    path: &str,
    fmt: &str,
    args: &[Arg],
) -> Result<bool, Error> {
    apply(buf, out, path, Some((fmt, args)))
}

/// Deletes the value at `path`, along with its key and one adjacent
/// separator, keeping the surrounding container well-formed.
///
/// Returns `true` when something was deleted; a missing path copies the
/// buffer through unchanged.
pub fn unsetf(buf: &[u8], out: &mut dyn Sink, path: &str) -> Result<bool, Error> {
    apply(buf, out, path, None)
}

enum Comp<'p> {
    Key(&'p [u8]),
    Index(usize),
    Append,
}

fn parse_path(path: &str) -> Option<Vec<Comp<'_>>> {
    let p = path.as_bytes();
    let mut comps = Vec::new();
    let mut i = 0;
    while i < p.len() {
        match p[i] {
            b'.' => {
                i += 1;
                let start = i;
                while i < p.len() && p[i] != b'.' && p[i] != b'[' {
                    i += 1;
                }
                if start == i {
                    return None;
                }
                comps.push(Comp::Key(&p[start..i]));
            }
            b'[' => {
                i += 1;
                if p.get(i) == Some(&b']') {
                    // Append only makes sense as the final component.
                    if i + 1 != p.len() {
                        return None;
                    }
                    i += 1;
                    comps.push(Comp::Append);
                } else {
                    let start = i;
                    while i < p.len() && p[i].is_ascii_digit() {
                        i += 1;
                    }
                    if start == i || p.get(i) != Some(&b']') {
                        return None;
                    }
                    let index = core::str::from_utf8(&p[start..i]).ok()?.parse().ok()?;
                    i += 1;
                    comps.push(Comp::Index(index));
                }
            }
            _ => return None,
        }
    }
    Some(comps)
}

fn render_prefix(comps: &[Comp], upto: usize) -> Vec<u8> {
    let mut pb = PathBuilder::new();
    for comp in &comps[..upto] {
        match comp {
            Comp::Key(k) => pb.push_key(k),
            Comp::Index(i) => pb.push_index(*i),
            Comp::Append => {}
        }
    }
    pb.as_bytes().to_vec()
}

/// The exact target's spans: value span (strings include their quotes) and
/// the deletion start (the key for object members, the value otherwise).
#[derive(Clone, Copy)]
struct Hit {
    vs: usize,
    ve: usize,
    start: usize,
}

/// What the walk saw at one path prefix.
#[derive(Default, Clone, Copy)]
struct PrefixSlot {
    /// Closing delimiter position and kind, for aggregate prefixes.
    end_token: Option<(usize, TokenKind)>,
    /// A scalar sits at this prefix.
    scalar: bool,
    /// End of the last direct child's span (string children include the
    /// closing quote).
    last_child_end: Option<usize>,
}

impl PrefixSlot {
    fn occupied(&self) -> bool {
        self.scalar || self.end_token.is_some()
    }
}

fn apply(
    buf: &[u8],
    out: &mut dyn Sink,
    path: &str,
    repl: Option<(&str, &[Arg])>,
) -> Result<bool, Error> {
    let Some(comps) = parse_path(path) else {
        out.put(buf)?;
        return Ok(false);
    };
    let n = comps.len();
    let append = matches!(comps.last(), Some(Comp::Append));
    let value_path = if append {
        None
    } else {
        Some(render_prefix(&comps, n))
    };
    let prefix_paths: Vec<Vec<u8>> = (0..n).map(|k| render_prefix(&comps, k)).collect();

    let mut found: Option<Hit> = None;
    let mut pending_key: Option<usize> = None;
    let mut slots: Vec<PrefixSlot> = vec![PrefixSlot::default(); n];

    walk(buf, |name, p, tok| {
        if let Some(target) = &value_path {
            if p == &target[..] {
                if tok.kind.is_begin() {
                    pending_key = match name {
                        Some(Name::Key { offset, .. }) => Some(offset),
                        _ => None,
                    };
                } else {
                    let (mut vs, mut ve) = (tok.offset, tok.end());
                    if tok.kind == TokenKind::String {
                        vs -= 1;
                        ve += 1;
                    }
                    let start = match (tok.kind, name) {
                        (TokenKind::ObjectEnd | TokenKind::ArrayEnd, _) => {
                            pending_key.take().unwrap_or(vs)
                        }
                        (_, Some(Name::Key { offset, .. })) => offset,
                        _ => vs,
                    };
                    found = Some(Hit { vs, ve, start });
                }
            }
        }
        if tok.kind.is_begin() {
            return;
        }
        for (slot, path_k) in slots.iter_mut().zip(&prefix_paths) {
            if p == &path_k[..] {
                match tok.kind {
                    TokenKind::ObjectEnd | TokenKind::ArrayEnd => {
                        slot.end_token = Some((tok.end() - 1, tok.kind));
                    }
                    _ => slot.scalar = true,
                }
            } else if is_direct_child(p, path_k) {
                let mut end = tok.end();
                if tok.kind == TokenKind::String {
                    end += 1;
                }
                slot.last_child_end = Some(end);
            }
        }
    })?;

    let Some((fmt, args)) = repl else {
        // Delete.
        if let Some(hit) = found {
            let (rs, re) = delete_range(buf, hit);
            out.put(&buf[..rs])?;
            out.put(&buf[re..])?;
            return Ok(true);
        }
        out.put(buf)?;
        return Ok(false);
    };

    if let Some(hit) = found {
        out.put(&buf[..hit.vs])?;
        printf(out, fmt, args)?;
        out.put(&buf[hit.ve..])?;
        return Ok(true);
    }

    if append {
        if let Some((close, TokenKind::ArrayEnd)) = slots[n - 1].end_token {
            match slots[n - 1].last_child_end {
                Some(end) => {
                    out.put(&buf[..end])?;
                    out.put(b",")?;
                    printf(out, fmt, args)?;
                    out.put(&buf[end..])?;
                }
                None => {
                    out.put(&buf[..close])?;
                    printf(out, fmt, args)?;
                    out.put(&buf[close..])?;
                }
            }
            return Ok(false);
        }
    }

    // Create the missing components inside the deepest existing prefix,
    // which must be an object; the remainder must be keys (plus at most the
    // trailing append).
    let deepest = (0..n).rev().find(|&k| slots[k].occupied());
    let Some(k) = deepest else {
        out.put(buf)?;
        return Ok(false);
    };
    let Some((close, TokenKind::ObjectEnd)) = slots[k].end_token else {
        out.put(buf)?;
        return Ok(false);
    };
    let mut keys: Vec<&[u8]> = Vec::new();
    for comp in &comps[k..] {
        match comp {
            Comp::Key(key) => keys.push(key),
            Comp::Append => {}
            Comp::Index(_) => {
                out.put(buf)?;
                return Ok(false);
            }
        }
    }
    if keys.is_empty() {
        out.put(buf)?;
        return Ok(false);
    }

    let mut open = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        open.push(b'"');
        open.extend_from_slice(key);
        open.extend_from_slice(b"\":");
        if i + 1 < keys.len() {
            open.push(b'{');
        }
    }
    if append {
        open.push(b'[');
    }
    let mut closing = Vec::new();
    if append {
        closing.push(b']');
    }
    closing.extend(core::iter::repeat(b'}').take(keys.len() - 1));

    match slots[k].last_child_end {
        Some(end) => {
            out.put(&buf[..end])?;
            out.put(b",")?;
            out.put(&open)?;
            printf(out, fmt, args)?;
            out.put(&closing)?;
            out.put(&buf[end..])?;
        }
        None => {
            out.put(&buf[..close])?;
            out.put(&open)?;
            printf(out, fmt, args)?;
            out.put(&closing)?;
            out.put(&buf[close..])?;
        }
    }
    Ok(false)
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n')
}

/// The byte range deletion removes: the hit plus its preceding comma when
/// one exists, else the following comma and the whitespace after it, else
/// (a lone child) the whitespace up to the container's closing delimiter.
fn delete_range(buf: &[u8], hit: Hit) -> (usize, usize) {
    let mut back = hit.start;
    while back > 0 && is_ws(buf[back - 1]) {
        back -= 1;
    }
    if back > 0 && buf[back - 1] == b',' {
        return (back - 1, hit.ve);
    }
    let mut fwd = hit.ve;
    while fwd < buf.len() && is_ws(buf[fwd]) {
        fwd += 1;
    }
    if fwd < buf.len() && buf[fwd] == b',' {
        fwd += 1;
        while fwd < buf.len() && is_ws(buf[fwd]) {
            fwd += 1;
        }
    }
    (hit.start, fwd)
}
