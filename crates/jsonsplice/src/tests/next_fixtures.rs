use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{elems, keys, TokenKind};

const DOC: &[u8] = b"{ \"a\": [], \"b\": [ 1, {} ], \"c\": true }";

#[test]
fn object_members_in_order() {
    let rendered: Vec<String> = keys(DOC, "")
        .unwrap()
        .map(|(k, v)| {
            format!(
                "[{}] -> [{}]",
                String::from_utf8_lossy(k.text),
                String::from_utf8_lossy(v.text)
            )
        })
        .collect();
    assert_eq!(rendered, ["[a] -> [[]]", "[b] -> [[ 1, {} ]]", "[c] -> [true]"]);
}

#[test]
fn array_elements_with_indices() {
    let rendered: Vec<String> = elems(DOC, ".b")
        .unwrap()
        .map(|(i, v)| format!("[{i}] -> [{}]", String::from_utf8_lossy(v.text)))
        .collect();
    assert_eq!(rendered, ["[0] -> [1]", "[1] -> [{}]"]);
}

#[test]
fn nested_object_members() {
    let doc = b"{ \"a\": [], \"b\": { \"c\": true, \"d\": 1234 } }";
    let rendered: Vec<String> = keys(doc, ".b")
        .unwrap()
        .map(|(k, v)| {
            format!(
                "[{}] -> [{}]",
                String::from_utf8_lossy(k.text),
                String::from_utf8_lossy(v.text)
            )
        })
        .collect();
    assert_eq!(rendered, ["[c] -> [true]", "[d] -> [1234]"]);
}

#[test]
fn key_tokens_are_string_spans() {
    let (k, v) = keys(DOC, "").unwrap().next().unwrap();
    assert_eq!(k.kind, TokenKind::String);
    assert_eq!(k.text, b"a");
    assert_eq!(&DOC[k.offset..k.end()], b"a");
    assert_eq!(v.kind, TokenKind::ArrayEnd);
}

#[test]
fn mismatched_containers_enumerate_nothing() {
    assert_eq!(keys(DOC, ".b").unwrap().count(), 0);
    assert_eq!(elems(DOC, "").unwrap().count(), 0);
    assert_eq!(keys(DOC, ".missing").unwrap().count(), 0);
}
