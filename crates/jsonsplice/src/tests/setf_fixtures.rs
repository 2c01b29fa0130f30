use alloc::string::String;
use alloc::vec::Vec;

use crate::{setf, unsetf, Arg};

const DOC: &[u8] = b"{ \"a\": 123, \"b\": [ 1 ], \"c\": true }";

fn set(doc: &[u8], path: &str, fmt: &str, args: &[Arg]) -> (bool, String) {
    let mut out = Vec::new();
    let hit = setf(doc, &mut out, path, fmt, args).unwrap();
    (hit, String::from_utf8(out).unwrap())
}

fn unset(doc: &[u8], path: &str) -> (bool, String) {
    let mut out = Vec::new();
    let hit = unsetf(doc, &mut out, path).unwrap();
    (hit, String::from_utf8(out).unwrap())
}

#[test]
fn replaces_member_values() {
    assert_eq!(
        set(DOC, ".a", "%d", &[Arg::Int(7)]),
        (true, String::from("{ \"a\": 7, \"b\": [ 1 ], \"c\": true }"))
    );
    assert_eq!(
        set(DOC, ".b", "%B", &[Arg::Int(0)]),
        (true, String::from("{ \"a\": 123, \"b\": false, \"c\": true }"))
    );
    assert_eq!(
        set(DOC, ".b[0]", "%d", &[Arg::Int(2)]),
        (true, String::from("{ \"a\": 123, \"b\": [ 2 ], \"c\": true }"))
    );
}

#[test]
fn replaces_string_values_with_their_quotes() {
    let doc = b"{ \"a\": \"old\" }";
    assert_eq!(
        set(doc, ".a", "%Q", &[Arg::Str("new")]),
        (true, String::from("{ \"a\": \"new\" }"))
    );
}

#[test]
fn deletes_first_member_with_following_comma() {
    assert_eq!(
        unset(DOC, ".a"),
        (true, String::from("{ \"b\": [ 1 ], \"c\": true }"))
    );
}

#[test]
fn deletes_last_member_with_preceding_comma() {
    assert_eq!(
        unset(DOC, ".c"),
        (true, String::from("{ \"a\": 123, \"b\": [ 1 ] }"))
    );
}

#[test]
fn deletes_lone_array_element() {
    assert_eq!(
        unset(DOC, ".b[0]"),
        (true, String::from("{ \"a\": 123, \"b\": [ ], \"c\": true }"))
    );
}

#[test]
fn deleting_missing_keys_copies_through() {
    let plain = b"{\"a\":1}";
    assert_eq!(unset(plain, ".d"), (false, String::from("{\"a\":1}")));
    assert_eq!(
        unset(DOC, ".d"),
        (false, String::from_utf8(DOC.to_vec()).unwrap())
    );
}

#[test]
fn replaces_the_whole_root() {
    assert_eq!(set(DOC, "", "%d", &[Arg::Int(123)]), (true, String::from("123")));
}

#[test]
fn creates_missing_nested_keys() {
    assert_eq!(
        set(DOC, ".d.e", "%d", &[Arg::Int(8)]),
        (
            false,
            String::from("{ \"a\": 123, \"b\": [ 1 ], \"c\": true,\"d\":{\"e\":8} }")
        )
    );
}

#[test]
fn appends_to_an_existing_array() {
    assert_eq!(
        set(DOC, ".b[]", "%d", &[Arg::Int(2)]),
        (
            false,
            String::from("{ \"a\": 123, \"b\": [ 1,2 ], \"c\": true }")
        )
    );
}

#[test]
fn appends_into_an_empty_array() {
    let doc = b"{\"b\":[]}";
    assert_eq!(
        set(doc, ".b[]", "%d", &[Arg::Int(1)]),
        (false, String::from("{\"b\":[1]}"))
    );
}

#[test]
fn creates_an_array_when_appending_to_a_missing_key() {
    assert_eq!(
        set(DOC, ".d[]", "%d", &[Arg::Int(3)]),
        (
            false,
            String::from("{ \"a\": 123, \"b\": [ 1 ], \"c\": true,\"d\":[3] }")
        )
    );
}

#[test]
fn creates_inside_an_empty_object() {
    let doc = b"{}";
    assert_eq!(
        set(doc, ".x", "%d", &[Arg::Int(1)]),
        (false, String::from("{\"x\":1}"))
    );
}

#[test]
fn missing_indexed_components_do_not_mutate() {
    assert_eq!(
        set(DOC, ".x[0]", "%d", &[Arg::Int(1)]),
        (false, String::from_utf8(DOC.to_vec()).unwrap())
    );
}

#[test]
fn deletes_first_array_element_with_following_comma() {
    let doc = b"{\"b\":[1, 2, 3]}";
    assert_eq!(
        unset(doc, ".b[0]"),
        (true, String::from("{\"b\":[2, 3]}"))
    );
    assert_eq!(
        unset(doc, ".b[2]"),
        (true, String::from("{\"b\":[1, 2]}"))
    );
}
