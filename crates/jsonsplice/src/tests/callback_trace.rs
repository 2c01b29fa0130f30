use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Write as _;

use crate::{walk, Name};

/// Renders every callback invocation on one line, the way a caller sees the
/// event stream.
fn trace(doc: &[u8]) -> String {
    let mut out = String::new();
    walk(doc, |name, path, tok| {
        let name = match name {
            None => "<none>".to_string(),
            Some(Name::Key { text, .. }) => String::from_utf8_lossy(text).into_owned(),
            Some(Name::Index(i)) => i.to_string(),
        };
        writeln!(
            out,
            "name:'{}', path:'{}', kind:{:?}, value:'{}'",
            name,
            String::from_utf8_lossy(path),
            tok.kind,
            String::from_utf8_lossy(tok.text),
        )
        .unwrap();
    })
    .unwrap();
    out
}

#[test]
fn reports_names_paths_and_spans() {
    let doc = "{\"c\":[\"foo\", \"bar\", {\"a\":9, \"b\": \"x\"}], \
               \"mynull\": null, \"mytrue\": true, \"myfalse\": false}";

    let expected = format!(
        "name:'<none>', path:'', kind:ObjectBegin, value:''\n\
         name:'c', path:'.c', kind:ArrayBegin, value:''\n\
         name:'0', path:'.c[0]', kind:String, value:'foo'\n\
         name:'1', path:'.c[1]', kind:String, value:'bar'\n\
         name:'2', path:'.c[2]', kind:ObjectBegin, value:''\n\
         name:'a', path:'.c[2].a', kind:Number, value:'9'\n\
         name:'b', path:'.c[2].b', kind:String, value:'x'\n\
         name:'<none>', path:'.c[2]', kind:ObjectEnd, value:'{{\"a\":9, \"b\": \"x\"}}'\n\
         name:'<none>', path:'.c', kind:ArrayEnd, value:'[\"foo\", \"bar\", {{\"a\":9, \"b\": \"x\"}}]'\n\
         name:'mynull', path:'.mynull', kind:Null, value:'null'\n\
         name:'mytrue', path:'.mytrue', kind:True, value:'true'\n\
         name:'myfalse', path:'.myfalse', kind:False, value:'false'\n\
         name:'<none>', path:'', kind:ObjectEnd, value:'{doc}'\n"
    );
    assert_eq!(trace(doc.as_bytes()), expected);
}

#[test]
fn long_keys_clip_the_path_but_not_the_name() {
    let key: String = core::iter::repeat('Z').take(100).collect();
    let doc = format!("{{\"{key}\": {{}}, \"next\": {{}}}}");

    // "." plus 59 key bytes fill the 60-byte budget.
    let clipped: String = core::iter::once('.').chain(key.chars().take(59)).collect();

    let expected = format!(
        "name:'<none>', path:'', kind:ObjectBegin, value:''\n\
         name:'{key}', path:'{clipped}', kind:ObjectBegin, value:''\n\
         name:'<none>', path:'{clipped}', kind:ObjectEnd, value:'{{}}'\n\
         name:'next', path:'.next', kind:ObjectBegin, value:''\n\
         name:'<none>', path:'.next', kind:ObjectEnd, value:'{{}}'\n\
         name:'<none>', path:'', kind:ObjectEnd, value:'{doc}'\n"
    );
    assert_eq!(trace(doc.as_bytes()), expected);
}

#[test]
fn root_array_elements_use_bracket_paths() {
    let doc = b"[1, [2]]";
    let expected = "name:'<none>', path:'', kind:ArrayBegin, value:''\n\
                    name:'0', path:'[0]', kind:Number, value:'1'\n\
                    name:'1', path:'[1]', kind:ArrayBegin, value:''\n\
                    name:'0', path:'[1][0]', kind:Number, value:'2'\n\
                    name:'<none>', path:'[1]', kind:ArrayEnd, value:'[2]'\n\
                    name:'<none>', path:'', kind:ArrayEnd, value:'[1, [2]]'\n";
    assert_eq!(trace(doc), expected);
}
