//! Listing documents shared by unit tests.

/// A small program: variables, a value, a condition and a call.
///
/// ```text
/// 0 | var x = 1;          x: ENV-DEF/DENV-DEF x1, 1: VAL-DEF/DVAL-DEF v1
/// 1 | var y = x;          y: ENV-DEF/DENV-DEF y1, x: ENV-USE/DENV-USE x1 (inside VAL-USE v1)
/// 2 | if (y) f(y);        cond: CON-DEF c1 > y: ENV-USE/DENV-USE y1, call: CALL-USE f1
/// 3 | function f(a) {}    f: CALL-DEF f1, a: ENV-DEF/DENV-DEF a1
/// 4 | return;             (no elements)
/// ```
pub(crate) const PROGRAM: &str = r#"{
  "rows": [
    { "line": 1, "text": "var x = 1;", "elements": [
      { "id": "x-def", "class": "ENV-DEF DENV-DEF", "address": "x1", "text": "x" },
      { "id": "one", "class": "VAL-DEF DVAL-DEF", "address": "v1", "text": "1" }
    ]},
    { "line": 2, "text": "var y = x;", "elements": [
      { "id": "y-def", "class": "ENV-DEF DENV-DEF", "address": "y1", "text": "y" },
      { "id": "x-val", "class": "VAL-USE DVAL-USE", "address": "v1", "text": "x", "children": [
        { "id": "x-use", "class": "ENV-USE DENV-USE", "address": "x1", "text": "x", "children": [
          { "id": "x-glyph", "class": "insert", "text": "x" }
        ]}
      ]}
    ]},
    { "line": 3, "text": "if (y) f(y);", "elements": [
      { "id": "cond", "class": "CON-DEF", "address": "c1", "text": "(y)", "children": [
        { "id": "y-use", "class": "ENV-USE DENV-USE", "address": "y1", "text": "y" }
      ]},
      { "id": "call", "class": "CALL-USE context-menu", "address": "f1", "text": "f(y)", "children": [
        { "id": "y-arg", "class": "ENV-USE DENV-USE", "address": "y1", "text": "y" }
      ]}
    ]},
    { "line": 4, "text": "function f(a) {}", "elements": [
      { "id": "f-def", "class": "CALL-DEF", "address": "f1", "text": "f" },
      { "id": "a-def", "class": "ENV-DEF DENV-DEF", "address": "a1", "text": "a" }
    ]},
    { "line": 5, "text": "return;", "elements": [] }
  ]
}"#;

/// Two definitions of `a1` whose address sequences differ.
pub(crate) const AMBIGUOUS: &str = r#"{
  "rows": [
    { "line": 1, "elements": [
      { "id": "d1", "class": "ENV-DEF DENV-DEF", "address": "a1,a2", "text": "f" }
    ]},
    { "line": 2, "elements": [
      { "id": "d2", "class": "ENV-DEF DENV-DEF", "address": "a1", "text": "f" }
    ]},
    { "line": 3, "elements": [
      { "id": "other", "class": "ENV-USE DENV-USE", "address": "zz", "text": "q" }
    ]},
    { "line": 4, "elements": [
      { "id": "u", "class": "ENV-USE DENV-USE", "address": "a1", "text": "f" }
    ]}
  ]
}"#;

/// Nested decoration inside tagged elements.
pub(crate) const NESTED: &str = r#"{
  "rows": [
    { "elements": [
      { "id": "outer", "class": "ENV-USE DENV-USE", "address": "a1", "children": [
        { "id": "inner", "class": "VAL-USE", "address": "v1", "children": [
          { "id": "leaf", "class": "insert" }
        ]}
      ]}
    ]}
  ]
}"#;

/// Def/use links matched on whole address lists.
///
/// ```text
/// 0 | def f / def g       f-def: DEF-tag f1, g-def: DEF-tag f1,g1
/// 1 | f(); f              f-call: USE-tag f1 > f-name, f-ref: USE-tag f1
/// 2 | def f again; g      f-redef: DEF-tag f1, g-use: USE-tag g1,f1
/// 3 | pass                plain (no tags)
/// ```
pub(crate) const LINKED: &str = r#"{
  "rows": [
    { "line": 1, "text": "def f / def g", "elements": [
      { "id": "f-def", "class": "DEF-tag", "address": "f1", "text": "f" },
      { "id": "g-def", "class": "DEF-tag", "address": "f1,g1", "text": "g" }
    ]},
    { "line": 2, "text": "f(); f", "elements": [
      { "id": "f-call", "class": "USE-tag", "address": "f1", "text": "f()", "children": [
        { "id": "f-name", "class": "insert", "text": "f" }
      ]},
      { "id": "f-ref", "class": "USE-tag", "address": "f1", "text": "f" }
    ]},
    { "line": 3, "text": "def f again; g", "elements": [
      { "id": "f-redef", "class": "DEF-tag", "address": "f1", "text": "f" },
      { "id": "g-use", "class": "USE-tag", "address": "g1,f1", "text": "g" }
    ]},
    { "line": 4, "text": "pass", "elements": [
      { "id": "plain", "text": "pass" }
    ]}
  ]
}"#;
