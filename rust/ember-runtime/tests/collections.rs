//! Copy-on-write and ordering properties of the list and mapping builtins.

use ember_runtime::registry;
use ember_runtime::Value;
use std::collections::HashMap;
use std::sync::Arc;

fn call(name: &str, args: &[Value]) -> Value {
    registry::call(name, args).unwrap_or_else(|| panic!("builtin {} not registered", name))
}

fn ints(xs: &[i64]) -> Value {
    Value::list(xs.iter().copied().map(Value::Int).collect())
}

fn ints_of(v: &Value) -> Vec<i64> {
    v.as_list()
        .unwrap_or_else(|| panic!("expected a list, got {}", v))
        .iter()
        .map(|x| x.as_int().unwrap_or_else(|| panic!("expected Integer, got {}", x)))
        .collect()
}

// ===========================================================================
// Lists
// ===========================================================================

#[test]
fn reverse_twice_is_identity() {
    let cases: [&[i64]; 4] = [&[], &[1], &[1, 2], &[3, 1, 4, 1, 5, 9]];
    for case in cases {
        let l = ints(case);
        let back = call("reverse", &[call("reverse", &[l])]);
        assert_eq!(ints_of(&back), case.to_vec());
    }
}

#[test]
fn sort_is_idempotent() {
    let l = Value::list(vec![
        Value::from("pear"),
        Value::Int(12),
        Value::Float(1.5),
        Value::from("apple"),
        Value::Int(2),
        Value::Null,
    ]);
    let once = call("sort", &[l]);
    let twice = call("sort", &[once.clone()]);
    assert_eq!(once.inspect(), twice.inspect());
    assert_eq!(once.inspect(), "[1.5, 12, 2, apple, null, pear]");
}

#[test]
fn sort_keeps_equal_renderings_in_input_order() {
    let l = Value::list(vec![Value::Int(7), Value::from("7"), Value::Int(3)]);
    let sorted = call("sort", &[l]);
    let items = sorted.as_list().unwrap();
    assert_eq!(items[0], Value::Int(3));
    assert_eq!(items[1], Value::Int(7));
    assert_eq!(items[2].as_str(), Some("7"));
}

#[test]
fn append_does_not_alias_the_argument() {
    let original = ints(&[1, 2]);
    let appended = call("append", &[original.clone(), Value::Int(3)]);
    assert_eq!(ints_of(&original), vec![1, 2]);
    assert_eq!(ints_of(&appended), vec![1, 2, 3]);

    if let (Value::List(a), Value::List(b)) = (&original, &appended) {
        assert!(!Arc::ptr_eq(a, b));
    } else {
        panic!("expected lists");
    }
}

#[test]
fn every_list_edit_leaves_input_intact() {
    let original = ints(&[5, 6, 7]);
    let edits: [(&str, Vec<Value>); 7] = [
        ("push", vec![original.clone(), Value::Int(8)]),
        ("prepend", vec![original.clone(), Value::Int(4)]),
        ("unshift", vec![original.clone(), Value::Int(4)]),
        ("pop", vec![original.clone()]),
        ("shift", vec![original.clone()]),
        ("reverse", vec![original.clone()]),
        ("concat", vec![original.clone(), ints(&[9])]),
    ];
    for (name, args) in edits {
        let out = call(name, &args);
        assert!(!out.is_error(), "{} failed: {}", name, out);
        assert_eq!(ints_of(&original), vec![5, 6, 7], "{} mutated its input", name);
    }
}

#[test]
fn pop_and_shift_drop_an_end() {
    let l = ints(&[1, 2, 3]);
    assert_eq!(ints_of(&call("pop", &[l.clone()])), vec![1, 2]);
    assert_eq!(ints_of(&call("shift", &[l])), vec![2, 3]);
    assert!(call("pop", &[ints(&[])]).is_error());
}

#[test]
fn strict_and_lenient_slice() {
    let l = ints(&[0, 1, 2, 3, 4]);

    assert_eq!(
        ints_of(&call("slice", &[l.clone(), Value::Int(1), Value::Int(3)])),
        vec![1, 2]
    );
    let out = call("slice", &[l.clone(), Value::Int(2), Value::Int(9)]);
    assert_eq!(
        out.error_message(),
        Some("slice: range [2, 9) out of bounds for length 5")
    );
    assert!(call("slice", &[l.clone(), Value::Int(-1), Value::Int(2)]).is_error());
    assert!(call("slice", &[l.clone(), Value::Int(3), Value::Int(1)]).is_error());

    assert_eq!(
        ints_of(&call("ListSlice", &[l.clone(), Value::Int(2), Value::Int(9)])),
        vec![2, 3, 4]
    );
    assert_eq!(
        ints_of(&call("ListSlice", &[l.clone(), Value::Int(-5), Value::Int(2)])),
        vec![0, 1]
    );
    assert!(ints_of(&call("ListSlice", &[l, Value::Int(3), Value::Int(1)])).is_empty());
}

#[test]
fn search_uses_value_equality() {
    let l = Value::list(vec![Value::Int(1), Value::Float(1.0), ints(&[1])]);
    assert_eq!(call("indexOf", &[l.clone(), Value::Float(1.0)]), Value::Int(1));
    assert_eq!(call("indexOf", &[l.clone(), Value::from("1")]), Value::Int(-1));
    // Lists never compare equal, not even structurally identical ones.
    assert_eq!(call("includes", &[l, ints(&[1])]), Value::Bool(false));
}

#[test]
fn accessors() {
    let l = ints(&[10, 20]);
    assert_eq!(call("get", &[l.clone(), Value::Int(1)]), Value::Int(20));
    assert!(call("get", &[l.clone(), Value::Int(2)]).is_error());
    assert_eq!(call("first", &[l.clone()]), Value::Int(10));
    assert_eq!(call("last", &[l]), Value::Int(20));
    assert!(call("first", &[ints(&[])]).is_null());
    assert_eq!(call("len", &[Value::from("héllo")]), Value::Int(5));
}

// ===========================================================================
// Mappings
// ===========================================================================

#[test]
fn map_set_is_copy_on_write() {
    let mut entries = HashMap::new();
    entries.insert("k".to_string(), Value::Int(1));
    let m = Value::map(entries);

    let updated = call("map_set", &[m.clone(), Value::from("k"), Value::Int(2)]);
    assert_eq!(call("map_get", &[m.clone(), Value::from("k")]), Value::Int(1));
    assert_eq!(call("map_get", &[updated, Value::from("k")]), Value::Int(2));

    let removed = call("map_delete", &[m.clone(), Value::from("k")]);
    assert_eq!(call("map_has", &[removed, Value::from("k")]), Value::Bool(false));
    assert_eq!(call("map_has", &[m.clone(), Value::from("k")]), Value::Bool(true));

    let cleared = call("map_clear", &[m.clone()]);
    assert_eq!(call("map_size", &[cleared]), Value::Int(0));
    assert_eq!(call("map_size", &[m]), Value::Int(1));
}

#[test]
fn keys_values_and_entries_agree() {
    let mut m = Value::map(HashMap::new());
    for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
        m = call("MapSet", &[m, Value::from(k), Value::Int(v)]);
    }

    let mut keys: Vec<String> = call("MapKeys", &[m.clone()])
        .as_list()
        .unwrap()
        .iter()
        .map(Value::inspect)
        .collect();
    keys.sort();
    assert_eq!(keys, vec!["a", "b", "c"]);

    let mut values = ints_of(&call("MapValues", &[m.clone()]));
    values.sort_unstable();
    assert_eq!(values, vec![1, 2, 3]);

    let entries = call("map_entries", &[m.clone()]);
    for entry in entries.as_list().unwrap() {
        let pair = entry.as_list().unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(call("MapGet", &[m.clone(), pair[0].clone()]), pair[1]);
    }
}
