mod common;

use common::{init_logging, simple};
use nestpath::{Path, PathError, Record, Value};
use serde_json::json;

#[test]
fn test_display_round_trips() {
    let path = Path::parse("items.0.duration");
    assert_eq!(path.to_string(), "items.0.duration");
    assert_eq!(Path::parse("").to_string(), "");
}

#[test]
fn test_slice_and_concat() {
    let path = Path::parse("1.a.2.b.3.c");
    assert_eq!(path.slice(..2), Path::parse("1.a"));
    assert_eq!(path.slice(1..5), Path::parse("a.2.b.3"));
    assert_eq!(path.slice(2..), Path::parse("2.b.3.c"));
    assert_eq!(
        path.slice(..3).concat(&path.slice(3..)),
        path
    );
}

#[test]
fn test_basic_get() {
    init_logging();
    let map = Value::from(json!({"a": 1}));
    let list = Value::from(json!([0, 1]));
    let object = Value::from(Record::new().with("a", 1));
    assert_eq!(Path::parse("a").get_in(&map).unwrap(), Value::Int(1));
    assert_eq!(Path::parse("1").get_in(&list).unwrap(), Value::Int(1));
    assert_eq!(Path::parse("-1").get_in(&list).unwrap(), Value::Int(1));
    assert_eq!(Path::parse("a").get_in(&object).unwrap(), Value::Int(1));
}

#[test]
fn test_basic_set() {
    let mut map = Value::from(json!({"a": 1}));
    let mut list = Value::from(json!([0, 1]));
    let mut object = Value::from(Record::new().with("a", 1));
    Path::parse("a").set_in(&mut map, 0).unwrap();
    Path::parse("1").set_in(&mut list, 0).unwrap();
    Path::parse("a").set_in(&mut object, 0).unwrap();
    assert_eq!(Path::parse("a").get_in(&map).unwrap(), Value::Int(0));
    assert_eq!(Path::parse("1").get_in(&list).unwrap(), Value::Int(0));
    assert_eq!(Path::parse("a").get_in(&object).unwrap(), Value::Int(0));
}

#[test]
fn test_basic_del() {
    let mut map = Value::from(json!({"a": 1}));
    let mut list = Value::from(json!([0, 1]));
    let mut object = Value::from(Record::new().with("a", 1));
    Path::parse("a").del_in(&mut map).unwrap();
    Path::parse("1").del_in(&mut list).unwrap();
    Path::parse("a").del_in(&mut object).unwrap();
    assert_eq!(map, Value::from(json!({})));
    assert_eq!(list, Value::from(json!([0])));
    assert_eq!(object, Value::from(Record::new()));
}

#[test]
fn test_longer_get() {
    let s = simple();
    assert_eq!(Path::parse("b.0").get_in(&s).unwrap(), Value::Int(2));
    assert_eq!(Path::parse("c.d").get_in(&s).unwrap(), Value::Int(4));
    assert_eq!(Path::parse("d.e").get_in(&s).unwrap(), Value::Int(6));
    assert_eq!(Path::parse("e.1.b").get_in(&s).unwrap(), Value::Int(9));
}

#[test]
fn test_longer_set() {
    let mut s = simple();
    for path in ["b.0", "c.d", "d.e"] {
        let path = Path::parse(path);
        path.set_in(&mut s, 11).unwrap();
        assert_eq!(path.get_in(&s).unwrap(), Value::Int(11));
    }
}

#[test]
fn test_longer_del() {
    let mut s = simple();
    Path::parse("b.0").del_in(&mut s).unwrap();
    assert_eq!(Path::parse("b").get_in(&s).unwrap(), Value::from(json!([3])));
    Path::parse("c.d").del_in(&mut s).unwrap();
    assert_eq!(
        Path::parse("c").get_in(&s).unwrap(),
        Value::from(json!({"e": 5}))
    );
    Path::parse("d.e").del_in(&mut s).unwrap();
    assert_eq!(
        Path::parse("d").get_in(&s).unwrap(),
        Value::from(Record::new())
    );
}

#[test]
fn test_set_inserts_new_map_keys() {
    let mut s = simple();
    Path::parse("c.f").set_in(&mut s, 10).unwrap();
    assert_eq!(Path::parse("c.f").get_in(&s).unwrap(), Value::Int(10));
}

#[test]
fn test_exceptions() {
    let s = simple();
    assert!(matches!(
        Path::parse("e.1.a").get_in(&s),
        Err(PathError::Key(_))
    ));
    assert!(matches!(
        Path::parse("e.2.a").get_in(&s),
        Err(PathError::Index(_))
    ));
    assert!(matches!(
        Path::parse("f.3").get_in(&s),
        Err(PathError::Attr(_))
    ));
    // Descending through a leaf is an attribute failure, not a crash.
    assert!(matches!(
        Path::parse("a.b.c").get_in(&s),
        Err(PathError::Attr(_))
    ));
    // All three classes are lookup failures.
    for path in ["e.1.a", "e.2.a", "f.3"] {
        assert!(Path::parse(path).get_in(&s).unwrap_err().is_lookup());
    }
}

#[test]
fn test_has_in() {
    let s = simple();
    assert!(Path::parse("e.1.b").has_in(&s));
    assert!(!Path::parse("e.1.a").has_in(&s));
    assert!(!Path::parse("e.2.a").has_in(&s));
    assert!(!Path::parse("f.3").has_in(&s));
}

#[test]
fn test_pop_in() {
    let mut s = simple();
    assert_eq!(Path::parse("c.d").pop_in(&mut s).unwrap(), Value::Int(4));
    assert!(!Path::parse("c.d").has_in(&s));
}

#[test]
fn test_get_in_or() {
    let s = simple();
    assert_eq!(Path::parse("c.d").get_in_or(&s, -1), Value::Int(4));
    assert_eq!(Path::parse("c.x").get_in_or(&s, -1), Value::Int(-1));
    assert_eq!(Path::parse("e.5.b").get_in_or(&s, -1), Value::Int(-1));
}

#[test]
fn test_empty_path_resolves_to_root() {
    let s = simple();
    assert_eq!(Path::parse("").get_in(&s).unwrap(), s);
}

#[test]
fn test_idempotent_read() {
    let s = simple();
    let path = Path::parse("e.0.b");
    assert_eq!(path.get_in(&s).unwrap(), path.get_in(&s).unwrap());
}
