//! The recursive get/set/delete/invoke engine over paths.
//!
//! Exact segments descend a single step; wild segments evaluate their
//! selector against the container's key universe and fan out, assembling
//! results in the container's shape. Failures deep in a fan-out abort the
//! whole operation; the only recovery boundary is `get_in_or`.

use indexmap::IndexMap;
use nestpath_keyset::{Key, Selector};

use crate::container::{ContainerMut, Shape};
use crate::error::PathError;
use crate::path::{Path, Segment, WildPath};
use crate::value::Value;

// --- Exact resolution ---

pub(crate) fn descend<'a>(root: &'a Value, segments: &[String]) -> Result<&'a Value, PathError> {
    let mut current = root;
    for segment in segments {
        current = step(current, segment)?;
    }
    Ok(current)
}

fn step<'a>(value: &'a Value, segment: &str) -> Result<&'a Value, PathError> {
    match value.container() {
        Some(container) => container.get_segment(segment),
        None => Err(no_attr(value.type_name(), segment)),
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &str) -> Result<&'a mut Value, PathError> {
    let type_name = value.type_name();
    match value.container_mut() {
        Some(container) => container.child_mut(segment),
        None => Err(no_attr(type_name, segment)),
    }
}

fn step_mut_key<'a>(value: &'a mut Value, key: &Key) -> Result<&'a mut Value, PathError> {
    let type_name = value.type_name();
    match value.container_mut() {
        Some(container) => container.child_mut_by_key(key),
        None => Err(no_attr(type_name, &key.to_string())),
    }
}

pub(crate) fn descend_mut<'a>(
    root: &'a mut Value,
    segments: &[String],
) -> Result<&'a mut Value, PathError> {
    let mut current = root;
    for segment in segments {
        current = step_mut(current, segment)?;
    }
    Ok(current)
}

fn no_attr(type_name: &str, segment: &str) -> PathError {
    PathError::Attr(format!(
        "value of type {} has no attribute '{}'",
        type_name, segment
    ))
}

fn container_of<'a>(value: &'a mut Value, segment: &str) -> Result<ContainerMut<'a>, PathError> {
    let type_name = value.type_name();
    value
        .container_mut()
        .ok_or_else(|| no_attr(type_name, segment))
}

/// Evaluates a wild segment against the keys present at `root`.
fn match_keys(
    root: &Value,
    raw: &str,
    selector: &Selector,
) -> Result<(Shape, Vec<Key>), PathError> {
    let container = root
        .container()
        .ok_or_else(|| no_attr(root.type_name(), raw))?;
    let matched = selector.evaluate(&container.keys())?;
    Ok((container.shape(), matched))
}

/// Assembles fan-out results in the shape of the container they came from;
/// objects collect into a mapping, there being no anonymous object shape.
fn assemble(shape: Shape, entries: Vec<(Key, Value)>) -> Value {
    match shape {
        Shape::Seq => Value::Seq(entries.into_iter().map(|(_, value)| value).collect()),
        Shape::Map | Shape::Object => Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect::<IndexMap<String, Value>>(),
        ),
    }
}

// --- Wild resolution ---

fn resolve(segments: &[Segment], root: &Value) -> Result<Value, PathError> {
    let Some((head, tail)) = segments.split_first() else {
        return Ok(root.clone());
    };
    match head {
        Segment::Exact(segment) => resolve(tail, step(root, segment)?),
        Segment::Wild { raw, selector } => {
            let container = root
                .container()
                .ok_or_else(|| no_attr(root.type_name(), raw))?;
            let matched = selector.evaluate(&container.keys())?;
            let shape = container.shape();
            let mut entries = Vec::with_capacity(matched.len());
            for key in matched {
                let child = container.get_key(&key)?;
                let value = if tail.is_empty() {
                    child.clone()
                } else {
                    resolve(tail, child)?
                };
                entries.push((key, value));
            }
            Ok(assemble(shape, entries))
        }
    }
}

/// Splits an incoming value across one matched key of a wild assignment:
/// key-wise for maps, positional for sequences aligned with the match count,
/// broadcast otherwise. Strings and bytes always broadcast.
fn distribute(value: &Value, key: &Key, position: usize, matches: usize) -> Result<Value, PathError> {
    match (key, value) {
        (Key::Name(name), Value::Map(entries)) => entries
            .get(name)
            .cloned()
            .ok_or_else(|| PathError::Key(format!("no key '{}' in the assigned value", name))),
        (Key::Index(_), Value::Seq(items)) if items.len() == matches => {
            Ok(items[position].clone())
        }
        _ => Ok(value.clone()),
    }
}

fn assign(segments: &[Segment], root: &mut Value, value: &Value) -> Result<(), PathError> {
    match segments {
        [] => Err(PathError::Type(
            "cannot replace the root value itself".to_string(),
        )),
        [Segment::Exact(segment)] => {
            container_of(root, segment)?.set_segment(segment, value.clone())
        }
        [Segment::Wild { raw, selector }] => {
            let (_, matched) = match_keys(root, raw, selector)?;
            let count = matched.len();
            for (position, key) in matched.iter().enumerate() {
                let sub = distribute(value, key, position, count)?;
                container_of(&mut *root, raw)?.set_key(key, sub)?;
            }
            Ok(())
        }
        [Segment::Exact(segment), tail @ ..] => {
            assign(tail, step_mut(root, segment)?, value)
        }
        [Segment::Wild { raw, selector }, tail @ ..] => {
            let (_, matched) = match_keys(root, raw, selector)?;
            let count = matched.len();
            for (position, key) in matched.iter().enumerate() {
                let sub = distribute(value, key, position, count)?;
                let child = step_mut_key(&mut *root, key)?;
                assign(tail, child, &sub)?;
            }
            Ok(())
        }
    }
}

fn remove(segments: &[Segment], root: &mut Value) -> Result<(), PathError> {
    match segments {
        [] => Err(PathError::Type(
            "cannot delete the root value itself".to_string(),
        )),
        [Segment::Exact(segment)] => container_of(root, segment)?.del_segment(segment),
        [Segment::Wild { raw, selector }] => {
            let (_, matched) = match_keys(root, raw, selector)?;
            container_of(root, raw)?.del_keys(&matched)
        }
        [Segment::Exact(segment), tail @ ..] => remove(tail, step_mut(root, segment)?),
        [Segment::Wild { raw, selector }, tail @ ..] => {
            let (_, matched) = match_keys(root, raw, selector)?;
            for key in &matched {
                let child = step_mut_key(&mut *root, key)?;
                remove(tail, child)?;
            }
            Ok(())
        }
    }
}

/// Invokes the callable in `slot`, storing its result back in place.
fn call_slot(slot: &mut Value, args: &[Value]) -> Result<Value, PathError> {
    let func = match slot {
        Value::Func(func) => func.clone(),
        other => {
            return Err(PathError::Type(format!(
                "value of type {} is not callable",
                other.type_name()
            )));
        }
    };
    let result = func.invoke(args)?;
    *slot = result.clone();
    Ok(result)
}

fn invoke(segments: &[Segment], root: &mut Value, args: &[Value]) -> Result<Value, PathError> {
    match segments {
        [] => call_slot(root, args),
        [Segment::Exact(segment), tail @ ..] => invoke(tail, step_mut(root, segment)?, args),
        [Segment::Wild { raw, selector }, tail @ ..] => {
            let (shape, matched) = match_keys(root, raw, selector)?;
            let mut entries = Vec::with_capacity(matched.len());
            for key in matched {
                let child = step_mut_key(&mut *root, &key)?;
                let result = invoke(tail, child, args)?;
                entries.push((key, result));
            }
            Ok(assemble(shape, entries))
        }
    }
}

// --- Public operations ---

impl Path {
    /// Returns the value at this path in `root`.
    pub fn get_in(&self, root: &Value) -> Result<Value, PathError> {
        descend(root, self.segments()).cloned()
    }

    /// Like `get_in`, but any lookup failure along the way yields `default`.
    pub fn get_in_or(&self, root: &Value, default: impl Into<Value>) -> Value {
        self.get_in(root).unwrap_or_else(|_| default.into())
    }

    /// Sets the value at this path; every segment but the last must already
    /// resolve.
    pub fn set_in(&self, root: &mut Value, value: impl Into<Value>) -> Result<(), PathError> {
        let Some((last, parents)) = self.segments().split_last() else {
            return Err(PathError::Type(
                "cannot replace the root value itself".to_string(),
            ));
        };
        let parent = descend_mut(root, parents)?;
        container_of(parent, last)?.set_segment(last, value.into())
    }

    /// Deletes the value at this path.
    pub fn del_in(&self, root: &mut Value) -> Result<(), PathError> {
        let Some((last, parents)) = self.segments().split_last() else {
            return Err(PathError::Type(
                "cannot delete the root value itself".to_string(),
            ));
        };
        let parent = descend_mut(root, parents)?;
        container_of(parent, last)?.del_segment(last)
    }

    /// Gets and then deletes, returning the removed value.
    pub fn pop_in(&self, root: &mut Value) -> Result<Value, PathError> {
        let value = self.get_in(root)?;
        self.del_in(root)?;
        Ok(value)
    }

    /// Whether a value is present at this path.
    pub fn has_in(&self, root: &Value) -> bool {
        descend(root, self.segments()).is_ok()
    }

    /// Invokes the callable at this path with positional arguments, storing
    /// and returning its result.
    pub fn call_in(&self, root: &mut Value, args: &[Value]) -> Result<Value, PathError> {
        let slot = descend_mut(root, self.segments())?;
        call_slot(slot, args)
    }
}

impl WildPath {
    /// Returns the value(s) at this path: a single value when every segment
    /// is exact, otherwise a container shaped like each fanned-out level. A
    /// wild segment matching nothing yields an empty container.
    pub fn get_in(&self, root: &Value) -> Result<Value, PathError> {
        resolve(self.parts(), root)
    }

    /// Like `get_in`, but any lookup failure along the way yields `default`.
    pub fn get_in_or(&self, root: &Value, default: impl Into<Value>) -> Value {
        self.get_in(root).unwrap_or_else(|_| default.into())
    }

    /// Sets the value(s) at this path. Wild segments distribute mappings
    /// key-wise and aligned sequences positionally, and broadcast anything
    /// else to every match.
    pub fn set_in(&self, root: &mut Value, value: impl Into<Value>) -> Result<(), PathError> {
        let value = value.into();
        assign(self.parts(), root, &value)
    }

    /// Deletes all value(s) at this path; wild sequence deletion is
    /// index-stable.
    pub fn del_in(&self, root: &mut Value) -> Result<(), PathError> {
        remove(self.parts(), root)
    }

    /// Gets and then deletes, returning the removed value(s).
    pub fn pop_in(&self, root: &mut Value) -> Result<Value, PathError> {
        let value = self.get_in(root)?;
        self.del_in(root)?;
        Ok(value)
    }

    /// Whether all value(s) at this path resolve.
    pub fn has_in(&self, root: &Value) -> bool {
        self.get_in(root).is_ok()
    }

    /// Invokes every callable this path resolves to with the same positional
    /// arguments, storing each result back at its matched position and
    /// returning the single or collected results.
    pub fn call_in(&self, root: &mut Value, args: &[Value]) -> Result<Value, PathError> {
        invoke(self.parts(), root, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Func, Record};
    use serde_json::json;

    fn fixture() -> Value {
        Value::from(json!({
            "a": 1,
            "b": [2, 3],
            "c": {"d": 4, "e": 5}
        }))
    }

    #[test]
    fn test_exact_get_set_del() {
        let mut root = fixture();
        assert_eq!(Path::parse("b.0").get_in(&root).unwrap(), Value::Int(2));
        assert_eq!(Path::parse("c.d").get_in(&root).unwrap(), Value::Int(4));

        Path::parse("b.0").set_in(&mut root, 11).unwrap();
        assert_eq!(Path::parse("b.0").get_in(&root).unwrap(), Value::Int(11));

        Path::parse("b.0").del_in(&mut root).unwrap();
        assert_eq!(
            Path::parse("b").get_in(&root).unwrap(),
            Value::from(vec![Value::Int(3)])
        );
    }

    #[test]
    fn test_empty_path_is_the_root() {
        let root = fixture();
        assert_eq!(Path::parse("").get_in(&root).unwrap(), root);
        assert_eq!(
            WildPath::parse("").unwrap().get_in(&root).unwrap(),
            root
        );
        assert!(Path::parse("").set_in(&mut fixture(), 1).is_err());
    }

    #[test]
    fn test_lookup_error_classes() {
        let root = fixture();
        assert!(matches!(
            Path::parse("c.x").get_in(&root),
            Err(PathError::Key(_))
        ));
        assert!(matches!(
            Path::parse("b.7").get_in(&root),
            Err(PathError::Index(_))
        ));
        assert!(matches!(
            Path::parse("a.x").get_in(&root),
            Err(PathError::Attr(_))
        ));
        let object = Value::from(Record::new().with("x", 1));
        assert!(matches!(
            Path::parse("y").get_in(&object),
            Err(PathError::Attr(_))
        ));
    }

    #[test]
    fn test_get_in_or_default() {
        let root = fixture();
        assert_eq!(Path::parse("c.x").get_in_or(&root, 0), Value::Int(0));
        assert_eq!(Path::parse("c.d").get_in_or(&root, 0), Value::Int(4));
        let wild = WildPath::parse("b.9|1").unwrap();
        assert_eq!(wild.get_in_or(&root, Value::Null), Value::from(vec![Value::Int(3)]));
    }

    #[test]
    fn test_wild_get_shapes() {
        let root = fixture();
        assert_eq!(
            WildPath::parse("b.*").unwrap().get_in(&root).unwrap(),
            Value::from(vec![Value::Int(2), Value::Int(3)])
        );
        assert_eq!(
            WildPath::parse("c.*").unwrap().get_in(&root).unwrap(),
            Value::from(json!({"d": 4, "e": 5}))
        );
        let object = Value::from(Record::new().with("d", 4).with("x", 5));
        assert_eq!(
            WildPath::parse("d|e").unwrap().get_in(&object).unwrap(),
            Value::from(json!({"d": 4}))
        );
    }

    #[test]
    fn test_wild_empty_match_is_empty_container() {
        let root = fixture();
        assert_eq!(
            WildPath::parse("c.z*").unwrap().get_in(&root).unwrap(),
            Value::from(json!({}))
        );
        assert_eq!(
            WildPath::parse("b.5:9").unwrap().get_in(&root).unwrap(),
            Value::from(json!([]))
        );
    }

    #[test]
    fn test_wild_set_broadcast_and_aligned() {
        let mut root = fixture();
        WildPath::parse("b.*").unwrap().set_in(&mut root, 9).unwrap();
        assert_eq!(
            Path::parse("b").get_in(&root).unwrap(),
            Value::from(vec![Value::Int(9), Value::Int(9)])
        );

        let mut root = fixture();
        let aligned = Value::from(vec![Value::Int(7), Value::Int(8)]);
        WildPath::parse("b.*").unwrap().set_in(&mut root, aligned.clone()).unwrap();
        assert_eq!(Path::parse("b").get_in(&root).unwrap(), aligned);
    }

    #[test]
    fn test_wild_set_distributes_maps_by_key() {
        let mut root = fixture();
        WildPath::parse("c.d|e")
            .unwrap()
            .set_in(&mut root, Value::from(json!({"d": 40, "e": 50})))
            .unwrap();
        assert_eq!(
            Path::parse("c").get_in(&root).unwrap(),
            Value::from(json!({"d": 40, "e": 50}))
        );

        // A missing key in the assigned value is a lookup failure.
        let mut root = fixture();
        assert!(matches!(
            WildPath::parse("c.d|e")
                .unwrap()
                .set_in(&mut root, Value::from(json!({"d": 40}))),
            Err(PathError::Key(_))
        ));
    }

    #[test]
    fn test_strings_broadcast_whole() {
        let mut root = fixture();
        WildPath::parse("b.*").unwrap().set_in(&mut root, "xy").unwrap();
        assert_eq!(
            Path::parse("b").get_in(&root).unwrap(),
            Value::from(vec![Value::from("xy"), Value::from("xy")])
        );
    }

    #[test]
    fn test_wild_del_and_pop() {
        let mut root = fixture();
        let wild = WildPath::parse("b.*").unwrap();
        let popped = wild.pop_in(&mut root).unwrap();
        assert_eq!(popped, Value::from(vec![Value::Int(2), Value::Int(3)]));
        assert_eq!(wild.get_in(&root).unwrap(), Value::from(json!([])));
    }

    #[test]
    fn test_call_in_exact_and_wild() {
        let double = Func::new(|args| {
            let n = args.first().and_then(Value::as_int).unwrap_or(0);
            Ok(Value::Int(n * 2))
        });
        let mut root = Value::from(json!({"ops": {}}));
        Path::parse("ops.f").set_in(&mut root, Value::from(double.clone())).unwrap();
        Path::parse("ops.g").set_in(&mut root, Value::from(double)).unwrap();

        let result = WildPath::parse("ops.*")
            .unwrap()
            .call_in(&mut root, &[Value::Int(21)])
            .unwrap();
        assert_eq!(result, Value::from(json!({"f": 42, "g": 42})));
        // Results are written back over the callables.
        assert_eq!(
            Path::parse("ops.f").get_in(&root).unwrap(),
            Value::Int(42)
        );
    }

    #[test]
    fn test_call_in_rejects_non_callable() {
        let mut root = fixture();
        assert!(matches!(
            Path::parse("a").call_in(&mut root, &[]),
            Err(PathError::Type(_))
        ));
    }

    #[test]
    fn test_exact_equals_wild_for_plain_segments() {
        let root = fixture();
        for path in ["a", "b.0", "c.d", "b.-1"] {
            assert_eq!(
                Path::parse(path).get_in(&root).unwrap(),
                WildPath::parse(path).unwrap().get_in(&root).unwrap(),
                "path {}",
                path
            );
        }
    }
}
