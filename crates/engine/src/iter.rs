//! Depth-first enumeration of nested structures, and the flatten utility.

use crate::path::Path;
use crate::value::Value;

/// Iterator over `(Path, Value)` pairs of a nested structure in depth-first
/// order, parents before children. The root itself is never yielded.
pub struct Items<'a> {
    stack: Vec<(Path, &'a Value)>,
    all: bool,
}

impl<'a> Items<'a> {
    pub(crate) fn new(root: &'a Value, all: bool) -> Self {
        let mut stack = Vec::new();
        push_children(&Path::parse(""), root, &mut stack);
        Self { stack, all }
    }
}

fn push_children<'a>(path: &Path, value: &'a Value, stack: &mut Vec<(Path, &'a Value)>) {
    let Some(container) = value.container() else {
        return;
    };
    // Reversed so the leftmost child is popped first.
    for key in container.keys().iter().rev() {
        if let Ok(child) = container.get_key(key) {
            stack.push((path.join(key.to_string()), child));
        }
    }
}

impl<'a> Iterator for Items<'a> {
    type Item = (Path, Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, value)) = self.stack.pop() {
            let is_container = value.container().is_some();
            if is_container {
                push_children(&path, value, &mut self.stack);
            }
            if !is_container || self.all {
                return Some((path, value.clone()));
            }
        }
        None
    }
}

impl Path {
    /// Enumerates every `(Path, Value)` pair under `root`. With `all` false
    /// only leaf values are yielded; with `all` true every intermediate
    /// container is yielded (as a copy) before its contents, so replaying the
    /// pairs through `set_in` into an empty mapping reconstructs the
    /// structure.
    pub fn items(root: &Value, all: bool) -> Items<'_> {
        Items::new(root, all)
    }

    /// The paths of every leaf value under `root`.
    pub fn paths(root: &Value) -> impl Iterator<Item = Path> + '_ {
        Items::new(root, false).map(|(path, _)| path)
    }
}

/// Recursively collapses nested mappings and sequences into one flat list.
/// Strings and byte strings are atomic; objects and callables are leaves.
/// `depth` limits how many container levels are collapsed (`None` means
/// unbounded).
pub fn flatten(value: &Value, depth: Option<usize>) -> Vec<Value> {
    match value {
        Value::Str(_) | Value::Bytes(_) => vec![value.clone()],
        Value::Map(entries) if depth != Some(0) => entries
            .values()
            .flat_map(|child| flatten(child, depth.map(|d| d - 1)))
            .collect(),
        Value::Seq(items) if depth != Some(0) => items
            .iter()
            .flat_map(|child| flatten(child, depth.map(|d| d - 1)))
            .collect(),
        other => vec![other.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;
    use serde_json::json;

    fn nested() -> Value {
        Value::from(json!({
            "a": 1,
            "b": [2, 3],
            "c": {"d": 4, "e": [5, "six"]}
        }))
    }

    #[test]
    fn test_items_leaves_only() {
        let root = nested();
        let items: Vec<(Path, Value)> = Path::items(&root, false).collect();
        let paths: Vec<String> = items.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(paths, vec!["a", "b.0", "b.1", "c.d", "c.e.0", "c.e.1"]);
    }

    #[test]
    fn test_items_all_yields_parents_first() {
        let root = nested();
        let paths: Vec<String> = Path::items(&root, true)
            .map(|(p, _)| p.to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["a", "b", "b.0", "b.1", "c", "c.d", "c.e", "c.e.0", "c.e.1"]
        );
    }

    #[test]
    fn test_items_enumerates_objects() {
        let root = Value::from(Record::new().with("x", 1).with("y", Value::from(json!([2]))));
        let paths: Vec<String> = Path::items(&root, false)
            .map(|(p, _)| p.to_string())
            .collect();
        assert_eq!(paths, vec!["x", "y.0"]);
    }

    #[test]
    fn test_strings_are_not_traversed() {
        let root = Value::from(json!({"name": "meeting"}));
        let items: Vec<(Path, Value)> = Path::items(&root, false).collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].1, Value::from("meeting"));
    }

    #[test]
    fn test_flatten_unbounded() {
        let root = nested();
        assert_eq!(
            flatten(&root, None),
            vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(3),
                Value::Int(4),
                Value::Int(5),
                Value::from("six")
            ]
        );
    }

    #[test]
    fn test_flatten_depth_limited() {
        let root = Value::from(json!([[1, [2]], [3]]));
        assert_eq!(
            flatten(&root, Some(1)),
            vec![
                Value::from(json!([1, [2]])),
                Value::from(json!([3])),
            ]
        );
        assert_eq!(flatten(&root, Some(0)), vec![root.clone()]);
    }
}
