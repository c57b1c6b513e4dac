//! Uniform read/write dispatch over the three container shapes.
//!
//! The walking engine never branches on concrete value variants; every
//! container touch goes through [`ContainerRef`] / [`ContainerMut`], keeping
//! the three-way dispatch explicit and exhaustive in one place.

use std::collections::HashSet;

use indexmap::IndexMap;
use nestpath_keyset::Key;

use crate::error::PathError;
use crate::value::{FieldAccess, Value};

/// The shape of a container, used to assemble wild fan-out results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Map,
    Seq,
    Object,
}

/// Read-only dispatch over a container value.
pub enum ContainerRef<'a> {
    Map(&'a IndexMap<String, Value>),
    Seq(&'a [Value]),
    Object(&'a dyn FieldAccess),
}

/// Mutable dispatch over a container value.
pub enum ContainerMut<'a> {
    Map(&'a mut IndexMap<String, Value>),
    Seq(&'a mut Vec<Value>),
    Object(&'a mut dyn FieldAccess),
}

impl Value {
    /// Classifies this value as a container, if it is one.
    pub fn container(&self) -> Option<ContainerRef<'_>> {
        match self {
            Value::Map(entries) => Some(ContainerRef::Map(entries)),
            Value::Seq(items) => Some(ContainerRef::Seq(items)),
            Value::Object(object) => Some(ContainerRef::Object(object.as_ref())),
            _ => None,
        }
    }

    pub fn container_mut(&mut self) -> Option<ContainerMut<'_>> {
        match self {
            Value::Map(entries) => Some(ContainerMut::Map(entries)),
            Value::Seq(items) => Some(ContainerMut::Seq(items)),
            Value::Object(object) => Some(ContainerMut::Object(object.as_mut())),
            _ => None,
        }
    }
}

impl<'a> ContainerRef<'a> {
    pub fn shape(&self) -> Shape {
        match self {
            ContainerRef::Map(_) => Shape::Map,
            ContainerRef::Seq(_) => Shape::Seq,
            ContainerRef::Object(_) => Shape::Object,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ContainerRef::Map(entries) => entries.len(),
            ContainerRef::Seq(items) => items.len(),
            ContainerRef::Object(object) => object.field_names().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The ordered key universe present at this container.
    pub fn keys(&self) -> Vec<Key> {
        match self {
            ContainerRef::Map(entries) => entries.keys().cloned().map(Key::Name).collect(),
            ContainerRef::Seq(items) => (0..items.len()).map(Key::Index).collect(),
            ContainerRef::Object(object) => {
                object.field_names().into_iter().map(Key::Name).collect()
            }
        }
    }

    /// Looks up a key as produced by [`keys`](Self::keys) on this container.
    pub fn get_key(&self, key: &Key) -> Result<&'a Value, PathError> {
        match (self, key) {
            (ContainerRef::Map(entries), Key::Name(name)) => entries
                .get(name)
                .ok_or_else(|| PathError::Key(format!("no key '{}'", name))),
            (ContainerRef::Seq(items), Key::Index(index)) => items.get(*index).ok_or_else(|| {
                PathError::Index(format!("index {} out of range for length {}", index, items.len()))
            }),
            (ContainerRef::Object(object), Key::Name(name)) => object
                .field(name)
                .ok_or_else(|| PathError::Attr(format!("no attribute '{}'", name))),
            (_, key) => Err(PathError::Type(format!(
                "key '{}' does not fit this container",
                key
            ))),
        }
    }

    /// Exact-segment lookup: a map key, a (possibly negative) sequence
    /// index, or a field name.
    pub fn get_segment(&self, segment: &str) -> Result<&'a Value, PathError> {
        match self {
            ContainerRef::Map(entries) => entries
                .get(segment)
                .ok_or_else(|| PathError::Key(format!("no key '{}'", segment))),
            ContainerRef::Seq(items) => {
                let index = resolve_index(segment, items.len())?;
                Ok(&items[index])
            }
            ContainerRef::Object(object) => object
                .field(segment)
                .ok_or_else(|| PathError::Attr(format!("no attribute '{}'", segment))),
        }
    }
}

impl<'a> ContainerMut<'a> {
    pub fn keys(&self) -> Vec<Key> {
        match self {
            ContainerMut::Map(entries) => entries.keys().cloned().map(Key::Name).collect(),
            ContainerMut::Seq(items) => (0..items.len()).map(Key::Index).collect(),
            ContainerMut::Object(object) => {
                object.field_names().into_iter().map(Key::Name).collect()
            }
        }
    }

    /// Descends one exact segment, consuming the dispatch to hand back the
    /// child for the full borrow.
    pub fn child_mut(self, segment: &str) -> Result<&'a mut Value, PathError> {
        match self {
            ContainerMut::Map(entries) => entries
                .get_mut(segment)
                .ok_or_else(|| PathError::Key(format!("no key '{}'", segment))),
            ContainerMut::Seq(items) => {
                let index = resolve_index(segment, items.len())?;
                Ok(&mut items[index])
            }
            ContainerMut::Object(object) => object
                .field_mut(segment)
                .ok_or_else(|| PathError::Attr(format!("no attribute '{}'", segment))),
        }
    }

    pub fn child_mut_by_key(self, key: &Key) -> Result<&'a mut Value, PathError> {
        match (self, key) {
            (ContainerMut::Map(entries), Key::Name(name)) => entries
                .get_mut(name)
                .ok_or_else(|| PathError::Key(format!("no key '{}'", name))),
            (ContainerMut::Seq(items), Key::Index(index)) => {
                let len = items.len();
                items.get_mut(*index).ok_or_else(|| {
                    PathError::Index(format!("index {} out of range for length {}", index, len))
                })
            }
            (ContainerMut::Object(object), Key::Name(name)) => object
                .field_mut(name)
                .ok_or_else(|| PathError::Attr(format!("no attribute '{}'", name))),
            (_, key) => Err(PathError::Type(format!(
                "key '{}' does not fit this container",
                key
            ))),
        }
    }

    /// Writes `value` at an exact segment. Maps and objects insert or
    /// replace; sequences replace at an existing index.
    pub fn set_segment(self, segment: &str, value: Value) -> Result<(), PathError> {
        match self {
            ContainerMut::Map(entries) => {
                entries.insert(segment.to_string(), value);
                Ok(())
            }
            ContainerMut::Seq(items) => {
                let index = resolve_index(segment, items.len())?;
                items[index] = value;
                Ok(())
            }
            ContainerMut::Object(object) => {
                object.set_field(segment, value);
                Ok(())
            }
        }
    }

    /// Writes `value` at a key produced by [`keys`](Self::keys).
    pub fn set_key(self, key: &Key, value: Value) -> Result<(), PathError> {
        match (self, key) {
            (ContainerMut::Map(entries), Key::Name(name)) => {
                entries.insert(name.clone(), value);
                Ok(())
            }
            (ContainerMut::Seq(items), Key::Index(index)) => {
                let len = items.len();
                match items.get_mut(*index) {
                    Some(slot) => {
                        *slot = value;
                        Ok(())
                    }
                    None => Err(PathError::Index(format!(
                        "index {} out of range for length {}",
                        index, len
                    ))),
                }
            }
            (ContainerMut::Object(object), Key::Name(name)) => {
                object.set_field(name, value);
                Ok(())
            }
            (_, key) => Err(PathError::Type(format!(
                "key '{}' does not fit this container",
                key
            ))),
        }
    }

    /// Removes an exact segment; absence is a lookup failure.
    pub fn del_segment(self, segment: &str) -> Result<(), PathError> {
        match self {
            ContainerMut::Map(entries) => entries
                .shift_remove(segment)
                .map(|_| ())
                .ok_or_else(|| PathError::Key(format!("no key '{}'", segment))),
            ContainerMut::Seq(items) => {
                let index = resolve_index(segment, items.len())?;
                items.remove(index);
                Ok(())
            }
            ContainerMut::Object(object) => object
                .remove_field(segment)
                .map(|_| ())
                .ok_or_else(|| PathError::Attr(format!("no attribute '{}'", segment))),
        }
    }

    /// Removes every matched key in one pass. Sequence removal is
    /// index-stable: the keep set is computed against the pre-delete
    /// universe, then the vector is rebuilt by filtering.
    pub fn del_keys(self, keys: &[Key]) -> Result<(), PathError> {
        match self {
            ContainerMut::Map(entries) => {
                for key in keys {
                    if let Key::Name(name) = key {
                        entries.shift_remove(name);
                    }
                }
                Ok(())
            }
            ContainerMut::Seq(items) => {
                let drop: HashSet<usize> = keys.iter().filter_map(Key::index).collect();
                let mut position = 0;
                items.retain(|_| {
                    let keep = !drop.contains(&position);
                    position += 1;
                    keep
                });
                Ok(())
            }
            ContainerMut::Object(object) => {
                for key in keys {
                    if let Key::Name(name) = key {
                        object.remove_field(name);
                    }
                }
                Ok(())
            }
        }
    }
}

/// Converts an exact path segment to a concrete index into a sequence of
/// `len` items, honoring negative indices.
fn resolve_index(segment: &str, len: usize) -> Result<usize, PathError> {
    let raw: i64 = segment
        .parse()
        .map_err(|_| PathError::Index(format!("cannot index a sequence with '{}'", segment)))?;
    let index = if raw < 0 { raw + len as i64 } else { raw };
    if index >= 0 && (index as usize) < len {
        Ok(index as usize)
    } else {
        Err(PathError::Index(format!(
            "index {} out of range for length {}",
            segment, len
        )))
    }
}
