//! Structured string addressing into heterogeneous nested data.
//!
//! Paths are `.`-delimited strings resolved against nested mappings,
//! sequences and attribute-bearing objects. [`Path`] addresses one exact
//! location; [`WildPath`] additionally understands wildcards, globs,
//! alternation, boolean key-set expressions and slices, resolving to every
//! matching location at once.
//!
//! ```
//! use nestpath::{Path, Value, WildPath};
//!
//! let mut agenda = Value::from(serde_json::json!({
//!     "items": [
//!         {"name": "opening", "duration": "5 minutes"},
//!         {"name": "progress", "duration": "25 minutes"},
//!     ]
//! }));
//!
//! let path = Path::parse("items.0.duration");
//! assert_eq!(path.get_in(&agenda).unwrap(), Value::from("5 minutes"));
//!
//! let wild = WildPath::parse("items.*.duration").unwrap();
//! assert_eq!(
//!     wild.get_in(&agenda).unwrap(),
//!     Value::from(vec![Value::from("5 minutes"), Value::from("25 minutes")])
//! );
//!
//! wild.set_in(&mut agenda, "10 minutes").unwrap();
//! assert_eq!(
//!     wild.get_in(&agenda).unwrap(),
//!     Value::from(vec![Value::from("10 minutes"), Value::from("10 minutes")])
//! );
//! ```

pub use nestpath_engine::{
    ContainerMut, ContainerRef, FieldAccess, Func, Items, NativeFn, Path, PathError, Record,
    SEPARATOR, Shape, Value, WildPath, flatten,
};

// The selector algebra is re-exported for embedders that evaluate key-set
// expressions outside of path resolution.
pub use nestpath_keyset as keyset;
