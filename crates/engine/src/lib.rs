//! Path values, container dispatch and the recursive walking engine.
//!
//! [`Path`] addresses a single location in nested data; [`WildPath`]
//! addresses zero or more through key-set selector segments. Both offer the
//! same operations: `get_in`, `get_in_or`, `set_in`, `del_in`, `pop_in`,
//! `has_in` and `call_in`, resolved against a [`Value`] tree of mappings,
//! sequences and attribute-bearing objects.

pub mod container;
pub mod error;
pub mod iter;
pub mod path;
pub mod value;
mod walk;

// --- Public API ---
pub use container::{ContainerMut, ContainerRef, Shape};
pub use error::PathError;
pub use iter::{Items, flatten};
pub use path::{Path, SEPARATOR, WildPath};
pub use value::{FieldAccess, Func, NativeFn, Record, Value};
