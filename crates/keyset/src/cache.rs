//! Process-wide cache of compiled selector expressions.
//!
//! Segment strings have context-independent meaning, so a compiled selector
//! is cached by its literal text, append-only, for the life of the process.
//! The cache is an explicit value rather than hidden global state: tests and
//! embedders can construct isolated instances and pass them where a cache is
//! accepted.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use crate::ast::Selector;
use crate::error::KeysetError;
use crate::parser;

#[derive(Debug, Default)]
pub struct SelectorCache {
    entries: Mutex<HashMap<String, Arc<Selector>>>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the selector compiled from `expression`, parsing it on first
    /// use. Entries are immutable once built; a concurrent race at worst
    /// parses the same expression twice and keeps the first insert.
    pub fn get_or_parse(&self, expression: &str) -> Result<Arc<Selector>, KeysetError> {
        {
            let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = entries.get(expression) {
                return Ok(found.clone());
            }
        }
        let compiled = Arc::new(parser::parse(expression)?);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries
            .entry(expression.to_string())
            .or_insert(compiled)
            .clone())
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static SHARED: LazyLock<SelectorCache> = LazyLock::new(SelectorCache::new);

/// The process-wide cache used when no explicit cache is supplied.
pub fn shared() -> &'static SelectorCache {
    &SHARED
}
