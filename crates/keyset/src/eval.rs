//! Evaluation of a parsed [`Selector`] against a concrete key universe.
//!
//! Evaluation is a pure function from the ordered universe of keys or
//! indices present at a container to the matching subset. Boolean
//! combinators normalize their output to stable universe order; only a bare
//! slice atom's matches carry the slice's own iteration order (descending
//! when its step is negative).

use std::collections::HashSet;

use crate::ast::{Selector, TokenAtom};
use crate::error::KeysetError;
use crate::key::Key;
use crate::slice::SliceExpr;

impl Selector {
    /// Returns the subset of `universe` selected by this expression,
    /// de-duplicated, in deterministic order.
    pub fn evaluate(&self, universe: &[Key]) -> Result<Vec<Key>, KeysetError> {
        match self {
            Selector::All => Ok(universe.to_vec()),
            Selector::Token(atom) => eval_token(atom, universe),
            Selector::Slice(slice) => eval_slice(slice, universe),
            Selector::Not(inner) => {
                let excluded: HashSet<Key> = inner.evaluate(universe)?.into_iter().collect();
                Ok(universe
                    .iter()
                    .filter(|key| !excluded.contains(*key))
                    .cloned()
                    .collect())
            }
            Selector::And(terms) => {
                let sets = eval_sets(terms, universe)?;
                Ok(universe
                    .iter()
                    .filter(|key| sets.iter().all(|set| set.contains(*key)))
                    .cloned()
                    .collect())
            }
            Selector::Or(terms) => {
                let sets = eval_sets(terms, universe)?;
                Ok(universe
                    .iter()
                    .filter(|key| sets.iter().any(|set| set.contains(*key)))
                    .cloned()
                    .collect())
            }
        }
    }
}

fn eval_sets(terms: &[Selector], universe: &[Key]) -> Result<Vec<HashSet<Key>>, KeysetError> {
    terms
        .iter()
        .map(|term| Ok(term.evaluate(universe)?.into_iter().collect()))
        .collect()
}

fn eval_token(atom: &TokenAtom, universe: &[Key]) -> Result<Vec<Key>, KeysetError> {
    match universe.first() {
        None => Ok(Vec::new()),
        Some(Key::Name(_)) => Ok(universe
            .iter()
            .filter(|key| key.name().is_some_and(|name| atom.matches_name(name)))
            .cloned()
            .collect()),
        Some(Key::Index(_)) => {
            let index = atom.index().ok_or_else(|| {
                KeysetError::Universe(format!(
                    "'{}' cannot select sequence indices",
                    atom.raw()
                ))
            })?;
            let normalized = if index < 0 {
                index + universe.len() as i64
            } else {
                index
            };
            if normalized >= 0 && universe.contains(&Key::Index(normalized as usize)) {
                Ok(vec![Key::Index(normalized as usize)])
            } else {
                // A wild segment matching nothing is empty, not an error.
                Ok(Vec::new())
            }
        }
    }
}

fn eval_slice(slice: &SliceExpr, universe: &[Key]) -> Result<Vec<Key>, KeysetError> {
    match universe.first() {
        None => Ok(Vec::new()),
        Some(Key::Name(_)) => Err(KeysetError::Universe(
            "slice selectors cannot address string keys".to_string(),
        )),
        Some(Key::Index(_)) => Ok(slice
            .indices(universe.len())
            .into_iter()
            .map(Key::Index)
            .collect()),
    }
}
