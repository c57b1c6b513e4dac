//! Numeric slice expressions with standard slice-index semantics, including
//! negative start/stop/step and clamping to the universe length.

use crate::error::KeysetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceExpr {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: i64,
}

impl SliceExpr {
    /// Parses a `start:stop` / `start:stop:step` token; empty fields take
    /// their natural defaults.
    pub(crate) fn parse(token: &str) -> Result<Self, KeysetError> {
        let fields: Vec<&str> = token.split(':').collect();
        if fields.len() > 3 {
            return Err(KeysetError::parse(token, "too many ':' in slice"));
        }
        let field = |text: &str| -> Result<Option<i64>, KeysetError> {
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(|_| {
                    KeysetError::parse(token, format!("'{}' is not an integer slice field", text))
                })
            }
        };
        let start = field(fields[0])?;
        let stop = field(fields[1])?;
        let step = match fields.get(2) {
            Some(text) => field(text)?,
            None => None,
        };
        if step == Some(0) {
            return Err(KeysetError::parse(token, "slice step cannot be zero"));
        }
        Ok(Self {
            start,
            stop,
            step: step.unwrap_or(1),
        })
    }

    /// The resolved indices for a universe of `len` elements, in the slice's
    /// own iteration order (descending when the step is negative).
    pub fn indices(&self, len: usize) -> Vec<usize> {
        let len = len as i64;
        let step = self.step;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |v: i64| {
            if v < 0 {
                (v + len).max(lower)
            } else {
                v.min(upper)
            }
        };
        let start = match self.start {
            Some(v) => clamp(v),
            None => {
                if step < 0 {
                    upper
                } else {
                    lower
                }
            }
        };
        let stop = match self.stop {
            Some(v) => clamp(v),
            None => {
                if step < 0 {
                    lower
                } else {
                    upper
                }
            }
        };
        let mut out = Vec::new();
        let mut i = start;
        if step > 0 {
            while i < stop {
                out.push(i as usize);
                i += step;
            }
        } else {
            while i > stop {
                out.push(i as usize);
                i += step;
            }
        }
        out
    }
}
