//! Explicit navigation through the upstream JSON envelope.
//!
//! Every lookup goes through a [`Cursor`], which remembers the path it took so
//! that an absent or mistyped value turns into a [`TransformError`] naming the
//! exact location instead of a panic on unchecked indexing.

use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

/// Failure to find or interpret a value inside an upstream response.
///
/// Both variants mean the upstream answered successfully but not with the
/// shape we rely on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("missing `{path}` in upstream response")]
    MissingField { path: String },

    #[error("invalid `{path}` in upstream response: {reason}")]
    InvalidField { path: String, reason: String },
}

impl TransformError {
    pub fn path(&self) -> &str {
        match self {
            TransformError::MissingField { path } => path,
            TransformError::InvalidField { path, .. } => path,
        }
    }
}

/// One navigation step into a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'s> {
    Key(&'s str),
    Index(usize),
}

/// A position inside a JSON document together with the path used to reach it.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Cursor<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::from("$"),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Take a single step. JSON `null` counts as absent.
    pub fn step(&self, step: Step<'_>) -> Result<Cursor<'a>, TransformError> {
        let (next, path) = match step {
            Step::Key(key) => (self.value.get(key), format!("{}.{key}", self.path)),
            Step::Index(index) => (self.value.get(index), format!("{}[{index}]", self.path)),
        };

        match next {
            Some(value) if !value.is_null() => Ok(Cursor { value, path }),
            _ => Err(TransformError::MissingField { path }),
        }
    }

    /// Follow every step in order, failing on the first one that is absent.
    pub fn navigate(&self, steps: &[Step<'_>]) -> Result<Cursor<'a>, TransformError> {
        steps
            .iter()
            .try_fold(self.clone(), |cursor, step| cursor.step(*step))
    }

    pub fn key(&self, key: &str) -> Result<Cursor<'a>, TransformError> {
        self.step(Step::Key(key))
    }

    pub fn optional(&self, key: &str) -> Option<Cursor<'a>> {
        self.key(key).ok()
    }

    /// Cursors over each element of an array value
    pub fn elements(&self) -> Result<Vec<Cursor<'a>>, TransformError> {
        let items = self.value.as_array().ok_or_else(|| self.invalid("expected an array"))?;

        Ok(items
            .iter()
            .enumerate()
            .map(|(index, value)| Cursor {
                value,
                path: format!("{}[{index}]", self.path),
            })
            .collect())
    }

    /// The value as text. Upstream is inconsistent about quoting scalars, so
    /// numbers are accepted and rendered as written.
    pub fn text(&self) -> Result<String, TransformError> {
        match self.value {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            _ => Err(self.invalid("expected a string")),
        }
    }

    /// The value as a number, whether it was sent as a JSON number or as a
    /// numeric string.
    pub fn number<T>(&self) -> Result<T, TransformError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = match self.value {
            Value::String(text) => text.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => return Err(self.invalid("expected a number")),
        };

        raw.parse::<T>()
            .map_err(|e| self.invalid(&format!("{raw:?} is not a valid number: {e}")))
    }

    pub fn required_text(&self, key: &str) -> Result<String, TransformError> {
        self.key(key)?.text()
    }

    pub fn optional_text(&self, key: &str) -> Result<Option<String>, TransformError> {
        self.optional(key).map(|cursor| cursor.text()).transpose()
    }

    pub fn invalid(&self, reason: &str) -> TransformError {
        TransformError::InvalidField {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}
