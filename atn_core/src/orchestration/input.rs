// src/orchestration/input.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Iterable input that passes can re-read or widen
pub trait InputSource: Iterator {
    /// Rewind to the first item
    fn reset(&mut self);

    /// Widen the input; `false` when it cannot be widened further
    fn broaden(&mut self) -> bool {
        false
    }
}

/// In-memory input over owned items
#[derive(Debug, Clone)]
pub struct VecInput<T> {
    items: Vec<T>,
    position: usize,
}

impl<T> VecInput<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Iterator for VecInput<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.items.get(self.position)?.clone();
        self.position += 1;
        Some(item)
    }
}

impl<T: Clone> InputSource for VecInput<T> {
    fn reset(&mut self) {
        self.position = 0;
    }
}

/// Input-level option overrides handed to every pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOptions {
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_input_reset() {
        let mut input = VecInput::new(vec!["a", "b"]);
        assert_eq!(input.next(), Some("a"));
        assert_eq!(input.next(), Some("b"));
        assert_eq!(input.next(), None);

        input.reset();
        assert_eq!(input.position(), 0);
        assert_eq!(input.next(), Some("a"));
        assert!(!input.broaden());
    }

    #[test]
    fn test_options() {
        let options = InputOptions::new().with_override("tokenizer", "word");
        assert_eq!(options.get("tokenizer"), Some("word"));
        assert_eq!(options.get("other"), None);
    }
}
