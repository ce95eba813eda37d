//! Host-managed named variables.
//!
//! The host keeps a store of integer variables that generated rules read
//! through conditions and write through `set_variable` actions. The generator
//! never owns that state; it reaches it through the [`VariableStore`]
//! capability so the toggle and layer logic can be exercised against an
//! in-memory store.

use std::collections::BTreeMap;

/// Read/write access to named integer variables.
///
/// Unset variables read as 0, matching the host's default.
pub trait VariableStore {
    /// Current value of `name`.
    fn get(&self, name: &str) -> i64;

    /// Sets `name` to `value`.
    fn set(&mut self, name: &str, value: i64);
}

/// In-memory variable store with deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables that have been written, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl VariableStore for MemoryStore {
    fn get(&self, name: &str) -> i64 {
        self.values.get(name).copied().unwrap_or(0)
    }

    fn set(&mut self, name: &str, value: i64) {
        self.values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.get("shiftlock"), 0);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("hyper", 1);
        assert_eq!(store.get("hyper"), 1);
        assert_eq!(store.iter().collect::<Vec<_>>(), vec![("hyper", 1)]);
    }
}
