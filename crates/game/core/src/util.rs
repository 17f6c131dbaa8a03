//! Small shared utilities for the core crate.

use std::cell::Cell;

/// A value that may still be pending its first computation.
///
/// Several per-entity values (cached level, current health points) have
/// defaults that depend on other components and must not be computed during
/// construction. `LazyValue` makes the pending state explicit: reads supply
/// the computation, and [`LazyValue::force_init`] realizes the default at a
/// defined lifecycle point so later restores and reads agree on ordering.
///
/// `force_init` is idempotent: once a value is present (computed, restored,
/// or set directly) it is never recomputed.
#[derive(Clone, Debug)]
pub struct LazyValue<T: Copy> {
    value: Cell<Option<T>>,
}

impl<T: Copy> LazyValue<T> {
    /// Creates a cell with no value yet.
    pub fn pending() -> Self {
        Self {
            value: Cell::new(None),
        }
    }

    /// Creates a cell that already holds `value`.
    pub fn with_value(value: T) -> Self {
        Self {
            value: Cell::new(Some(value)),
        }
    }

    /// Returns the value if it has been realized.
    pub fn get(&self) -> Option<T> {
        self.value.get()
    }

    /// Returns the value, computing and storing it on first access.
    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> T {
        match self.value.get() {
            Some(value) => value,
            None => {
                let value = init();
                self.value.set(Some(value));
                value
            }
        }
    }

    /// Realizes the value now if nothing has touched it yet.
    pub fn force_init(&self, init: impl FnOnce() -> T) {
        let _ = self.get_or_init(init);
    }

    /// Overwrites the value, realized or not.
    pub fn set(&self, value: T) {
        self.value.set(Some(value));
    }

    /// True once a value is present.
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: Copy> Default for LazyValue<T> {
    fn default() -> Self {
        Self::pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_runs_once() {
        let cell = LazyValue::pending();
        let mut calls = 0;
        assert_eq!(
            cell.get_or_init(|| {
                calls += 1;
                7
            }),
            7
        );
        assert_eq!(
            cell.get_or_init(|| {
                calls += 1;
                9
            }),
            7
        );
        assert_eq!(calls, 1);
    }

    #[test]
    fn force_init_is_idempotent_and_respects_set() {
        let cell = LazyValue::pending();
        cell.set(3);
        cell.force_init(|| 100);
        assert_eq!(cell.get(), Some(3));
    }

    #[test]
    fn pending_reads_as_none() {
        let cell: LazyValue<u32> = LazyValue::pending();
        assert!(!cell.is_initialized());
        assert_eq!(cell.get(), None);
    }
}
