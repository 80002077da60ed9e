//! Health as the logical AND of named boolean components.
//!
//! A [`Check`] tracks the names of components currently marked failing. A
//! component that was never marked, or was last marked passing, does not
//! count against health. The check is healthy exactly when no component is
//! failing.
//!
//! All operations are synchronous and safe to call from any number of threads
//! at once: mutations take the write lock for the whole batch, queries take
//! the read lock.

use std::collections::HashSet;

use parking_lot::RwLock;

/// Health check made up of named components.
///
/// `Check::default()` is a valid, healthy check. Share one instance per
/// health surface, usually behind an `Arc`.
#[derive(Debug, Default)]
pub struct Check {
    /// Names of the components currently failing
    failing: RwLock<HashSet<String>>,
}

impl Check {
    /// Creates a healthy check with no failing components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the given components as passing.
    ///
    /// Components that are already passing are left alone.
    pub fn mark_passing<S: AsRef<str>>(&self, names: &[S]) {
        if names.is_empty() {
            return;
        }

        let remaining = {
            let mut failing = self.failing.write();
            for name in names {
                let name: &str = name.as_ref();
                failing.remove(name);
            }
            failing.len()
        };

        tracing::debug!(
            components = ?component_names(names),
            remaining,
            "Components marked passing"
        );
    }

    /// Marks the given components as failing.
    ///
    /// Components that are already failing are left alone.
    pub fn mark_failing<S: AsRef<str>>(&self, names: &[S]) {
        if names.is_empty() {
            return;
        }

        let total = {
            let mut failing = self.failing.write();
            // HashSet::default() holds no allocation until the first insert
            if failing.capacity() == 0 {
                failing.reserve(names.len());
            }
            for name in names {
                let name: &str = name.as_ref();
                if !failing.contains(name) {
                    failing.insert(name.to_owned());
                }
            }
            failing.len()
        };

        tracing::debug!(
            components = ?component_names(names),
            total,
            "Components marked failing"
        );
    }

    /// Reports whether no component is currently failing.
    ///
    /// A check that was never marked is healthy.
    pub fn is_healthy(&self) -> bool {
        self.failing.read().is_empty()
    }

    /// Appends the names of the failing components to `dst` and returns it.
    ///
    /// Names come out in no particular order. The existing contents and the
    /// allocation of `dst` are kept, so passing `Vec::with_capacity(n)` avoids
    /// reallocating when `n` is large enough.
    pub fn list_failing(&self, mut dst: Vec<String>) -> Vec<String> {
        let failing = self.failing.read();
        dst.extend(failing.iter().cloned());
        dst
    }
}

fn component_names<S: AsRef<str>>(names: &[S]) -> Vec<&str> {
    names.iter().map(|name| name.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn test_new_check_is_healthy() {
        let check = Check::new();
        assert!(check.is_healthy());
        assert!(check.list_failing(Vec::new()).is_empty());
    }

    #[test]
    fn test_failing_component_makes_check_unhealthy() {
        let check = Check::new();
        check.mark_failing(&["db"]);
        assert!(!check.is_healthy());
        assert_eq!(check.list_failing(Vec::new()), vec!["db".to_string()]);
    }

    #[test]
    fn test_passing_after_failing_restores_health() {
        let check = Check::new();
        check.mark_failing(&["db"]);
        check.mark_passing(&["db"]);
        assert!(check.is_healthy());
    }

    #[test]
    fn test_partial_recovery_stays_unhealthy() {
        let check = Check::new();
        check.mark_failing(&["a", "b"]);
        check.mark_passing(&["a"]);
        assert!(!check.is_healthy());
        assert_eq!(check.list_failing(Vec::new()), vec!["b".to_string()]);
    }

    #[test]
    fn test_last_mark_wins_per_component() {
        let check = Check::new();
        check.mark_failing(&["1"]);
        check.mark_failing(&["2"]);
        check.mark_failing(&["3", "4", "5"]);
        check.mark_passing(&["3", "4", "5"]);
        check.mark_passing(&["2"]);
        check.mark_passing(&["1"]);
        assert!(check.is_healthy());

        check.mark_passing(&["1", "3"]);
        check.mark_failing(&["2"]);
        check.mark_passing(&["2"]);
        check.mark_failing(&["2"]);
        assert_eq!(check.list_failing(Vec::new()), vec!["2".to_string()]);
    }

    #[test]
    fn test_marking_is_idempotent() {
        let check = Check::new();
        check.mark_passing(&["x"]);
        assert!(check.is_healthy());

        check.mark_failing(&["x"]);
        check.mark_failing(&["x", "x"]);
        assert_eq!(check.list_failing(Vec::new()), vec!["x".to_string()]);
    }

    #[test]
    fn test_empty_batches_change_nothing() {
        let empty: [&str; 0] = [];

        let check = Check::new();
        check.mark_failing(&empty);
        assert!(check.is_healthy());

        check.mark_failing(&["db"]);
        check.mark_passing(&empty);
        assert!(!check.is_healthy());
    }

    #[test]
    fn test_accepts_owned_names() {
        let names = vec!["cache".to_string(), "queue".to_string()];

        let check = Check::new();
        check.mark_failing(&names);
        assert_eq!(sorted(check.list_failing(Vec::new())), names);

        check.mark_passing(&names);
        assert!(check.is_healthy());
    }

    #[test]
    fn test_list_failing_appends_after_existing_contents() {
        let check = Check::new();
        check.mark_failing(&["1", "2", "3"]);

        let dst = vec!["keep".to_string()];
        let got = check.list_failing(dst);

        assert_eq!(got[0], "keep");
        assert_eq!(sorted(got[1..].to_vec()), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_list_failing_reuses_buffer() {
        let check = Check::new();
        check.mark_failing(&["a", "b"]);

        let dst: Vec<String> = Vec::with_capacity(8);
        let ptr = dst.as_ptr();

        let got = check.list_failing(dst);
        assert_eq!(got.len(), 2);
        assert_eq!(got.capacity(), 8);
        assert_eq!(got.as_ptr(), ptr);
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        const WRITERS: usize = 8;
        const READERS: usize = 4;
        const ROUNDS: usize = 1000;

        let check = Arc::new(Check::new());
        // Never passes while the writers run, so readers must never see healthy
        check.mark_failing(&["pinned"]);

        std::thread::scope(|s| {
            for _ in 0..WRITERS {
                let check = Arc::clone(&check);
                s.spawn(move || {
                    for _ in 0..ROUNDS {
                        check.mark_failing(&["x"]);
                        check.mark_passing(&["x"]);
                    }
                });
            }
            for _ in 0..READERS {
                let check = Arc::clone(&check);
                s.spawn(move || {
                    for _ in 0..ROUNDS {
                        assert!(!check.is_healthy());
                        let failing = sorted(check.list_failing(Vec::new()));
                        assert!(failing == ["pinned"] || failing == ["pinned", "x"]);
                    }
                });
            }
        });

        assert_eq!(check.list_failing(Vec::new()), vec!["pinned".to_string()]);
        check.mark_passing(&["pinned"]);
        assert!(check.is_healthy());
    }
}
