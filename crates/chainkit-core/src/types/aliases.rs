//! Type aliases for shared, thread-safe containers.
//!
//! Solver outputs are immutable, so the only shared state in ChainKit is
//! read-mostly memoisation (for example link plate profiles keyed by their
//! construction parameters). These aliases keep that pattern consistent.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chainkit_core::types::*;
//!
//! // Instead of: Arc<RwLock<HashMap<Key, Value>>>
//! let cache: ThreadSafeRwMap<Key, Value> = thread_safe_rw_map();
//! ```

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A thread-safe reader-writer hash map for read-heavy workloads.
///
/// Multiple readers can access concurrently, but writes require exclusive
/// access. Uses `parking_lot::RwLock` rather than `std::sync::RwLock`.
pub type ThreadSafeRwMap<K, V> = Arc<RwLock<HashMap<K, V>>>;

/// Create a new empty `ThreadSafeRwMap<K, V>`.
pub fn thread_safe_rw_map<K, V>() -> ThreadSafeRwMap<K, V> {
    Arc::new(RwLock::new(HashMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_safe_rw_map_across_threads() {
        let map: ThreadSafeRwMap<u32, &'static str> = thread_safe_rw_map();
        let writer = Arc::clone(&map);
        std::thread::spawn(move || {
            writer.write().insert(7, "seven");
        })
        .join()
        .unwrap();
        assert_eq!(map.read().get(&7), Some(&"seven"));
    }
}
