//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type alias for `Arc<RwLock<HashMap<K, V>>>`.

pub mod aliases;

pub use aliases::*;
