//! Hash map aliases
//!
//! Keeps the choice of hash backend in one place.

use rapidhash::RapidHashMap;

/// Make it easier to switch between different hash backends.
pub type KeyMap<K, V> = RapidHashMap<K, V>;
