#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};

    pub type BuildHasher = std::collections::hash_map::RandomState;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub use hashbrown::{HashMap, HashSet};

    pub type BuildHasher = ahash::RandomState;
}

/// Insertion-ordered map hashed with whichever default is active.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, map::BuildHasher>;
