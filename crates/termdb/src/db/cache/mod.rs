//! Cache layer: the namespaced key-value primitive, the generation stamp
//! built on top of it, and the read-through query cache.
//!
//! Invalidation discipline: no key in a namespace is ever enumerated or
//! deleted on mutation. Bumping the generation token orphans every prior
//! entry in O(1); orphaned entries age out of the underlying store.

pub mod kv;
pub mod query;
pub mod stamp;

pub use kv::{KeyValueCache, MemoryCache};
pub use query::QueryCache;
pub use stamp::{GenerationStamp, GenerationToken, LAST_CHANGED_KEY, TERMS_NAMESPACE};
