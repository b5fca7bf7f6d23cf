pub mod cache;
pub mod executor;
pub mod query;
pub mod response;
pub mod session;
pub mod store;

use crate::db::{
    cache::{kv::KeyValueCache, query::QueryCache, stamp::GenerationStamp},
    store::TermStore,
};
use std::sync::Arc;

// re-exports
pub use session::Session;

///
/// Db
///
/// A handle to one set of injected collaborators: the term store, the
/// key-value cache, and the generation stamp and query cache built on it.
///
/// No process-wide singletons: every `Db` is an isolated instance, so tests
/// and embedders construct as many independent ones as they need.
///

#[derive(Clone)]
pub struct Db {
    store: Arc<dyn TermStore>,
    cache: Arc<QueryCache>,
}

impl Db {
    #[must_use]
    pub fn new(store: Arc<dyn TermStore>, kv: Arc<dyn KeyValueCache>) -> Self {
        let stamp = GenerationStamp::new(Arc::clone(&kv));

        Self {
            store,
            cache: Arc::new(QueryCache::new(kv, stamp)),
        }
    }

    #[must_use]
    pub fn store(&self) -> &dyn TermStore {
        self.store.as_ref()
    }

    #[must_use]
    pub fn query_cache(&self) -> &QueryCache {
        &self.cache
    }
}
