use crate::{
    db::{
        cache::{
            kv::KeyValueCache,
            stamp::{GenerationStamp, GenerationToken, TERMS_NAMESPACE},
        },
        query::{
            fingerprint::{Fingerprint, fingerprint},
            options::{CanonicalOptions, QueryOptions},
        },
        response::QueryOutput,
    },
    error::InternalError,
    model::Term,
    obs::sink::{self, MetricsEvent},
    serialize::{deserialize, serialize},
};
use std::sync::Arc;

///
/// QueryCache
///
/// Read-through cache for term queries, keyed by
/// `(generation token, fingerprint of (scopes, canonical options))`.
///
/// A hit returns the cached projection without touching storage; a miss
/// executes the query, caches the projected result, and returns it. Storage
/// failures propagate and are never cached.
///

pub struct QueryCache {
    kv: Arc<dyn KeyValueCache>,
    stamp: GenerationStamp,
}

impl QueryCache {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueCache>, stamp: GenerationStamp) -> Self {
        Self { kv, stamp }
    }

    #[must_use]
    pub const fn stamp(&self) -> &GenerationStamp {
        &self.stamp
    }

    /// Cache key for one query shape under one generation.
    #[must_use]
    pub fn cache_key(fingerprint: &Fingerprint, token: &GenerationToken) -> String {
        format!("get_terms:{fingerprint}:{token}")
    }

    /// Fetch a query result, consulting the cache first.
    pub fn fetch<F>(
        &self,
        scopes: &[String],
        options: &QueryOptions,
        executor: F,
    ) -> Result<QueryOutput, InternalError>
    where
        F: FnOnce(&[String], &CanonicalOptions) -> Result<Vec<Term>, InternalError>,
    {
        let canonical = options.normalize();
        let token = self.stamp.get(TERMS_NAMESPACE);
        let shape = fingerprint(scopes, &canonical);
        let key = Self::cache_key(&shape, &token);

        if let Some(bytes) = self.kv.get(TERMS_NAMESPACE, &key) {
            // A payload that fails to decode is a miss, not an error: the
            // read path re-queries and overwrites the entry.
            if let Ok(output) = deserialize::<QueryOutput>(&bytes) {
                sink::record(MetricsEvent::CacheHit);
                return Ok(output);
            }
        }

        sink::record(MetricsEvent::CacheMiss);

        let rows = executor(scopes, &canonical)?;
        let output = canonical.fields.project(rows);

        let bytes = serialize(&output).map_err(InternalError::from)?;
        self.kv.set(TERMS_NAMESPACE, &key, bytes);

        Ok(output)
    }
}

///
/// TESTS
///
