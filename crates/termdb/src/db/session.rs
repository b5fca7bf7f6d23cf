use crate::{
    db::{
        Db,
        cache::stamp::{GenerationToken, TERMS_NAMESPACE},
        executor::{DeleteExecutor, LoadExecutor, SaveExecutor},
        query::options::{QueryOptions, ScopeArg},
        response::QueryOutput,
    },
    error::InternalError,
    model::{Term, TermId},
    obs::sink::{MetricsSink, with_metrics_sink},
};

///
/// Session
///
/// Session-scoped handle with policy (debug, metrics) and execution
/// routing. This is the query entry-point surface: `terms` accepts a single
/// scope or any collection of scopes, keyed or not.
///

pub struct Session {
    db: Db,
    debug: bool,
    metrics: Option<&'static dyn MetricsSink>,
}

impl Session {
    #[must_use]
    pub const fn new(db: Db) -> Self {
        Self {
            db,
            debug: false,
            metrics: None,
        }
    }

    /// Enable debug logging for subsequent operations in this session.
    #[must_use]
    pub const fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    #[must_use]
    pub const fn metrics_sink(mut self, sink: &'static dyn MetricsSink) -> Self {
        self.metrics = Some(sink);
        self
    }

    #[must_use]
    pub const fn db(&self) -> &Db {
        &self.db
    }

    fn with_metrics<T>(&self, f: impl FnOnce() -> T) -> T {
        if let Some(sink) = self.metrics {
            with_metrics_sink(sink, f)
        } else {
            f()
        }
    }

    // ---------------------------------------------------------------------
    // Query entry point
    // ---------------------------------------------------------------------

    /// Query terms in one or more taxonomies.
    pub fn terms(
        &self,
        scopes: impl Into<ScopeArg>,
        options: &QueryOptions,
    ) -> Result<QueryOutput, InternalError> {
        let scopes = scopes.into().normalize();

        self.with_metrics(|| LoadExecutor::new(self.db.clone(), self.debug).execute(&scopes, options))
    }

    // ---------------------------------------------------------------------
    // Mutation API (each bumps the generation before returning)
    // ---------------------------------------------------------------------

    /// Insert a term into the given taxonomies, returning the stored row.
    pub fn insert(
        &self,
        term: Term,
        taxonomies: impl Into<ScopeArg>,
    ) -> Result<Term, InternalError> {
        let taxonomies = taxonomies.into().normalize();

        self.with_metrics(|| {
            SaveExecutor::new(self.db.clone(), self.debug).insert(term, &taxonomies)
        })
    }

    /// Update an existing term in place.
    pub fn update(&self, term: Term) -> Result<Term, InternalError> {
        self.with_metrics(|| SaveExecutor::new(self.db.clone(), self.debug).update(term))
    }

    /// Delete a term by id; returns whether a row was removed.
    pub fn delete(&self, id: TermId) -> Result<bool, InternalError> {
        self.with_metrics(|| DeleteExecutor::new(self.db.clone(), self.debug).execute(id))
    }

    // ---------------------------------------------------------------------
    // Observability
    // ---------------------------------------------------------------------

    /// Current generation token, if one has been established.
    #[must_use]
    pub fn last_changed(&self) -> Option<GenerationToken> {
        self.db.query_cache().stamp().peek(TERMS_NAMESPACE)
    }

    /// Number of storage queries executed so far.
    #[must_use]
    pub fn num_queries(&self) -> u64 {
        self.db.store().num_queries()
    }
}
