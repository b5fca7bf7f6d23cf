use crate::{
    db::{Db, cache::stamp::TERMS_NAMESPACE},
    error::InternalError,
    model::Term,
    obs::sink::{ExecKind, Span},
};

///
/// SaveExecutor
///

#[derive(Clone)]
pub struct SaveExecutor {
    db: Db,
    debug: bool,
}

impl SaveExecutor {
    #[must_use]
    pub const fn new(db: Db, debug: bool) -> Self {
        Self { db, debug }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Insert a term into the given taxonomies, returning the stored row.
    ///
    /// The generation stamp is bumped before returning so any dependent
    /// read observes the new generation.
    pub fn insert(&self, term: Term, taxonomies: &[String]) -> Result<Term, InternalError> {
        let mut span = Span::new(ExecKind::Save);

        if term.name.is_empty() {
            return Err(InternalError::executor_unsupported(
                "term name must not be empty",
            ));
        }
        if taxonomies.is_empty() {
            return Err(InternalError::executor_unsupported(
                "a term must belong to at least one taxonomy",
            ));
        }

        self.debug_log(format!("Inserting term '{}' into {taxonomies:?}", term.name));

        let stored = self.db.store().insert(term, taxonomies)?;
        self.db.query_cache().stamp().bump(TERMS_NAMESPACE);

        span.set_rows(1);
        Ok(stored)
    }

    /// Update an existing term in place, returning the stored row.
    pub fn update(&self, term: Term) -> Result<Term, InternalError> {
        let mut span = Span::new(ExecKind::Save);

        if term.name.is_empty() {
            return Err(InternalError::executor_unsupported(
                "term name must not be empty",
            ));
        }

        self.debug_log(format!("Updating term {}", term.id));

        let stored = self.db.store().update(term)?;
        self.db.query_cache().stamp().bump(TERMS_NAMESPACE);

        span.set_rows(1);
        Ok(stored)
    }
}
