use crate::{
    db::{Db, cache::stamp::TERMS_NAMESPACE},
    error::InternalError,
    model::TermId,
    obs::sink::{ExecKind, Span},
};

///
/// DeleteExecutor
///

#[derive(Clone)]
pub struct DeleteExecutor {
    db: Db,
    debug: bool,
}

impl DeleteExecutor {
    #[must_use]
    pub const fn new(db: Db, debug: bool) -> Self {
        Self { db, debug }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Delete a term by id; returns whether a row was removed.
    ///
    /// Deleting an unknown id is a no-op and does not bump the generation:
    /// the entity set did not change, so cached results remain valid.
    pub fn execute(&self, id: TermId) -> Result<bool, InternalError> {
        let mut span = Span::new(ExecKind::Delete);

        self.debug_log(format!("Deleting term {id}"));

        let removed = self.db.store().delete(id)?;
        if removed {
            self.db.query_cache().stamp().bump(TERMS_NAMESPACE);
            span.set_rows(1);
        }

        Ok(removed)
    }
}
