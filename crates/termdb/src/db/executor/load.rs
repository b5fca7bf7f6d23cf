use crate::{
    db::{Db, query::options::QueryOptions, response::QueryOutput},
    error::InternalError,
    obs::sink::{ExecKind, Span},
};

///
/// LoadExecutor
///

#[derive(Clone)]
pub struct LoadExecutor {
    db: Db,
    debug: bool,
}

impl LoadExecutor {
    #[must_use]
    pub const fn new(db: Db, debug: bool) -> Self {
        Self { db, debug }
    }

    fn debug_log(&self, s: impl AsRef<str>) {
        if self.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    /// Execute one term query through the read-through cache.
    pub fn execute(
        &self,
        scopes: &[String],
        options: &QueryOptions,
    ) -> Result<QueryOutput, InternalError> {
        let mut span = Span::new(ExecKind::Load);

        if self.debug {
            self.debug_log(format!("Executing term query on {scopes:?}"));
            self.debug_log(format!("Options: {options:?}"));
        }

        let output = self.db.query_cache().fetch(scopes, options, |scopes, canonical| {
            let constraints = canonical.to_constraints();
            self.db.store().query(scopes, &constraints)
        })?;

        span.set_rows(output.count());
        Ok(output)
    }
}
