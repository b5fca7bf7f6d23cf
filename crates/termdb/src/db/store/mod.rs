//! Storage boundary for term rows.
//!
//! The cache layer treats storage as an opaque collaborator behind
//! [`TermStore`]: parameterized reads over (scopes, constraints) plus row
//! mutations. Implementations must count executed queries so callers can
//! observe read-through behavior.

pub mod memory;

pub use memory::MemoryStore;

use crate::{
    db::query::constraints::Constraints,
    error::InternalError,
    model::{Term, TermId},
};

///
/// TermStore
///

pub trait TermStore: Send + Sync {
    /// Execute one query over the given scopes.
    ///
    /// Unknown scope names yield empty results, never errors, and a
    /// semantically-empty constraint list must not fail.
    fn query(&self, scopes: &[String], constraints: &Constraints) -> Result<Vec<Term>, InternalError>;

    /// Insert a row into the given taxonomies. A zero id asks the store to
    /// assign one; the stored row is returned.
    fn insert(&self, term: Term, taxonomies: &[String]) -> Result<Term, InternalError>;

    /// Replace an existing row in place; taxonomy membership is unchanged.
    fn update(&self, term: Term) -> Result<Term, InternalError>;

    /// Remove a row from every taxonomy; returns whether it existed.
    fn delete(&self, id: TermId) -> Result<bool, InternalError>;

    /// Number of queries executed so far (observable for testing).
    fn num_queries(&self) -> u64;
}
