//! Core runtime for termdb: a generation-stamped read-through cache over
//! filterable, hierarchical term queries.
//!
//! Results are cached per distinct query shape — a fingerprint of the
//! taxonomy scopes and the canonical filter options — combined with a
//! per-namespace generation token. Mutations bump the token, orphaning
//! every prior cache entry in O(1) without enumerating keys.
#![warn(unreachable_pub)]

pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod serialize;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, executors, or serializers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            Db, Session,
            cache::{GenerationStamp, GenerationToken, KeyValueCache, MemoryCache},
            query::{Fields, IdArg, Order, OrderBy, QueryOptions, ScopeArg},
            response::QueryOutput,
            store::{MemoryStore, TermStore},
        },
        model::{Term, TermId},
    };
}
