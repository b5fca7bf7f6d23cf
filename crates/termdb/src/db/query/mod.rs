//! Query surface: option normalization, constraint translation,
//! fingerprinting, and field projection.
//!
//! Raw options arrive loosely typed (scope collections with arbitrary keys,
//! id lists mixing numbers and strings); everything downstream of
//! [`options::QueryOptions::normalize`] operates on canonical values only.

pub mod constraints;
pub mod fields;
pub mod fingerprint;
pub mod options;

pub use constraints::{Constraints, IncludeFilter};
pub use fields::Fields;
pub use fingerprint::{Fingerprint, fingerprint};
pub use options::{
    CanonicalOptions, IdArg, Order, OrderBy, QueryOptions, ScopeArg, sanitize_id_list,
};
