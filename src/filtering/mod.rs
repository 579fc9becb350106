//! Query-string filter validation.
//!
//! A view declares what it is filterable by — a [`FilterSet`], flat
//! field lists, or nothing beyond its model — and
//! [`invalid_lookup_middleware`] rejects any request whose query string
//! names a parameter outside that catalog.

pub mod filter_set;
pub mod middleware;
pub mod model;

pub use filter_set::{lookup_expressions, Filter, FilterRegistry, FilterSet};
pub use middleware::{invalid_lookup_middleware, InvalidLookup, LookupGuard};
pub use model::{filter_by_query_params, ModelInfo};
