//! Query compilation and paginated search for kvom.
//!
//! [`Search`] builds a predicate one field clause at a time and compiles it
//! to the store's query syntax:
//!
//! ```text
//! repo.search().where_field("aString").eq("foo").and("aNumber").gt(42)
//!     => ( (@aString:{foo}) (@aNumber:[(42 +inf]) )
//! ```
//!
//! [`RawSearch`] sends a caller-written query string instead. Both run
//! through the same executor: one store search per page, with every hit
//! decoded and hydrated into an [`Entity`](kvom_model::Entity).

mod error;
mod escape;
mod executor;
mod options;
mod predicate;
mod search;
mod where_field;

pub use error::{SearchError, SearchResult};
pub use escape::escape;
pub use executor::CompiledQuery;
pub use options::{SearchOptions, DEFAULT_PAGE_SIZE};
pub use predicate::{Condition, DistanceUnit, Predicate, RangeBound};
pub use search::{RawSearch, Search};
pub use where_field::WhereField;
