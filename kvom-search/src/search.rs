//! Fluent and raw searches.

use crate::error::{SearchError, SearchResult};
use crate::executor::{CompiledQuery, Executor};
use crate::options::SearchOptions;
use crate::predicate::Predicate;
use crate::where_field::{Combinator, WhereField};
use kvom_client::StoreClient;
use kvom_model::{Entity, Schema};
use std::fmt;
use std::sync::Arc;

/// A query built one field clause at a time.
///
/// Builder methods consume and return the search. Mistakes such as naming
/// an undeclared field are remembered and reported by [`compile`](Self::compile)
/// or by whichever execution method runs first.
#[derive(Clone)]
#[must_use]
pub struct Search {
    executor: Executor,
    predicate: Option<Predicate>,
    error: Option<String>,
}

impl Search {
    pub fn new(schema: Arc<Schema>, client: Arc<dyn StoreClient>) -> Self {
        Self {
            executor: Executor::new(schema, client),
            predicate: None,
            error: None,
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.executor.options = options;
        self
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.executor.schema
    }

    /// Starts a clause on `field`. Joins any previous clauses with AND.
    pub fn where_field(self, field: &str) -> WhereField {
        WhereField::new(self, field, Combinator::And)
    }

    /// Starts a clause on `field` joined to the query so far with AND.
    pub fn and(self, field: &str) -> WhereField {
        WhereField::new(self, field, Combinator::And)
    }

    /// Starts a clause on `field` joined to the query so far with OR.
    pub fn or(self, field: &str) -> WhereField {
        WhereField::new(self, field, Combinator::Or)
    }

    /// ANDs a nested sub-query built by `build`.
    pub fn and_group(self, build: impl FnOnce(Search) -> Search) -> Self {
        self.group(Combinator::And, build)
    }

    /// ORs a nested sub-query built by `build`.
    pub fn or_group(self, build: impl FnOnce(Search) -> Search) -> Self {
        self.group(Combinator::Or, build)
    }

    fn group(mut self, combinator: Combinator, build: impl FnOnce(Search) -> Search) -> Self {
        let nested = build(Search {
            executor: self.executor.clone(),
            predicate: None,
            error: None,
        });
        if self.error.is_none() {
            self.error = nested.error;
        }
        match nested.predicate {
            Some(predicate) => self.push(combinator, Ok(predicate)),
            None => self,
        }
    }

    pub(crate) fn push(mut self, combinator: Combinator, clause: Result<Predicate, String>) -> Self {
        match clause {
            Ok(right) => {
                self.predicate = Some(match self.predicate.take() {
                    None => right,
                    Some(left) => combinator.join(left, right),
                });
            }
            Err(message) => {
                if self.error.is_none() {
                    self.error = Some(message);
                }
            }
        }
        self
    }

    /// Compiles the predicate. No clauses compile to `*`.
    pub fn compile(&self) -> SearchResult<CompiledQuery> {
        if let Some(message) = &self.error {
            return Err(SearchError::Usage(message.clone()));
        }
        let query = self
            .predicate
            .as_ref()
            .map_or_else(|| "*".to_string(), Predicate::compile);
        Ok(self.executor.compiled(query))
    }

    /// Fetches `count` entities starting at `offset`.
    pub async fn page(&self, offset: usize, count: usize) -> SearchResult<Vec<Entity>> {
        let query = self.compile()?;
        self.executor.page(&query, offset, count).await
    }

    pub async fn first(&self) -> SearchResult<Option<Entity>> {
        let query = self.compile()?;
        self.executor.first(&query).await
    }

    /// Number of matches, without fetching any records.
    pub async fn count(&self) -> SearchResult<u64> {
        let query = self.compile()?;
        self.executor.count(&query).await
    }

    /// Every match, fetched in pages of the configured page size.
    pub async fn all(&self) -> SearchResult<Vec<Entity>> {
        self.all_with_page_size(self.executor.options.page_size).await
    }

    pub async fn all_with_page_size(&self, page_size: usize) -> SearchResult<Vec<Entity>> {
        let query = self.compile()?;
        self.executor.all(&query, page_size).await
    }
}

impl fmt::Debug for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("entity_type", &self.executor.schema.entity_type())
            .field("predicate", &self.predicate)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// A search that sends a caller-written query string as is.
#[derive(Clone)]
#[must_use]
pub struct RawSearch {
    executor: Executor,
    query: String,
}

impl RawSearch {
    /// An empty or all-whitespace query matches everything.
    pub fn new(schema: Arc<Schema>, client: Arc<dyn StoreClient>, query: &str) -> Self {
        let query = if query.trim().is_empty() { "*" } else { query };
        Self {
            executor: Executor::new(schema, client),
            query: query.to_string(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.executor.options = options;
        self
    }

    #[must_use]
    pub fn compile(&self) -> CompiledQuery {
        self.executor.compiled(self.query.clone())
    }

    pub async fn page(&self, offset: usize, count: usize) -> SearchResult<Vec<Entity>> {
        self.executor.page(&self.compile(), offset, count).await
    }

    pub async fn first(&self) -> SearchResult<Option<Entity>> {
        self.executor.first(&self.compile()).await
    }

    pub async fn count(&self) -> SearchResult<u64> {
        self.executor.count(&self.compile()).await
    }

    pub async fn all(&self) -> SearchResult<Vec<Entity>> {
        self.executor
            .all(&self.compile(), self.executor.options.page_size)
            .await
    }

    pub async fn all_with_page_size(&self, page_size: usize) -> SearchResult<Vec<Entity>> {
        self.executor.all(&self.compile(), page_size).await
    }
}

impl fmt::Debug for RawSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawSearch")
            .field("entity_type", &self.executor.schema.entity_type())
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
