//! Paginated execution shared by fluent and raw searches.

use crate::error::{SearchError, SearchResult};
use crate::options::SearchOptions;
use kvom_client::{RawDocument, SearchRequest, StoreClient};
use kvom_codec::decode_record;
use kvom_model::{Entity, Schema};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A query ready to send: the index to search and the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledQuery {
    pub index_name: String,
    pub query: String,
}

impl CompiledQuery {
    /// Builds the store request for one page of this query.
    #[must_use]
    pub fn request(&self, offset: usize, count: usize) -> SearchRequest {
        SearchRequest {
            index_name: self.index_name.clone(),
            query: self.query.clone(),
            offset,
            count,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Executor {
    pub(crate) schema: Arc<Schema>,
    client: Arc<dyn StoreClient>,
    pub(crate) options: SearchOptions,
}

impl Executor {
    pub(crate) fn new(schema: Arc<Schema>, client: Arc<dyn StoreClient>) -> Self {
        Self {
            schema,
            client,
            options: SearchOptions::default(),
        }
    }

    pub(crate) fn compiled(&self, query: String) -> CompiledQuery {
        CompiledQuery {
            index_name: self.schema.index_name().to_string(),
            query,
        }
    }

    /// One store round trip. Entities come back in the store's order.
    pub(crate) async fn page(
        &self,
        query: &CompiledQuery,
        offset: usize,
        count: usize,
    ) -> SearchResult<Vec<Entity>> {
        debug!(
            index = %query.index_name,
            query = %query.query,
            offset,
            count,
            "Issuing search"
        );
        let results = self.client.search(query.request(offset, count)).await?;
        results
            .documents
            .iter()
            .map(|doc| self.hydrate(doc))
            .collect()
    }

    pub(crate) async fn first(&self, query: &CompiledQuery) -> SearchResult<Option<Entity>> {
        Ok(self.page(query, 0, 1).await?.into_iter().next())
    }

    pub(crate) async fn count(&self, query: &CompiledQuery) -> SearchResult<u64> {
        debug!(index = %query.index_name, query = %query.query, "Counting matches");
        let results = self.client.search(query.request(0, 0)).await?;
        Ok(results.total)
    }

    /// Pages through every match until a short page comes back.
    pub(crate) async fn all(
        &self,
        query: &CompiledQuery,
        page_size: usize,
    ) -> SearchResult<Vec<Entity>> {
        if page_size == 0 {
            return Err(SearchError::Usage(
                "Page size must be greater than zero.".to_string(),
            ));
        }

        let mut entities = Vec::new();
        let mut offset = 0;
        loop {
            let page = self.page(query, offset, page_size).await?;
            let fetched = page.len();
            entities.extend(page);
            if fetched < page_size {
                break;
            }
            offset += page_size;
        }
        Ok(entities)
    }

    fn hydrate(&self, doc: &RawDocument) -> SearchResult<Entity> {
        let data = decode_record(&self.schema, &doc.record)?;
        let entity_id = self.schema.id_from_key(&doc.key);
        Ok(Entity::with_data(Arc::clone(&self.schema), entity_id, data))
    }
}
