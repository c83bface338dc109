use crate::error::RepositoryResult;
use kvom_client::StoreClient;
use kvom_codec::{decode_record, encode_record};
use kvom_model::{CreateArgs, Entity, ModelResult, Schema};
use kvom_search::{RawSearch, Search, SearchOptions};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entry point for one entity type.
///
/// Cheap to clone; the schema and client are shared.
#[derive(Clone)]
pub struct Repository {
    schema: Arc<Schema>,
    client: Arc<dyn StoreClient>,
    search_options: SearchOptions,
}

impl Repository {
    pub fn new(schema: Arc<Schema>, client: Arc<dyn StoreClient>) -> Self {
        Self {
            schema,
            client,
            search_options: SearchOptions::default(),
        }
    }

    /// Options applied to every search this repository hands out.
    #[must_use]
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Builds an entity without touching the store.
    ///
    /// ```text
    /// create_entity(())                     generated id, no data
    /// create_entity("foo")                  id "foo", no data
    /// create_entity(data)                   generated id, data assigned
    /// create_entity(("foo", data))          id "foo", data assigned
    /// ```
    pub fn create_entity(&self, args: impl Into<CreateArgs>) -> ModelResult<Entity> {
        Entity::create(Arc::clone(&self.schema), args)
    }

    /// Reads an entity by id. A missing key yields an entity with no data.
    pub async fn fetch(&self, entity_id: &str) -> RepositoryResult<Entity> {
        let key = self.schema.key_for(entity_id);
        debug!(key = %key, "Fetching entity");

        let record = self
            .client
            .get(&key, self.schema.data_structure())
            .await?;
        let entity = match record {
            Some(record) => {
                let data = decode_record(&self.schema, &record)?;
                Entity::with_data(Arc::clone(&self.schema), entity_id, data)
            }
            None => Entity::new(Arc::clone(&self.schema), entity_id),
        };
        Ok(entity)
    }

    /// Writes the entity and returns its id.
    ///
    /// A HASH entity with no data cannot exist in the store, so saving one
    /// deletes its key instead.
    pub async fn save(&self, entity: &Entity) -> RepositoryResult<String> {
        let key = entity.key_name();
        let record = encode_record(&self.schema, entity.data());

        if record.is_empty() {
            warn!(key = %key, "Saving an empty entity, deleting its key");
            self.client.delete(key).await?;
        } else {
            debug!(key = %key, "Saving entity");
            self.client.set(key, record).await?;
        }
        Ok(entity.entity_id().to_string())
    }

    /// [`create_entity`](Self::create_entity) followed by [`save`](Self::save).
    pub async fn create_and_save(&self, args: impl Into<CreateArgs>) -> RepositoryResult<Entity> {
        let entity = self.create_entity(args)?;
        self.save(&entity).await?;
        Ok(entity)
    }

    /// Deletes an entity by id. Removing a missing entity is not an error.
    pub async fn remove(&self, entity_id: &str) -> RepositoryResult<()> {
        let key = self.schema.key_for(entity_id);
        debug!(key = %key, "Removing entity");
        self.client.delete(&key).await?;
        Ok(())
    }

    /// Starts a fluent search over this entity type.
    pub fn search(&self) -> Search {
        Search::new(Arc::clone(&self.schema), Arc::clone(&self.client))
            .with_options(self.search_options)
    }

    /// Starts a search with a query string in the store's syntax.
    pub fn search_raw(&self, query: &str) -> RawSearch {
        RawSearch::new(Arc::clone(&self.schema), Arc::clone(&self.client), query)
            .with_options(self.search_options)
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("schema", &self.schema)
            .field("search_options", &self.search_options)
            .finish_non_exhaustive()
    }
}
