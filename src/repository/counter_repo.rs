use crate::model::counter::Counter;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Database;

#[async_trait]
pub trait CounterRepository: Send + Sync {
    /// Atomically increments the named sequence and returns the new value.
    ///
    /// This must stay a single findOneAndUpdate: a read-then-write at the
    /// application level would hand out duplicate values under concurrent
    /// callers.
    async fn next_sequence(&self, key: &str) -> RepositoryResult<i64>;
}

pub struct MongoCounterRepository {
    collection: mongodb::Collection<Counter>,
}

impl MongoCounterRepository {
    pub fn new(db: &Database) -> Self {
        MongoCounterRepository {
            collection: db.collection::<Counter>("counters"),
        }
    }
}

#[async_trait]
impl CounterRepository for MongoCounterRepository {
    #[tracing::instrument(skip(self))]
    async fn next_sequence(&self, key: &str) -> RepositoryResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();
        let counter = self
            .collection
            .find_one_and_update(doc! { "_id": key }, doc! { "$inc": { "seq": 1 } }, options)
            .await?
            .ok_or_else(|| {
                RepositoryError::database(format!("Counter upsert returned no document: {}", key))
            })?;
        Ok(counter.seq)
    }
}
