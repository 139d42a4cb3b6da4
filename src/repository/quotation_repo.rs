use crate::model::quotation::Quotation;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::options::{FindOptions, IndexOptions};
use mongodb::{Database, IndexModel};
use tracing::info;

#[async_trait]
pub trait QuotationRepository: Send + Sync {
    async fn insert(&self, quotation: Quotation) -> RepositoryResult<Quotation>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Quotation>>;
    /// Persists the full document state, replacing every mutable field.
    /// The quotation carries its embedded versions/activity log, so one
    /// write covers the snapshot, the patch, and the audit entry together.
    async fn replace(&self, id: ObjectId, quotation: Quotation) -> RepositoryResult<Quotation>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn list(&self) -> RepositoryResult<Vec<Quotation>>;
}

pub struct MongoQuotationRepository {
    collection: mongodb::Collection<Quotation>,
}

impl MongoQuotationRepository {
    pub async fn new(db: &Database) -> Result<Self, mongodb::error::Error> {
        let collection = db.collection::<Quotation>("quotations");
        let index = IndexModel::builder()
            .keys(doc! { "quotationId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index, None).await?;
        Ok(MongoQuotationRepository { collection })
    }
}

#[async_trait]
impl QuotationRepository for MongoQuotationRepository {
    #[tracing::instrument(skip(self, quotation), fields(quotation_id = %quotation.quotation_id))]
    async fn insert(&self, mut quotation: Quotation) -> RepositoryResult<Quotation> {
        quotation.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        quotation.created_at = Some(now.clone());
        quotation.updated_at = Some(now);
        self.collection.insert_one(quotation.clone(), None).await?;
        info!("Quotation created");
        Ok(quotation)
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Quotation>> {
        let quotation = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(quotation)
    }

    #[tracing::instrument(skip(self, quotation), fields(id = %id))]
    async fn replace(&self, id: ObjectId, mut quotation: Quotation) -> RepositoryResult<Quotation> {
        quotation.updated_at = Some(Utc::now().to_rfc3339());
        let mut doc = bson::to_document(&quotation)?;
        doc.remove("_id");
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": doc }, None)
            .await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No quotation found to update for ID: {}",
                id
            )));
        }
        quotation.id = Some(id);
        Ok(quotation)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No quotation found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Quotation>> {
        // Newest first
        let options = FindOptions::builder().sort(doc! { "createdAt": -1 }).build();
        let cursor = self.collection.find(None, options).await?;
        let quotations: Vec<Quotation> = cursor.try_collect().await.map_err(|e| {
            RepositoryError::serialization(format!("Failed to read quotations: {}", e))
        })?;
        Ok(quotations)
    }
}
