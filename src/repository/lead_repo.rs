use crate::model::lead::{Lead, LeadStatus};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;
use tracing::info;

#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn insert(&self, lead: Lead) -> RepositoryResult<Lead>;
    async fn insert_many(&self, leads: Vec<Lead>) -> RepositoryResult<usize>;
    async fn find(&self, status: Option<&LeadStatus>) -> RepositoryResult<Vec<Lead>>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Lead>>;
    async fn update(&self, id: ObjectId, lead: Lead) -> RepositoryResult<Lead>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
    async fn count(&self) -> RepositoryResult<u64>;
    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64>;
    /// Fetches `(status, createdAt)` rows for analytics, optionally bounded
    /// by an RFC 3339 range. Timestamps are uniform UTC RFC 3339 strings, so
    /// the string comparison in the filter is chronological.
    async fn status_rows(
        &self,
        range: Option<(String, String)>,
    ) -> RepositoryResult<Vec<(LeadStatus, String)>>;
}

pub struct MongoLeadRepository {
    collection: mongodb::Collection<Lead>,
}

impl MongoLeadRepository {
    pub fn new(db: &Database) -> Self {
        MongoLeadRepository {
            collection: db.collection::<Lead>("leads"),
        }
    }

    fn stamp(lead: &mut Lead) {
        let now = Utc::now().to_rfc3339();
        if lead.created_at.is_none() {
            lead.created_at = Some(now.clone());
        }
        lead.updated_at = Some(now);
    }
}

#[async_trait]
impl LeadRepository for MongoLeadRepository {
    #[tracing::instrument(skip(self, lead), fields(email = %lead.email))]
    async fn insert(&self, mut lead: Lead) -> RepositoryResult<Lead> {
        lead.id = Some(ObjectId::new());
        Self::stamp(&mut lead);
        self.collection.insert_one(lead.clone(), None).await?;
        info!("Lead created");
        Ok(lead)
    }

    #[tracing::instrument(skip(self, leads), fields(count = leads.len()))]
    async fn insert_many(&self, mut leads: Vec<Lead>) -> RepositoryResult<usize> {
        for lead in &mut leads {
            lead.id = Some(ObjectId::new());
            Self::stamp(lead);
        }
        let result = self.collection.insert_many(leads, None).await?;
        Ok(result.inserted_ids.len())
    }

    async fn find(&self, status: Option<&LeadStatus>) -> RepositoryResult<Vec<Lead>> {
        let filter: Option<Document> = status.map(|s| doc! { "status": s.as_str() });
        let cursor = self.collection.find(filter, None).await?;
        let leads: Vec<Lead> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read leads: {}", e)))?;
        Ok(leads)
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Lead>> {
        let lead = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(lead)
    }

    #[tracing::instrument(skip(self, lead), fields(id = %id))]
    async fn update(&self, id: ObjectId, mut lead: Lead) -> RepositoryResult<Lead> {
        lead.updated_at = Some(Utc::now().to_rfc3339());
        let mut doc = bson::to_document(&lead)?;
        doc.remove("_id");
        let update = doc! { "$set": doc };
        let result = self
            .collection
            .update_one(doc! { "_id": id }, update, None)
            .await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No lead found to update for ID: {}",
                id
            )));
        }
        lead.id = Some(id);
        Ok(lead)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No lead found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let count = self.collection.count_documents(None, None).await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: &str) -> RepositoryResult<u64> {
        let count = self
            .collection
            .count_documents(doc! { "status": status }, None)
            .await?;
        Ok(count)
    }

    async fn status_rows(
        &self,
        range: Option<(String, String)>,
    ) -> RepositoryResult<Vec<(LeadStatus, String)>> {
        let filter = range.map(|(start, end)| doc! { "createdAt": { "$gte": start, "$lte": end } });
        let options = FindOptions::builder()
            .projection(doc! { "status": 1, "createdAt": 1 })
            .build();
        let cursor = self.collection.find(filter, options).await?;
        let leads: Vec<Lead> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read leads: {}", e)))?;
        Ok(leads
            .into_iter()
            .filter_map(|l| l.created_at.map(|ts| (l.status, ts)))
            .collect())
    }
}
