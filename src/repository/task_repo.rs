use crate::model::task::Task;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::Database;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn insert(&self, task: Task) -> RepositoryResult<Task>;
    async fn find_all(&self) -> RepositoryResult<Vec<Task>>;
    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Task>>;
    async fn update(&self, id: ObjectId, task: Task) -> RepositoryResult<Task>;
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()>;
}

pub struct MongoTaskRepository {
    collection: mongodb::Collection<Task>,
}

impl MongoTaskRepository {
    pub fn new(db: &Database) -> Self {
        MongoTaskRepository {
            collection: db.collection::<Task>("tasks"),
        }
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[tracing::instrument(skip(self, task), fields(subject = %task.subject))]
    async fn insert(&self, mut task: Task) -> RepositoryResult<Task> {
        task.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        task.created_at = Some(now.clone());
        task.updated_at = Some(now);
        self.collection.insert_one(task.clone(), None).await?;
        Ok(task)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Task>> {
        // Soonest due date first
        let options = FindOptions::builder().sort(doc! { "dueDate": 1 }).build();
        let cursor = self.collection.find(None, options).await?;
        let tasks: Vec<Task> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::serialization(format!("Failed to read tasks: {}", e)))?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: ObjectId) -> RepositoryResult<Option<Task>> {
        let task = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(task)
    }

    #[tracing::instrument(skip(self, task), fields(id = %id))]
    async fn update(&self, id: ObjectId, mut task: Task) -> RepositoryResult<Task> {
        task.updated_at = Some(Utc::now().to_rfc3339());
        let mut doc = bson::to_document(&task)?;
        doc.remove("_id");
        let result = self
            .collection
            .update_one(doc! { "_id": id }, doc! { "$set": doc }, None)
            .await?;
        if result.matched_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No task found to update for ID: {}",
                id
            )));
        }
        task.id = Some(id);
        Ok(task)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        if result.deleted_count == 0 {
            return Err(RepositoryError::not_found(format!(
                "No task found to delete for ID: {}",
                id
            )));
        }
        Ok(())
    }
}
