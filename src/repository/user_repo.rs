use crate::model::user::{User, UserRole};
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use chrono::Utc;
use futures::stream::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Database, IndexModel};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: User) -> RepositoryResult<User>;
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>>;
    async fn find_by_role(&self, role: UserRole) -> RepositoryResult<Vec<User>>;
}

pub struct MongoUserRepository {
    collection: mongodb::Collection<User>,
}

impl MongoUserRepository {
    /// Builds the repository and ensures the unique email index exists.
    pub async fn new(db: &Database) -> Result<Self, mongodb::error::Error> {
        let collection = db.collection::<User>("users");
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index, None).await?;
        Ok(MongoUserRepository { collection })
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        user.id = Some(ObjectId::new());
        let now = Utc::now().to_rfc3339();
        user.created_at = Some(now.clone());
        user.updated_at = Some(now);
        self.collection.insert_one(user.clone(), None).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let filter = doc! { "email": email };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(RepositoryError::from)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &ObjectId) -> RepositoryResult<Option<User>> {
        let filter = doc! { "_id": id };
        let user = self
            .collection
            .find_one(filter, None)
            .await
            .map_err(RepositoryError::from)?;
        Ok(user)
    }

    async fn find_by_role(&self, role: UserRole) -> RepositoryResult<Vec<User>> {
        let filter = doc! { "role": role.as_str() };
        let cursor = self.collection.find(filter, None).await?;
        let users: Vec<User> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list users: {}", e)))?;
        Ok(users)
    }
}
