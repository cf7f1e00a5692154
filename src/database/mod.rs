pub mod memory;

pub use memory::InMemoryStore;

use crate::models::{
    ActivityLog, Role, ServiceCategory, ServicesDocument, TrainingModule, User,
    ACTIVITY_COLLECTION, SERVICES_COLLECTION, USERS_COLLECTION,
};
use crate::utils::error::AppError;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, DateTime as BsonDateTime, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;

/// Persistence operations used by the HTTP layer. Each method is a single
/// read or a single atomic write against one collection.
#[async_trait]
pub trait Store: Send + Sync {
    // ---- users ----
    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_email_or_fullname(
        &self,
        email: &str,
        fullname: &str,
    ) -> Result<Option<User>, AppError>;
    /// Any admin-level account, or any account registered with `email`.
    async fn find_admin_or_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert_user(&self, user: User) -> Result<User, AppError>;
    /// Returns false when no account has this id.
    async fn set_user_active(&self, id: &ObjectId, active: bool) -> Result<bool, AppError>;
    async fn list_users_by_roles(&self, roles: &[Role]) -> Result<Vec<User>, AppError>;
    async fn delete_user(&self, id: &ObjectId) -> Result<Option<User>, AppError>;

    // ---- services ----
    /// Creates the services singleton with empty buckets. Returns false if it
    /// already existed.
    async fn seed_services(&self) -> Result<bool, AppError>;
    /// Appends `module` to the bucket of `category` and returns the stored
    /// module. Creates the singleton if it is missing.
    async fn push_module(
        &self,
        category: ServiceCategory,
        module: TrainingModule,
    ) -> Result<Option<TrainingModule>, AppError>;
    async fn fetch_services(&self) -> Result<Option<ServicesDocument>, AppError>;

    // ---- activity ----
    async fn insert_activity(&self, entry: ActivityLog) -> Result<ActivityLog, AppError>;
    /// All entries, oldest first.
    async fn list_activity(&self) -> Result<Vec<ActivityLog>, AppError>;
}

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Extract database name from URI or use default
        let db_name = database_name_from_uri(uri);
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the handlers rely on
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        log::info!("🔧 Creating database indexes...");

        // Unique email is what closes the gap between the duplicate lookup and
        // the insert when two registrations race.
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.users().create_index(email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email, unique)"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }

        let activity_index = IndexModel::builder()
            .keys(doc! { "createdAt": 1 })
            .build();

        match self.activity().create_index(activity_index).await {
            Ok(_) => log::info!("   ✅ Index created: activity_logs(createdAt)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn users(&self) -> Collection<User> {
        self.collection(USERS_COLLECTION)
    }

    fn services(&self) -> Collection<ServicesDocument> {
        self.collection(SERVICES_COLLECTION)
    }

    fn activity(&self) -> Collection<ActivityLog> {
        self.collection(ACTIVITY_COLLECTION)
    }
}

fn database_name_from_uri(uri: &str) -> &str {
    let without_scheme = uri.split("://").nth(1).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, rest)| rest.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or("training_service")
}

fn role_filter(roles: &[Role]) -> Document {
    let roles: Vec<&str> = roles.iter().map(Role::as_str).collect();
    doc! { "role": { "$in": roles } }
}

#[async_trait]
impl Store for MongoDB {
    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "_id": *id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn find_user_by_email_or_fullname(
        &self,
        email: &str,
        fullname: &str,
    ) -> Result<Option<User>, AppError> {
        let filter = doc! {
            "$or": [ { "email": email }, { "fullname": fullname } ]
        };
        Ok(self.users().find_one(filter).await?)
    }

    async fn find_admin_or_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let filter = doc! {
            "$or": [
                { "role": Role::Admin.as_str() },
                { "role": Role::SuperAdmin.as_str() },
                { "email": email },
            ]
        };
        Ok(self.users().find_one(filter).await?)
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        let result = self.users().insert_one(&user).await?;
        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn set_user_active(&self, id: &ObjectId, active: bool) -> Result<bool, AppError> {
        let update = doc! {
            "$set": { "active": active, "updatedAt": BsonDateTime::now() }
        };
        let result = self.users().update_one(doc! { "_id": *id }, update).await?;
        Ok(result.matched_count > 0)
    }

    async fn list_users_by_roles(&self, roles: &[Role]) -> Result<Vec<User>, AppError> {
        let cursor = self
            .users()
            .find(role_filter(roles))
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn delete_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one_and_delete(doc! { "_id": *id }).await?)
    }

    async fn seed_services(&self) -> Result<bool, AppError> {
        let services = self.services();

        if services.find_one(doc! {}).await?.is_some() {
            return Ok(false);
        }

        services.insert_one(ServicesDocument::empty()).await?;
        Ok(true)
    }

    async fn push_module(
        &self,
        category: ServiceCategory,
        module: TrainingModule,
    ) -> Result<Option<TrainingModule>, AppError> {
        let module = mongodb::bson::to_bson(&module)
            .map_err(|e| AppError::Internal(format!("Failed to encode module: {}", e)))?;
        let now = BsonDateTime::now();
        let path = category.modules_path();

        let mut push = Document::new();
        push.insert(path, module);

        // On upsert the other two buckets start out empty; the target bucket is
        // created by the $push itself.
        let mut set_on_insert = doc! { "createdAt": now };
        for other in ServiceCategory::ALL.iter().filter(|c| **c != category) {
            set_on_insert.insert(other.modules_path(), Bson::Array(Vec::new()));
        }

        let mut slice = Document::new();
        slice.insert(path, doc! { "$slice": -1 });

        let updated = self
            .services()
            .find_one_and_update(
                doc! {},
                doc! {
                    "$push": push,
                    "$set": { "updatedAt": now },
                    "$setOnInsert": set_on_insert,
                },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .projection(slice)
            .await?;

        Ok(updated.and_then(|doc| doc.bucket(category).modules.last().cloned()))
    }

    async fn fetch_services(&self) -> Result<Option<ServicesDocument>, AppError> {
        Ok(self.services().find_one(doc! {}).await?)
    }

    async fn insert_activity(&self, mut entry: ActivityLog) -> Result<ActivityLog, AppError> {
        let result = self.activity().insert_one(&entry).await?;
        entry.id = result.inserted_id.as_object_id();
        Ok(entry)
    }

    async fn list_activity(&self) -> Result<Vec<ActivityLog>, AppError> {
        let cursor = self
            .activity()
            .find(doc! {})
            .sort(doc! { "createdAt": 1, "_id": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
