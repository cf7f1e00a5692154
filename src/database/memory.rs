use super::Store;
use crate::models::{ActivityLog, Role, ServiceCategory, ServicesDocument, TrainingModule, User};
use crate::utils::error::AppError;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use tokio::sync::RwLock;

/// Process-local backend with the same semantics as the MongoDB one,
/// including the unique email constraint. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    services: RwLock<Option<ServicesDocument>>,
    activity: RwLock<Vec<ActivityLog>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_user_by_id(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id.as_ref() == Some(id)).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_email_or_fullname(
        &self,
        email: &str,
        fullname: &str,
    ) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email == email || u.fullname == fullname)
            .cloned())
    }

    async fn find_admin_or_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.role.is_admin() || u.email == email)
            .cloned())
    }

    async fn insert_user(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Account already exists".to_string()));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn set_user_active(&self, id: &ObjectId, active: bool) -> Result<bool, AppError> {
        let mut users = self.users.write().await;

        match users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            Some(user) => {
                user.active = active;
                user.updated_at = BsonDateTime::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_users_by_roles(&self, roles: &[Role]) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .filter(|u| roles.contains(&u.role))
            .cloned()
            .collect())
    }

    async fn delete_user(&self, id: &ObjectId) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        let position = users.iter().position(|u| u.id.as_ref() == Some(id));
        Ok(position.map(|i| users.remove(i)))
    }

    async fn seed_services(&self) -> Result<bool, AppError> {
        let mut services = self.services.write().await;

        if services.is_some() {
            return Ok(false);
        }

        let mut doc = ServicesDocument::empty();
        doc.id = Some(ObjectId::new());
        *services = Some(doc);
        Ok(true)
    }

    async fn push_module(
        &self,
        category: ServiceCategory,
        module: TrainingModule,
    ) -> Result<Option<TrainingModule>, AppError> {
        let mut services = self.services.write().await;

        let doc = services.get_or_insert_with(|| {
            let mut doc = ServicesDocument::empty();
            doc.id = Some(ObjectId::new());
            doc
        });

        doc.bucket_mut(category).modules.push(module.clone());
        doc.updated_at = BsonDateTime::now();
        Ok(Some(module))
    }

    async fn fetch_services(&self) -> Result<Option<ServicesDocument>, AppError> {
        Ok(self.services.read().await.clone())
    }

    async fn insert_activity(&self, mut entry: ActivityLog) -> Result<ActivityLog, AppError> {
        entry.id = Some(ObjectId::new());
        self.activity.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn list_activity(&self) -> Result<Vec<ActivityLog>, AppError> {
        Ok(self.activity.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModuleLevel, ModuleMetadata};

    fn user(fullname: &str, email: &str, role: Role) -> User {
        User::new(fullname.into(), email.into(), None, "hash".into(), role)
    }

    fn module(title: &str, category: ServiceCategory) -> TrainingModule {
        TrainingModule {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: "d".into(),
            category,
            level: ModuleLevel::Intermediate,
            duration: "10".into(),
            prerequisites: String::new(),
            learning_objectives: vec![],
            tags: vec![],
            language: "English".into(),
            lessons: vec![],
            metadata: ModuleMetadata::default(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_unique_email() {
        let store = InMemoryStore::new();
        store.insert_user(user("A", "a@example.com", Role::User)).await.unwrap();

        let err = store
            .insert_user(user("B", "a@example.com", Role::User))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list_users_by_roles(&[Role::User]).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_role_filter_and_delete() {
        let store = InMemoryStore::new();
        let a = store.insert_user(user("A", "a@example.com", Role::User)).await.unwrap();
        store.insert_user(user("B", "b@example.com", Role::Admin)).await.unwrap();
        store.insert_user(user("C", "c@example.com", Role::SuperAdmin)).await.unwrap();

        let admins = store
            .list_users_by_roles(&[Role::Admin, Role::SuperAdmin])
            .await
            .unwrap();
        assert_eq!(admins.len(), 2);

        let id = a.id.unwrap();
        assert!(store.delete_user(&id).await.unwrap().is_some());
        assert!(store.delete_user(&id).await.unwrap().is_none());
        assert!(store.find_user_by_id(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_user_active() {
        let store = InMemoryStore::new();
        let a = store.insert_user(user("A", "a@example.com", Role::User)).await.unwrap();
        let id = a.id.unwrap();

        assert!(store.set_user_active(&id, true).await.unwrap());
        assert!(store.find_user_by_id(&id).await.unwrap().unwrap().active);
        assert!(!store.set_user_active(&ObjectId::new(), true).await.unwrap());
    }

    #[tokio::test]
    async fn test_push_module_upserts_singleton() {
        let store = InMemoryStore::new();
        store
            .push_module(ServiceCategory::Sales, module("Cold calls", ServiceCategory::Sales))
            .await
            .unwrap();

        let doc = store.fetch_services().await.unwrap().unwrap();
        assert_eq!(doc.sales.modules.len(), 1);
        assert!(!store.seed_services().await.unwrap());
    }

    #[tokio::test]
    async fn test_activity_keeps_insertion_order() {
        let store = InMemoryStore::new();
        let actor = ObjectId::new();

        for action in ["first", "second", "third"] {
            let now = BsonDateTime::now();
            store
                .insert_activity(ActivityLog {
                    id: None,
                    actor_id: actor,
                    actor_name: "Root".into(),
                    actor_role: "super_admin".into(),
                    action: action.into(),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }

        let actions: Vec<String> = store
            .list_activity()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.action)
            .collect();
        assert_eq!(actions, vec!["first", "second", "third"]);
    }
}
