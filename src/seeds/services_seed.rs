use crate::database::Store;

/// Creates the services singleton with empty sales / administrativeSupport /
/// customerService buckets if it does not exist yet.
pub async fn seed_services_collection(store: &dyn Store) {
    match store.seed_services().await {
        Ok(true) => log::info!("✅ Services collection initialized successfully."),
        Ok(false) => log::info!("✅ Services collection already initialized."),
        Err(e) => log::error!("❌ Failed to seed services collection: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStore;

    #[tokio::test]
    async fn test_seed_twice_keeps_one_empty_document() {
        let store = InMemoryStore::new();
        seed_services_collection(&store).await;
        let first = store.fetch_services().await.unwrap().unwrap();

        seed_services_collection(&store).await;
        let second = store.fetch_services().await.unwrap().unwrap();

        assert_eq!(first.id, second.id);
        assert!(second.sales.modules.is_empty());
        assert!(second.administrative_support.modules.is_empty());
        assert!(second.customer_service.modules.is_empty());
    }
}
