//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `task_service.rs`).

mod attachment_service_impl;
mod help_request_service_impl;
mod responder_service_impl;
mod task_service_impl;
mod user_service_impl;

pub use attachment_service_impl::AttachmentServiceImpl;
pub use help_request_service_impl::{HelpRequestServiceImpl, HELP_REQUESTS_COLLECTION};
pub use responder_service_impl::{ResponderServiceImpl, LOCATIONS_PATH};
pub use task_service_impl::{TaskServiceImpl, TASKS_COLLECTION};
pub use user_service_impl::{UserServiceImpl, USERS_PATH};

#[cfg(test)]
pub(crate) mod test_support {
    use relief_storage::{DatabasePool, DocumentCollection, LoggedStore, SqlDocumentStore};
    use std::sync::Arc;

    /// A logged document collection over a fresh in-memory database.
    pub async fn collection(name: &str) -> Arc<dyn DocumentCollection> {
        let pool = DatabasePool::in_memory().await.unwrap();
        pool.run_migrations().await.unwrap();
        Arc::new(LoggedStore::new(SqlDocumentStore::new(pool, name).unwrap()))
    }
}
