//! Uniform failure logging for any store.

use crate::{Collection, Store};
use async_trait::async_trait;
use relief_core::{ReliefError, ReliefResult};
use tracing::error;

/// Decorates a store so every backend failure is logged with the store
/// name, operation, and id, then surfaced as [`ReliefError::Storage`].
///
/// Not-found and validation errors pass through untouched.
#[derive(Debug, Clone)]
pub struct LoggedStore<S> {
    inner: S,
}

impl<S: Store> LoggedStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn wrap<T>(&self, operation: &'static str, id: &str, result: ReliefResult<T>) -> ReliefResult<T> {
        result.map_err(|err| match err {
            ReliefError::NotFound { .. } | ReliefError::Validation(_) => err,
            ReliefError::Storage { .. } => {
                error!(store = %self.inner.name(), operation, id, error = %err, "Store operation failed");
                err
            }
            other => {
                error!(store = %self.inner.name(), operation, id, error = %other, "Store operation failed");
                ReliefError::storage(self.inner.name(), operation, other.to_string())
            }
        })
    }
}

#[async_trait]
impl<S: Store> Store for LoggedStore<S> {
    type Input = S::Input;
    type Output = S::Output;

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn create(&self, id: &str, input: Self::Input) -> ReliefResult<Self::Output> {
        let result = self.inner.create(id, input).await;
        self.wrap("create", id, result)
    }

    async fn read(&self, id: &str) -> ReliefResult<Option<Self::Output>> {
        let result = self.inner.read(id).await;
        self.wrap("read", id, result)
    }

    async fn update(&self, id: &str, input: Self::Input) -> ReliefResult<Option<Self::Output>> {
        let result = self.inner.update(id, input).await;
        self.wrap("update", id, result)
    }

    async fn delete(&self, id: &str) -> ReliefResult<bool> {
        let result = self.inner.delete(id).await;
        self.wrap("delete", id, result)
    }
}

#[async_trait]
impl<S: Collection> Collection for LoggedStore<S> {
    async fn list(&self) -> ReliefResult<Vec<Self::Output>> {
        let result = self.inner.list().await;
        self.wrap("list", "*", result)
    }
}
