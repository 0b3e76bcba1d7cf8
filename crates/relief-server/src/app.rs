//! Application builder.

use crate::di;
use axum::Router;
use deadpool_redis::Pool;
use relief_config::{AppConfig, RealtimeBackend, StorageConfig};
use relief_core::{ReliefError, ReliefResult, ResponderKind};
use relief_rest::{create_router, AppState, ResponseCache};
use relief_service::{
    AttachmentServiceImpl, HelpRequestServiceImpl, ResponderServiceImpl, TaskServiceImpl,
    UserServiceImpl, HELP_REQUESTS_COLLECTION, LOCATIONS_PATH, TASKS_COLLECTION, USERS_PATH,
};
use relief_storage::{
    DatabasePool, DocumentCollection, KeyValueBackend, LoggedStore, MemoryKeyValue,
    RealtimeStore, RedisKeyValue, SqlDocumentStore,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// A fully wired application, ready to serve.
pub struct Application {
    router: Router,
    pool: DatabasePool,
    addr: String,
}

impl Application {
    /// Connects the backing stores and wires services, cache and router.
    pub async fn build(config: &AppConfig) -> ReliefResult<Self> {
        let pool = DatabasePool::connect(&config.storage).await?;
        pool.run_migrations().await?;

        let redis_pool = di::create_redis_pool(&config.redis)?;
        let state = build_state(&config.storage, &pool, redis_pool.as_ref())?;

        let cache = ResponseCache::from_config(
            di::cache_store(redis_pool, &config.cache),
            &config.cache,
        );
        info!(
            enabled = cache.is_enabled(),
            ttl_secs = config.cache.ttl_secs,
            max_retries = config.cache.max_retries,
            retry_delay_ms = config.cache.retry_delay_ms,
            "Response cache configured"
        );

        let router = create_router(state, cache, &config.server);

        Ok(Self {
            router,
            pool,
            addr: config.server.addr(),
        })
    }

    /// Returns a handle to the router.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serves until a shutdown signal arrives, then closes the database pool.
    pub async fn serve(self) -> ReliefResult<()> {
        info!("Starting REST server on http://{}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| ReliefError::Internal(format!("Failed to bind REST: {}", e)))?;

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ReliefError::Internal(format!("REST server error: {}", e)));

        self.pool.close().await;
        result?;

        info!("Server shutdown complete");
        Ok(())
    }
}

fn collection(pool: &DatabasePool, name: &str) -> ReliefResult<Arc<dyn DocumentCollection>> {
    Ok(Arc::new(LoggedStore::new(SqlDocumentStore::new(
        pool.clone(),
        name,
    )?)))
}

fn realtime_backend(
    config: &StorageConfig,
    redis_pool: Option<&Arc<Pool>>,
) -> ReliefResult<Arc<dyn KeyValueBackend>> {
    match config.realtime_backend {
        RealtimeBackend::Redis => redis_pool
            .map(|pool| Arc::new(RedisKeyValue::new(pool.clone())) as Arc<dyn KeyValueBackend>)
            .ok_or_else(|| {
                ReliefError::Configuration(
                    "storage.realtime_backend = \"redis\" requires redis.enabled".to_string(),
                )
            }),
        RealtimeBackend::Memory => Ok(Arc::new(MemoryKeyValue::new())),
    }
}

fn build_state(
    config: &StorageConfig,
    pool: &DatabasePool,
    redis_pool: Option<&Arc<Pool>>,
) -> ReliefResult<AppState> {
    let requests = collection(pool, HELP_REQUESTS_COLLECTION)?;
    let realtime = realtime_backend(config, redis_pool)?;
    let locations = RealtimeStore::new(
        realtime.clone(),
        config.realtime_prefix.clone(),
        LOCATIONS_PATH,
    )?;
    let users = RealtimeStore::new(realtime, config.realtime_prefix.clone(), USERS_PATH)?;

    Ok(AppState::new(
        Arc::new(HelpRequestServiceImpl::new(requests.clone())),
        Arc::new(TaskServiceImpl::new(collection(pool, TASKS_COLLECTION)?)),
        Arc::new(ResponderServiceImpl::new(
            collection(pool, ResponderKind::FirstResponder.collection())?,
            collection(pool, ResponderKind::Volunteer.collection())?,
            Arc::new(LoggedStore::new(locations)),
        )),
        Arc::new(AttachmentServiceImpl::new(
            requests,
            config.blob_root.clone(),
            config.blob_public_url.clone(),
        )),
        Arc::new(UserServiceImpl::new(Arc::new(LoggedStore::new(users)))),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
