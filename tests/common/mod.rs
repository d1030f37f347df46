//! Shared fixtures for integration tests.

use std::sync::Arc;

use mongo_rest::config::{MountConfig, ServerConfig};
use mongo_rest::http::server::Mount;
use mongo_rest::store::{memory::MemoryStore, DocumentStore};
use mongo_rest::{HttpServer, Shutdown};

/// HTTP client for talking to the in-process server.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// An in-process server over in-memory stores, one store per mount.
pub struct TestServer {
    pub base_url: String,
    pub stores: Vec<MemoryStore>,
    shutdown: Shutdown,
}

impl TestServer {
    /// Spawn a server on an ephemeral port. `configure` edits a config
    /// that starts with one default full-CRUD mount.
    pub async fn spawn(configure: impl FnOnce(&mut ServerConfig)) -> Self {
        let mut config = ServerConfig {
            mounts: vec![MountConfig::default()],
            ..Default::default()
        };
        configure(&mut config);

        let stores: Vec<MemoryStore> = config.mounts.iter().map(|_| MemoryStore::new()).collect();
        let mounts: Vec<Mount> = config
            .mounts
            .iter()
            .cloned()
            .zip(stores.iter().cloned())
            .map(|(mount, store)| (mount, Arc::new(store) as Arc<dyn DocumentStore>))
            .collect();

        let server = HttpServer::with_mounts(&config, mounts);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, rx).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            stores,
            shutdown,
        }
    }

    /// Store backing the first mount.
    pub fn store(&self) -> &MemoryStore {
        &self.stores[0]
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}
