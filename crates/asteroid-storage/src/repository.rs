//! Document repository: create/read/update/delete over a [`Store`].

use crate::{
    context::OpContext,
    errors::RepositoryError,
    traits::Store,
    types::{Document, GetOptions, LoadDepth},
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Keyed document operations over an append-only log
///
/// Reads always force a full reload of the local view first. Updates append a
/// new version under the same id; concurrent updates are not serialized here
/// and the last successful append wins.
pub struct DocumentRepository {
    store: Arc<dyn Store>,
}

impl DocumentRepository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Address of the backing log
    pub fn address(&self) -> String {
        self.store.address()
    }

    /// Append a new document, generating an id unless one is supplied
    pub async fn create<T>(&self, ctx: &OpContext, entity: &T, id: Option<String>) -> Result<Document>
    where
        T: Serialize + Sync + ?Sized,
    {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let document = Document::wrap(id.clone(), entity)?;

        ctx.run("create", &id, async {
            let version = self
                .store
                .put(document.clone())
                .await
                .map_err(|e| RepositoryError::write("create", &id, e))?;
            debug!(key = %id, seq = version.seq, "Created document");
            Ok(document)
        })
        .await
    }

    /// Read the current document for `id`
    pub async fn read(&self, ctx: &OpContext, id: &str) -> Result<Document> {
        ctx.run("read", id, self.load_and_get(id)).await
    }

    /// Read and decode the current document for `id`
    pub async fn read_as<T: DeserializeOwned>(&self, ctx: &OpContext, id: &str) -> Result<T> {
        self.read(ctx, id).await?.unwrap_as()
    }

    /// Append a new version of an existing document
    pub async fn update<T>(&self, ctx: &OpContext, id: &str, entity: &T) -> Result<Document>
    where
        T: Serialize + Sync + ?Sized,
    {
        let document = Document::wrap(id, entity)?;

        ctx.run("update", id, async {
            self.load_and_get(id).await?;
            let version = self
                .store
                .put(document.clone())
                .await
                .map_err(|e| RepositoryError::write("update", id, e))?;
            debug!(key = %id, seq = version.seq, "Appended document version");
            Ok(document)
        })
        .await
    }

    /// Append a tombstone for `id`
    pub async fn delete(&self, ctx: &OpContext, id: &str) -> Result<()> {
        ctx.run("delete", id, async {
            let version = self
                .store
                .delete(id)
                .await
                .map_err(|e| RepositoryError::write("delete", id, e))?;
            debug!(key = %id, seq = version.seq, "Appended tombstone");
            Ok(())
        })
        .await
    }

    /// Replay the whole log into the local view
    pub async fn load(&self, ctx: &OpContext) -> Result<()> {
        ctx.run("load", "*", async {
            self.store
                .load(LoadDepth::Unbounded)
                .await
                .map_err(|e| RepositoryError::load("*", e))
        })
        .await
    }

    /// Release the store handle
    pub async fn close(&self) -> Result<()> {
        self.store
            .close()
            .await
            .map_err(RepositoryError::StoreUnavailable)
    }

    async fn load_and_get(&self, id: &str) -> Result<Document> {
        self.store
            .load(LoadDepth::Unbounded)
            .await
            .map_err(|e| RepositoryError::load(id, e))?;

        let mut found = self
            .store
            .get(id, GetOptions::exact())
            .await
            .map_err(|e| RepositoryError::load(id, e))?;

        match found.len() {
            0 => Err(RepositoryError::NotFound(id.to_string())),
            1 => Ok(found.remove(0)),
            count => {
                warn!(key = %id, count, "Exact key resolved to several documents");
                Err(RepositoryError::AmbiguousKey {
                    key: id.to_string(),
                    count,
                })
            }
        }
    }
}
