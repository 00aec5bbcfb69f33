//! The record store behind the worlds endpoint.
//!
//! [`WorldStore`] is object-safe so handlers hold an `Arc<dyn WorldStore>`.
//! [`PgWorldStore`] is the production backend; [`MemoryWorldStore`] keeps
//! everything in process and backs the HTTP tests and database-less runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use worlds_core::types::DbId;
use worlds_core::world::{WorldPatch, WorldUpload};

use crate::models::world::World;
use crate::repositories::WorldRepo;
use crate::DbPool;

/// Storage operations the worlds endpoint needs.
///
/// Counter bumps only touch their counter; `updated_at` moves on
/// [`create`](WorldStore::create) and [`update`](WorldStore::update) only.
#[async_trait]
pub trait WorldStore: Send + Sync {
    /// All worlds ordered by `date DESC, id DESC`.
    async fn list(&self) -> Result<Vec<World>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<World>, sqlx::Error>;

    async fn create(&self, input: &WorldUpload) -> Result<World, sqlx::Error>;

    /// Apply `patch`; `None` if the world does not exist.
    async fn update(&self, id: DbId, patch: &WorldPatch) -> Result<Option<World>, sqlx::Error>;

    /// Remove a world for good. `false` if it did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Count one download and hand back the payload.
    async fn record_download(&self, id: DbId) -> Result<Option<String>, sqlx::Error>;

    /// Count one report. `false` if the world did not exist.
    async fn record_report(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`WorldStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgWorldStore {
    pool: DbPool,
}

impl PgWorldStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl WorldStore for PgWorldStore {
    async fn list(&self) -> Result<Vec<World>, sqlx::Error> {
        WorldRepo::list(&self.pool).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<World>, sqlx::Error> {
        WorldRepo::find_by_id(&self.pool, id).await
    }

    async fn create(&self, input: &WorldUpload) -> Result<World, sqlx::Error> {
        WorldRepo::create(&self.pool, input).await
    }

    async fn update(&self, id: DbId, patch: &WorldPatch) -> Result<Option<World>, sqlx::Error> {
        WorldRepo::update(&self.pool, id, patch).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        WorldRepo::delete(&self.pool, id).await
    }

    async fn record_download(&self, id: DbId) -> Result<Option<String>, sqlx::Error> {
        WorldRepo::increment_downloads(&self.pool, id).await
    }

    async fn record_report(&self, id: DbId) -> Result<bool, sqlx::Error> {
        WorldRepo::increment_reports(&self.pool, id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MemoryInner {
    last_id: DbId,
    rows: BTreeMap<DbId, World>,
}

/// [`WorldStore`] held entirely in process memory. Contents are lost on
/// restart.
#[derive(Clone, Default)]
pub struct MemoryWorldStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryWorldStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorldStore for MemoryWorldStore {
    async fn list(&self) -> Result<Vec<World>, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut worlds: Vec<World> = inner.rows.values().cloned().collect();
        worlds.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
        Ok(worlds)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<World>, sqlx::Error> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &WorldUpload) -> Result<World, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let now = Utc::now();
        let world = World {
            id: inner.last_id,
            name: input.name.clone(),
            featured: input.featured,
            date: now.date_naive(),
            downloads: 0,
            version: input.version.clone(),
            author: input.author.clone(),
            image: input.image.clone(),
            tbw: input.tbw.clone(),
            reports: 0,
            updated_at: now,
        };
        inner.rows.insert(world.id, world.clone());
        Ok(world)
    }

    async fn update(&self, id: DbId, patch: &WorldPatch) -> Result<Option<World>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        let Some(world) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            world.name.clone_from(name);
        }
        if let Some(tbw) = &patch.tbw {
            world.tbw.clone_from(tbw);
        }
        if let Some(featured) = patch.featured {
            world.featured = featured;
        }
        if let Some(version) = &patch.version {
            world.version.clone_from(version);
        }
        if let Some(author) = &patch.author {
            world.author.clone_from(author);
        }
        if let Some(image) = &patch.image {
            world.image.clone_from(image);
        }

        // Strictly later than the previous save, even within clock resolution.
        let now = Utc::now();
        world.updated_at = if now > world.updated_at {
            now
        } else {
            world.updated_at + Duration::microseconds(1)
        };

        Ok(Some(world.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn record_download(&self, id: DbId) -> Result<Option<String>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        Ok(inner.rows.get_mut(&id).map(|world| {
            world.downloads += 1;
            world.tbw.clone()
        }))
    }

    async fn record_report(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(world) => {
                world.reports += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
