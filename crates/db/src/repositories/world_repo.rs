//! Repository for the `worlds` table.

use sqlx::PgPool;
use worlds_core::types::DbId;
use worlds_core::world::{WorldPatch, WorldUpload};

use crate::models::world::World;

/// Column list for `worlds` queries.
const COLUMNS: &str = "\
    id, name, featured, date, downloads, version, author, image, \
    tbw, reports, updated_at";

/// Provides CRUD operations and counter bumps for worlds.
pub struct WorldRepo;

impl WorldRepo {
    /// Insert a resolved upload, returning the full row.
    ///
    /// `id`, `date`, both counters and `updated_at` come from column defaults.
    pub async fn create(pool: &PgPool, input: &WorldUpload) -> Result<World, sqlx::Error> {
        let query = format!(
            "INSERT INTO worlds (name, tbw, featured, version, author, image) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, World>(&query)
            .bind(&input.name)
            .bind(&input.tbw)
            .bind(input.featured)
            .bind(&input.version)
            .bind(&input.author)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find a world by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<World>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM worlds WHERE id = $1");
        sqlx::query_as::<_, World>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all worlds, newest first (`date DESC, id DESC`).
    pub async fn list(pool: &PgPool) -> Result<Vec<World>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM worlds ORDER BY date DESC, id DESC");
        sqlx::query_as::<_, World>(&query).fetch_all(pool).await
    }

    /// Overwrite the fields present in `patch` and refresh `updated_at`.
    ///
    /// Returns `None` if no world has the given ID.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &WorldPatch,
    ) -> Result<Option<World>, sqlx::Error> {
        let query = format!(
            "UPDATE worlds SET \
                name = COALESCE($2, name), \
                tbw = COALESCE($3, tbw), \
                featured = COALESCE($4, featured), \
                version = COALESCE($5, version), \
                author = COALESCE($6, author), \
                image = COALESCE($7, image), \
                updated_at = clock_timestamp() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, World>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.tbw)
            .bind(patch.featured)
            .bind(&patch.version)
            .bind(&patch.author)
            .bind(&patch.image)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a world. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM worlds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add one to `downloads` and return the stored payload.
    ///
    /// Single statement, so concurrent fetches never lose an increment.
    /// `updated_at` is left alone.
    pub async fn increment_downloads(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "UPDATE worlds SET downloads = downloads + 1 WHERE id = $1 RETURNING tbw",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Add one to `reports`. Returns `false` if no world has the given ID.
    pub async fn increment_reports(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE worlds SET reports = reports + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
