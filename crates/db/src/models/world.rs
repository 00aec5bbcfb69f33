//! World entity model and its public projection.

use serde::Serialize;
use sqlx::FromRow;
use worlds_core::types::{Date, DbId, Timestamp};

/// A row from the `worlds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct World {
    pub id: DbId,
    pub name: String,
    pub featured: bool,
    pub date: Date,
    pub downloads: i64,
    pub version: String,
    pub author: String,
    pub image: String,
    pub tbw: String,
    pub reports: i64,
    pub updated_at: Timestamp,
}

/// The listing view of a world. Omits the `tbw` payload.
///
/// `featured` is rendered as `0`/`1` and `date` as `YYYY-MM-DD`, which is
/// what the game client parses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicWorld {
    pub id: DbId,
    pub name: String,
    pub featured: u8,
    pub date: String,
    pub downloads: i64,
    pub version: String,
    pub author: String,
    pub image: String,
}

impl From<&World> for PublicWorld {
    fn from(world: &World) -> Self {
        Self {
            id: world.id,
            name: world.name.clone(),
            featured: u8::from(world.featured),
            date: world.date.format("%Y-%m-%d").to_string(),
            downloads: world.downloads,
            version: world.version.clone(),
            author: world.author.clone(),
            image: world.image.clone(),
        }
    }
}

/// Body of a fetch-by-id response.
#[derive(Debug, Clone, Serialize)]
pub struct WorldPayload {
    pub tbw: String,
}
