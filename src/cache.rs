//! Location cache
//!
//! Geocoding results are kept in a single table keyed by the search term.
//! Rows are never updated or removed, and nothing stops two concurrent
//! misses for the same city from both inserting.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::RwLock;

use crate::Result;
use crate::models::LocationRecord;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS locationtable (\
     id SERIAL PRIMARY KEY, \
     search_query VARCHAR(255), \
     formatted_query VARCHAR(255), \
     latitude VARCHAR(255), \
     longitude VARCHAR(255))";

const SELECT_BY_QUERY_SQL: &str = "SELECT search_query, formatted_query, latitude, longitude \
     FROM locationtable WHERE search_query = $1 ORDER BY id LIMIT 1";

const SELECT_ALL_SQL: &str =
    "SELECT search_query, formatted_query, latitude, longitude FROM locationtable ORDER BY id";

const INSERT_SQL: &str = "INSERT INTO locationtable (search_query, formatted_query, latitude, longitude) \
     VALUES ($1, $2, $3, $4)";

/// Storage for geocoded locations
#[async_trait]
pub trait LocationCache: Send + Sync {
    /// First row whose `search_query` equals `search_query` exactly
    async fn find(&self, search_query: &str) -> Result<Option<LocationRecord>>;

    /// Append a row
    async fn insert(&self, record: &LocationRecord) -> Result<()>;

    /// Every stored row, in insertion order
    async fn all(&self) -> Result<Vec<LocationRecord>>;
}

/// PostgreSQL-backed cache
#[derive(Clone)]
pub struct PgLocationCache {
    pool: PgPool,
}

impl PgLocationCache {
    /// Connect and make sure the table exists
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let cache = Self { pool };
        cache.ensure_schema().await?;
        Ok(cache)
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl LocationCache for PgLocationCache {
    #[tracing::instrument(name = "query_location_cache", level = "debug", skip(self))]
    async fn find(&self, search_query: &str) -> Result<Option<LocationRecord>> {
        let record = sqlx::query_as::<_, LocationRecord>(SELECT_BY_QUERY_SQL)
            .bind(search_query)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    #[tracing::instrument(name = "put_location_cache", level = "debug", skip(self))]
    async fn insert(&self, record: &LocationRecord) -> Result<()> {
        sqlx::query(INSERT_SQL)
            .bind(&record.search_query)
            .bind(&record.formatted_query)
            .bind(&record.latitude)
            .bind(&record.longitude)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn all(&self) -> Result<Vec<LocationRecord>> {
        let records = sqlx::query_as::<_, LocationRecord>(SELECT_ALL_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}

/// Process-local cache, used when no database is configured
#[derive(Clone, Default)]
pub struct MemoryLocationCache {
    rows: Arc<RwLock<Vec<LocationRecord>>>,
}

impl MemoryLocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache pre-filled with rows
    pub fn with_rows(rows: Vec<LocationRecord>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl LocationCache for MemoryLocationCache {
    async fn find(&self, search_query: &str) -> Result<Option<LocationRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|row| row.search_query == search_query)
            .cloned())
    }

    async fn insert(&self, record: &LocationRecord) -> Result<()> {
        self.rows.write().await.push(record.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<LocationRecord>> {
        Ok(self.rows.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seattle() -> LocationRecord {
        LocationRecord::new("seattle", "Seattle, King County, Washington, USA", "47.6038321", "-122.3300624")
    }

    #[tokio::test]
    async fn test_memory_cache_exact_match() {
        let cache = MemoryLocationCache::with_rows(vec![seattle()]);

        assert_eq!(cache.find("seattle").await.unwrap(), Some(seattle()));
        assert!(cache.find("Seattle").await.unwrap().is_none());
        assert!(cache.find("seattl").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_cache_allows_duplicates() {
        let cache = MemoryLocationCache::new();
        assert!(cache.is_empty().await);

        cache.insert(&seattle()).await.unwrap();
        cache.insert(&seattle()).await.unwrap();

        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.all().await.unwrap(), vec![seattle(), seattle()]);
    }

    #[tokio::test]
    async fn test_memory_cache_clones_share_rows() {
        let cache = MemoryLocationCache::new();
        let handle = cache.clone();
        handle.insert(&seattle()).await.unwrap();
        assert_eq!(cache.len().await, 1);
    }
}
