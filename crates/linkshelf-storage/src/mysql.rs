use async_trait::async_trait;
use jiff::Timestamp;
use linkshelf_core::{Link, LinkId, LinkPage, LinkStorage, NewLink, Result, StorageError};
use linkshelf_generator::{Generator, RandomGenerator};
use sqlx::mysql::{MySqlConnectOptions, MySqlRow};
use sqlx::{Executor, MySqlPool, Row, Statement};
use tracing::{debug, error, trace, warn};

const SELECT_BY_ID: &str = r#"
    SELECT id, short_name, original_url, comment
    FROM links
    WHERE id = ?
    "#;

const SELECT_BY_SHORT_NAME: &str = r#"
    SELECT id, short_name, original_url, comment
    FROM links
    WHERE short_name = ?
    "#;

/// SQLSTATE of a value that does not fit its column.
const DATA_TOO_LONG: &str = "22001";

const DELETE_BY_ID: &str = "DELETE FROM links WHERE id = ?";

/// MySQL implementation of the [`LinkStorage`] contract.
///
/// Rows live in a single `links` table whose `short_name` column carries a
/// unique index (see [`crate::schema`]). Inserts and updates check the short
/// name before writing; a concurrent writer that slips between the check and
/// the write is caught by the unique index and reported as a conflict.
#[derive(Debug, Clone)]
pub struct MySqlLinkStorage<G = RandomGenerator> {
    pool: MySqlPool,
    generator: G,
}

impl MySqlLinkStorage {
    /// Creates a storage from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_generator(pool, RandomGenerator::new())
    }

    /// Creates a storage by opening a new MySQL connection pool.
    pub async fn connect(options: MySqlConnectOptions) -> Result<Self> {
        let pool = MySqlPool::connect_with(options)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }
}

impl<G: Generator> MySqlLinkStorage<G> {
    /// Creates a storage using the given short name generator.
    pub fn with_generator(pool: MySqlPool, generator: G) -> Self {
        Self { pool, generator }
    }

    async fn count_all(&self) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(id) AS total FROM links")
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| StorageError::Failure("count query returned no rows".into()))?;

        let total: i64 = row.try_get("total").map_err(map_sqlx_error)?;
        usize::try_from(total)
            .map_err(|_| StorageError::InvalidData(format!("invalid link count {total}")))
    }

    async fn find_one(&self, query: &'static str, bind: BindValue<'_>) -> Result<Option<Link>> {
        let query = sqlx::query(query);
        let query = match bind {
            BindValue::Id(id) => query.bind(id.get()),
            BindValue::ShortName(short_name) => query.bind(short_name),
        };

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(|row| link_from_row(&row))
            .transpose()
    }

    /// Reads the link holding `short_name` after the unique index rejected a
    /// write, so the conflict can carry the winning record.
    async fn conflict_after_race(&self, short_name: &str) -> StorageError {
        warn!(short_name, "unique index rejected a write that passed the pre-check");

        match self
            .find_one(SELECT_BY_SHORT_NAME, BindValue::ShortName(short_name))
            .await
        {
            Ok(Some(existing)) => StorageError::conflict(existing),
            Ok(None) => StorageError::Failure(format!(
                "short name {short_name} violated the unique index but no holder was found"
            )),
            Err(err) => err,
        }
    }
}

enum BindValue<'a> {
    Id(LinkId),
    ShortName(&'a str),
}

fn now_unix_seconds() -> i64 {
    Timestamp::now().as_second()
}

fn link_from_row(row: &MySqlRow) -> Result<Link> {
    let id: u64 = row.try_get("id").map_err(map_sqlx_error)?;
    Ok(Link {
        id: LinkId::new(id),
        short_name: row.try_get("short_name").map_err(map_sqlx_error)?,
        original_url: row.try_get("original_url").map_err(map_sqlx_error)?,
        comment: row.try_get("comment").map_err(map_sqlx_error)?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        sqlx::Error::Database(ref db) if db.code().as_deref() == Some(DATA_TOO_LONG) => {
            StorageError::InvalidData(message)
        }
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl<G: Generator> LinkStorage for MySqlLinkStorage<G> {
    async fn paginated_get_all(&self, page_number: usize, page_size: usize) -> Result<LinkPage> {
        let total = self.count_all().await?;

        if page_size == 0 {
            return Ok(LinkPage {
                links: Vec::new(),
                total,
            });
        }

        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        let limit = u64::try_from(page_size).unwrap_or(u64::MAX);
        let offset = u64::try_from(offset).unwrap_or(u64::MAX);

        let rows = sqlx::query(
            r#"
            SELECT id, short_name, original_url, comment
            FROM links
            ORDER BY id ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let links = rows
            .iter()
            .map(link_from_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(LinkPage { links, total })
    }

    async fn get_one(&self, id: LinkId) -> Result<Link> {
        trace!(%id, "fetching link by id");

        self.find_one(SELECT_BY_ID, BindValue::Id(id))
            .await?
            .ok_or_else(|| StorageError::NotFound(format!("link for id {id} not found")))
    }

    async fn get_one_by_short_name(&self, short_name: &str) -> Result<Link> {
        trace!(short_name, "fetching link by short name");

        self.find_one(SELECT_BY_SHORT_NAME, BindValue::ShortName(short_name))
            .await?
            .ok_or_else(|| {
                StorageError::NotFound(format!("link for short name {short_name} not found"))
            })
    }

    async fn insert(&self, mut link: NewLink) -> Result<Link> {
        if link.short_name.is_empty() {
            link.short_name = self.generator.generate();
        }
        link.check_storable()?;

        if let Some(existing) = self
            .find_one(SELECT_BY_SHORT_NAME, BindValue::ShortName(&link.short_name))
            .await?
        {
            debug!(short_name = %link.short_name, existing_id = %existing.id, "short name already taken");
            return Err(StorageError::conflict(existing));
        }

        let now = now_unix_seconds();
        let result = sqlx::query(
            r#"
            INSERT INTO links (short_name, original_url, comment, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&link.short_name)
        .bind(&link.original_url)
        .bind(&link.comment)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) if is_unique_violation(&err) => {
                return Err(self.conflict_after_race(&link.short_name).await)
            }
            Err(err) => return Err(map_sqlx_error(err)),
        };

        let id = result.last_insert_id();
        if id == 0 {
            return Err(StorageError::Failure(
                "got non-positive last insert id".into(),
            ));
        }

        let link = link.into_link(LinkId::new(id));
        debug!(id = %link.id, short_name = %link.short_name, "inserted link");
        Ok(link)
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;

        let statement = match (&mut *conn).prepare(DELETE_BY_ID).await {
            Ok(statement) => statement,
            Err(err @ sqlx::Error::Database(_)) => {
                // The server refusing a constant statement means the schema or
                // the deployment is broken; serving on would hide it.
                error!(error = %err, "failed to prepare delete statement, aborting");
                std::process::abort();
            }
            Err(err) => return Err(map_sqlx_error(err)),
        };

        let result = statement
            .query()
            .bind(id.get())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("link for id {id} not found")));
        }

        debug!(%id, "deleted link");
        Ok(())
    }

    async fn update(&self, link: Link) -> Result<()> {
        link.check_storable()?;
        self.get_one(link.id).await?;

        if let Some(existing) = self
            .find_one(SELECT_BY_SHORT_NAME, BindValue::ShortName(&link.short_name))
            .await?
        {
            if existing.id != link.id {
                return Err(StorageError::conflict(existing));
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE links
            SET short_name = ?, original_url = ?, comment = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&link.short_name)
        .bind(&link.original_url)
        .bind(&link.comment)
        .bind(now_unix_seconds())
        .bind(link.id.get())
        .execute(&self.pool)
        .await;

        let result = match result {
            Ok(result) => result,
            Err(err) if is_unique_violation(&err) => {
                return Err(self.conflict_after_race(&link.short_name).await)
            }
            Err(err) => return Err(map_sqlx_error(err)),
        };

        // existence was confirmed above, so no affected row is a discrepancy
        if result.rows_affected() == 0 {
            return Err(StorageError::Failure(format!(
                "database reported no rows changed for link {}",
                link.id
            )));
        }

        debug!(id = %link.id, short_name = %link.short_name, "updated link");
        Ok(())
    }
}
