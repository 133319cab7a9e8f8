use astrologer_core::repository::{ReadRepository, Repository, Result};
use astrologer_core::{Picture, StorageError};
use async_trait::async_trait;
use jiff::civil::Date;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::debug;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Postgres implementation of the repository contract.
///
/// Dates travel as `YYYY-MM-DD` text and are cast to `DATE` on the server,
/// which keeps the key free of any time-of-day component. The `date` column
/// is the primary key and inserts use `ON CONFLICT DO NOTHING`, so the first
/// picture stored for a day wins.
#[derive(Debug, Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a repository from an existing Postgres connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new Postgres connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Query(format!("migration failed: {e}")))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn parse_date(raw: &str) -> Result<Date> {
    raw.parse::<Date>()
        .map_err(|e| StorageError::InvalidData(format!("invalid picture date '{raw}': {e}")))
}

fn picture_from_row(row: &PgRow) -> Result<Picture> {
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let date: String = row.try_get("date").map_err(map_sqlx_error)?;
    let image: Vec<u8> = row.try_get("image").map_err(map_sqlx_error)?;

    Ok(Picture {
        title,
        date: parse_date(&date)?,
        image,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
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
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for PostgresRepository {
    async fn get(&self, date: Date) -> Result<Option<Picture>> {
        let row = sqlx::query(
            r#"
            SELECT title, to_char(date, 'YYYY-MM-DD') AS date, image
            FROM picture
            WHERE date = $1::date
            "#,
        )
        .bind(date.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(picture_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Picture>> {
        let rows = sqlx::query(
            r#"
            SELECT title, to_char(date, 'YYYY-MM-DD') AS date, image
            FROM picture
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(picture_from_row).collect()
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn insert(&self, picture: &Picture) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO picture (title, date, image)
            VALUES ($1, $2::date, $3)
            ON CONFLICT (date) DO NOTHING
            "#,
        )
        .bind(picture.title.as_str())
        .bind(picture.date.to_string())
        .bind(picture.image.as_slice())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let written = result.rows_affected() > 0;
        if !written {
            debug!(date = %picture.date, "picture already stored, insert ignored");
        }
        Ok(written)
    }
}
