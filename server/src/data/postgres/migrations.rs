//! PostgreSQL migration management
//!
//! Applies the initial schema on a fresh database and replays versioned
//! migrations on an existing one. Version state lives in `schema_version`
//! (single row) and each applied step is recorded in `schema_migrations`.

use sqlx::PgPool;

use super::error::PostgresError;
use super::schema::{DEFAULT_DATA, SCHEMA, SCHEMA_VERSION};

/// Migrations applied on top of the v1 schema, in version order.
/// Each entry is (version, name, sql). Empty while the schema is at v1.
const MIGRATIONS: &[(i32, &str, &str)] = &[];

/// Bring the database up to [`SCHEMA_VERSION`]
pub async fn run_migrations(pool: &PgPool) -> Result<(), PostgresError> {
    let current = current_version(pool).await?;

    match current {
        None => {
            tracing::debug!("Applying initial schema v{}", SCHEMA_VERSION);
            apply_initial_schema(pool).await?;
        }
        Some(v) if v < SCHEMA_VERSION => {
            tracing::debug!("Migrating schema from v{} to v{}", v, SCHEMA_VERSION);
            for version in (v + 1)..=SCHEMA_VERSION {
                apply_versioned_migration(pool, version).await?;
            }
        }
        Some(v) if v > SCHEMA_VERSION => {
            tracing::warn!(
                "Database schema v{} is newer than application schema v{}. This may cause issues.",
                v,
                SCHEMA_VERSION
            );
        }
        Some(v) => {
            tracing::debug!("Schema is up to date (v{})", v);
        }
    }

    Ok(())
}

/// Read the current schema version, or None on a fresh database
async fn current_version(pool: &PgPool) -> Result<Option<i32>, PostgresError> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(None);
    }

    let version: Option<i32> = sqlx::query_scalar("SELECT version FROM schema_version WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(version)
}

async fn apply_initial_schema(pool: &PgPool) -> Result<(), PostgresError> {
    let now = chrono::Utc::now().timestamp();

    // Multi-command batches must go through the simple query protocol;
    // a prepared statement can hold only one command.
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    sqlx::raw_sql(DEFAULT_DATA).execute(pool).await?;

    sqlx::query(
        "INSERT INTO schema_version (id, version, applied_at, description)
         VALUES (1, $1, $2, 'Initial schema')
         ON CONFLICT (id) DO UPDATE SET version = $1, applied_at = $2",
    )
    .bind(SCHEMA_VERSION)
    .bind(now)
    .execute(pool)
    .await?;

    tracing::debug!("Schema v{} applied", SCHEMA_VERSION);
    Ok(())
}

async fn apply_versioned_migration(pool: &PgPool, version: i32) -> Result<(), PostgresError> {
    let Some((_, name, sql)) = MIGRATIONS.iter().find(|(v, _, _)| *v == version) else {
        return Err(PostgresError::MigrationFailed {
            version,
            name: "unknown".to_string(),
            error: format!("No migration defined for version {}", version),
        });
    };

    let start = std::time::Instant::now();
    let now = chrono::Utc::now().timestamp();

    sqlx::raw_sql(sql)
        .execute(pool)
        .await
        .map_err(|e| PostgresError::MigrationFailed {
            version,
            name: (*name).to_string(),
            error: e.to_string(),
        })?;

    let elapsed = start.elapsed().as_millis() as i64;

    sqlx::query(
        "INSERT INTO schema_migrations (version, name, applied_at, checksum, execution_time_ms, success)
         VALUES ($1, $2, $3, $4, $5, TRUE)",
    )
    .bind(version)
    .bind(name)
    .bind(now)
    .bind(compute_checksum(sql))
    .bind(elapsed)
    .execute(pool)
    .await?;

    sqlx::query("UPDATE schema_version SET version = $1, applied_at = $2 WHERE id = 1")
        .bind(version)
        .bind(now)
        .execute(pool)
        .await?;

    tracing::debug!("Migration v{} ({}) applied in {}ms", version, name, elapsed);
    Ok(())
}

fn compute_checksum(sql: &str) -> String {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    sql.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_list_is_sorted_and_contiguous() {
        let mut expected = 2;
        for (version, name, _) in MIGRATIONS {
            assert_eq!(*version, expected, "migration {} out of order", name);
            expected += 1;
        }
        assert_eq!(expected - 1, SCHEMA_VERSION.max(1));
    }

    #[test]
    fn test_schema_batch_is_multi_statement() {
        // Guards the raw_sql requirement above: the schema is a batch of
        // many commands and would be rejected as a prepared statement.
        assert!(SCHEMA.matches(';').count() > 1);
        assert!(DEFAULT_DATA.contains(';'));
    }

    #[test]
    fn test_checksum_is_stable() {
        assert_eq!(compute_checksum("SELECT 1"), compute_checksum("SELECT 1"));
        assert_ne!(compute_checksum("SELECT 1"), compute_checksum("SELECT 2"));
    }
}
