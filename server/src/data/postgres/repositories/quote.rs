//! Quote repository for PostgreSQL operations
//!
//! Includes the batched voted-set lookup used to annotate quote listings
//! with `user_has_voted` in a single query.

use std::collections::HashSet;

use sqlx::PgPool;

use crate::data::error::DataError;
use crate::data::types::{Author, AuthorRefs, QuoteRow};

/// Fields for a new quote submission
#[derive(Debug, Clone, Default)]
pub struct NewQuote {
    pub author: AuthorRefs,
    pub child_name: Option<String>,
    pub child_age_years: Option<i32>,
    pub child_age_months: Option<i32>,
    pub quote: String,
    pub context: Option<String>,
    pub language: Option<String>,
}

/// Create a quote. New quotes start as `pending` with zero votes.
pub async fn create_quote(pool: &PgPool, new: &NewQuote) -> Result<QuoteRow, DataError> {
    new.author.validate()?;
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query_as::<_, QuoteRow>(
        r#"
        INSERT INTO quotes (user_id, device_id, child_name, child_age_years, child_age_months,
                            quote, context, language, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'fr'), $9, $9)
        RETURNING *
        "#,
    )
    .bind(new.author.user_id)
    .bind(new.author.device_id.as_deref())
    .bind(new.child_name.as_deref())
    .bind(new.child_age_years)
    .bind(new.child_age_months)
    .bind(&new.quote)
    .bind(new.context.as_deref())
    .bind(new.language.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// List quotes, excluding soft-deleted rows
///
/// `sort_column` must already be validated against the allow-list; it is
/// interpolated into the query, never bound.
pub async fn list_quotes(
    pool: &PgPool,
    limit: u32,
    sort_column: &str,
    descending: bool,
) -> Result<Vec<QuoteRow>, DataError> {
    let direction = if descending { "DESC" } else { "ASC" };
    let query = format!(
        "SELECT * FROM quotes WHERE deleted_at IS NULL ORDER BY {} {} LIMIT $1",
        sort_column, direction
    );

    let rows = sqlx::query_as::<_, QuoteRow>(&query)
        .bind(limit as i64)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Get a quote by ID (soft-deleted rows are not found)
pub async fn get_quote(pool: &PgPool, id: i64) -> Result<Option<QuoteRow>, DataError> {
    let row = sqlx::query_as::<_, QuoteRow>(
        "SELECT * FROM quotes WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Update a quote's text or context
pub async fn update_quote(
    pool: &PgPool,
    id: i64,
    quote: Option<&str>,
    context: Option<&str>,
) -> Result<Option<QuoteRow>, DataError> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query_as::<_, QuoteRow>(
        r#"
        UPDATE quotes
        SET quote = COALESCE($1, quote),
            context = COALESCE($2, context),
            updated_at = $3
        WHERE id = $4 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(quote)
    .bind(context)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Soft-delete a quote
pub async fn soft_delete_quote(pool: &PgPool, id: i64) -> Result<bool, DataError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "UPDATE quotes SET deleted_at = $1, updated_at = $1 WHERE id = $2 AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Check which of the given quotes the requester has voted on (batch operation)
///
/// One query over the whole id set; returns the subset of `quote_ids` with a
/// vote by this author.
pub async fn check_voted(
    pool: &PgPool,
    author: &Author,
    quote_ids: &[i64],
) -> Result<HashSet<i64>, DataError> {
    if quote_ids.is_empty() {
        return Ok(HashSet::new());
    }

    // Build placeholders for IN clause with numbered parameters
    let placeholders: String = quote_ids
        .iter()
        .enumerate()
        .map(|(i, _)| format!("${}", i + 2))
        .collect::<Vec<_>>()
        .join(",");

    let column = match author {
        Author::User(_) => "user_id",
        Author::Device(_) => "device_id",
    };
    let query = format!(
        "SELECT quote_id FROM votes WHERE {} = $1 AND quote_id IN ({})",
        column, placeholders
    );

    let mut query_builder = sqlx::query_as::<_, (i64,)>(&query);
    query_builder = match author {
        Author::User(id) => query_builder.bind(*id),
        Author::Device(id) => query_builder.bind(id.clone()),
    };
    for id in quote_ids {
        query_builder = query_builder.bind(id);
    }

    let rows: Vec<(i64,)> = query_builder.fetch_all(pool).await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::AuthorError;

    #[test]
    fn test_create_quote_rejects_missing_author() {
        let new = NewQuote {
            quote: "Something short".to_string(),
            ..Default::default()
        };
        let err = new.author.validate().unwrap_err();
        assert_eq!(err, AuthorError::MissingAuthor);
    }
}
