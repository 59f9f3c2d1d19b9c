//! PostgreSQL schema definitions
//!
//! Initial schema with all tables. The authorship CHECK constraints and the
//! partial unique indexes on votes are the storage-level contract for the
//! exclusive-authorship and one-vote-per-quote rules.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL for PostgreSQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at BIGINT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at BIGINT NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success BOOLEAN NOT NULL DEFAULT TRUE
);

-- =============================================================================
-- 1. Users (registered accounts; rows are soft-deleted, never dropped)
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    auth_provider TEXT NOT NULL CHECK(auth_provider IN ('apple', 'google', 'anonymous')),
    provider_user_id TEXT NOT NULL,
    email TEXT,
    email_verified BOOLEAN NOT NULL DEFAULT FALSE,
    display_name TEXT CHECK(display_name IS NULL OR length(display_name) <= 100),
    avatar_color TEXT NOT NULL DEFAULT '#F5C842',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    is_banned BOOLEAN NOT NULL DEFAULT FALSE,
    ban_reason TEXT,
    banned_at BIGINT,
    is_premium BOOLEAN NOT NULL DEFAULT FALSE,
    premium_expires_at BIGINT,
    locale TEXT NOT NULL DEFAULT 'fr',
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL,
    last_seen_at BIGINT,
    deleted_at BIGINT,
    UNIQUE (auth_provider, provider_user_id)
);

CREATE INDEX IF NOT EXISTS idx_users_email ON users(email) WHERE email IS NOT NULL;

-- =============================================================================
-- 2. Devices (anonymous clients; may later be linked to a user)
-- =============================================================================
CREATE TABLE IF NOT EXISTS devices (
    id TEXT PRIMARY KEY,
    device_fingerprint TEXT NOT NULL UNIQUE,
    user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
    locale TEXT NOT NULL DEFAULT 'fr',
    platform TEXT,
    app_version TEXT,
    created_at BIGINT NOT NULL,
    last_seen_at BIGINT
);

CREATE INDEX IF NOT EXISTS idx_devices_user ON devices(user_id) WHERE user_id IS NOT NULL;

-- =============================================================================
-- 3. Quotes (authored by a user OR a device; both at once is tolerated)
-- =============================================================================
CREATE TABLE IF NOT EXISTS quotes (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
    device_id TEXT REFERENCES devices(id) ON DELETE SET NULL,
    child_name TEXT,
    child_age_years INTEGER CHECK(child_age_years IS NULL OR (child_age_years >= 0 AND child_age_years <= 18)),
    child_age_months INTEGER CHECK(child_age_months IS NULL OR (child_age_months >= 0 AND child_age_months <= 11)),
    quote TEXT NOT NULL CHECK(length(quote) >= 5 AND length(quote) <= 800),
    context TEXT,
    language TEXT NOT NULL DEFAULT 'fr',
    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending', 'approved', 'rejected', 'flagged', 'archived')),
    moderation_method TEXT,
    rejection_reason TEXT,
    moderation_notes TEXT,
    moderated_at BIGINT,
    moderated_by TEXT,
    ai_safety_score DOUBLE PRECISION,
    ai_quality_score DOUBLE PRECISION,
    vote_count INTEGER NOT NULL DEFAULT 0,
    report_count INTEGER NOT NULL DEFAULT 0,
    trending_score DOUBLE PRECISION NOT NULL DEFAULT 0,
    bayesian_score DOUBLE PRECISION NOT NULL DEFAULT 0,
    published_at BIGINT,
    created_at BIGINT NOT NULL,
    updated_at BIGINT NOT NULL,
    deleted_at BIGINT,
    CHECK (user_id IS NOT NULL OR device_id IS NOT NULL)
);

CREATE INDEX IF NOT EXISTS idx_quotes_status ON quotes(status) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS idx_quotes_user ON quotes(user_id) WHERE user_id IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_quotes_device ON quotes(device_id) WHERE device_id IS NOT NULL;
CREATE INDEX IF NOT EXISTS idx_quotes_vote_count ON quotes(vote_count DESC) WHERE deleted_at IS NULL;

-- =============================================================================
-- 4. Votes (exactly one author reference; at most one vote per quote per actor)
-- =============================================================================
CREATE TABLE IF NOT EXISTS votes (
    id BIGSERIAL PRIMARY KEY,
    quote_id BIGINT NOT NULL REFERENCES quotes(id) ON DELETE CASCADE,
    user_id BIGINT REFERENCES users(id) ON DELETE CASCADE,
    device_id TEXT REFERENCES devices(id) ON DELETE CASCADE,
    vote_period TEXT NOT NULL,
    created_at BIGINT NOT NULL,
    CHECK ((user_id IS NOT NULL) <> (device_id IS NOT NULL))
);

-- One vote per quote per user / per device. vote_period is deliberately NOT
-- part of either key: uniqueness is per quote for the lifetime of the row.
CREATE UNIQUE INDEX IF NOT EXISTS votes_unique_user
    ON votes(quote_id, user_id)
    WHERE user_id IS NOT NULL;

CREATE UNIQUE INDEX IF NOT EXISTS votes_unique_device
    ON votes(quote_id, device_id)
    WHERE device_id IS NOT NULL;

CREATE INDEX IF NOT EXISTS idx_votes_quote ON votes(quote_id);
CREATE INDEX IF NOT EXISTS idx_votes_period ON votes(vote_period);

-- =============================================================================
-- 5. Reports (weak authorship like quotes; plain unique pairs)
-- =============================================================================
CREATE TABLE IF NOT EXISTS reports (
    id BIGSERIAL PRIMARY KEY,
    quote_id BIGINT NOT NULL REFERENCES quotes(id) ON DELETE CASCADE,
    user_id BIGINT REFERENCES users(id) ON DELETE SET NULL,
    device_id TEXT REFERENCES devices(id) ON DELETE SET NULL,
    reason TEXT NOT NULL CHECK(reason IN ('inappropriate', 'spam', 'fake', 'child_safety', 'copyright', 'other')),
    details TEXT,
    status TEXT NOT NULL DEFAULT 'pending' CHECK(status IN ('pending', 'reviewed', 'actioned', 'dismissed')),
    reviewed_by TEXT,
    reviewed_at BIGINT,
    action_taken TEXT,
    created_at BIGINT NOT NULL,
    CHECK (user_id IS NOT NULL OR device_id IS NOT NULL),
    UNIQUE (quote_id, user_id),
    UNIQUE (quote_id, device_id)
);

CREATE INDEX IF NOT EXISTS idx_reports_status ON reports(status);

-- =============================================================================
-- 6. Monthly rankings (immutable snapshots; no cascade from quotes)
-- =============================================================================
CREATE TABLE IF NOT EXISTS monthly_rankings (
    id BIGSERIAL PRIMARY KEY,
    period TEXT NOT NULL,
    quote_id BIGINT NOT NULL REFERENCES quotes(id),
    rank INTEGER NOT NULL,
    vote_count INTEGER NOT NULL,
    is_finalized BOOLEAN NOT NULL DEFAULT FALSE,
    created_at BIGINT NOT NULL,
    UNIQUE (period, quote_id)
);

CREATE INDEX IF NOT EXISTS idx_rankings_period ON monthly_rankings(period, rank);
"#;

/// Default data applied after the initial schema
pub const DEFAULT_DATA: &str = r#"
-- No seed rows required
SELECT 1;
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{QUOTE_MAX_CHARS, QUOTE_MIN_CHARS};

    #[test]
    fn test_quote_length_check_matches_api_bounds() {
        let check = format!(
            "length(quote) >= {} AND length(quote) <= {}",
            QUOTE_MIN_CHARS, QUOTE_MAX_CHARS
        );
        assert!(SCHEMA.contains(&check));
    }

    #[test]
    fn test_schema_contains_all_tables() {
        for table in [
            "schema_version",
            "schema_migrations",
            "users",
            "devices",
            "quotes",
            "votes",
            "reports",
            "monthly_rankings",
        ] {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_votes_enforce_exclusive_authorship() {
        assert!(SCHEMA.contains("CHECK ((user_id IS NOT NULL) <> (device_id IS NOT NULL))"));
    }

    #[test]
    fn test_quotes_and_reports_require_at_least_one_author() {
        let occurrences = SCHEMA
            .matches("CHECK (user_id IS NOT NULL OR device_id IS NOT NULL)")
            .count();
        assert_eq!(occurrences, 2, "quotes and reports both carry the weak rule");
    }

    #[test]
    fn test_vote_uniqueness_is_partial_and_per_quote() {
        assert!(SCHEMA.contains(
            "CREATE UNIQUE INDEX IF NOT EXISTS votes_unique_user\n    ON votes(quote_id, user_id)\n    WHERE user_id IS NOT NULL;"
        ));
        assert!(SCHEMA.contains(
            "CREATE UNIQUE INDEX IF NOT EXISTS votes_unique_device\n    ON votes(quote_id, device_id)\n    WHERE device_id IS NOT NULL;"
        ));
        // vote_period must not appear in either uniqueness key
        assert!(!SCHEMA.contains("votes(quote_id, user_id, vote_period)"));
        assert!(!SCHEMA.contains("votes(quote_id, device_id, vote_period)"));
    }

    #[test]
    fn test_rankings_do_not_cascade_from_quotes() {
        let rankings = SCHEMA
            .split("monthly_rankings")
            .nth(1)
            .unwrap_or_default();
        let table_body = rankings.split(';').next().unwrap_or_default();
        assert!(table_body.contains("REFERENCES quotes(id)"));
        assert!(!table_body.contains("ON DELETE CASCADE"));
    }
}
