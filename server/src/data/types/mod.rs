//! Data layer row types
//!
//! One struct per table, mapped with `sqlx::FromRow`. Timestamps are
//! epoch-seconds. API-facing DTOs live in the route modules and convert
//! from these rows.

mod author;

pub use author::{Author, AuthorError, AuthorRefs};

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub auth_provider: String,
    pub provider_user_id: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub avatar_color: String,
    pub is_active: bool,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
    pub banned_at: Option<i64>,
    pub is_premium: bool,
    pub premium_expires_at: Option<i64>,
    pub locale: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_seen_at: Option<i64>,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct DeviceRow {
    pub id: String,
    pub device_fingerprint: String,
    pub user_id: Option<i64>,
    pub locale: String,
    pub platform: Option<String>,
    pub app_version: Option<String>,
    pub created_at: i64,
    pub last_seen_at: Option<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct QuoteRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub child_name: Option<String>,
    pub child_age_years: Option<i32>,
    pub child_age_months: Option<i32>,
    pub quote: String,
    pub context: Option<String>,
    pub language: String,
    pub status: String,
    pub moderation_method: Option<String>,
    pub rejection_reason: Option<String>,
    pub moderation_notes: Option<String>,
    pub moderated_at: Option<i64>,
    pub moderated_by: Option<String>,
    pub ai_safety_score: Option<f64>,
    pub ai_quality_score: Option<f64>,
    pub vote_count: i32,
    pub report_count: i32,
    pub trending_score: f64,
    pub bayesian_score: f64,
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct VoteRow {
    pub id: i64,
    pub quote_id: i64,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub vote_period: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ReportRow {
    pub id: i64,
    pub quote_id: i64,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub reason: String,
    pub details: Option<String>,
    pub status: String,
    pub reviewed_by: Option<String>,
    pub reviewed_at: Option<i64>,
    pub action_taken: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct RankingRow {
    pub id: i64,
    pub period: String,
    pub quote_id: i64,
    pub rank: i32,
    pub vote_count: i32,
    pub is_finalized: bool,
    pub created_at: i64,
}
