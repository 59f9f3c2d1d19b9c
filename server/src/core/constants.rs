//! Application-wide constants

/// Application name (display)
pub const APP_NAME: &str = "Babillages";

/// Application name (lowercase, used for logging targets)
pub const APP_NAME_LOWER: &str = "babillages";

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "babillages.json";

/// Env var: path to config file
pub const ENV_CONFIG: &str = "BABILLAGES_CONFIG";

/// Env var: server host
pub const ENV_HOST: &str = "BABILLAGES_HOST";

/// Env var: server port
pub const ENV_PORT: &str = "BABILLAGES_PORT";

/// Env var: log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "BABILLAGES_LOG";

/// Env var: PostgreSQL connection URL
pub const ENV_DATABASE_URL: &str = "BABILLAGES_DATABASE_URL";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5180;

/// Default max request body size (bytes)
pub const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Maximum time to wait for background tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// PostgreSQL pool defaults
// =============================================================================

/// Default maximum pool connections
pub const POSTGRES_DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Default minimum pool connections kept warm
pub const POSTGRES_DEFAULT_MIN_CONNECTIONS: u32 = 2;

/// Default connection acquire timeout (seconds)
pub const POSTGRES_DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Default idle connection timeout (seconds)
pub const POSTGRES_DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default max connection lifetime (seconds)
pub const POSTGRES_DEFAULT_MAX_LIFETIME_SECS: u64 = 1800;

/// Default statement timeout (seconds), 0 disables
pub const POSTGRES_DEFAULT_STATEMENT_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// API limits
// =============================================================================

/// Maximum items returned by list endpoints
pub const MAX_LIST_LIMIT: u32 = 200;

/// Default items returned by list endpoints
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Quote text length bounds (mirrored by the quotes_quote_length CHECK)
pub const QUOTE_MIN_CHARS: usize = 5;
pub const QUOTE_MAX_CHARS: usize = 800;

/// Maximum length for opaque text ids (device ids, fingerprints)
pub const MAX_ID_LENGTH: usize = 256;
