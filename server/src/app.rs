//! Core application

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::cli::{self, CliConfig, Commands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::PostgresService;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub database: Arc<PostgresService>,
}

impl CoreApp {
    /// Parse the CLI, wire up services, and serve until shutdown
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        init_logging();

        let (cli_config, command) = cli::parse();
        match command {
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        app.serve().await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let database = Arc::new(PostgresService::init(&config.postgres).await?);

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            database,
        })
    }

    async fn serve(self) -> Result<()> {
        // Signal handlers go in before anything can block
        self.shutdown.install_signal_handlers();

        let health_task = self
            .database
            .start_health_check_task(self.shutdown.subscribe());
        self.shutdown.register(health_task).await;

        tracing::info!(
            host = %self.config.server.host,
            port = self.config.server.port,
            "Server listening"
        );

        let app = ApiServer::new(self).start().await?;
        app.shutdown.shutdown().await;
        app.database.close().await;

        Ok(())
    }
}

fn init_logging() {
    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| format!("info,{}=info", APP_NAME_LOWER));

    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}
