use anyhow::Context;
use clap::Parser;
use mesto::{
    config::{get_config, CliArgs, Config},
    create_app, db, run_migrations,
};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Loads the configuration under a temporary plain-text subscriber
///
/// The global subscriber depends on the loaded configuration, so lines
/// logged while loading it go to `writer` instead.
fn load_config<W>(args: &CliArgs, writer: W) -> anyhow::Result<Config>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(bootstrap, || get_config(args))
}

/// Installs the global subscriber
///
/// The returned guard flushes buffered log lines when dropped, so it has to
/// live until the server exits.
fn init_logging(config: &Config) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer);
    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, finishing in-flight requests");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args, std::io::stderr)?;
    let _guard = init_logging(&config);

    info!(
        database_url = %config.database_url,
        bind_address = %config.bind_address,
        acting_user_id = ?config.acting_user_id,
        log_json = config.log_json,
        "Starting mesto"
    );

    let pool = db::init_pool(&config.database_url)
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    {
        let mut conn = pool.get().context("Failed to get a connection for migrations")?;
        run_migrations(&mut conn)?;
    }

    let app = create_app(Arc::new(pool), config.acting_user_id.clone());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}, press Ctrl+C to stop", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
