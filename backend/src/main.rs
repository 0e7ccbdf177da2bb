//! Service entry-point: parses flags, loads templates, wires storage and
//! starts the HTTP server.

mod server;

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use snippetbox::inbound::http::session_config::{BuildMode, session_settings_from_env};
use snippetbox::inbound::http::templates::TemplateCache;
use snippetbox::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// `snippetbox` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "snippetbox", about = "Share short text snippets", version)]
struct CliArgs {
    /// Socket address to listen on.
    #[arg(long, env = "SNIPPETBOX_ADDR", default_value = "127.0.0.1:4000")]
    addr: SocketAddr,
    /// PostgreSQL connection URL. Snippets and users live in memory when omitted.
    #[arg(long = "database-url", env = "DATABASE_URL", value_name = "url")]
    database_url: Option<String>,
    /// Directory holding `html/` templates and `static/` assets.
    #[arg(long = "ui-dir", env = "SNIPPETBOX_UI_DIR", default_value = "./ui")]
    ui_dir: PathBuf,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();

    let env = DefaultEnv::new();
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(|error| io::Error::other(format!("session configuration: {error}")))?;

    let templates = TemplateCache::from_dir(&args.ui_dir.join("html"))
        .map_err(|error| io::Error::other(format!("template cache: {error}")))?;

    let mut config = ServerConfig::new(session, args.addr, &args.ui_dir.join("static"));
    match args.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(|error| io::Error::other(format!("migrations: {error}")))?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|error| io::Error::other(format!("database pool: {error}")))?;
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("DATABASE_URL not set; snippets and users are kept in memory");
        }
    }

    let server = create_server(config, Arc::new(templates))?;
    info!(addr = %args.addr, "starting server");
    server.await
}
