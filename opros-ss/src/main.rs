//! opros-ss (Survey Storage) - bilingual yes/no survey backend
//!
//! Persists survey submissions into an append-only SQLite log and serves
//! raw results, aggregated summaries, and the two embedded pages (survey
//! form, results dashboard).

use anyhow::Result;
use clap::Parser;
use opros_common::{config, QuestionCatalog};
use opros_ss::{build_router, db, seed, AppState};
use std::sync::Arc;
use tracing::{error, info};

/// OPROS survey storage service
#[derive(Parser, Debug)]
#[command(name = "opros-ss", version)]
struct Args {
    /// Root folder holding opros.db and the optional questions.json
    #[arg(long)]
    root_folder: Option<String>,

    /// Listen port
    #[arg(long, env = "OPROS_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Token for the admin API; leaving it unset disables admin endpoints
    #[arg(long, env = "OPROS_ADMIN_TOKEN")]
    admin_token: Option<String>,

    /// Insert N randomized demo responses, then exit
    #[arg(long, value_name = "N")]
    seed_demo: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting OPROS Survey Storage (opros-ss) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match db::connect(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let catalog = QuestionCatalog::load(&root_folder)?;
    info!("✓ Loaded question catalogue ({} questions)", catalog.questions.len());

    if let Some(count) = args.seed_demo {
        let inserted = seed::seed_demo(&pool, &catalog, count).await?;
        info!("Seeded {} demo responses, exiting", inserted);
        return Ok(());
    }

    if args.admin_token.is_none() {
        info!("Admin API disabled (no admin token configured)");
    }

    // Create application state and router
    let state = AppState::new(pool, Arc::new(catalog), args.admin_token);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("opros-ss listening on http://127.0.0.1:{}", args.port);
    info!("Survey form: http://127.0.0.1:{}/", args.port);
    info!("Dashboard:   http://127.0.0.1:{}/results", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
