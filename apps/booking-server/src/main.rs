use anyhow::{anyhow, bail, Context, Result};
use appointments::{config::AppointmentsConfig, Appointments};
use axum::{
    body::Body,
    http::{HeaderName, Request},
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig, ServerConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::field::Empty;
use url::Url;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
/// - Adds `mode=rwc` so a missing database file gets created.
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        bail!("Empty SQLite path in DSN");
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    // Rebuild DSN with absolute path and normalized slashes
    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) if q.contains("mode=") => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

fn is_memory_dsn(dsn: &str) -> bool {
    dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
}

/// Booking Server - appointment booking service
#[derive(Parser)]
#[command(name = "booking-server")]
#[command(about = "Booking Server - appointment booking service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity / mock database)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Booking Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Only SQLite is compiled in.
fn ensure_sqlite(cfg: &DatabaseConfig) -> Result<()> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        bail!("Database URL not configured");
    }
    if is_memory_dsn(raw) {
        return Ok(());
    }

    let url = Url::parse(raw).map_err(|e| anyhow!("Invalid database DSN '{}': {}", raw, e))?;
    match url.scheme() {
        "sqlite" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| anyhow!("Invalid bind address '{}:{}': {}", server.host, server.port, e))
}

async fn connect_db(db_config: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    ensure_sqlite(db_config)?;

    // Absolutize sqlite DSNs to avoid cwd issues
    let dsn = absolutize_sqlite_dsn(db_config.url.trim(), base_dir, true)?;
    let memory = is_memory_dsn(&dsn);

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.acquire_timeout(Duration::from_secs(5));
    if memory {
        // One long-lived connection: each new one would open an empty database.
        opts.max_connections(1).min_connections(1);
    } else if let Some(max) = db_config.max_conns {
        opts.max_connections(max);
    }
    if let Some(ms) = db_config.busy_timeout_ms {
        let busy = Duration::from_millis(u64::from(ms));
        opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy));
    }

    tracing::info!("Connecting to database: {}", dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("Failed to connect to database '{dsn}'"))
}

fn build_router(module: &Appointments, server: &ServerConfig) -> Router {
    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let mut router = module
        .router()
        .route("/health", get(|| async { "ok" }))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    // Layers wrap outward: the last one added sees the request first.
    if server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(server.timeout_sec)));
    }
    router
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules...");

    let addr = bind_addr(&config.server)?;
    let db_config = config
        .database
        .clone()
        .ok_or_else(|| anyhow!("No database configuration found"))?;

    // Base dir for resolving relative sqlite paths (already absolute & created)
    let base_dir = PathBuf::from(&config.server.home_dir);
    let db = connect_db(&db_config, &base_dir).await?;

    let module_cfg: AppointmentsConfig = config.module_config("appointments")?;
    let module = Appointments::init(module_cfg, db).await?;
    let router = build_router(&module, &config.server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("HTTP server bound on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!(e))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = tokio::signal::ctrl_c() => {},
                }
            }
            Err(e) => {
                tracing::warn!("shutdown: SIGTERM handler unavailable ({}); using ctrl_c()", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("HTTP server shutting down gracefully");
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    bind_addr(&config.server)?;
    if let Some(db) = &config.database {
        ensure_sqlite(db)?;
    }

    let module_cfg: AppointmentsConfig = config.module_config("appointments")?;
    if let Some(raw) = module_cfg.notifications_base_url.as_deref() {
        Url::parse(raw.trim())
            .with_context(|| format!("Invalid notifications_base_url '{raw}'"))?;
    }

    // AppConfig::load_* already normalized & created home_dir
    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_kept() {
        let base = Path::new("/srv/booking");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite::memory:", base, false).unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", base, false).unwrap(),
            "sqlite::memory:"
        );
    }

    #[cfg(unix)]
    #[test]
    fn relative_dsn_resolves_against_home() {
        let base = Path::new("/srv/booking");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://database/booking.db", base, false).unwrap(),
            "sqlite:///srv/booking/database/booking.db?mode=rwc"
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite:///tmp/x.db?cache=shared", base, false).unwrap(),
            "sqlite:///tmp/x.db?cache=shared&mode=rwc"
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite:///tmp/x.db?mode=ro", base, false).unwrap(),
            "sqlite:///tmp/x.db?mode=ro"
        );
    }

    #[test]
    fn bad_dsns_are_rejected() {
        let base = Path::new("/srv/booking");
        assert!(absolutize_sqlite_dsn("postgres://localhost/db", base, false).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", base, false).is_err());

        let cfg = DatabaseConfig {
            url: "postgresql://localhost/nonexistent".into(),
            max_conns: None,
            busy_timeout_ms: None,
        };
        assert!(ensure_sqlite(&cfg).is_err());
    }

    #[test]
    fn bind_address_must_parse() {
        let mut server = ServerConfig::default();
        assert!(bind_addr(&server).is_ok());
        server.host = "not an address".into();
        assert!(bind_addr(&server).is_err());
    }

    #[tokio::test]
    async fn router_sets_request_id() {
        use tower::ServiceExt;

        let db = Database::connect("sqlite::memory:").await.unwrap();
        let module = Appointments::init(AppointmentsConfig::default(), db)
            .await
            .unwrap();
        let router = build_router(&module, &ServerConfig::default());

        let resp = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    }
}
